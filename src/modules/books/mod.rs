pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_db::Database;
use shelf_kernel::{InitCtx, Migration, Module};

use crate::utils::envelope_response;

/// Book catalogue mounted under `/api/books`
pub struct BooksModule {
    db: Database,
}

impl BooksModule {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.db.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);
        let book_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": envelope_response("Every book, or data 0 when the table is empty"),
                            "500": envelope_response("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": book_body.clone(),
                        "responses": {
                            "201": envelope_response("Created book including its id"),
                            "400": envelope_response("title or author missing"),
                            "500": envelope_response("Internal server error")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": envelope_response("The book"),
                            "400": envelope_response("id is not an integer"),
                            "404": envelope_response("No such book")
                        }
                    },
                    "put": {
                        "summary": "Overwrite a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "requestBody": book_body,
                        "responses": {
                            "200": envelope_response("Updated"),
                            "400": envelope_response("title or author missing"),
                            "404": envelope_response("No such book")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": envelope_response("Deleted"),
                            "404": envelope_response("No such book")
                        }
                    }
                },
                "/delete": {
                    "delete": {
                        "summary": "Delete several books",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BatchDelete" }
                                }
                            }
                        },
                        "responses": {
                            "200": envelope_response("Message carries the number of ids requested"),
                            "400": envelope_response("book_ids missing or empty")
                        }
                    }
                },
                "/delete-all-books": {
                    "delete": {
                        "summary": "Delete every book",
                        "tags": ["Books"],
                        "responses": {
                            "200": envelope_response("Table emptied"),
                            "500": envelope_response("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" }
                        },
                        "required": ["id", "title", "author"]
                    },
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" }
                        },
                        "required": ["title", "author"]
                    },
                    "BatchDelete": {
                        "type": "object",
                        "properties": {
                            "book_ids": {
                                "type": "array",
                                "items": { "type": "integer", "format": "int64" }
                            }
                        },
                        "required": ["book_ids"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_books",
            up: store::CREATE_BOOKS_TABLE,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(db: &Database) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(db.clone()))
}
