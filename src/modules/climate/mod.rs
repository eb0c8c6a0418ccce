pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_db::Database;
use shelf_kernel::{InitCtx, Migration, Module};

use crate::utils::envelope_response;

/// Rooms and their temperature readings, mounted directly under `/api`
pub struct ClimateModule {
    db: Database,
}

impl ClimateModule {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for ClimateModule {
    fn name(&self) -> &'static str {
        "climate"
    }

    fn mount_path(&self) -> String {
        "/api".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "climate module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.db.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/room": {
                    "post": {
                        "summary": "Create a room",
                        "tags": ["Climate"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "name": { "type": "string" } },
                                        "required": ["name"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": envelope_response("Room created; data carries its id"),
                            "400": envelope_response("name missing")
                        }
                    }
                },
                "/temperature": {
                    "post": {
                        "summary": "Record a temperature reading",
                        "tags": ["Climate"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ReadingPayload" }
                                }
                            }
                        },
                        "responses": {
                            "201": envelope_response("Reading stored"),
                            "400": envelope_response("room or temperature missing, or bad date"),
                            "500": envelope_response("Room does not exist or database failure")
                        }
                    }
                },
                "/average": {
                    "get": {
                        "summary": "Average temperature over all readings",
                        "tags": ["Climate"],
                        "responses": {
                            "200": envelope_response("data carries average and days"),
                            "500": envelope_response("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "ReadingPayload": {
                        "type": "object",
                        "properties": {
                            "room": { "type": "integer", "format": "int64" },
                            "temperature": { "type": "number" },
                            "date": {
                                "type": "string",
                                "description": "MM-DD-YYYY HH:MM:SS, UTC; defaults to now"
                            }
                        },
                        "required": ["room", "temperature"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![
            Migration {
                id: "001_create_rooms",
                up: store::CREATE_ROOMS_TABLE,
            },
            Migration {
                id: "002_create_temperatures",
                up: store::CREATE_TEMPERATURES_TABLE,
            },
        ]
    }
}

pub fn create_module(db: &Database) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(ClimateModule::new(db.clone()))
}
