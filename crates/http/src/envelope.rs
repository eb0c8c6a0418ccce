//! Uniform JSON payload returned by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// `{statusError, data?, message?, messageError?}`
///
/// `data` is dropped when absent; the message fields are dropped when absent
/// or empty. A present `data` is always written, even a literal `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub message_error: Option<String>,
}

fn is_blank(text: &Option<String>) -> bool {
    text.as_deref().map_or(true, str::is_empty)
}

impl Envelope {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failure(message_error: impl Into<String>) -> Self {
        Self {
            status_error: true,
            message_error: Some(message_error.into()),
            ..Self::default()
        }
    }
}

/// An envelope paired with the HTTP status it is sent with.
#[derive(Debug)]
pub struct Reply {
    status: StatusCode,
    envelope: Envelope,
}

impl Reply {
    pub fn new(status: StatusCode, envelope: Envelope) -> Self {
        Self { status, envelope }
    }

    /// 200 success
    pub fn ok() -> Self {
        Self::new(StatusCode::OK, Envelope::success())
    }

    /// 201 success
    pub fn created() -> Self {
        Self::new(StatusCode::CREATED, Envelope::success())
    }

    /// Attach a serializable payload.
    pub fn with_data<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self, AppError> {
        self.envelope.data = Some(serde_json::to_value(data)?);
        Ok(self)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message = Some(message.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
