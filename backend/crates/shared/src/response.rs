//! Response Envelope
//!
//! Every HTTP response body has the same four keys:
//!
//! ```json
//! { "ok": true, "meta": null, "data": { ... }, "errors": null }
//! ```
//!
//! `ok` follows the status code (2xx only). `data` and `errors` never
//! appear together.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

/// Uniform JSON envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub meta: Option<Value>,
    pub data: Option<T>,
    pub errors: Option<Value>,
    #[serde(skip)]
    status: u16,
}

/// `{"message": "..."}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub message: Cow<'static, str>,
}

impl<T> ApiResponse<T> {
    /// 200 with `data`
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            meta: None,
            data: Some(data),
            errors: None,
            status: 200,
        }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Override the status; a non-2xx status drops `data`
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self.ok = is_success(status);
        if !self.ok {
            self.data = None;
        }
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }
}

impl ApiResponse<Message> {
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::ok(Message {
            message: message.into(),
        })
    }

    /// `{"message": "ok"}`
    pub fn ok_message() -> Self {
        Self::message("ok")
    }
}

impl ApiResponse<()> {
    /// Failure envelope; a 2xx status here is a caller bug and is kept as-is
    pub fn failure(status: u16, errors: Value) -> Self {
        let ok = is_success(status);
        Self {
            ok,
            meta: None,
            data: None,
            errors: if ok { None } else { Some(errors) },
            status,
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
