//! The metav1 `Status` kind and the error it becomes

use bytes::Bytes;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::meta::TypeMeta;
use crate::http::{Error, ErrorHandler, Handled};

/// A Kubernetes status object
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Status {
    #[serde(flatten)]
    pub types: TypeMeta,

    /// Status of the operation
    ///
    /// One of: `Success` or `Failure`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSummary>,

    /// Suggested HTTP return code (0 if unset)
    #[serde(default, skip_serializing_if = "is_u16_zero")]
    pub code: u16,

    /// A human-readable description of the status of this operation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// A machine-readable description of why this operation is in the `Failure` status.
    ///
    /// A reason clarifies an HTTP status code but does not override it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

fn is_u16_zero(v: &u16) -> bool {
    *v == 0
}

impl Status {
    /// Returns a successful `Status`
    pub fn success() -> Self {
        Status {
            types: TypeMeta::new(super::META_V1, "Status"),
            status: Some(StatusSummary::Success),
            ..Status::default()
        }
    }

    /// Returns an unsuccessful `Status`
    pub fn failure(message: &str, reason: &str) -> Self {
        Status {
            types: TypeMeta::new(super::META_V1, "Status"),
            status: Some(StatusSummary::Failure),
            message: message.to_string(),
            reason: reason.to_string(),
            ..Status::default()
        }
    }

    /// Sets an explicit HTTP status code
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Checks if this `Status` represents success
    pub fn is_success(&self) -> bool {
        self.status == Some(StatusSummary::Success)
    }

    pub fn is_failure(&self) -> bool {
        self.status == Some(StatusSummary::Failure)
    }
}

/// Overall status of the operation - whether it succeeded or not
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusSummary {
    Success,
    Failure,
}

/// Extended data associated with a status reason
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusCause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u32>,
}

/// One cause of a failure
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct StatusCause {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
}

/// A failed `Status`, surfaced as an error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", display_status(.message, .reason))]
pub struct StatusError {
    pub reason: String,
    pub code: u16,
    pub message: String,
    pub details: Option<StatusDetails>,
}

impl StatusError {
    /// Build from a decoded status, filling gaps from the HTTP status
    pub fn from_status(status: Status, http_status: Option<StatusCode>) -> Self {
        let code = match (status.code, http_status) {
            (0, Some(s)) => s.as_u16(),
            (code, _) => code,
        };
        let reason = if status.reason.is_empty() {
            reason_for_code(code).to_string()
        } else {
            status.reason
        };
        Self {
            reason,
            code,
            message: status.message,
            details: status.details,
        }
    }
}

fn display_status(message: &str, reason: &str) -> String {
    if message.is_empty() {
        reason.to_string()
    } else {
        format!("{}: {}", message, reason)
    }
}

/// The reason the API server would report for a bare HTTP status
pub fn reason_for_code(code: u16) -> &'static str {
    match code {
        400 => "BadRequest",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "NotFound",
        405 => "MethodNotAllowed",
        406 => "NotAcceptable",
        409 => "Conflict",
        410 => "Gone",
        413 => "RequestEntityTooLarge",
        415 => "UnsupportedMediaType",
        422 => "Invalid",
        429 => "TooManyRequests",
        500 => "InternalError",
        503 => "ServiceUnavailable",
        504 => "Timeout",
        _ => "Unknown",
    }
}

/// Error handler for kubernetes-shaped endpoints
///
/// Decodes the body as a `Status`. A `Success` status is not an error and
/// its body is handed back for decoding; anything else becomes a
/// [`StatusError`]. Bodies that are not a status still produce one, with the
/// raw body as the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusErrorHandler;

impl ErrorHandler for StatusErrorHandler {
    fn handle(&self, http_status: StatusCode, body: Bytes) -> Handled {
        match serde_json::from_slice::<Status>(&body) {
            Ok(status) if status.is_success() => Handled::Passthrough(body),
            Ok(status) if status.status.is_some() || status.types.kind == "Status" => {
                Handled::Error(StatusError::from_status(status, Some(http_status)).into())
            }
            _ => {
                let status = Status {
                    message: String::from_utf8_lossy(&body).trim().to_string(),
                    ..Status::default()
                };
                Handled::Error(Error::from(StatusError::from_status(status, Some(http_status))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(code: u16, body: &'static str) -> Handled {
        StatusErrorHandler.handle(StatusCode::from_u16(code).unwrap(), Bytes::from_static(body.as_bytes()))
    }

    #[test]
    fn test_failure_status_becomes_error() {
        let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","code":500,"reason":"InternalError","message":"boom"}"#;
        let Handled::Error(Error::Status(err)) = handle(500, body) else {
            panic!("expected a status error");
        };
        assert_eq!(err.reason, "InternalError");
        assert_eq!(err.code, 500);
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn test_success_status_is_replayed() {
        let body = r#"{"kind":"Status","apiVersion":"v1","status":"Success","code":200}"#;
        let Handled::Passthrough(replayed) = handle(202, body) else {
            panic!("success status must not be an error");
        };
        assert_eq!(replayed.as_ref(), body.as_bytes());
    }

    #[test]
    fn test_non_status_body_uses_http_status() {
        let Handled::Error(Error::Status(err)) = handle(404, "page not found\n") else {
            panic!("expected a status error");
        };
        assert_eq!(err.code, 404);
        assert_eq!(err.reason, "NotFound");
        assert_eq!(err.message, "page not found");
    }

    #[test]
    fn test_display_without_message() {
        let Handled::Error(err) = handle(404, "") else {
            panic!("expected a status error");
        };
        assert_eq!(err.to_string(), "NotFound");

        let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","code":409,"reason":"AlreadyExists","message":"space exists"}"#;
        let Handled::Error(err) = handle(409, body) else {
            panic!("expected a status error");
        };
        assert_eq!(err.to_string(), "space exists: AlreadyExists");
    }

    #[test]
    fn test_status_roundtrip_shape() {
        let status = Status::failure("space not ready", "Conflict").with_code(409);
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "Status",
                "status": "Failure",
                "code": 409,
                "message": "space not ready",
                "reason": "Conflict"
            })
        );
        assert!(status.is_failure());
        assert!(Status::success().is_success());
    }
}
