//! Error taxonomy for API calls
//!
//! Every operation returns [`Error`]. Non-2xx responses are classified by an
//! [`ErrorHandler`]; the HTTP client falls back to [`DefaultErrorHandler`]
//! when no specialized handler is configured.

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

use crate::kube::StatusError;

/// Result alias used throughout the SDK
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the HTTP client and endpoint clients
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The composed request URL was not a valid absolute URL
    #[error("invalid request target {target:?}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    /// A header value contained characters not allowed on the wire
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// DNS, connection, TLS or executor failure
    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller's cancellation token fired before or during dispatch
    #[error("request cancelled")]
    Cancelled,

    /// Non-2xx response classified by the default handler
    #[error("API request failed: {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Non-2xx response carrying a structured status payload
    #[error(transparent)]
    Status(Box<StatusError>),

    /// A successful response whose body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A required parameter was not supplied; no request was made
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A response decoded to a different kind than the operation returns
    #[error("expected {expected} in response, got {found}")]
    UnexpectedKind { expected: &'static str, found: String },

    /// A kubernetes-shaped body named a kind nothing is registered for
    #[error("no decoder registered for {api_version}, Kind={kind}")]
    UnregisteredKind { api_version: String, kind: String },
}

impl Error {
    /// HTTP status of a protocol error, if this is one
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Status(err) => StatusCode::from_u16(err.code).ok(),
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Reason phrase of a protocol error (`"Not Found"`, `"InternalError"`)
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::Api { status, .. } => status.canonical_reason(),
            Error::Status(err) => Some(err.reason.as_str()),
            _ => None,
        }
    }

    /// True if the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<StatusError> for Error {
    fn from(err: StatusError) -> Self {
        Error::Status(Box::new(err))
    }
}

/// Outcome of an [`ErrorHandler`]
#[derive(Debug)]
pub enum Handled {
    /// The response is an error
    Error(Error),
    /// Not an error after all; decode this body as a success
    Passthrough(Bytes),
}

/// Translates a non-2xx response into an error
///
/// Implementations may inspect the body and must either produce an error or
/// hand the body back so the caller decodes it as a success.
pub trait ErrorHandler: Send + Sync + std::fmt::Debug {
    fn handle(&self, status: StatusCode, body: Bytes) -> Handled;
}

/// Reads the body into an [`Error::Api`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle(&self, status: StatusCode, body: Bytes) -> Handled {
        Handled::Error(Error::Api {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// Format an API error for display
/// Security: generic messages avoid echoing raw response bodies to users
pub fn format_error(error: &Error) -> String {
    if let Error::Status(status) = error {
        if !status.message.is_empty() {
            return format!("{}: {}", status.reason, status.message);
        }
    }

    match error.status_code() {
        Some(StatusCode::UNAUTHORIZED) => {
            return "Authentication failed. Run 'up login' first.".to_string();
        }
        Some(StatusCode::FORBIDDEN) => {
            return "Permission denied. Check your organization role.".to_string();
        }
        Some(StatusCode::NOT_FOUND) => return "Resource not found.".to_string(),
        Some(StatusCode::CONFLICT) => {
            return "Resource conflict. The resource may already exist or be in use.".to_string();
        }
        Some(StatusCode::TOO_MANY_REQUESTS) => {
            return "Rate limit exceeded. Please try again later.".to_string();
        }
        Some(StatusCode::BAD_REQUEST) => {
            return "Invalid request. Check your parameters.".to_string();
        }
        Some(s) if s.is_server_error() => {
            return "Upbound API temporarily unavailable. Please try again.".to_string();
        }
        _ => {}
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
