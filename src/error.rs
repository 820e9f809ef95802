// Client error envelope
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Category of a failed call, normalized before it reaches any view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    // Request never produced an HTTP response
    Transport,

    // 400 Bad Request
    BadRequest,

    // 401 Unauthorized
    Unauthorized,

    // 403 Forbidden
    Forbidden,

    // 404 Not Found
    NotFound,

    // 409 Conflict
    Conflict,

    // 422 Unprocessable Entity
    UnprocessableEntity,

    // 429 Too Many Requests
    TooManyRequests,

    // 5xx and anything else non-2xx
    Server,

    // 2xx with a body we could not decode
    Decode,

    // Rejected on the client before any request was made
    Validation,

    // Local session or config storage failed
    Storage,
}

impl ErrorKind {
    /// Map a non-success HTTP status onto a kind
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::UnprocessableEntity,
            429 => ErrorKind::TooManyRequests,
            _ => ErrorKind::Server,
        }
    }

    /// Stable code for JSON output and scripting
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "TRANSPORT_ERROR",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            ErrorKind::TooManyRequests => "TOO_MANY_REQUESTS",
            ErrorKind::Server => "SERVER_ERROR",
            ErrorKind::Decode => "DECODE_ERROR",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Storage => "STORAGE_ERROR",
        }
    }
}

/// Every failure the client surfaces: a kind plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    /// Set when `message` was read from the response body rather than synthesized
    pub server_message: bool,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            server_message: false,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Build the envelope for a non-2xx response.
    ///
    /// The body may be anything: JSON with a `message` or `error` string,
    /// JSON of another shape, plain text, or nothing. Only the first two
    /// contribute a message; everything else falls back to a status line.
    pub fn from_response(status: u16, body: &str) -> Self {
        let extracted = extract_message(body);
        let server_message = extracted.is_some();
        let message = extracted.unwrap_or_else(|| format!("Request failed with status code {}", status));

        Self {
            kind: ErrorKind::from_status(status),
            message,
            status: Some(status),
            server_message,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Message to show the user, or `fallback` when the server gave nothing useful.
    /// A synthesized status line counts as nothing useful.
    pub fn user_message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let synthesized = self.status.is_some() && !self.server_message;
        if synthesized || self.message.trim().is_empty() {
            fallback
        } else {
            &self.message
        }
    }

    /// JSON form used by `--json` output
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "success": false,
            "error": self.message,
            "error_code": self.kind.error_code(),
        });

        if let Some(status) = self.status {
            response["status"] = json!(status);
        }

        response
    }
}

/// Pull a readable message out of an error body without ever failing
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::decode(format!("Unexpected response from server: {}", err))
        } else {
            ClientError::transport(format!("Network error: {}", err))
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::decode(err.to_string())
    }
}
