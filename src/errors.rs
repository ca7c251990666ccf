use axum::http::StatusCode;
use std::fmt;

/// Failure to get a usable answer out of the backend.
#[derive(Debug)]
pub enum FetchError {
    Transport { url: String, msg: String },
    Status { url: String, status: u16 },
    Decode { url: String, msg: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport { url, msg } => write!(f, "request to {url} failed: {msg}"),
            FetchError::Status { url, status } => write!(f, "{url} answered with status {status}"),
            FetchError::Decode { url, msg } => write!(f, "unreadable body from {url}: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
