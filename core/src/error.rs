//! Error types for the RGB REST client.
//!
//! # Design
//! `ApiError` gets its own type because callers frequently distinguish "the
//! service rejected my request" from "the call could not be completed." It is
//! carried by `ClientError::Api`; every other variant describes a failure to
//! complete the call or a response that breaks the success envelope contract.

use thiserror::Error;

use crate::http::HttpMethod;

/// A non-2xx response returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Error returned from REST API endpoint: [{}] {}",
    .http_status_code,
    detail(.api_error_message, .http_status_message)
)]
pub struct ApiError {
    pub http_status_code: u16,
    pub http_status_message: String,
    /// The `message` field of the error body, when the service sent one.
    pub api_error_message: Option<String>,
}

impl ApiError {
    pub fn new(
        http_status_code: u16,
        http_status_message: impl Into<String>,
        api_error_message: Option<String>,
    ) -> Self {
        Self {
            http_status_code,
            http_status_message: http_status_message.into(),
            api_error_message,
        }
    }
}

fn detail<'a>(api_error_message: &'a Option<String>, http_status_message: &'a str) -> &'a str {
    api_error_message.as_deref().unwrap_or(http_status_message)
}

/// Errors delivered by every client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP call could not be completed.
    #[error("Error calling {method} request: {message}")]
    Transport { method: HttpMethod, message: String },

    /// The response body is not valid JSON.
    #[error("Error reading {method} request response: {message}")]
    Decode { method: HttpMethod, message: String },

    /// The service answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx response whose body is not a success envelope.
    #[error("Inconsistent successful {method} request response: {body}")]
    Protocol { method: HttpMethod, body: String },

    /// The envelope's `data` does not have the shape the operation returns.
    #[error("Unexpected {method} request response data: {message}")]
    UnexpectedData { method: HttpMethod, message: String },

    #[error("Error serializing request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operation was torn down before it could deliver a result.
    #[error("Request dropped before completion")]
    Dropped,

    /// The operation was started outside a tokio runtime.
    #[error("Error starting request: {0}")]
    NoRuntime(String),
}

impl ClientError {
    pub fn is_api_error(&self) -> bool {
        matches!(self, ClientError::Api(_))
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
