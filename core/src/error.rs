//! Error types for the posts API client.
//!
//! # Design
//! `ApiError` describes what went wrong with a single response and is
//! produced by the `PostsClient` parse methods. `TransportError` comes from
//! whatever executes the request. `ClientError` is the operation-level
//! taxonomy surfaced by `ProductListClient`: either the request was never
//! sent (`Validation`) or it failed on the way (`Network`).

use thiserror::Error;

/// Errors returned by `PostsClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// The request could not be carried to the server or back.
#[derive(Debug, Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

/// Failure of a request once it was handed to the network layer.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Operation-level error returned by `ProductListClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required local input was empty; nothing was sent.
    #[error("missing required field: {field}")]
    Validation { field: &'static str },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        ClientError::Network(err.into())
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        ClientError::Network(err.into())
    }
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}
