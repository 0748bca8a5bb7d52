use thiserror::Error;

/// Errors produced by the API client and the token store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server rejected the bearer token (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-2xx response.
    #[error("HTTP error status: {status}")]
    Http { status: u16 },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be parsed or the request body could not be built.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Signing in was attempted while the session was not anonymous.
    #[error("cannot sign in while session is {0}")]
    NotAnonymous(&'static str),

    /// localStorage is missing or refused the operation.
    #[error("token storage unavailable: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
