use gloo_net::http::{Request, RequestBuilder};
use web_sys::{window, RequestCredentials, Storage};

use super::{ApiRequest, ApiResponse, HttpTransport, Method, TokenStore};
use crate::error::ApiError;

/// `fetch`-backed transport. Cookies are passed through for CORS.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        builder = builder.credentials(RequestCredentials::Include);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Token kept in `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<Storage, ApiError> {
        let window = window().ok_or_else(|| ApiError::Storage("no window object".into()))?;
        window
            .local_storage()
            .map_err(|_| ApiError::Storage("cannot access localStorage".into()))?
            .ok_or_else(|| ApiError::Storage("localStorage unavailable".into()))
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn get_token(&self) -> Option<String> {
        let storage = Self::storage().ok()?;
        storage.get_item(&self.key).ok()?
    }

    fn set_token(&self, token: &str) -> Result<(), ApiError> {
        Self::storage()?
            .set_item(&self.key, token)
            .map_err(|_| ApiError::Storage("cannot save token".into()))
    }

    fn clear_token(&self) -> Result<(), ApiError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|_| ApiError::Storage("cannot remove token".into()))
    }
}
