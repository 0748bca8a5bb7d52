//! HTTP access to the photo-share server.
//!
//! Every data view goes through [`ApiClient::fetch_model`], which attaches the
//! bearer token and reports a rejected token through the session-invalidated
//! hook instead of reloading the page.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

#[cfg(test)]
pub mod testing;

mod browser;

pub use browser::{GlooTransport, LocalStorageTokenStore};

use std::rc::Rc;

use dioxus::logger::tracing::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{CurrentUser, UserDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully built request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, url: String, token: Option<&str>) -> Self {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        Self {
            method,
            url,
            headers,
            body: None,
        }
    }

    fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Only failures to get a response at all are errors here; status handling
/// belongs to [`ApiClient`].
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Persistent home of the bearer token.
pub trait TokenStore {
    fn get_token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> Result<(), ApiError>;
    fn clear_token(&self) -> Result<(), ApiError>;
}

// ============ Request bodies ============

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: CurrentUser,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub login_name: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub description: String,
    pub occupation: String,
}

type InvalidatedHook = Rc<dyn Fn()>;

pub struct ApiClient<T, S> {
    config: ClientConfig,
    transport: T,
    store: S,
    on_unauthorized: Option<InvalidatedHook>,
}

impl<T: HttpTransport, S: TokenStore> ApiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, store: S) -> Self {
        Self {
            config,
            transport,
            store,
            on_unauthorized: None,
        }
    }

    /// Installs the callback raised whenever a data request comes back 401.
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn token_store(&self) -> &S {
        &self.store
    }

    /// GET `<api base><path>` with the stored token and decode the JSON body.
    ///
    /// # Errors
    ///
    /// `Unauthorized` after clearing the token and raising the invalidation
    /// hook, `Http` for other non-2xx statuses, `Transport`/`Decode` otherwise.
    pub async fn fetch_model<M: DeserializeOwned>(&self, path: &str) -> Result<M, ApiError> {
        let result = self.fetch_model_inner(path).await;
        if let Err(err) = &result {
            error!("Error fetching model {path}: {err}");
        }
        result
    }

    async fn fetch_model_inner<M: DeserializeOwned>(&self, path: &str) -> Result<M, ApiError> {
        let token = self.store.get_token();
        let request = ApiRequest::new(Method::Get, self.config.api_url(path), token.as_deref());
        let response = self.transport.send(request).await?;

        if response.status == 401 {
            self.invalidate_session();
            return Err(ApiError::Unauthorized);
        }
        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status,
            });
        }
        response.json()
    }

    fn invalidate_session(&self) {
        if let Err(err) = self.store.clear_token() {
            warn!("Failed to clear rejected token: {err}");
        }
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    /// Who-am-I. Leaves token handling to the caller.
    pub async fn current_user(&self, token: &str) -> Result<CurrentUser, ApiError> {
        let request = ApiRequest::new(Method::Get, self.config.admin_url("/current"), Some(token));
        let response = self.transport.send(request).await?;
        debug!("Who-am-I response status: {}", response.status);

        match response.status {
            401 => Err(ApiError::Unauthorized),
            status if !response.ok() => Err(ApiError::Http { status }),
            _ => response.json(),
        }
    }

    /// Tells the server the token is being discarded.
    pub async fn notify_logout(&self, token: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Post, self.config.admin_url("/logout"), Some(token));
        let response = self.transport.send(request).await?;
        if response.ok() {
            Ok(())
        } else {
            Err(ApiError::Http {
                status: response.status,
            })
        }
    }

    /// Exchanges credentials for a token. Persisting the token is up to the caller.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request =
            ApiRequest::new(Method::Post, self.config.admin_url("/login"), None).with_json(req)?;
        let response = self.transport.send(request).await?;

        match response.status {
            401 => Err(ApiError::Unauthorized),
            status if !response.ok() => Err(ApiError::Http { status }),
            _ => response.json(),
        }
    }

    /// Creates an account. Does not sign the new user in.
    pub async fn register(&self, req: &RegisterRequest) -> Result<UserDetail, ApiError> {
        let request =
            ApiRequest::new(Method::Post, self.config.api_url("/user"), None).with_json(req)?;
        let response = self.transport.send(request).await?;

        if response.ok() {
            response.json()
        } else {
            Err(ApiError::Http {
                status: response.status,
            })
        }
    }
}
