//! Session lifecycle.
//!
//! `SessionManager` owns the current-user state and the API client. The client
//! reports rejected tokens through a hook that collapses the session to
//! `Anonymous`, so no view has to reload the page to resynchronize.
//!
//! STATES
//! ======
//! `Bootstrapping -> Anonymous | Authenticated`, `Anonymous -> Authenticated`
//! (login), `Authenticated -> Anonymous` (logout or any 401). Any other
//! requested transition is ignored.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::{debug, info, warn};

use crate::api::{ApiClient, HttpTransport, LoginRequest, TokenStore};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::CurrentUser;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Bootstrapping,
    Anonymous,
    Authenticated(CurrentUser),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Bootstrapping)
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    fn allows(&self, next: &SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Bootstrapping, Anonymous)
                | (Bootstrapping, Authenticated(_))
                | (Anonymous, Authenticated(_))
                | (Authenticated(_), Anonymous)
        )
    }

    fn label(&self) -> &'static str {
        match self {
            SessionState::Bootstrapping => "bootstrapping",
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticated(_) => "authenticated",
        }
    }
}

/// Result of the best-effort logout notification.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoutOutcome {
    /// The server acknowledged the logout.
    Notified,
    /// There was no token, so nothing was sent.
    NoToken,
    /// The notification failed; local state was cleared anyway.
    NotifyFailed(ApiError),
}

type Observer = Box<dyn Fn(&SessionState)>;

/// State cell shared between the manager and the client's 401 hook.
#[derive(Default)]
struct SessionCell {
    state: RefCell<SessionState>,
    observers: RefCell<Vec<Observer>>,
}

impl SessionCell {
    fn transition(&self, next: SessionState) -> bool {
        let current = self.state.borrow().clone();
        if !current.allows(&next) {
            debug!(
                "Ignoring session transition {} -> {}",
                current.label(),
                next.label()
            );
            return false;
        }

        info!("Session {} -> {}", current.label(), next.label());
        *self.state.borrow_mut() = next.clone();
        for observer in self.observers.borrow().iter() {
            observer(&next);
        }
        true
    }

    /// Applies a bootstrap result only if nothing else settled the session
    /// while the who-am-I request was in flight.
    fn settle_bootstrap(&self, next: SessionState) -> bool {
        if !self.state.borrow().is_loading() {
            debug!("Discarding bootstrap result {}; session already settled", next.label());
            return false;
        }
        self.transition(next)
    }
}

pub struct SessionManager<T, S> {
    shared: Rc<SessionCell>,
    client: ApiClient<T, S>,
}

impl<T: HttpTransport, S: TokenStore> SessionManager<T, S> {
    pub fn new(config: ClientConfig, transport: T, store: S) -> Self {
        let shared = Rc::new(SessionCell::default());
        let hook_cell = Rc::clone(&shared);
        let client = ApiClient::new(config, transport, store).on_unauthorized(move || {
            warn!("Session invalidated by server");
            hook_cell.transition(SessionState::Anonymous);
        });
        Self { shared, client }
    }

    /// Client for data views. A 401 from it ends the session.
    pub fn client(&self) -> &ApiClient<T, S> {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.shared.state.borrow().user().cloned()
    }

    /// Registers a callback run after every accepted transition.
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) {
        self.shared.observers.borrow_mut().push(Box::new(observer));
    }

    /// Startup check of the persisted token. Always settles to a determinate
    /// state; a second call is a no-op.
    pub async fn bootstrap(&self) -> SessionState {
        if !self.is_loading() {
            debug!("Bootstrap already settled");
            return self.state();
        }

        let store = self.client.token_store();
        let Some(token) = store.get_token() else {
            info!("No token found - not logged in");
            self.shared.settle_bootstrap(SessionState::Anonymous);
            return self.state();
        };

        let next = match self.client.current_user(&token).await {
            Ok(user) => {
                info!("Restored session for user {}", user.id);
                SessionState::Authenticated(user)
            }
            Err(err) => {
                if err.is_unauthorized() {
                    info!("Stored token rejected, removing it");
                } else {
                    warn!("Session check failed, removing token: {err}");
                }
                if self.is_loading() {
                    self.discard_token();
                }
                SessionState::Anonymous
            }
        };
        self.shared.settle_bootstrap(next);
        self.state()
    }

    /// Adopts a user that was already authenticated elsewhere (the login form).
    pub fn login(&self, user: CurrentUser) -> bool {
        let accepted = self.shared.transition(SessionState::Authenticated(user));
        if !accepted {
            warn!("Login ignored in state {}", self.state().label());
        }
        accepted
    }

    /// Credentials -> token -> `login`. Only valid while anonymous; session
    /// state and the stored token are untouched on failure.
    pub async fn sign_in(&self, req: &LoginRequest) -> Result<CurrentUser, ApiError> {
        self.ensure_anonymous()?;
        let login = self.client.login(req).await?;

        // The session may have moved while the request was in flight.
        self.ensure_anonymous()?;
        self.client.token_store().set_token(&login.token)?;
        if !self.login(login.user.clone()) {
            self.discard_token();
            return Err(ApiError::NotAnonymous(self.state().label()));
        }
        Ok(login.user)
    }

    fn ensure_anonymous(&self) -> Result<(), ApiError> {
        match self.state() {
            SessionState::Anonymous => Ok(()),
            other => Err(ApiError::NotAnonymous(other.label())),
        }
    }

    /// Ends the session. The server is told when possible; local cleanup
    /// happens regardless.
    pub async fn logout(&self) -> LogoutOutcome {
        let outcome = match self.client.token_store().get_token() {
            None => LogoutOutcome::NoToken,
            Some(token) => match self.client.notify_logout(&token).await {
                Ok(()) => LogoutOutcome::Notified,
                Err(err) => {
                    warn!("Logout error: {err}");
                    LogoutOutcome::NotifyFailed(err)
                }
            },
        };

        self.discard_token();
        self.shared.transition(SessionState::Anonymous);
        outcome
    }

    fn discard_token(&self) {
        if let Err(err) = self.client.token_store().clear_token() {
            warn!("Failed to clear token: {err}");
        }
    }
}
