use std::rc::Rc;

use dioxus::prelude::*;

use crate::api::{GlooTransport, LocalStorageTokenStore};
use crate::models::CurrentUser;
use crate::session::{SessionManager, SessionState};

pub type BrowserSession = SessionManager<GlooTransport, LocalStorageTokenStore>;

#[derive(Clone)]
pub struct AppContext {
    /// Reactive mirror of the manager's state, updated on every transition.
    pub session_state: Signal<SessionState>,
    pub session: Rc<BrowserSession>,
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>()
}

pub fn use_session() -> Rc<BrowserSession> {
    use_app_context().session
}

pub fn use_current_user() -> Option<CurrentUser> {
    use_app_context().session_state.read().user().cloned()
}
