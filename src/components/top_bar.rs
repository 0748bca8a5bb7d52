use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use super::use_app_context;
use crate::session::LogoutOutcome;

#[component]
pub fn TopBar() -> Element {
    let app_ctx = use_app_context();
    let session_state = app_ctx.session_state;
    let session = app_ctx.session.clone();
    let mut logging_out = use_signal(|| false);

    let user_state = session_state.read().user().cloned();

    let on_logout = move |_: MouseEvent| {
        let session = session.clone();
        logging_out.set(true);
        spawn(async move {
            match session.logout().await {
                LogoutOutcome::Notified => info!("Logged out"),
                LogoutOutcome::NoToken => info!("Logged out without a stored token"),
                LogoutOutcome::NotifyFailed(err) => {
                    warn!("Logged out locally; server notification failed: {err}")
                }
            }
            logging_out.set(false);
        });
    };

    rsx! {
        nav { class: "navbar",
            div { class: "nav-brand", "Photo Share" }
            div { class: "nav-links",
                if let Some(user) = user_state.as_ref() {
                    span { class: "nav-user", "Hi, " {user.display_name()} }
                    button {
                        class: "btn-small btn-secondary",
                        disabled: *logging_out.read(),
                        onclick: on_logout,
                        "Log out"
                    }
                } else {
                    span { class: "nav-user", "Please log in" }
                }
            }
        }
    }
}
