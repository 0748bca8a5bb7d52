#![allow(non_snake_case)]

mod api;
mod components;
mod config;
mod error;
mod models;
mod pages;
mod session;

use std::rc::Rc;

use api::{GlooTransport, LocalStorageTokenStore};
use components::{AppContext, BrowserSession, TopBar};
use config::ClientConfig;
use dioxus::logger::tracing::{info, Level};
use dioxus::prelude::*;
use pages::*;
use session::SessionState;

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to initialise logger");
    info!("Photo share client starting...");

    launch(App);
}

#[component]
fn App() -> Element {
    let session_state = use_signal(SessionState::default);
    let session = use_hook(|| {
        let config = ClientConfig::from_build_env();
        let token_key = config.token_key.clone();
        let session = Rc::new(BrowserSession::new(
            config,
            GlooTransport,
            LocalStorageTokenStore::new(token_key),
        ));
        session.subscribe(move |state| {
            let mut mirror = session_state;
            mirror.set(state.clone());
        });
        session
    });

    {
        let session = session.clone();
        use_context_provider(|| AppContext {
            session_state,
            session,
        });
    }

    let mut init_attempted = use_signal(|| false);
    use_effect(move || {
        if *init_attempted.peek() {
            return;
        }
        init_attempted.set(true);

        let session = session.clone();
        spawn(async move {
            info!("Checking login status...");
            session.bootstrap().await;
        });
    });

    rsx! {
        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Layout)]
        #[route("/")]
        Home {},
        #[route("/users")]
        Users {},
        #[route("/users/:user_id")]
        UserDetail { user_id: String },
        #[route("/photos/:user_id")]
        UserPhotos { user_id: String },
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    let app_ctx = components::use_app_context();
    let state = app_ctx.session_state.read().clone();

    if state.is_loading() {
        return rsx! {
            div { class: "page-container",
                style { {include_str!("../assets/main.css")} }
                div {
                    style: "display: flex; justify-content: center; align-items: center; height: 100vh;",
                    h2 { "Loading..." }
                }
            }
        };
    }

    rsx! {
        div { class: "app-container",
            style { {include_str!("../assets/main.css")} }

            TopBar {}

            // Anonymous visitors never reach the routed views
            if state.user().is_none() {
                main { class: "main-content",
                    LoginRegister {}
                }
            } else {
                div { class: "main-grid",
                    aside { class: "sidebar",
                        UserList {}
                    }
                    main { class: "main-content",
                        Outlet::<Route> {}
                    }
                }
            }

            footer { class: "footer",
                "© 2025 Photo Share"
            }
        }
    }
}

#[component]
fn Users() -> Element {
    rsx! {
        UserList {}
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        RedirectToSelf {}
    }
}

#[allow(unused_variables)]
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    rsx! {
        RedirectToSelf {}
    }
}

/// Sends `/` and unknown paths to the current user's detail page.
#[component]
fn RedirectToSelf() -> Element {
    let nav = use_navigator();
    let user = components::use_current_user();

    use_effect(move || {
        if let Some(user) = user.as_ref() {
            nav.replace(Route::UserDetail {
                user_id: user.id.clone(),
            });
        }
    });

    rsx! {
        div { class: "page-container",
            p { "Redirecting..." }
        }
    }
}
