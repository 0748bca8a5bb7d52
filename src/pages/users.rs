use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::components::use_session;
use crate::models::UserSummary;
use crate::Route;

/// Sidebar and `/users` page: every user, linked to their detail view.
#[component]
pub fn UserList() -> Element {
    let session = use_session();
    let mut users = use_signal(Vec::<UserSummary>::new);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);
    let loading_visible = use_signal(|| false);

    // Only show the spinner for slow responses
    {
        let loading = loading;
        let mut loading_visible = loading_visible;
        use_effect(move || {
            if *loading.read() {
                let loading = loading;
                let mut loading_visible = loading_visible;
                spawn(async move {
                    TimeoutFuture::new(180).await;
                    if *loading.read() {
                        loading_visible.set(true);
                    }
                });
            } else {
                loading_visible.set(false);
            }
        });
    }

    let load_users = move || {
        let session = session.clone();
        spawn(async move {
            loading.set(true);
            match session.client().fetch_model::<Vec<UserSummary>>("/user/list").await {
                Ok(user_list) => {
                    users.set(user_list);
                    error.set(None);
                }
                // The session has already collapsed to the login view.
                Err(e) if e.is_unauthorized() => {}
                Err(e) => {
                    error.set(Some(format!("Failed to load users: {e}")));
                }
            }
            loading.set(false);
        });
    };

    use_effect(move || {
        load_users();
    });

    rsx! {
        div { class: "user-list",
            h2 { "Users" }

            if *loading_visible.read() {
                div { class: "loading-message", "Loading..." }
            }

            if let Some(err) = error.read().as_ref() {
                div { class: "error-message", "{err}" }
            }

            ul {
                for user in users.read().iter() {
                    li { key: "{user.id}",
                        Link {
                            to: Route::UserDetail { user_id: user.id.clone() },
                            {user.full_name()}
                        }
                    }
                }
            }
        }
    }
}
