use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use super::RegisterForm;
use crate::api;
use crate::components::use_session;

/// Shown instead of the router while nobody is logged in.
#[component]
pub fn LoginRegister() -> Element {
    let mut show_register = use_signal(|| false);

    rsx! {
        div { class: "page-container",
            if *show_register.read() {
                RegisterForm { on_done: move |_| show_register.set(false) }
                p { class: "form-switch",
                    "Already have an account? "
                    a { href: "#", onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            show_register.set(false);
                        },
                        "Log in"
                    }
                }
            } else {
                LoginForm {}
                p { class: "form-switch",
                    "New here? "
                    a { href: "#", onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            show_register.set(true);
                        },
                        "Create an account"
                    }
                }
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let mut login_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let session = use_session();

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();

        let name_val = login_name.read().trim().to_string();
        let pwd_val = password.read().clone();

        if name_val.is_empty() || pwd_val.is_empty() {
            error.set(Some("Please enter a login name and password".to_string()));
            return;
        }

        let session = session.clone();
        submitting.set(true);
        spawn(async move {
            let req = api::LoginRequest {
                login_name: name_val,
                password: pwd_val,
            };

            match session.sign_in(&req).await {
                Ok(user) => {
                    info!("User {} logged in", user.id);
                    error.set(None);
                    password.set(String::new());
                }
                Err(e) if e.is_unauthorized() => {
                    error.set(Some("Login name or password is incorrect".to_string()));
                }
                Err(e) => {
                    error.set(Some(format!("Login failed: {e}")));
                    error!("Login error: {e}");
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "form-container",
            h1 { "Log in" }

            form { onsubmit: on_submit,
                div { class: "form-group",
                    label { r#for: "login_name", "Login name:" }
                    input {
                        r#type: "text",
                        id: "login_name",
                        name: "login_name",
                        value: "{login_name}",
                        oninput: move |evt| login_name.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "password", "Password:" }
                    input {
                        r#type: "password",
                        id: "password",
                        name: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value().clone())
                    }
                }

                if let Some(err) = error.read().as_ref() {
                    div { class: "error-message", "{err}" }
                }

                div { class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "btn-primary",
                        disabled: *submitting.read(),
                        "Log in"
                    }
                }
            }
        }
    }
}
