use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use crate::api;
use crate::components::use_session;

#[component]
pub fn RegisterForm(on_done: EventHandler<()>) -> Element {
    let mut login_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut location = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut occupation = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<String>);
    let session = use_session();

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();

        let req = api::RegisterRequest {
            login_name: login_name.read().trim().to_string(),
            password: password.read().clone(),
            first_name: first_name.read().trim().to_string(),
            last_name: last_name.read().trim().to_string(),
            location: location.read().trim().to_string(),
            description: description.read().trim().to_string(),
            occupation: occupation.read().trim().to_string(),
        };

        if req.login_name.is_empty()
            || req.password.is_empty()
            || req.first_name.is_empty()
            || req.last_name.is_empty()
        {
            error.set(Some("Login name, password and full name are required".to_string()));
            return;
        }

        if req.password != *confirm_password.read() {
            error.set(Some("Passwords do not match".to_string()));
            return;
        }

        let session = session.clone();
        spawn(async move {
            match session.client().register(&req).await {
                Ok(created) => {
                    info!("Registered user {}", created.id);
                    error.set(None);
                    success.set(Some(format!(
                        "Account for {} {} created, you can log in now",
                        created.first_name, created.last_name
                    )));
                    for mut field in [
                        login_name,
                        password,
                        confirm_password,
                        first_name,
                        last_name,
                        location,
                        description,
                        occupation,
                    ] {
                        field.set(String::new());
                    }
                }
                Err(e) => {
                    success.set(None);
                    error.set(Some(format!("Registration failed: {e}")));
                    error!("Registration error: {e}");
                }
            }
        });
    };

    rsx! {
        div { class: "form-container",
            h1 { "Register" }

            form { onsubmit: on_submit,
                div { class: "form-group",
                    label { r#for: "reg_login_name", "Login name: *" }
                    input {
                        r#type: "text",
                        id: "reg_login_name",
                        value: "{login_name}",
                        oninput: move |evt| login_name.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "reg_password", "Password: *" }
                    input {
                        r#type: "password",
                        id: "reg_password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "reg_confirm", "Confirm password: *" }
                    input {
                        r#type: "password",
                        id: "reg_confirm",
                        value: "{confirm_password}",
                        oninput: move |evt| confirm_password.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "reg_first", "First name: *" }
                    input {
                        r#type: "text",
                        id: "reg_first",
                        value: "{first_name}",
                        oninput: move |evt| first_name.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "reg_last", "Last name: *" }
                    input {
                        r#type: "text",
                        id: "reg_last",
                        value: "{last_name}",
                        oninput: move |evt| last_name.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "reg_location", "Location:" }
                    input {
                        r#type: "text",
                        id: "reg_location",
                        value: "{location}",
                        oninput: move |evt| location.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "reg_occupation", "Occupation:" }
                    input {
                        r#type: "text",
                        id: "reg_occupation",
                        value: "{occupation}",
                        oninput: move |evt| occupation.set(evt.value().clone())
                    }
                }

                div { class: "form-group",
                    label { r#for: "reg_description", "Description:" }
                    textarea {
                        id: "reg_description",
                        value: "{description}",
                        oninput: move |evt| description.set(evt.value().clone())
                    }
                }

                if let Some(err) = error.read().as_ref() {
                    div { class: "error-message", "{err}" }
                }

                if let Some(msg) = success.read().as_ref() {
                    div { class: "success-message", "{msg}" }
                }

                div { class: "form-actions",
                    button { r#type: "submit", class: "btn-primary", "Register" }
                    button {
                        r#type: "button",
                        class: "btn-secondary",
                        onclick: move |_| on_done.call(()),
                        "Back to login"
                    }
                }
            }
        }
    }
}
