use dioxus::prelude::*;

use crate::components::use_session;
use crate::models::UserDetail as UserDetailModel;
use crate::Route;

#[component]
pub fn UserDetail(user_id: String) -> Element {
    let session = use_session();
    let mut detail = use_signal(|| None::<UserDetailModel>);
    let mut error = use_signal(|| None::<String>);

    // Re-run when the route parameter changes
    use_effect(use_reactive!(|(user_id,)| {
        let session = session.clone();
        spawn(async move {
            let path = format!("/user/{user_id}");
            match session.client().fetch_model::<UserDetailModel>(&path).await {
                Ok(user) => {
                    detail.set(Some(user));
                    error.set(None);
                }
                Err(e) if e.is_unauthorized() => {}
                Err(e) => {
                    detail.set(None);
                    error.set(Some(format!("Failed to load user: {e}")));
                }
            }
        });
    }));

    rsx! {
        div { class: "user-detail",
            if let Some(err) = error.read().as_ref() {
                div { class: "error-message", "{err}" }
            }

            if let Some(user) = detail.read().as_ref() {
                h1 { "{user.first_name} {user.last_name}" }
                dl {
                    dt { "Location" }
                    dd { "{user.location}" }
                    dt { "Occupation" }
                    dd { "{user.occupation}" }
                    dt { "Description" }
                    dd { "{user.description}" }
                }
                Link {
                    to: Route::UserPhotos { user_id: user.id.clone() },
                    button { class: "btn-primary", "View photos" }
                }
            } else if error.read().is_none() {
                div { class: "loading-message", "Loading..." }
            }
        }
    }
}
