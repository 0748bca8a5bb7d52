use dioxus::prelude::*;

use crate::components::use_session;
use crate::models::{format_timestamp, Photo};
use crate::Route;

#[component]
pub fn UserPhotos(user_id: String) -> Element {
    let session = use_session();
    let mut photos = use_signal(Vec::<Photo>::new);
    let mut error = use_signal(|| None::<String>);
    let mut loaded = use_signal(|| false);

    use_effect(use_reactive!(|(user_id,)| {
        let session = session.clone();
        spawn(async move {
            loaded.set(false);
            let path = format!("/photosOfUser/{user_id}");
            match session.client().fetch_model::<Vec<Photo>>(&path).await {
                Ok(list) => {
                    photos.set(list);
                    error.set(None);
                }
                Err(e) if e.is_unauthorized() => {}
                Err(e) => {
                    photos.set(Vec::new());
                    error.set(Some(format!("Failed to load photos: {e}")));
                }
            }
            loaded.set(true);
        });
    }));

    rsx! {
        div { class: "user-photos",
            if let Some(err) = error.read().as_ref() {
                div { class: "error-message", "{err}" }
            }

            if !*loaded.read() {
                div { class: "loading-message", "Loading..." }
            } else if photos.read().is_empty() && error.read().is_none() {
                p { "No photos yet." }
            }

            for photo in photos.read().iter() {
                div { key: "{photo.id}", class: "photo-card",
                    img { src: "/images/{photo.file_name}", alt: "{photo.file_name}" }
                    div { class: "photo-meta", "Posted " {format_timestamp(&photo.date_time)} }

                    for comment in photo.comments.iter() {
                        div { key: "{comment.id}", class: "photo-comment",
                            div { class: "comment-meta",
                                Link {
                                    to: Route::UserDetail { user_id: comment.user.id.clone() },
                                    {comment.user.full_name()}
                                }
                                span { " · " {format_timestamp(&comment.date_time)} }
                            }
                            p { "{comment.comment}" }
                        }
                    }
                }
            }
        }
    }
}
