//! Top navigation bar with the brand mark and a replace-photo control.

use leptos::prelude::*;
use luma::session::Session;

use crate::components::upload_button::UploadButton;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let has_photo = move || session.with(|s| s.original_image().is_some());

    view! {
        <nav class="nav-bar">
            <div class="nav-bar__brand">
                <span class="nav-bar__logo">"\u{1F6CB}"</span>
                <span class="nav-bar__name">"LUMA"</span>
            </div>
            <Show when=has_photo>
                <UploadButton label="New Photo" compact=true/>
            </Show>
        </nav>
    }
}
