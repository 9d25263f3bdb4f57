//! Landing view shown until a room photo is loaded.

use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::upload_button::UploadButton;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section class="hero">
            <h1 class="hero__title">
                "Redesign your room in " <span class="hero__accent">"seconds"</span> "."
            </h1>
            <p class="hero__lead">
                "Upload a photo of your space and let LUMA reimagine it in six distinct interior design styles."
            </p>
            <ErrorBanner/>
            <UploadButton label="Upload Room Photo"/>
            <ul class="hero__features">
                <li>"AI Powered"</li>
                <li>"Photorealistic"</li>
                <li>"Shop the Look"</li>
            </ul>
        </section>
    }
}
