//! Banner for upload and generation errors.

use leptos::prelude::*;
use luma::session::Session;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let message = move || session.with(|s| s.error().map(str::to_owned));

    view! {
        {move || {
            message()
                .map(|text| {
                    view! {
                        <div class="error-banner" role="alert">
                            <span class="error-banner__icon">"!"</span>
                            <span class="error-banner__text">{text}</span>
                        </div>
                    }
                })
        }}
    }
}
