//! Main image area: the uploaded photo, the generation overlay, or the
//! before/after compare widget once a redesign exists.

#[cfg(test)]
#[path = "room_view_test.rs"]
mod room_view_test;

use leptos::prelude::*;
use luma::catalog::Style;
use luma::compare::after_label;
use luma::image::EncodedImage;
use luma::session::Session;

use crate::components::comparison_slider::ComparisonSlider;
use crate::components::error_banner::ErrorBanner;

/// Overlay text while a redesign is being generated.
pub fn generating_caption(style: Option<Style>) -> String {
    match style {
        Some(style) => format!("Designing your {style} room..."),
        None => "Designing your room...".to_owned(),
    }
}

fn data_url(image: Option<&EncodedImage>) -> String {
    image.map(EncodedImage::to_data_url).unwrap_or_default()
}

#[component]
pub fn RoomView() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    let has_redesign = move || session.with(|s| s.generated_image().is_some());
    let generating = move || session.with(Session::is_generating);

    let original = Memo::new(move |_| session.with(|s| data_url(s.original_image())));
    let generated = Memo::new(move |_| session.with(|s| data_url(s.generated_image())));
    let label = Memo::new(move |_| session.with(|s| after_label(s.selected_style())));

    let plain_view = move || {
        view! {
            <div class="room-view__frame">
                <img
                    class="room-view__image"
                    class:room-view__image--busy=generating
                    src=move || original.get()
                    alt="Original"
                />
                <Show
                    when=generating
                    fallback=|| {
                        view! {
                            <div class="room-view__hint">
                                <p class="room-view__hint-title">"Original Photo Uploaded"</p>
                                <p class="room-view__hint-text">"Select a style below to begin transformation."</p>
                            </div>
                        }
                    }
                >
                    <div class="room-view__overlay">
                        <div class="spinner"></div>
                        <p class="room-view__caption">
                            {move || generating_caption(session.with(Session::selected_style))}
                        </p>
                    </div>
                </Show>
            </div>
        }
    };

    view! {
        <div class="room-view">
            <ErrorBanner/>
            <Show when=has_redesign fallback=plain_view>
                <ComparisonSlider before=original.into() after=generated.into() after_label=label.into()/>
            </Show>
        </div>
    }
}
