//! Horizontal strip of style cards.

use leptos::prelude::*;
use luma::catalog::{self, Style};
use luma::session::Session;

use crate::state::studio::StudioHandle;

/// The six styles in catalog order. Clicking a card starts a redesign; cards
/// are disabled while one is running and the chosen card is highlighted.
#[component]
pub fn StyleSelector() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let handle = expect_context::<StudioHandle>();

    let selected = move || session.with(Session::selected_style);
    let disabled = move || session.with(Session::is_generating);

    let cards = Style::ALL
        .into_iter()
        .map(|style| {
            let on_click = move |_| {
                if let Some(style) = catalog::choose(style, session.with_untracked(Session::is_generating)) {
                    handle.select_style(style);
                }
            };
            let is_selected = move || selected() == Some(style);
            view! {
                <button
                    class="style-card"
                    class:style-card--selected=is_selected
                    data-style=style.slug()
                    disabled=disabled
                    on:click=on_click
                >
                    <span class=format!("style-card__swatch {}", style.accent())></span>
                    <span class="style-card__label">{style.label()}</span>
                    <span class="style-card__description">{style.description()}</span>
                    <Show when=is_selected>
                        <span class="style-card__marker"></span>
                    </Show>
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="style-selector">
            <h3 class="style-selector__title">"Select a Design Aesthetic"</h3>
            <div class="style-selector__cards">{cards}</div>
        </div>
    }
}
