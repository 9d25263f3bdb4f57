//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use luma::session::Session;

use crate::components::chat_panel::ChatPanel;
use crate::components::hero::Hero;
use crate::components::nav_bar::NavBar;
use crate::components::room_view::RoomView;
use crate::components::style_selector::StyleSelector;
use crate::net::designer::BrowserDesigner;
use crate::state::studio::StudioHandle;

/// Root application component.
///
/// Builds the designer from build-time configuration, provides the session
/// signal and studio handle, and switches between the landing view and the
/// editor once a photo is loaded.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let designer = BrowserDesigner::from_build_env();
    #[cfg(feature = "csr")]
    {
        use luma::error::ErrorCode;
        if let Some(e) = designer.unavailable_reason() {
            log::warn!("design service unavailable ({}): {e}", e.error_code());
        }
    }

    let handle = StudioHandle::new(designer);
    let session = handle.session();
    provide_context(handle);
    provide_context(session);

    let has_photo = move || session.with(|s: &Session| s.original_image().is_some());

    view! {
        <Title text="LUMA"/>
        <NavBar/>
        <main class="page">
            <Show when=has_photo fallback=Hero>
                <div class="editor">
                    <section class="editor__visual">
                        <RoomView/>
                        <StyleSelector/>
                    </section>
                    <aside class="editor__side">
                        <div class="card">
                            <h2 class="card__title">"Design Consultant"</h2>
                            <p class="card__text">
                                "Not quite right? Chat with LUMA to refine the details or find where to buy the furniture you see."
                            </p>
                            <ChatPanel/>
                        </div>
                        <div class="card card--tip">
                            <h3 class="card__title">"Pro Tip"</h3>
                            <p class="card__text">
                                "Try asking for specific adjustments like \"Make the rug blue\" or \"Change the sofa to leather\"."
                            </p>
                        </div>
                    </aside>
                </div>
            </Show>
        </main>
    }
}
