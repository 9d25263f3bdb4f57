//! Design consultant chat: message list, product cards, and the input row.

#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod chat_panel_test;

use leptos::prelude::*;
use luma::chat::{Alignment, ChatMessage, EMPTY_GREETING, EMPTY_HINT, ProductSuggestion, accept_input};
use luma::session::Session;

use crate::state::studio::StudioHandle;

/// Secondary line on a product card: source and price when known.
pub fn product_caption(product: &ProductSuggestion) -> Option<String> {
    match (product.source.as_deref(), product.price.as_deref()) {
        (Some(source), Some(price)) => Some(format!("{source} \u{b7} {price}")),
        (Some(one), None) | (None, Some(one)) => Some(one.to_owned()),
        (None, None) => None,
    }
}

/// CSS modifier for a message row.
pub fn alignment_class(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Start => "chat-message--start",
        Alignment::End => "chat-message--end",
    }
}

fn product_card(product: ProductSuggestion) -> impl IntoView {
    let caption = product_caption(&product);
    view! {
        <a class="product-card" href=product.url target="_blank" rel="noopener noreferrer">
            <span class="product-card__icon">"\u{1F6CD}"</span>
            <span class="product-card__body">
                <span class="product-card__title">{product.title}</span>
                {caption.map(|text| view! { <span class="product-card__caption">{text}</span> })}
            </span>
        </a>
    }
}

fn message_row(message: ChatMessage) -> impl IntoView {
    let products = message.products().to_vec();
    let has_products = !products.is_empty();
    view! {
        <div class=format!("chat-message {}", alignment_class(message.alignment()))>
            <div
                class="chat-message__bubble"
                class:chat-message__bubble--user=message.is_user()
                class:chat-message__bubble--error=message.is_error()
            >
                {message.text().to_owned()}
            </div>
            {has_products
                .then(|| {
                    view! {
                        <div class="chat-message__products">
                            {products.into_iter().map(product_card).collect::<Vec<_>>()}
                        </div>
                    }
                })}
        </div>
    }
}

/// Conversation panel. Enter or the send button submits; blank input and
/// input while a reply is pending are ignored.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let handle = expect_context::<StudioHandle>();

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let loading = move || session.with(Session::is_chat_loading);

    Effect::new(move || {
        session.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let do_send = move || {
        let Some(text) = accept_input(&input.get_untracked(), session.with_untracked(Session::is_chat_loading)) else {
            return;
        };
        input.set(String::new());
        handle.send_message(text);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_send();
    };

    let can_send = move || input.with(|text| accept_input(text, loading()).is_some());

    view! {
        <div class="chat-panel">
            <div class="chat-panel__header">
                <span class="chat-panel__spark">"\u{2728}"</span>
                <h3 class="chat-panel__title">"LUMA Design Assistant"</h3>
            </div>

            <div class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    let messages = session.with(|s| s.history().messages().to_vec());
                    if messages.is_empty() {
                        return view! {
                            <div class="chat-panel__empty">
                                <p>{EMPTY_GREETING}</p>
                                <p class="chat-panel__empty-hint">{EMPTY_HINT}</p>
                            </div>
                        }
                            .into_any();
                    }
                    messages.into_iter().map(message_row).collect::<Vec<_>>().into_any()
                }}
                <Show when=loading>
                    <div class="chat-message chat-message--start">
                        <div class="chat-message__bubble chat-panel__typing">
                            <span class="dot"></span>
                            <span class="dot"></span>
                            <span class="dot"></span>
                        </div>
                    </div>
                </Show>
            </div>

            <form class="chat-panel__input-row" on:submit=on_submit>
                <input
                    class="chat-panel__input"
                    type="text"
                    placeholder="Suggest a blue rug..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    disabled=loading
                />
                <button class="btn btn--primary chat-panel__send" type="submit" disabled=move || !can_send()>
                    "Send"
                </button>
            </form>
        </div>
    }
}
