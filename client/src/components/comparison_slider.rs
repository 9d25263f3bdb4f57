//! Before/after compare widget with a draggable divider.
//!
//! DESIGN
//! ======
//! The divider model (`luma::compare::CompareSlider`) lives in a local signal.
//! Window-level move/end listeners exist only while a drag is in progress:
//! they are attached on mouse-down/touch-start and removed on mouse-up,
//! touch-end, or when the widget unmounts.

use leptos::prelude::*;
use luma::compare::{BEFORE_LABEL, CompareSlider};

#[component]
pub fn ComparisonSlider(
    /// `src` of the original photo.
    before: Signal<String>,
    /// `src` of the redesign.
    after: Signal<String>,
    /// Caption on the redesign half.
    after_label: Signal<&'static str>,
) -> impl IntoView {
    let slider = RwSignal::new(CompareSlider::new());
    let container = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    let begin_drag = {
        use leptos::ev;
        use luma::compare::Span;

        let listeners = StoredValue::new_local(Vec::<WindowListenerHandle>::new());

        let release = move || {
            listeners.try_update_value(|handles| handles.drain(..).for_each(WindowListenerHandle::remove));
            slider.try_update(CompareSlider::end_drag);
        };

        let track = move |client_x: f64| {
            let Some(el) = container.get_untracked() else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            let span = Span { left: rect.left(), width: rect.width() };
            slider.update(|s| {
                s.drag_to(client_x, span);
            });
        };

        on_cleanup(release);

        move || {
            release();
            slider.update(CompareSlider::begin_drag);
            let handles = vec![
                window_event_listener(ev::mousemove, move |e| track(f64::from(e.client_x()))),
                window_event_listener(ev::touchmove, move |e| {
                    if let Some(touch) = e.touches().get(0) {
                        track(f64::from(touch.client_x()));
                    }
                }),
                window_event_listener(ev::mouseup, move |_| release()),
                window_event_listener(ev::touchend, move |_| release()),
            ];
            listeners.set_value(handles);
        }
    };
    #[cfg(not(feature = "csr"))]
    let begin_drag = move || slider.update(CompareSlider::begin_drag);

    let on_mouse_down = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        begin_drag();
    };
    let on_touch_start = move |_ev: leptos::ev::TouchEvent| begin_drag();

    view! {
        <div class="compare" node_ref=container>
            <img class="compare__image" src=move || after.get() alt="After"/>
            <span class="compare__label compare__label--after">{move || after_label.get()}</span>

            <div class="compare__before" style:clip-path=move || slider.with(CompareSlider::before_clip_path)>
                <img class="compare__image" src=move || before.get() alt="Before"/>
                <span class="compare__label compare__label--before">{BEFORE_LABEL}</span>
            </div>

            <div
                class="compare__handle"
                class:compare__handle--active=move || slider.with(CompareSlider::is_dragging)
                style:left=move || slider.with(CompareSlider::handle_left)
                on:mousedown=on_mouse_down
                on:touchstart=on_touch_start
            >
                <div class="compare__grip">"\u{2194}"</div>
            </div>
        </div>
    }
}
