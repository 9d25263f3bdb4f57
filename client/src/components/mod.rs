//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared session signal from context and launch flows
//! through the `StudioHandle`; none of them mutate the session directly.

pub mod chat_panel;
pub mod comparison_slider;
pub mod error_banner;
pub mod hero;
pub mod nav_bar;
pub mod room_view;
pub mod style_selector;
pub mod upload_button;
