//! Shared client-side state.
//!
//! DESIGN
//! ======
//! The whole studio session is one `RwSignal<luma::session::Session>`.
//! `store` adapts that signal to the session store the `luma` studio writes
//! through; `studio` wraps the studio in a `Copy` handle that components pull
//! from context and use to launch flows.

pub mod store;
pub mod studio;
