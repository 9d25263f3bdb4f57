//! # luma
//!
//! Core of the LUMA room redesign studio. A user uploads a photo of a room,
//! asks for a redesign in one of six interior styles, compares the result
//! with a before/after slider, and chats with a design consultant that can
//! suggest shoppable furniture.
//!
//! DESIGN
//! ======
//! All session state lives in [`session::Session`] and changes only through
//! its synchronous transitions. [`studio::Studio`] runs the asynchronous
//! flows (reimagine, chat) against a [`designer::RoomDesigner`] and writes
//! results back through a [`studio::SessionStore`]. The browser UI in
//! `client/` plugs a reactive signal in as the store; tests use a `RefCell`.

pub mod catalog;
pub mod chat;
pub mod compare;
pub mod designer;
pub mod error;
pub mod image;
pub mod session;
pub mod studio;
