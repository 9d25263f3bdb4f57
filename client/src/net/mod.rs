//! Network collaborators used by the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is no backend: the browser talks to the Gemini REST API directly
//! through the `luma` designer client.

pub mod designer;
