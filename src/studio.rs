//! Studio: runs the asynchronous flows against a room designer.
//!
//! DESIGN
//! ======
//! Each flow borrows the session twice: once to begin (validate, flip the
//! busy flag, take a ticket) and once to finish (apply the result). The
//! designer call happens between the two with no borrow held, so the UI keeps
//! rendering and a new upload can land while a request is in flight. The
//! ticket's token then marks the late result as stale.
//!
//! State lives behind a [`SessionStore`]. Natively that is a
//! `RefCell<Session>`; the browser client wraps a reactive signal. A store
//! that has gone away (component unmounted) ends the flow quietly.
//!
//! An upload during a flow does not release the busy flag; the flow's own
//! finish does, even when its result is discarded.

#[cfg(test)]
#[path = "studio_test.rs"]
mod studio_test;

use std::cell::RefCell;

use tracing::{debug, info, warn};

use crate::catalog::Style;
use crate::designer::RoomDesigner;
use crate::error::ErrorCode;
use crate::image::{EncodedImage, UploadError};
use crate::session::{Completion, Session};

// =============================================================================
// STORE
// =============================================================================

/// Shared home of the session.
///
/// `update_session` returns `None` once the store is gone.
pub trait SessionStore {
    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R>;
}

impl SessionStore for RefCell<Session> {
    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

// =============================================================================
// STUDIO
// =============================================================================

/// How a flow ended.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The session refused to start (no photo, busy, blank input).
    Skipped,
    /// The designer answered and the session took the result.
    Completed,
    /// The designer failed and the session shows the failure.
    Failed,
    /// The session moved on before the answer arrived.
    Discarded,
}

pub struct Studio<D, S> {
    designer: D,
    store: S,
}

impl<D: RoomDesigner, S: SessionStore> Studio<D, S> {
    pub fn new(designer: D, store: S) -> Self {
        Self { designer, store }
    }

    /// Replace the room photo and reset the session.
    ///
    /// # Errors
    ///
    /// Returns the validation failure after recording it on the session.
    pub fn upload(&self, image: EncodedImage) -> Result<(), UploadError> {
        let size = image.len();
        match self.store.update_session(|session| session.upload(image)) {
            Some(Ok(())) => {
                info!(size, "room photo loaded");
                Ok(())
            }
            Some(Err(e)) => {
                warn!(error = %e, code = e.error_code(), "upload rejected");
                Err(e)
            }
            None => {
                debug!("upload after store closed");
                Ok(())
            }
        }
    }

    /// Record a file refused on its metadata, before any bytes were read.
    pub fn reject_upload(&self, err: &UploadError) {
        warn!(error = %err, code = err.error_code(), "upload rejected");
        self.store.update_session(|session| session.reject_upload(err));
    }

    /// Choose a style and redesign the current photo in it.
    pub async fn select_style(&self, style: Style) -> FlowOutcome {
        let Some(Some(ticket)) = self.store.update_session(|session| session.begin_reimagine(style)) else {
            debug!(%style, "style selection ignored");
            return FlowOutcome::Skipped;
        };

        info!(%style, "reimagining room");
        let result = self.designer.reimagine(&ticket.image, ticket.style).await;
        let failed = match &result {
            Ok(image) => {
                info!(%style, size = image.len(), "redesign received");
                false
            }
            Err(e) => {
                warn!(%style, error = %e, code = e.error_code(), "reimagine failed");
                true
            }
        };

        match self.store.update_session(|session| session.finish_reimagine(&ticket, result)) {
            Some(Completion::Applied) if failed => FlowOutcome::Failed,
            Some(Completion::Applied) => FlowOutcome::Completed,
            Some(Completion::Stale) | None => {
                debug!(%style, "redesign discarded");
                FlowOutcome::Discarded
            }
        }
    }

    /// Send a chat message and append the consultant's reply.
    pub async fn send_message(&self, text: &str) -> FlowOutcome {
        let Some(Some(ticket)) = self.store.update_session(|session| session.begin_chat(text)) else {
            debug!("chat message ignored");
            return FlowOutcome::Skipped;
        };

        info!(turns = ticket.request.history.len(), image = ticket.request.image.is_some(), "chat request");
        let result = self.designer.continue_chat(&ticket.request).await;
        let failed = match &result {
            Ok(reply) => {
                info!(products = reply.products.len(), "chat reply received");
                false
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "chat failed");
                true
            }
        };

        match self.store.update_session(|session| session.finish_chat(&ticket, result)) {
            Some(Completion::Applied) if failed => FlowOutcome::Failed,
            Some(Completion::Applied) => FlowOutcome::Completed,
            Some(Completion::Stale) | None => {
                debug!("chat reply discarded");
                FlowOutcome::Discarded
            }
        }
    }
}
