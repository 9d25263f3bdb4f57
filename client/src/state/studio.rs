#[cfg(test)]
#[path = "studio_test.rs"]
mod studio_test;

use std::rc::Rc;

use leptos::prelude::*;
use luma::catalog::Style;
use luma::image::{EncodedImage, UploadError};
use luma::session::Session;
use luma::studio::{FlowOutcome, Studio};

use super::store::SignalStore;
use crate::net::designer::BrowserDesigner;

pub type ClientStudio = Studio<BrowserDesigner, SignalStore>;

/// Copyable handle components use to drive the studio.
///
/// The studio itself is not `Send` (its designer returns local futures), so
/// it lives in local storage; flows run on the browser task queue.
#[derive(Clone, Copy)]
pub struct StudioHandle {
    session: RwSignal<Session>,
    studio: StoredValue<Rc<ClientStudio>, LocalStorage>,
}

impl StudioHandle {
    pub fn new(designer: BrowserDesigner) -> Self {
        let session = RwSignal::new(Session::new());
        let studio = Studio::new(designer, SignalStore::new(session));
        Self { session, studio: StoredValue::new_local(Rc::new(studio)) }
    }

    pub fn session(&self) -> RwSignal<Session> {
        self.session
    }

    /// Load a new room photo. The session records any validation error.
    ///
    /// # Errors
    ///
    /// Returns the validation failure so the caller can log it.
    pub fn upload(&self, image: EncodedImage) -> Result<(), UploadError> {
        self.studio.try_with_value(|studio| studio.upload(image)).unwrap_or(Ok(()))
    }

    pub fn reject_upload(&self, err: &UploadError) {
        self.studio.try_with_value(|studio| studio.reject_upload(err));
    }

    pub fn select_style(&self, style: Style) {
        let Some(studio) = self.studio.try_get_value() else {
            return;
        };
        leptos::task::spawn_local(async move {
            let outcome = studio.select_style(style).await;
            report("reimagine", outcome);
        });
    }

    pub fn send_message(&self, text: String) {
        let Some(studio) = self.studio.try_get_value() else {
            return;
        };
        leptos::task::spawn_local(async move {
            let outcome = studio.send_message(&text).await;
            report("chat", outcome);
        });
    }
}

fn report(flow: &str, outcome: FlowOutcome) {
    #[cfg(feature = "csr")]
    {
        log::debug!("{flow} flow finished: {outcome:?}");
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (flow, outcome);
    }
}
