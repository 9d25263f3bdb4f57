#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use leptos::prelude::*;
use luma::session::Session;
use luma::studio::SessionStore;

/// Session store backed by a reactive signal.
///
/// Writes notify every view reading the signal. Once the owning reactive
/// scope is disposed updates return `None`, which ends any flow still
/// waiting on the designer.
#[derive(Clone, Copy, Debug)]
pub struct SignalStore(RwSignal<Session>);

impl SignalStore {
    pub fn new(signal: RwSignal<Session>) -> Self {
        Self(signal)
    }
}

impl SessionStore for SignalStore {
    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}
