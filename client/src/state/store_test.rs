use super::*;
use luma::catalog::Style;
use luma::image::EncodedImage;

fn photo() -> EncodedImage {
    EncodedImage::new("image/png", vec![1, 2, 3, 4])
}

// =============================================================
// SignalStore
// =============================================================

#[test]
fn update_writes_through_to_signal() {
    let owner = Owner::new();
    owner.with(|| {
        let signal = RwSignal::new(Session::new());
        let store = SignalStore::new(signal);

        let result = store.update_session(|session| session.upload(photo()));
        assert_eq!(result, Some(Ok(())));
        assert_eq!(signal.with_untracked(|s| s.original_image().cloned()), Some(photo()));
    });
}

#[test]
fn update_returns_closure_result() {
    let owner = Owner::new();
    owner.with(|| {
        let signal = RwSignal::new(Session::new());
        signal.update(|s| s.upload(photo()).unwrap());
        let store = SignalStore::new(signal);

        let ticket = store.update_session(|session| session.begin_reimagine(Style::Scandinavian));
        assert!(matches!(ticket, Some(Some(_))));
        assert!(signal.with_untracked(Session::is_generating));
    });
}

#[test]
fn disposed_signal_closes_store() {
    let owner = Owner::new();
    owner.with(|| {
        let signal = RwSignal::new(Session::new());
        let store = SignalStore::new(signal);
        signal.dispose();

        assert_eq!(store.update_session(|session| session.upload(photo())), None);
        assert_eq!(store.update_session(|session| session.is_chat_loading()), None);
    });
}
