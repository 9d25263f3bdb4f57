use super::*;
use crate::chat::{ChatMessage, ProductSuggestion, Role};
use crate::designer::{ChatReply, ChatRequest, DesignError};
use crate::image::MAX_UPLOAD_BYTES;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use tokio::sync::oneshot;

// =========================================================================
// FakeDesigner
// =========================================================================

#[derive(Default)]
struct FakeDesigner {
    images: RefCell<VecDeque<Result<EncodedImage, DesignError>>>,
    replies: RefCell<VecDeque<Result<ChatReply, DesignError>>>,
    requests: RefCell<Vec<ChatRequest>>,
    reimagined: RefCell<Vec<Style>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeDesigner {
    fn with_image(self, result: Result<EncodedImage, DesignError>) -> Self {
        self.images.borrow_mut().push_back(result);
        self
    }

    fn with_reply(self, result: Result<ChatReply, DesignError>) -> Self {
        self.replies.borrow_mut().push_back(result);
        self
    }

    /// Hold every call until the returned sender fires.
    fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        (self, tx)
    }

    async fn wait_gate(&self) {
        let gate = self.gate.borrow_mut().take();
        if let Some(rx) = gate {
            rx.await.unwrap();
        }
    }
}

#[async_trait::async_trait(?Send)]
impl RoomDesigner for FakeDesigner {
    async fn reimagine(&self, _image: &EncodedImage, style: Style) -> Result<EncodedImage, DesignError> {
        self.reimagined.borrow_mut().push(style);
        self.wait_gate().await;
        let next = self.images.borrow_mut().pop_front();
        next.unwrap_or_else(|| Ok(redesign()))
    }

    async fn continue_chat(&self, request: &ChatRequest) -> Result<ChatReply, DesignError> {
        self.requests.borrow_mut().push(request.clone());
        self.wait_gate().await;
        let next = self.replies.borrow_mut().pop_front();
        next.unwrap_or_else(|| Ok(ChatReply { text: "done".into(), products: Vec::new() }))
    }
}

// Borrowed forms let a test keep the fake and the session in view while the
// studio runs against them.
#[async_trait::async_trait(?Send)]
impl<'a> RoomDesigner for &'a FakeDesigner {
    async fn reimagine(&self, image: &EncodedImage, style: Style) -> Result<EncodedImage, DesignError> {
        <FakeDesigner as RoomDesigner>::reimagine(self, image, style).await
    }

    async fn continue_chat(&self, request: &ChatRequest) -> Result<ChatReply, DesignError> {
        <FakeDesigner as RoomDesigner>::continue_chat(self, request).await
    }
}

impl<'a> SessionStore for &'a RefCell<Session> {
    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        <RefCell<Session> as SessionStore>::update_session(self, f)
    }
}

/// Store that has been torn down.
struct ClosedStore;

impl SessionStore for ClosedStore {
    fn update_session<R>(&self, _f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        None
    }
}

/// Store that closes after a fixed number of updates.
struct ClosingStore {
    session: RefCell<Session>,
    remaining: Cell<usize>,
}

impl SessionStore for ClosingStore {
    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let left = self.remaining.get();
        if left == 0 {
            return None;
        }
        self.remaining.set(left - 1);
        self.session.update_session(f)
    }
}

// =========================================================================
// Fixture
// =========================================================================

struct Fixture {
    designer: FakeDesigner,
    session: RefCell<Session>,
}

impl Fixture {
    fn new(designer: FakeDesigner) -> Self {
        Self { designer, session: RefCell::new(Session::new()) }
    }

    fn loaded(designer: FakeDesigner) -> Self {
        let fixture = Self::new(designer);
        fixture.session.borrow_mut().upload(photo_of(64)).unwrap();
        fixture
    }

    fn studio(&self) -> Studio<&FakeDesigner, &RefCell<Session>> {
        Studio::new(&self.designer, &self.session)
    }

    fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }
}

fn photo_of(size: usize) -> EncodedImage {
    EncodedImage::new("image/jpeg", vec![7; size])
}

fn redesign() -> EncodedImage {
    EncodedImage::new("image/png", vec![9; 32])
}

// =========================================================================
// upload
// =========================================================================

#[test]
fn upload_oversized_records_error() {
    let fixture = Fixture::new(FakeDesigner::default());
    let too_big = usize::try_from(MAX_UPLOAD_BYTES).unwrap() + 1;
    let err = fixture.studio().upload(photo_of(too_big)).unwrap_err();
    assert!(matches!(err, UploadError::TooLarge { .. }));
    let session = fixture.snapshot();
    assert!(session.original_image().is_none());
    assert!(session.error().is_some());
}

#[test]
fn reject_upload_sets_banner() {
    let fixture = Fixture::new(FakeDesigner::default());
    fixture.studio().reject_upload(&UploadError::Unsupported { mime_type: "application/pdf".into() });
    assert_eq!(fixture.snapshot().error(), Some(crate::image::TOO_LARGE_MESSAGE));
}

#[test]
fn upload_into_closed_store_is_ignored() {
    let studio = Studio::new(FakeDesigner::default(), ClosedStore);
    assert!(studio.upload(photo_of(8)).is_ok());
}

// =========================================================================
// select_style
// =========================================================================

#[tokio::test]
async fn select_style_without_photo_skips() {
    let fixture = Fixture::new(FakeDesigner::default());
    assert_eq!(fixture.studio().select_style(Style::Scandinavian).await, FlowOutcome::Skipped);
    assert!(fixture.designer.reimagined.borrow().is_empty());
    assert_eq!(fixture.snapshot(), Session::new());
}

#[tokio::test]
async fn select_style_success_stores_redesign_and_seeds_chat() {
    let fixture = Fixture::loaded(FakeDesigner::default());
    assert_eq!(fixture.studio().select_style(Style::IndustrialLoft).await, FlowOutcome::Completed);

    let session = fixture.snapshot();
    assert_eq!(session.generated_image(), Some(&redesign()));
    assert_eq!(session.selected_style(), Some(Style::IndustrialLoft));
    assert!(!session.is_generating());
    assert_eq!(session.history().len(), 1);
    assert!(session.history().messages()[0].text().contains("Industrial Loft"));
}

#[tokio::test]
async fn select_style_failure_reverts_style() {
    let designer = FakeDesigner::default().with_image(Err(DesignError::NoImage("empty response".into())));
    let fixture = Fixture::loaded(designer);
    assert_eq!(fixture.studio().select_style(Style::BohemianChic).await, FlowOutcome::Failed);

    let session = fixture.snapshot();
    assert!(session.selected_style().is_none());
    assert!(session.generated_image().is_none());
    assert!(!session.is_generating());
    assert_eq!(session.error(), Some(crate::session::GENERATION_ERROR_MESSAGE));
}

#[tokio::test]
async fn select_style_while_generating_skips() {
    let (designer, release) = FakeDesigner::default().gated();
    let fixture = Fixture::loaded(designer);
    let studio = fixture.studio();

    let first = studio.select_style(Style::CoastalBreeze);
    let second = async {
        let outcome = studio.select_style(Style::Scandinavian).await;
        release.send(()).unwrap();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, FlowOutcome::Completed);
    assert_eq!(second, FlowOutcome::Skipped);
    assert_eq!(*fixture.designer.reimagined.borrow(), [Style::CoastalBreeze]);
    assert_eq!(fixture.snapshot().selected_style(), Some(Style::CoastalBreeze));
}

#[tokio::test]
async fn upload_during_reimagine_discards_result() {
    let (designer, release) = FakeDesigner::default().gated();
    let fixture = Fixture::loaded(designer);
    let studio = fixture.studio();
    let fresh = photo_of(128);

    let flow = studio.select_style(Style::ModernMinimalist);
    let replace = async {
        studio.upload(fresh.clone()).unwrap();
        let retry = studio.select_style(Style::Scandinavian).await;
        assert!(fixture.snapshot().is_generating());
        release.send(()).unwrap();
        retry
    };
    let (outcome, retry) = tokio::join!(flow, replace);

    assert_eq!(outcome, FlowOutcome::Discarded);
    assert_eq!(retry, FlowOutcome::Skipped);
    assert_eq!(*fixture.designer.reimagined.borrow(), [Style::ModernMinimalist]);
    let session = fixture.snapshot();
    assert_eq!(session.original_image(), Some(&fresh));
    assert!(session.generated_image().is_none());
    assert!(session.selected_style().is_none());
    assert!(session.history().is_empty());
    assert!(!session.is_generating());
}

#[tokio::test]
async fn store_closed_mid_flight_discards_result() {
    let store = ClosingStore { session: RefCell::new(Session::new()), remaining: Cell::new(2) };
    let studio = Studio::new(FakeDesigner::default(), store);
    studio.upload(photo_of(16)).unwrap();
    assert_eq!(studio.select_style(Style::Scandinavian).await, FlowOutcome::Discarded);
}

// =========================================================================
// send_message
// =========================================================================

#[tokio::test]
async fn send_message_blank_skips() {
    let fixture = Fixture::loaded(FakeDesigner::default());
    assert_eq!(fixture.studio().send_message("  \n ").await, FlowOutcome::Skipped);
    assert!(fixture.designer.requests.borrow().is_empty());
    assert!(fixture.snapshot().history().is_empty());
}

#[tokio::test]
async fn send_message_appends_user_then_reply() {
    let products = vec![ProductSuggestion {
        title: "Oak side table".into(),
        url: "https://shop.test/oak".into(),
        price: Some("$120".into()),
        source: Some("shop.test".into()),
    }];
    let designer = FakeDesigner::default().with_reply(Ok(ChatReply { text: "Try oak.".into(), products }));
    let fixture = Fixture::loaded(designer);

    assert_eq!(fixture.studio().send_message("  a side table?  ").await, FlowOutcome::Completed);

    let session = fixture.snapshot();
    let messages = session.history().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert_eq!(messages[0].text(), "a side table?");
    assert_eq!(messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].products().len(), 1);
    assert!(!session.is_chat_loading());
}

#[tokio::test]
async fn send_message_failure_appends_error_bubble() {
    let designer = FakeDesigner::default().with_reply(Err(DesignError::ApiResponse {
        status: 500,
        body: "INTERNAL: boom".into(),
    }));
    let fixture = Fixture::loaded(designer);

    assert_eq!(fixture.studio().send_message("hello").await, FlowOutcome::Failed);
    let session = fixture.snapshot();
    let last = session.history().messages().last().unwrap();
    assert!(last.is_error());
    assert_eq!(last.text(), crate::chat::CHAT_ERROR_MESSAGE);
    assert!(session.error().is_none());
}

#[tokio::test]
async fn send_message_while_loading_skips() {
    let (designer, release) = FakeDesigner::default().gated();
    let fixture = Fixture::loaded(designer);
    let studio = fixture.studio();

    let first = studio.send_message("first");
    let second = async {
        let outcome = studio.send_message("second").await;
        release.send(()).unwrap();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, FlowOutcome::Completed);
    assert_eq!(second, FlowOutcome::Skipped);
    let texts: Vec<String> = fixture.snapshot().history().iter().map(|m| m.text().to_owned()).collect();
    assert_eq!(texts, ["first", "done"]);
}

#[tokio::test]
async fn upload_during_chat_discards_reply() {
    let (designer, release) = FakeDesigner::default().gated();
    let fixture = Fixture::loaded(designer);
    let studio = fixture.studio();

    let flow = studio.send_message("hello");
    let replace = async {
        studio.upload(photo_of(32)).unwrap();
        let retry = studio.send_message("hello again").await;
        assert!(fixture.snapshot().is_chat_loading());
        release.send(()).unwrap();
        retry
    };
    let (outcome, retry) = tokio::join!(flow, replace);

    assert_eq!(outcome, FlowOutcome::Discarded);
    assert_eq!(retry, FlowOutcome::Skipped);
    assert_eq!(fixture.designer.requests.borrow().len(), 1);
    let session = fixture.snapshot();
    assert!(session.history().is_empty());
    assert!(!session.is_chat_loading());
}

#[tokio::test]
async fn restyle_during_chat_discards_reply() {
    let (designer, release) = FakeDesigner::default().gated();
    let fixture = Fixture::loaded(designer);
    let studio = fixture.studio();

    let chat = studio.send_message("make the rug blue");
    let restyle = async {
        // The gate is taken by the chat call, so the reimagine answers at once.
        let outcome = studio.select_style(Style::CoastalBreeze).await;
        release.send(()).unwrap();
        outcome
    };
    let (chat, restyle) = tokio::join!(chat, restyle);

    assert_eq!(restyle, FlowOutcome::Completed);
    assert_eq!(chat, FlowOutcome::Discarded);
    let session = fixture.snapshot();
    assert!(!session.is_chat_loading());
    let texts: Vec<&str> = session.history().iter().map(ChatMessage::text).collect();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Coastal Breeze"));
}

// =========================================================================
// End to end
// =========================================================================

#[tokio::test]
async fn upload_reimagine_then_refine() {
    let fixture = Fixture::new(FakeDesigner::default());
    let studio = fixture.studio();

    studio.upload(photo_of(2 * 1024 * 1024)).unwrap();
    assert_eq!(studio.select_style(Style::CoastalBreeze).await, FlowOutcome::Completed);
    assert_eq!(studio.send_message("make the rug blue").await, FlowOutcome::Completed);

    let session = fixture.snapshot();
    assert_eq!(session.displayed_image(), Some(&redesign()));
    let roles: Vec<Role> = session.history().iter().map(ChatMessage::role).collect();
    assert_eq!(roles, [Role::Assistant, Role::User, Role::Assistant]);

    let requests = fixture.designer.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "make the rug blue");
    assert_eq!(requests[0].image, Some(redesign()));
    assert_eq!(requests[0].history.len(), 2);
}
