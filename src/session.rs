//! Session state: everything one visit to the studio holds.
//!
//! DESIGN
//! ======
//! `Session` is the single writer for studio state. Every transition is a
//! synchronous method; asynchronous work is split into a `begin_*` half that
//! validates, flips busy flags and hands out a ticket, and a `finish_*` half
//! that applies the collaborator's result.
//!
//! Tickets carry the session epoch they were issued under. Uploading a new
//! photo bumps the epoch, so a response that arrives for the previous photo
//! is recognised as stale and dropped instead of overwriting the new state.
//! Chat tickets also carry the conversation generation: a successful
//! reimagine opens a fresh conversation, and a reply to the old one is
//! dropped the same way.
//!
//! Busy flags belong to the request, not the photo. An upload leaves them
//! set, and the matching `finish_*` clears them whether or not its result
//! is applied, so at most one request of each kind is ever outstanding.
//!
//! Nothing here is persisted; a page reload starts from `Session::default()`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::catalog::Style;
use crate::chat::{ChatHistory, ChatMessage};
use crate::designer::{ChatReply, ChatRequest, DesignError};
use crate::image::{EncodedImage, UploadError, validate_image};

/// Banner copy when a reimagine request fails.
pub const GENERATION_ERROR_MESSAGE: &str = "Failed to generate design. Please try again.";

/// Identifies the session generation a request was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

/// Identifies the conversation a chat request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationToken(u64);

/// A reimagine request ready to send to the designer.
#[derive(Debug, Clone)]
pub struct ReimagineTicket {
    pub token: SessionToken,
    pub image: EncodedImage,
    pub style: Style,
}

/// A chat request ready to send to the designer.
#[derive(Debug, Clone)]
pub struct ChatTicket {
    pub token: SessionToken,
    pub conversation: ConversationToken,
    pub request: ChatRequest,
}

/// What happened to a collaborator result handed to a `finish_*` method.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was written into the session.
    Applied,
    /// The session moved on since the request was issued; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    original_image: Option<EncodedImage>,
    generated_image: Option<EncodedImage>,
    selected_style: Option<Style>,
    generating: bool,
    chat_loading: bool,
    error: Option<String>,
    history: ChatHistory,
    epoch: u64,
    conversation: u64,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn original_image(&self) -> Option<&EncodedImage> {
        self.original_image.as_ref()
    }

    #[must_use]
    pub fn generated_image(&self) -> Option<&EncodedImage> {
        self.generated_image.as_ref()
    }

    /// The image on screen: the redesign when there is one, else the upload.
    #[must_use]
    pub fn displayed_image(&self) -> Option<&EncodedImage> {
        self.generated_image.as_ref().or(self.original_image.as_ref())
    }

    #[must_use]
    pub fn selected_style(&self) -> Option<Style> {
        self.selected_style
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    #[must_use]
    pub fn is_chat_loading(&self) -> bool {
        self.chat_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    #[must_use]
    pub fn token(&self) -> SessionToken {
        SessionToken(self.epoch)
    }

    #[must_use]
    pub fn conversation_token(&self) -> ConversationToken {
        ConversationToken(self.conversation)
    }

    /// Style cards accept clicks only with a photo loaded and no generation
    /// running.
    #[must_use]
    pub fn can_select_style(&self) -> bool {
        self.original_image.is_some() && !self.generating
    }

    // =========================================================================
    // UPLOAD
    // =========================================================================

    /// Start over with a new room photo.
    ///
    /// On success the redesign, style, error and conversation are cleared
    /// and any request still in flight becomes stale. Its busy flag stays set
    /// until it returns.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the session then only gains the
    /// matching error message.
    pub fn upload(&mut self, image: EncodedImage) -> Result<(), UploadError> {
        if let Err(err) = validate_image(&image) {
            self.reject_upload(&err);
            return Err(err);
        }

        self.epoch += 1;
        self.original_image = Some(image);
        self.generated_image = None;
        self.selected_style = None;
        self.error = None;
        self.history = ChatHistory::new();
        Ok(())
    }

    /// Record an upload refused before its bytes were read.
    pub fn reject_upload(&mut self, err: &UploadError) {
        self.error = Some(err.user_message().to_owned());
    }

    // =========================================================================
    // REIMAGINE
    // =========================================================================

    /// Mark `style` as chosen and start a generation.
    ///
    /// Returns `None`, leaving the session untouched, when no photo is
    /// loaded or a generation is already running.
    pub fn begin_reimagine(&mut self, style: Style) -> Option<ReimagineTicket> {
        if !self.can_select_style() {
            return None;
        }
        let image = self.original_image.clone()?;

        self.selected_style = Some(style);
        self.generating = true;
        self.error = None;
        Some(ReimagineTicket { token: self.token(), image, style })
    }

    /// Apply the designer's answer to a reimagine request.
    ///
    /// Success stores the redesign and opens a fresh conversation about it;
    /// failure sets the banner and clears the chosen style. The generating
    /// flag is cleared either way, stale or not.
    pub fn finish_reimagine(
        &mut self,
        ticket: &ReimagineTicket,
        result: Result<EncodedImage, DesignError>,
    ) -> Completion {
        self.generating = false;
        if ticket.token != self.token() {
            return Completion::Stale;
        }

        match result {
            Ok(image) => {
                self.generated_image = Some(image);
                self.history = ChatHistory::from(vec![ChatMessage::reimagined(ticket.style)]);
                self.conversation += 1;
            }
            Err(_) => {
                self.error = Some(GENERATION_ERROR_MESSAGE.to_owned());
                self.selected_style = None;
            }
        }
        Completion::Applied
    }

    // =========================================================================
    // CHAT
    // =========================================================================

    /// Append the user's message and start a chat request.
    ///
    /// Returns `None` for blank text or while a reply is pending.
    pub fn begin_chat(&mut self, text: &str) -> Option<ChatTicket> {
        let text = crate::chat::accept_input(text, self.chat_loading)?;

        self.history.push(ChatMessage::user(text.clone()));
        self.chat_loading = true;

        let request = ChatRequest {
            history: self.history.messages().to_vec(),
            text,
            image: self.displayed_image().cloned(),
        };
        Some(ChatTicket { token: self.token(), conversation: self.conversation_token(), request })
    }

    /// Append the assistant's reply, or a flagged error bubble on failure.
    ///
    /// A reply to a conversation that has since been replaced is dropped.
    /// The loading flag is cleared either way.
    pub fn finish_chat(&mut self, ticket: &ChatTicket, result: Result<ChatReply, DesignError>) -> Completion {
        self.chat_loading = false;
        if ticket.token != self.token() || ticket.conversation != self.conversation_token() {
            return Completion::Stale;
        }

        let message = match result {
            Ok(reply) => ChatMessage::assistant(reply.text, reply.products),
            Err(_) => ChatMessage::assistant_error(),
        };
        self.history.push(message);
        Completion::Applied
    }
}
