//! Designer: the external generative-AI collaborator.
//!
//! DESIGN
//! ======
//! The studio consumes two operations: reimagine a room photo in a style,
//! and continue the consultant chat. [`RoomDesigner`] is the seam; the
//! production implementation talks to Gemini over REST, tests plug in fakes.
//!
//! The trait is `?Send`: the studio runs on a single-threaded UI event loop
//! and the browser HTTP stack produces non-`Send` futures.

pub mod config;
pub mod gemini;
pub mod products;
pub mod prompts;

use crate::catalog::Style;
use crate::chat::{ChatMessage, ProductSuggestion};
use crate::error::ErrorCode;
use crate::image::EncodedImage;

pub use config::DesignerConfig;
pub use gemini::GeminiDesigner;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by designer operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DesignError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The provider answered without an image part.
    #[error("no image in response: {0}")]
    NoImage(String),

    /// The provider refused the prompt.
    #[error("prompt blocked: {0}")]
    Blocked(String),
}

impl ErrorCode for DesignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::NoImage(_) => "E_NO_IMAGE",
            Self::Blocked(_) => "E_BLOCKED",
        }
    }
}

// =============================================================================
// REQUEST / REPLY
// =============================================================================

/// Everything the designer needs to continue the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Full history, ending with the user message carrying `text`.
    pub history: Vec<ChatMessage>,
    /// The new user utterance.
    pub text: String,
    /// The image currently on screen, for visual grounding.
    pub image: Option<EncodedImage>,
}

/// Assistant reply to a chat turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub products: Vec<ProductSuggestion>,
}

// =============================================================================
// ROOM DESIGNER TRAIT
// =============================================================================

/// Provider-neutral designer. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait RoomDesigner {
    /// Redesign the room in `image` in the given style.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignError`] if the request fails, the response is
    /// malformed, or no image comes back.
    async fn reimagine(&self, image: &EncodedImage, style: Style) -> Result<EncodedImage, DesignError>;

    /// Produce the consultant's next reply.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignError`] if the request fails or the response is
    /// malformed.
    async fn continue_chat(&self, request: &ChatRequest) -> Result<ChatReply, DesignError>;
}
