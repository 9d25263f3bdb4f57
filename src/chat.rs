//! Conversation model: messages, product suggestions, and panel input rules.
//!
//! DESIGN
//! ======
//! Messages are immutable once created and kept in an append-only
//! [`ChatHistory`]. The only way to drop messages is to replace the whole
//! history, which the session does when a new room photo is uploaded.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

use crate::catalog::Style;

/// Shown in place of a reply when the designer could not be reached.
pub const CHAT_ERROR_MESSAGE: &str = "I encountered an error connecting to the server.";

/// Empty-state heading for the conversation panel.
pub const EMPTY_GREETING: &str = "Hi! I'm your design assistant.";

/// Empty-state hint for the conversation panel.
pub const EMPTY_HINT: &str = "Ask me to tweak the design or find furniture items!";

// =============================================================================
// PRODUCT SUGGESTION
// =============================================================================

/// A shoppable item attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSuggestion {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

// =============================================================================
// MESSAGE
// =============================================================================

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(rename = "model")]
    Assistant,
}

/// Horizontal placement of a message bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    End,
}

/// A single conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: String,
    role: Role,
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    products: Vec<ProductSuggestion>,
    #[serde(default)]
    is_error: bool,
}

impl ChatMessage {
    fn build(role: Role, text: String, products: Vec<ProductSuggestion>, is_error: bool) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, text, products, is_error }
    }

    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::build(Role::User, text.into(), Vec::new(), false)
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>, products: Vec<ProductSuggestion>) -> Self {
        Self::build(Role::Assistant, text.into(), products, false)
    }

    /// Assistant bubble flagged as a failed reply.
    #[must_use]
    pub fn assistant_error() -> Self {
        Self::build(Role::Assistant, CHAT_ERROR_MESSAGE.to_owned(), Vec::new(), true)
    }

    /// Opening message after a room has been reimagined in `style`.
    #[must_use]
    pub fn reimagined(style: Style) -> Self {
        Self::assistant(
            format!(
                "I've reimagined your space in a {style} style. What do you think? \
                 I can help you refine details or find specific furniture items."
            ),
            Vec::new(),
        )
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn products(&self) -> &[ProductSuggestion] {
        &self.products
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// User messages sit on the right, everything else on the left.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        if self.is_user() { Alignment::End } else { Alignment::Start }
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// Ordered, append-only conversation log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a ChatHistory {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl From<Vec<ChatMessage>> for ChatHistory {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

// =============================================================================
// PANEL INPUT
// =============================================================================

/// Decide whether the panel may submit `input`.
///
/// Returns the trimmed text, or `None` when the input is blank or a reply
/// is still pending.
#[must_use]
pub fn accept_input(input: &str, loading: bool) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || loading {
        return None;
    }
    Some(trimmed.to_owned())
}
