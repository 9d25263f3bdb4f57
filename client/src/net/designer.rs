//! Designer construction for the browser build.
//!
//! A WASM bundle has no process environment, so configuration is baked in
//! when the bundle is compiled. A missing key does not stop the app from
//! rendering: every designer call then fails with the configuration error and
//! the session shows its usual failure copy.

#[cfg(test)]
#[path = "designer_test.rs"]
mod designer_test;

use luma::catalog::Style;
use luma::designer::{ChatReply, ChatRequest, DesignError, DesignerConfig, GeminiDesigner, RoomDesigner};
use luma::image::EncodedImage;

/// Build-time variable that carries the API key.
pub const API_KEY_VAR: &str = "LUMA_API_KEY";

pub enum BrowserDesigner {
    Gemini(GeminiDesigner),
    Unavailable(DesignError),
}

impl BrowserDesigner {
    /// Configure from variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(build_time_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match DesignerConfig::from_lookup(lookup).and_then(GeminiDesigner::new) {
            Ok(designer) => Self::Gemini(designer),
            Err(e) => Self::Unavailable(e),
        }
    }

    pub fn unavailable_reason(&self) -> Option<&DesignError> {
        match self {
            Self::Gemini(_) => None,
            Self::Unavailable(e) => Some(e),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl RoomDesigner for BrowserDesigner {
    async fn reimagine(&self, image: &EncodedImage, style: Style) -> Result<EncodedImage, DesignError> {
        match self {
            Self::Gemini(designer) => designer.reimagine(image, style).await,
            Self::Unavailable(e) => Err(e.clone()),
        }
    }

    async fn continue_chat(&self, request: &ChatRequest) -> Result<ChatReply, DesignError> {
        match self {
            Self::Gemini(designer) => designer.continue_chat(request).await,
            Self::Unavailable(e) => Err(e.clone()),
        }
    }
}

/// Resolve a configuration variable from the values compiled into the bundle.
pub fn build_time_var(key: &str) -> Option<String> {
    let value = match key {
        "LUMA_API_KEY_ENV" => Some(API_KEY_VAR),
        API_KEY_VAR => option_env!("LUMA_API_KEY"),
        "LUMA_GEMINI_BASE_URL" => option_env!("LUMA_GEMINI_BASE_URL"),
        "LUMA_IMAGE_MODEL" => option_env!("LUMA_IMAGE_MODEL"),
        "LUMA_CHAT_MODEL" => option_env!("LUMA_CHAT_MODEL"),
        "LUMA_SEARCH_GROUNDING" => option_env!("LUMA_SEARCH_GROUNDING"),
        _ => None,
    };
    value.map(str::to_owned)
}
