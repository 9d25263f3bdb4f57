//! Designer configuration.
//!
//! The API credential is handed to the client explicitly through
//! [`DesignerConfig`]; nothing reads it from ambient global state after
//! construction.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use super::DesignError;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignerTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for DesignerTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct DesignerConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_model: String,
    pub chat_model: String,
    pub timeouts: DesignerTimeouts,
    /// Let the chat model ground replies (and product links) in web search.
    pub search_grounding: bool,
}

impl DesignerConfig {
    /// Config with every default and the given credential.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
            chat_model: DEFAULT_CHAT_MODEL.to_owned(),
            timeouts: DesignerTimeouts::default(),
            search_grounding: true,
        }
    }

    /// Point the client at a different API root (trailing `/` trimmed).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - the key itself, in the variable named by `LUMA_API_KEY_ENV`
    ///   (default `GEMINI_API_KEY`)
    ///
    /// Optional:
    /// - `LUMA_GEMINI_BASE_URL`: default Gemini v1beta root
    /// - `LUMA_IMAGE_MODEL`: default `gemini-2.5-flash-image`
    /// - `LUMA_CHAT_MODEL`: default `gemini-2.5-flash`
    /// - `LUMA_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LUMA_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LUMA_SEARCH_GROUNDING`: `true` (default) or `false`
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, DesignError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DesignerConfig::from_env`], reading through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or a value fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DesignError> {
        let key_var = lookup("LUMA_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_owned());
        let api_key = lookup(key_var.as_str())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DesignError::MissingApiKey { var: key_var.clone() })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("LUMA_GEMINI_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        if let Some(model) = lookup("LUMA_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Some(model) = lookup("LUMA_CHAT_MODEL") {
            config.chat_model = model;
        }
        config.timeouts = DesignerTimeouts {
            request_secs: parse_u64(lookup("LUMA_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("LUMA_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        config.search_grounding = parse_bool(lookup("LUMA_SEARCH_GROUNDING").as_deref(), true)?;

        Ok(config)
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for DesignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignerConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("image_model", &self.image_model)
            .field("chat_model", &self.chat_model)
            .field("timeouts", &self.timeouts)
            .field("search_grounding", &self.search_grounding)
            .finish()
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_bool(raw: Option<&str>, default: bool) -> Result<bool, DesignError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(other) => Err(DesignError::ConfigParse(format!(
            "invalid LUMA_SEARCH_GROUNDING '{other}' (expected 'true' or 'false')"
        ))),
    }
}
