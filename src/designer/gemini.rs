//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper over `{base}/models/{model}:generateContent`. Request
//! building and response parsing are pure functions for testability.

#[cfg(test)]
#[path = "gemini_test.rs"]
mod gemini_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::DesignerConfig;
use super::products::{self, WebReference};
use super::prompts::{CONSULTANT_SYSTEM_PROMPT, reimagine_prompt};
use super::{ChatReply, ChatRequest, DesignError, RoomDesigner};
use crate::catalog::Style;
use crate::chat::Role;
use crate::image::EncodedImage;

const API_KEY_HEADER: &str = "x-goog-api-key";

// =============================================================================
// CLIENT
// =============================================================================

/// Production [`RoomDesigner`] backed by the Gemini REST API.
#[derive(Clone)]
pub struct GeminiDesigner {
    http: reqwest::Client,
    config: DesignerConfig,
}

impl GeminiDesigner {
    /// Build a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: DesignerConfig) -> Result<Self, DesignError> {
        let http = build_http(&config)?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    async fn generate(&self, model: &str, body: &GenerateContentRequest) -> Result<String, DesignError> {
        let url = format!("{}/models/{model}:generateContent", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| DesignError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DesignError::ApiRequest(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(DesignError::ApiResponse { status, body: error_message(&text) });
        }

        Ok(text)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http(config: &DesignerConfig) -> Result<reqwest::Client, DesignError> {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeouts.request_secs))
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .build()
        .map_err(|e| DesignError::HttpClientBuild(e.to_string()))
}

// The browser's fetch owns timeouts on wasm32.
#[cfg(target_arch = "wasm32")]
fn build_http(_config: &DesignerConfig) -> Result<reqwest::Client, DesignError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| DesignError::HttpClientBuild(e.to_string()))
}

#[async_trait::async_trait(?Send)]
impl RoomDesigner for GeminiDesigner {
    async fn reimagine(&self, image: &EncodedImage, style: Style) -> Result<EncodedImage, DesignError> {
        info!(style = style.slug(), bytes = image.len(), model = %self.config.image_model, "designer: reimagine");
        let body = build_reimagine_request(image, style);
        let text = self.generate(&self.config.image_model, &body).await?;
        let result = parse_image_response(&text)?;
        info!(style = style.slug(), bytes = result.len(), "designer: reimagine complete");
        Ok(result)
    }

    async fn continue_chat(&self, request: &ChatRequest) -> Result<ChatReply, DesignError> {
        info!(
            history = request.history.len(),
            has_image = request.image.is_some(),
            model = %self.config.chat_model,
            "designer: chat"
        );
        let body = build_chat_request(request, self.config.search_grounding);
        let text = self.generate(&self.config.chat_model, &body).await?;
        let reply = parse_chat_response(&text)?;
        info!(products = reply.products.len(), "designer: chat complete");
        Ok(reply)
    }
}

// =============================================================================
// WIRE TYPES: REQUEST
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    fn image(image: &EncodedImage) -> Self {
        Self::InlineData { inline_data: InlineData { mime_type: image.mime_type().to_owned(), data: image.to_base64() } }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize, Default)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize, Default)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

// =============================================================================
// WIRE TYPES: RESPONSE
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    #[serde(alias = "inline_data")]
    inline_data: Option<ResponseInlineData>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

// =============================================================================
// REQUEST BUILDING
// =============================================================================

pub(crate) fn build_reimagine_request(image: &EncodedImage, style: Style) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part::image(image), Part::text(reimagine_prompt(style))],
        }],
        system_instruction: None,
        tools: Vec::new(),
        generation_config: Some(GenerationConfig { response_modalities: vec!["TEXT", "IMAGE"] }),
    }
}

pub(crate) fn build_chat_request(request: &ChatRequest, search_grounding: bool) -> GenerateContentRequest {
    // The session passes the optimistic copy of the new utterance as the
    // last history entry; it is re-sent below together with the image.
    let prior = match request.history.split_last() {
        Some((last, rest)) if last.is_user() && last.text() == request.text => rest,
        _ => request.history.as_slice(),
    };

    let mut contents: Vec<Content> = prior
        .iter()
        .filter(|m| !m.is_error())
        // Gemini expects the conversation to open with a user turn.
        .skip_while(|m| !m.is_user())
        .map(|m| Content { role: Some(wire_role(m.role())), parts: vec![Part::text(m.text())] })
        .collect();

    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &request.image {
        parts.push(Part::image(image));
    }
    parts.push(Part::text(request.text.clone()));
    contents.push(Content { role: Some("user"), parts });

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content { role: None, parts: vec![Part::text(CONSULTANT_SYSTEM_PROMPT)] }),
        tools: if search_grounding { vec![Tool::default()] } else { Vec::new() },
        generation_config: None,
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_envelope(json: &str) -> Result<GenerateContentResponse, DesignError> {
    let response: GenerateContentResponse =
        serde_json::from_str(json).map_err(|e| DesignError::ApiParse(e.to_string()))?;

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
    {
        return Err(DesignError::Blocked(reason));
    }
    Ok(response)
}

pub(crate) fn parse_image_response(json: &str) -> Result<EncodedImage, DesignError> {
    let response = parse_envelope(json)?;

    let mut refusal = Vec::new();
    let mut finish_reason = None;
    for candidate in response.candidates {
        finish_reason = finish_reason.or(candidate.finish_reason);
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if let Some(inline) = part.inline_data {
                return EncodedImage::from_base64(inline.mime_type, &inline.data)
                    .map_err(|e| DesignError::ApiParse(format!("image payload: {e}")));
            }
            if let Some(text) = part.text.filter(|t| !part.thought && !t.trim().is_empty()) {
                refusal.push(text.trim().to_owned());
            }
        }
    }

    let reason = if refusal.is_empty() {
        finish_reason.unwrap_or_else(|| "empty response".to_owned())
    } else {
        refusal.join(" ")
    };
    Err(DesignError::NoImage(reason))
}

pub(crate) fn parse_chat_response(json: &str) -> Result<ChatReply, DesignError> {
    let response = parse_envelope(json)?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(DesignError::ApiParse("no candidates in response".to_owned()));
    };

    let raw_text = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    let (text, mut products) = products::split_product_block(&raw_text);
    if products.is_empty() {
        let references = candidate
            .grounding_metadata
            .map(|g| g.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .filter_map(|web| web.uri.map(|uri| WebReference { uri, title: web.title }))
            .collect();
        products = products::from_references(references);
    }

    if text.is_empty() && products.is_empty() {
        return Err(DesignError::ApiParse("empty reply".to_owned()));
    }
    debug!(text_len = text.len(), products = products.len(), "designer: chat reply parsed");

    Ok(ChatReply { text, products })
}

/// Pull the human-readable message out of a Gemini error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = envelope.error.message.unwrap_or_else(|| body.to_owned());
            match envelope.error.status {
                Some(status) if !status.is_empty() => format!("{status}: {message}"),
                _ => message,
            }
        }
        Err(_) => body.to_owned(),
    }
}
