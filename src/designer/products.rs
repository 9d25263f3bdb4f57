//! Product suggestions extracted from a consultant reply.
//!
//! Two sources, in order of preference: a fenced ```json block at the end of
//! the reply text (carries prices), then web grounding references attached
//! by search-grounded models.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use std::collections::HashSet;

use serde::Deserialize;

use crate::chat::ProductSuggestion;

/// Most product cards shown under one reply.
pub const MAX_PRODUCTS: usize = 4;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Hosts that only redirect to the grounded page; their title names the site.
const REDIRECT_HOSTS: &[&str] = &["vertexaisearch.cloud.google.com"];

#[derive(Deserialize)]
struct ProductBlock {
    #[serde(default)]
    products: Vec<ProductSuggestion>,
}

/// Split a reply into display text and the products listed in its trailing
/// JSON block.
///
/// A block that fails to parse is left in the text untouched.
#[must_use]
pub fn split_product_block(reply: &str) -> (String, Vec<ProductSuggestion>) {
    let Some(open) = reply.rfind(FENCE_OPEN) else {
        return (reply.trim().to_owned(), Vec::new());
    };
    let body_start = open + FENCE_OPEN.len();
    let Some(close_rel) = reply[body_start..].find(FENCE_CLOSE) else {
        return (reply.trim().to_owned(), Vec::new());
    };
    let body = &reply[body_start..body_start + close_rel];

    match serde_json::from_str::<ProductBlock>(body.trim()) {
        Ok(block) => {
            let before = reply[..open].trim();
            let after = reply[body_start + close_rel + FENCE_CLOSE.len()..].trim();
            let text = if after.is_empty() { before.to_owned() } else { format!("{before}\n\n{after}") };
            (text, normalize(block.products))
        }
        Err(e) => {
            tracing::debug!(error = %e, "product block did not parse");
            (reply.trim().to_owned(), Vec::new())
        }
    }
}

/// A web reference attached to a grounded reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebReference {
    pub uri: String,
    pub title: Option<String>,
}

/// Turn grounding references into product cards.
#[must_use]
pub fn from_references(references: Vec<WebReference>) -> Vec<ProductSuggestion> {
    let products = references
        .into_iter()
        .map(|reference| {
            let host = host_of(&reference.uri);
            let source = match (&host, &reference.title) {
                (Some(h), Some(t)) if REDIRECT_HOSTS.contains(&h.as_str()) => Some(t.clone()),
                (Some(h), _) if !REDIRECT_HOSTS.contains(&h.as_str()) => Some(h.clone()),
                _ => None,
            };
            let title = reference
                .title
                .clone()
                .or_else(|| host.clone())
                .unwrap_or_else(|| reference.uri.clone());
            ProductSuggestion { title, url: reference.uri, price: None, source }
        })
        .collect();
    normalize(products)
}

/// Drop unusable entries, dedupe by URL, and cap the list.
fn normalize(products: Vec<ProductSuggestion>) -> Vec<ProductSuggestion> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| !p.title.trim().is_empty() && is_http_url(&p.url))
        .filter(|p| seen.insert(p.url.clone()))
        .take(MAX_PRODUCTS)
        .collect()
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Host part of an http(s) URL, without a leading `www.`.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() { None } else { Some(host.to_ascii_lowercase()) }
}
