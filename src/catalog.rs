//! Style catalog: the fixed, ordered set of interior design aesthetics.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six selectable design aesthetics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[serde(rename = "Modern Minimalist")]
    ModernMinimalist,
    #[serde(rename = "Scandinavian")]
    Scandinavian,
    #[serde(rename = "Mid-Century Modern")]
    MidCenturyModern,
    #[serde(rename = "Industrial Loft")]
    IndustrialLoft,
    #[serde(rename = "Bohemian Chic")]
    BohemianChic,
    #[serde(rename = "Coastal Breeze")]
    CoastalBreeze,
}

impl Style {
    /// Every style, in display order.
    pub const ALL: [Style; 6] = [
        Style::ModernMinimalist,
        Style::Scandinavian,
        Style::MidCenturyModern,
        Style::IndustrialLoft,
        Style::BohemianChic,
        Style::CoastalBreeze,
    ];

    /// Human-readable name shown on the style card and sent to the designer.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ModernMinimalist => "Modern Minimalist",
            Self::Scandinavian => "Scandinavian",
            Self::MidCenturyModern => "Mid-Century Modern",
            Self::IndustrialLoft => "Industrial Loft",
            Self::BohemianChic => "Bohemian Chic",
            Self::CoastalBreeze => "Coastal Breeze",
        }
    }

    /// Short tagline under the label.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ModernMinimalist => "Clean lines & minimalism",
            Self::Scandinavian => "Cozy warmth & functionality",
            Self::MidCenturyModern => "Retro organic vibes",
            Self::IndustrialLoft => "Raw materials & exposed layout",
            Self::BohemianChic => "Free-spirited & eclectic",
            Self::CoastalBreeze => "Airy, breezy & light",
        }
    }

    /// Kebab-case identifier, stable across label copy changes.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::ModernMinimalist => "modern-minimalist",
            Self::Scandinavian => "scandinavian",
            Self::MidCenturyModern => "mid-century-modern",
            Self::IndustrialLoft => "industrial-loft",
            Self::BohemianChic => "bohemian-chic",
            Self::CoastalBreeze => "coastal-breeze",
        }
    }

    /// Accent class for the icon swatch on the style card.
    #[must_use]
    pub fn accent(self) -> &'static str {
        match self {
            Self::ModernMinimalist => "accent--neutral",
            Self::Scandinavian => "accent--stone",
            Self::MidCenturyModern => "accent--orange",
            Self::IndustrialLoft => "accent--zinc",
            Self::BohemianChic => "accent--emerald",
            Self::CoastalBreeze => "accent--cyan",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known style.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style: {0}")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    /// Accepts either the display label or the slug, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(needle) || style.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownStyle(s.to_owned()))
    }
}

/// Resolve a click on a style card. Disabled selectors swallow the click.
#[must_use]
pub fn choose(style: Style, disabled: bool) -> Option<Style> {
    (!disabled).then_some(style)
}
