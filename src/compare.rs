//! Before/after compare slider model.
//!
//! The divider position is a percentage of the container width. Pointer
//! moves only count between `begin_drag` and `end_drag`; the UI attaches its
//! global move/up listeners on drag start and releases them on drag end, so
//! an idle slider holds no listeners at all.

#[cfg(test)]
#[path = "compare_test.rs"]
mod compare_test;

/// Divider position a fresh slider starts at.
pub const INITIAL_POSITION: f64 = 50.0;

/// Label on the "before" half.
pub const BEFORE_LABEL: &str = "Original";

/// Label on the "after" half when no style name is available.
pub const DEFAULT_AFTER_LABEL: &str = "Redesign";

/// Horizontal extent of the slider container in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f64,
    pub width: f64,
}

/// Divider state for one compare widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareSlider {
    position: f64,
    dragging: bool,
}

impl Default for CompareSlider {
    fn default() -> Self {
        Self { position: INITIAL_POSITION, dragging: false }
    }
}

impl CompareSlider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Divider position in `[0, 100]`.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Track a pointer move. Returns `true` when the divider moved.
    ///
    /// Ignored while not dragging, for a container with no width, and for
    /// non-finite coordinates.
    pub fn drag_to(&mut self, client_x: f64, span: Span) -> bool {
        if !self.dragging {
            return false;
        }
        match position_for(client_x, span) {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }

    /// CSS `clip-path` for the "before" image: it shows up to the divider.
    #[must_use]
    pub fn before_clip_path(&self) -> String {
        format!("inset(0 {}% 0 0)", 100.0 - self.position)
    }

    /// CSS `left` for the divider handle.
    #[must_use]
    pub fn handle_left(&self) -> String {
        format!("{}%", self.position)
    }
}

/// Map a pointer's client x to a divider percentage, clamped to the span.
#[must_use]
pub fn position_for(client_x: f64, span: Span) -> Option<f64> {
    if !client_x.is_finite() || !span.left.is_finite() || !span.width.is_finite() || span.width <= 0.0 {
        return None;
    }
    let x = (client_x - span.left).clamp(0.0, span.width);
    Some((x / span.width * 100.0).clamp(0.0, 100.0))
}

/// Label for the "after" half: the chosen style, or a generic caption.
#[must_use]
pub fn after_label(style: Option<crate::catalog::Style>) -> &'static str {
    style.map_or(DEFAULT_AFTER_LABEL, crate::catalog::Style::label)
}
