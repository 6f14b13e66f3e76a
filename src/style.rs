//! Handle styling - known keys with axis-aware defaults plus pass-through.
//!
//! The style applied to every created handle is an explicit mapping: a small
//! closed set of known keys (`span`, `cursor`, `background`) whose defaults
//! depend on the resize axis, and an open pass-through bucket whose entries
//! are applied verbatim. There is no reflective property assignment — hosts
//! read the resolved map off the handle and render it however they like.

use std::collections::BTreeMap;

use crate::types::Axis;

// =============================================================================
// CURSOR SHAPE
// =============================================================================

/// Cursor glyph a host should show while the pointer is over a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    /// Left-right resize arrows (horizontal splits).
    ColResize,
    /// Up-down resize arrows (vertical splits).
    RowResize,
    Pointer,
    Default,
}

impl CursorShape {
    /// Stable token written into the resolved style map.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ColResize => "col-resize",
            Self::RowResize => "row-resize",
            Self::Pointer => "pointer",
            Self::Default => "default",
        }
    }
}

// =============================================================================
// HANDLE STYLE
// =============================================================================

/// Visual properties applied to every created handle.
///
/// Known fields left at `None` get an axis-aware default when resolved.
/// `extra` entries pass through verbatim and win over known keys on key
/// collision.
#[derive(Debug, Clone, Default)]
pub struct HandleStyle {
    /// Thickness of the handle in cells along the resize axis.
    pub span: Option<u16>,
    /// Hover cursor hint.
    pub cursor: Option<CursorShape>,
    /// Background token (a color name, theme key — the crate does not
    /// interpret it).
    pub background: Option<String>,
    /// Unrecognized key/value pairs, applied verbatim.
    pub extra: BTreeMap<String, String>,
}

impl HandleStyle {
    /// Handle thickness in cells, defaulted.
    pub fn span(&self) -> u16 {
        self.span.unwrap_or(1)
    }

    /// Resolve into the concrete map applied to a handle.
    pub fn resolve(&self, axis: Axis) -> BTreeMap<String, String> {
        let cursor = self.cursor.unwrap_or(match axis {
            Axis::Horizontal => CursorShape::ColResize,
            Axis::Vertical => CursorShape::RowResize,
        });
        let background = self.background.as_deref().unwrap_or("grey");

        let mut resolved = BTreeMap::new();
        resolved.insert("span".to_string(), self.span().to_string());
        resolved.insert("cursor".to_string(), cursor.as_str().to_string());
        resolved.insert("background".to_string(), background.to_string());
        for (key, value) in &self.extra {
            resolved.insert(key.clone(), value.clone());
        }
        resolved
    }
}
