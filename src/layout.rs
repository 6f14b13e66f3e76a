//! Layout solve - flexbox computation for panels and handles via Taffy.
//!
//! Builds a one-level Taffy tree from the container's children: panels map to
//! `flex_grow = weight` with a zero basis, handles to a fixed basis of the
//! configured span with no grow/shrink. The solved rects drive handle
//! hit-testing and give hosts the panel geometry to render.
//!
//! # Example
//!
//! ```ignore
//! use sash_tui::{layout, Axis, Container};
//!
//! let rects = layout::solve(&container, Axis::Horizontal, 1);
//! for child in &rects {
//!     // child.rect is in cells, container-relative
//! }
//! ```

use taffy::{AvailableSpace, Dimension, FlexDirection, Size, Style, TaffyTree};

use crate::container::{ChildKind, Container};
use crate::types::Axis;

// =============================================================================
// SOLVED GEOMETRY
// =============================================================================

/// Axis-aligned rectangle in cells, container-relative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Whether the cell at (x, y) falls inside this rect.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (px, py) = (x as f32, y as f32);
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// One solved child: a panel or a handle, in visual order.
#[derive(Debug, Clone)]
pub struct SolvedChild {
    /// Container child id.
    pub id: u64,
    pub is_handle: bool,
    pub rect: Rect,
}

// =============================================================================
// SOLVE
// =============================================================================

/// Compute rects for every child of the container along the given axis.
///
/// Panels with no recorded weight (pre-rebuild) fall back to an equal share.
pub fn solve(container: &Container, axis: Axis, handle_span: u16) -> Vec<SolvedChild> {
    let children = container.children_snapshot();
    if children.is_empty() {
        return Vec::new();
    }
    let (viewport_w, viewport_h) = container.viewport();

    let mut tree: TaffyTree<()> = TaffyTree::new();

    let child_nodes: Vec<_> = children
        .iter()
        .map(|child| {
            let style = match &child.kind {
                ChildKind::Panel { weight } => Style {
                    flex_grow: weight.unwrap_or(1.0) as f32,
                    flex_shrink: 1.0,
                    flex_basis: Dimension::Length(0.0),
                    ..Default::default()
                },
                ChildKind::Handle { .. } => Style {
                    flex_grow: 0.0,
                    flex_shrink: 0.0,
                    flex_basis: Dimension::Length(handle_span as f32),
                    ..Default::default()
                },
            };
            tree.new_leaf(style).expect("taffy leaf")
        })
        .collect();

    let root_style = Style {
        flex_direction: match axis {
            Axis::Horizontal => FlexDirection::Row,
            Axis::Vertical => FlexDirection::Column,
        },
        size: Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Percent(1.0),
        },
        ..Default::default()
    };
    let root = tree
        .new_with_children(root_style, &child_nodes)
        .expect("taffy root");

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(viewport_w as f32),
            height: AvailableSpace::Definite(viewport_h as f32),
        },
    )
    .expect("taffy solve");

    children
        .iter()
        .zip(child_nodes)
        .map(|(child, node)| {
            let layout = tree.layout(node).expect("taffy layout");
            SolvedChild {
                id: child.id,
                is_handle: child.is_handle(),
                rect: Rect {
                    x: layout.location.x,
                    y: layout.location.y,
                    width: layout.size.width,
                    height: layout.size.height,
                },
            }
        })
        .collect()
}

/// Ordinal of the handle under (x, y), if any. Ordinal `k` is the divider
/// between panels `k` and `k + 1`.
pub fn hit_handle(children: &[SolvedChild], x: u16, y: u16) -> Option<usize> {
    children
        .iter()
        .filter(|c| c.is_handle)
        .position(|c| c.rect.contains(x, y))
}
