//! # sash-tui
//!
//! Interactive split-panel resizing for terminal UIs.
//!
//! A container's children are *panels*; between every adjacent pair the crate
//! derives a draggable *sash handle*. Dragging a handle redistributes the
//! panels' flex weights — the share of the container each panel occupies —
//! while respecting per-panel minimum floors and conserving the total.
//!
//! ## Architecture
//!
//! ```text
//! Container mutation → version signal → Monitor effect → handle rebuild
//! PointerEvent press → DragSession snapshot → redistribute → weights applied
//! ```
//!
//! The panel set is free to change while the split is live: handles are
//! re-derived on every structural change, and a drag whose session predates
//! the latest rebuild simply goes inert until released.
//!
//! ## Modules
//!
//! - [`container`] - The observed element tree (panels + derived handles)
//! - [`engine`] - Weight redistribution and handle lifecycle
//! - [`split`] - [`SplitView`] (observed, N panels) and [`SplitPair`]
//!   (static, exactly 2)
//! - [`state`] - Pointer registry, drag state machine, layout monitor
//! - [`layout`] - Taffy flexbox solve for child rects and hit tests
//! - [`input`] - crossterm event bridge
//!
//! ## Example
//!
//! ```ignore
//! use sash_tui::{Container, SplitOptions, SplitView, input};
//!
//! let container = Container::new();
//! container.set_viewport(120, 40);
//! container.add_panel();
//! container.add_panel();
//!
//! let view = SplitView::observe(SplitOptions {
//!     container: Some(container.clone()),
//!     ..Default::default()
//! })?;
//!
//! // host event loop
//! loop {
//!     let event = crossterm::event::read()?;
//!     input::pump(&event);
//!     // render panels from view.flex_values()
//! }
//! ```

pub mod container;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod split;
pub mod state;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use container::{Container, PanelId};

pub use engine::{DragSession, RebuildOutcome, rebuild, redistribute};

pub use error::SashError;

pub use layout::{Rect, SolvedChild, hit_handle, solve};

pub use split::{PairOptions, ResizeCallback, SplitOptions, SplitPair, SplitView};

pub use state::{
    // Pointer
    Modifiers, PointerAction, PointerButton, PointerEvent,
    dispatch, is_pointer_down, pointer_position,
    // Drag + monitor
    DragController, Monitor,
};

pub use style::{CursorShape, HandleStyle};

pub use types::{Axis, MinFlex, SubscriptionId};
