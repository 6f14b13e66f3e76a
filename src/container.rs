//! Container - the observed element tree.
//!
//! A `Container` holds an ordered list of children: the host's *panels* and
//! the crate's derived *handles*. Structural changes (child insertion and
//! removal) bump a reactive version signal — that signal is the mutation
//! channel the layout monitor subscribes to.
//!
//! The lifecycle manager mutates the container from inside the monitor's own
//! notification callback, so every self-initiated structural write happens
//! inside the *silent bracket* ([`Container::silently`]): the version signal
//! is not bumped and the monitor never reacts to its own writes.
//!
//! Weight and style writes are not structural and never bump the version.
//!
//! # Example
//!
//! ```ignore
//! use sash_tui::Container;
//!
//! let container = Container::new();
//! container.set_viewport(100, 30);
//! let left = container.add_panel();
//! let right = container.add_panel();
//! assert_eq!(container.panel_count(), 2);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::types::Axis;

// =============================================================================
// CHILDREN
// =============================================================================

/// Identifier of a panel, stable across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub u64);

#[derive(Debug, Clone)]
pub(crate) enum ChildKind {
    Panel { weight: Option<f64> },
    Handle { style: BTreeMap<String, String> },
}

#[derive(Debug, Clone)]
pub(crate) struct Child {
    pub id: u64,
    pub kind: ChildKind,
}

impl Child {
    pub fn is_handle(&self) -> bool {
        matches!(self.kind, ChildKind::Handle { .. })
    }
}

struct Inner {
    children: Vec<Child>,
    next_id: u64,
    viewport: (u16, u16),
    layout_axis: Option<Axis>,
}

// =============================================================================
// CONTAINER
// =============================================================================

/// Shared handle to an observed container. `Clone` is cheap and aliases the
/// same tree, like cloning a signal.
#[derive(Clone)]
pub struct Container {
    inner: Rc<RefCell<Inner>>,
    version: Signal<u64>,
    next_version: Rc<Cell<u64>>,
    silent: Rc<Cell<bool>>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Create an empty container with an 80x24 viewport.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                children: Vec::new(),
                next_id: 0,
                viewport: (80, 24),
                layout_axis: None,
            })),
            version: signal(0u64),
            next_version: Rc::new(Cell::new(0)),
            silent: Rc::new(Cell::new(false)),
        }
    }

    // -------------------------------------------------------------------------
    // Host API - panels
    // -------------------------------------------------------------------------

    /// Append a panel at the end.
    pub fn add_panel(&self) -> PanelId {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.children.push(Child {
                id,
                kind: ChildKind::Panel { weight: None },
            });
            id
        };
        self.notify();
        PanelId(id)
    }

    /// Insert a panel before panel position `at` (position among panels, not
    /// raw children). An `at` past the end appends.
    pub fn insert_panel(&self, at: usize) -> PanelId {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let child_index = nth_panel_child_index(&inner.children, at);
            inner.children.insert(
                child_index,
                Child {
                    id,
                    kind: ChildKind::Panel { weight: None },
                },
            );
            id
        };
        self.notify();
        PanelId(id)
    }

    /// Remove a panel. Returns false when the id is unknown.
    pub fn remove_panel(&self, id: PanelId) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.children.len();
            inner
                .children
                .retain(|c| c.is_handle() || c.id != id.0);
            inner.children.len() != before
        };
        if removed {
            self.notify();
        }
        removed
    }

    /// Number of panels (children that are not handles).
    pub fn panel_count(&self) -> usize {
        self.inner
            .borrow()
            .children
            .iter()
            .filter(|c| !c.is_handle())
            .count()
    }

    /// Number of derived handles currently interleaved.
    pub fn handle_count(&self) -> usize {
        self.inner
            .borrow()
            .children
            .iter()
            .filter(|c| c.is_handle())
            .count()
    }

    /// Total child count, handles included.
    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    /// Panel ids in visual order.
    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter(|c| !c.is_handle())
            .map(|c| PanelId(c.id))
            .collect()
    }

    /// Recorded weight of one panel, if any has been applied.
    pub fn panel_weight(&self, id: PanelId) -> Option<f64> {
        self.inner.borrow().children.iter().find_map(|c| match c.kind {
            ChildKind::Panel { weight } if c.id == id.0 => weight,
            _ => None,
        })
    }

    /// Recorded weights in panel order (`None` where no weight was applied).
    pub fn panel_weights(&self) -> Vec<Option<f64>> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(|c| match c.kind {
                ChildKind::Panel { weight } => Some(weight),
                _ => None,
            })
            .collect()
    }

    /// Resolved style map of the nth handle.
    pub fn handle_style(&self, handle: usize) -> Option<BTreeMap<String, String>> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(|c| match &c.kind {
                ChildKind::Handle { style } => Some(style.clone()),
                _ => None,
            })
            .nth(handle)
    }

    /// Container-level layout axis styling, if applied.
    pub fn layout_axis(&self) -> Option<Axis> {
        self.inner.borrow().layout_axis
    }

    // -------------------------------------------------------------------------
    // Host API - geometry
    // -------------------------------------------------------------------------

    /// Set the container size in cells. Not a structural change.
    pub fn set_viewport(&self, width: u16, height: u16) {
        self.inner.borrow_mut().viewport = (width, height);
    }

    /// Current container size in cells.
    pub fn viewport(&self) -> (u16, u16) {
        self.inner.borrow().viewport
    }

    /// Current structural version. Bumped on every external child
    /// insertion/removal.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    // -------------------------------------------------------------------------
    // Crate API - mutation channel
    // -------------------------------------------------------------------------

    pub(crate) fn version_signal(&self) -> Signal<u64> {
        self.version.clone()
    }

    /// Run `f` with the notification channel disabled. Structural writes made
    /// inside the bracket do not bump the version signal. Nesting is allowed.
    pub(crate) fn silently<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = self.silent.replace(true);
        let result = f();
        self.silent.set(previous);
        result
    }

    fn notify(&self) {
        if self.silent.get() {
            return;
        }
        let next = self.next_version.get() + 1;
        self.next_version.set(next);
        self.version.set(next);
    }

    // -------------------------------------------------------------------------
    // Crate API - structural writes used by the lifecycle manager
    // -------------------------------------------------------------------------

    /// Remove every handle child.
    pub(crate) fn remove_handles(&self) {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.children.len();
            inner.children.retain(|c| !c.is_handle());
            inner.children.len() != before
        };
        if removed {
            self.notify();
        }
    }

    /// Insert a handle after the panel at panel position `panel`.
    pub(crate) fn insert_handle_after_panel(
        &self,
        panel: usize,
        style: BTreeMap<String, String>,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            let Some(child_index) = nth_panel_child_index_checked(&inner.children, panel) else {
                return;
            };
            let id = inner.next_id;
            inner.next_id += 1;
            inner.children.insert(
                child_index + 1,
                Child {
                    id,
                    kind: ChildKind::Handle { style },
                },
            );
        }
        self.notify();
    }

    // -------------------------------------------------------------------------
    // Crate API - style writes (never bump the version)
    // -------------------------------------------------------------------------

    /// Apply weights to panels in order. Lengths must match; mismatches are
    /// ignored and reported to the caller.
    pub(crate) fn set_panel_weights(&self, weights: &[f64]) -> bool {
        let mut inner = self.inner.borrow_mut();
        let panels = inner
            .children
            .iter()
            .filter(|c| !c.is_handle())
            .count();
        if panels != weights.len() {
            return false;
        }
        let mut next = weights.iter();
        for child in inner.children.iter_mut() {
            if let ChildKind::Panel { weight } = &mut child.kind {
                *weight = Some(*next.next().expect("length checked above"));
            }
        }
        true
    }

    /// Clear every panel's weight styling.
    pub(crate) fn clear_panel_weights(&self) {
        let mut inner = self.inner.borrow_mut();
        for child in inner.children.iter_mut() {
            if let ChildKind::Panel { weight } = &mut child.kind {
                *weight = None;
            }
        }
    }

    pub(crate) fn set_layout_axis(&self, axis: Option<Axis>) {
        self.inner.borrow_mut().layout_axis = axis;
    }

    /// Ordered snapshot of all children for layout and rebuilds.
    pub(crate) fn children_snapshot(&self) -> Vec<Child> {
        self.inner.borrow().children.clone()
    }
}

/// Child index where the panel at panel position `at` sits, or the insertion
/// point at the end when `at` is past the last panel.
fn nth_panel_child_index(children: &[Child], at: usize) -> usize {
    let mut seen = 0;
    for (index, child) in children.iter().enumerate() {
        if !child.is_handle() {
            if seen == at {
                return index;
            }
            seen += 1;
        }
    }
    children.len()
}

fn nth_panel_child_index_checked(children: &[Child], at: usize) -> Option<usize> {
    let mut seen = 0;
    for (index, child) in children.iter().enumerate() {
        if !child.is_handle() {
            if seen == at {
                return Some(index);
            }
            seen += 1;
        }
    }
    None
}
