//! Split facade - observed N-panel splits and the static two-panel pair.
//!
//! [`SplitView`] watches a container: whenever panels are inserted or
//! removed it re-derives the handle set, and while a handle is dragged it
//! redistributes the panels' flex weights. It degrades gracefully — a
//! container that drops below 2 panels simply loses its handles.
//!
//! [`SplitPair`] is the strict variant for exactly two panels: it does not
//! observe anything and errors at attach time when the container doesn't
//! hold exactly 2 panels.
//!
//! # Example
//!
//! ```ignore
//! use sash_tui::{Container, SplitOptions, SplitView};
//!
//! let container = Container::new();
//! container.add_panel();
//! container.add_panel();
//!
//! let view = SplitView::observe(SplitOptions {
//!     container: Some(container.clone()),
//!     ..Default::default()
//! })?;
//!
//! let id = view.on_resize(|weights| {
//!     // redraw panels with the new weights
//! });
//!
//! // pump crossterm events with sash_tui::input::pump(...) and the view
//! // handles presses, moves and releases on its own.
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::{debug, trace, warn};

use crate::container::Container;
use crate::engine::{DragSession, rebuild, redistribute};
use crate::error::SashError;
use crate::layout;
use crate::state::{self, DragController, Monitor, PointerButton, PointerEvent};
use crate::style::HandleStyle;
use crate::types::{Axis, MinFlex, SubscriptionId};

/// Post-resize callback; receives the freshly applied flex vector.
pub type ResizeCallback = Rc<dyn Fn(&[f64])>;

type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for [`SplitView::observe`].
#[derive(Clone, Default)]
pub struct SplitOptions {
    /// The observed container. Required.
    pub container: Option<Container>,
    pub axis: Axis,
    /// Floors in flex units; must stay below the total flex.
    pub min_flex: MinFlex,
    pub handle_style: HandleStyle,
}

/// Options for [`SplitPair::new`].
#[derive(Clone)]
pub struct PairOptions {
    /// The split container. Required.
    pub container: Option<Container>,
    pub axis: Axis,
    /// Floor as a fraction of the total, `0 ≤ f < 1`.
    pub min_flex: f64,
    pub handle_style: HandleStyle,
}

impl Default for PairOptions {
    fn default() -> Self {
        Self {
            container: None,
            axis: Axis::default(),
            min_flex: 0.0,
            handle_style: HandleStyle::default(),
        }
    }
}

// =============================================================================
// SHARED CORE
// =============================================================================

/// State shared between the facade, the monitor effect and the pointer
/// handlers.
struct Shared {
    container: Container,
    axis: Axis,
    min_flex: MinFlex,
    handle_style: HandleStyle,
    /// Reactive mirror of the applied flex vector.
    weights: Signal<Vec<f64>>,
    subscribers: RefCell<Vec<(usize, ResizeCallback)>>,
    next_subscription: Cell<usize>,
    /// Bumped on every rebuild; sessions opened under an older generation are
    /// stale and their moves are no-ops.
    generation: Cell<u64>,
    drag: DragController,
    disposed: Cell<bool>,
}

impl Shared {
    fn new(container: Container, axis: Axis, min_flex: MinFlex, handle_style: HandleStyle) -> Rc<Self> {
        Rc::new(Self {
            container,
            axis,
            min_flex,
            handle_style,
            weights: signal(Vec::new()),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            generation: Cell::new(0),
            drag: DragController::new(),
            disposed: Cell::new(false),
        })
    }

    fn rebuild(&self) {
        if self.disposed.get() {
            return;
        }
        let outcome = rebuild(&self.container, self.axis, &self.min_flex, &self.handle_style);
        self.generation.set(self.generation.get() + 1);
        self.weights.set(outcome.weights);
    }

    /// Apply a freshly computed vector: panel styling first, then the
    /// reactive mirror, then the subscribers, synchronously.
    fn apply(&self, weights: Vec<f64>) {
        if !self.container.set_panel_weights(&weights) {
            warn!("flex vector no longer matches the panel list; move dropped");
            return;
        }
        self.weights.set(weights.clone());
        let subscribers: Vec<ResizeCallback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(&weights);
        }
    }

    fn subscribe(&self, callback: impl Fn(&[f64]) + 'static) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id.0);
        subscribers.len() != before
    }

    /// Idle → Dragging: snapshot the session and attach the document-level
    /// move/release listeners.
    fn begin_drag(self: &Rc<Self>, handle: usize, event: &PointerEvent) {
        let vector: Vec<f64> = self
            .container
            .panel_weights()
            .into_iter()
            .flatten()
            .collect();
        if vector.len() < 2 {
            return;
        }

        let (viewport_w, viewport_h) = self.container.viewport();
        let session = DragSession {
            handle,
            vector,
            start_coord: self.axis.pick(event.x, event.y) as f64,
            extent: self.axis.pick(viewport_w, viewport_h) as f64,
            generation: self.generation.get(),
        };

        let for_move = Rc::downgrade(self);
        let unlisten_move = state::on_move(move |event| match for_move.upgrade() {
            Some(shared) => shared.drag_move(event),
            None => false,
        });
        let for_release = Rc::downgrade(self);
        let unlisten_release = state::on_release(move |_| match for_release.upgrade() {
            Some(shared) => shared.drag.end(),
            None => false,
        });

        self.drag.begin(
            session,
            vec![Box::new(unlisten_move), Box::new(unlisten_release)],
        );
    }

    /// Dragging → Dragging: redistribute from the session snapshot. A
    /// session whose rebuild generation has passed is stale; its moves do
    /// nothing until the release arrives.
    fn drag_move(&self, event: &PointerEvent) -> bool {
        let next = self
            .drag
            .with_session(|session| {
                if session.generation != self.generation.get() {
                    trace!("stale drag session; move ignored");
                    return None;
                }
                let floors = self.min_flex.floors(session.vector.len());
                let coord = self.axis.pick(event.x, event.y) as f64;
                Some(redistribute(session, coord, &floors))
            })
            .flatten();
        match next {
            Some(weights) => {
                self.apply(weights);
                true
            }
            None => false,
        }
    }

    /// Restore the container: no handles, no weight styling, no
    /// container-level layout styling.
    fn restore_container(&self) {
        self.container.silently(|| {
            self.container.remove_handles();
            self.container.clear_panel_weights();
            self.container.set_layout_axis(None);
        });
        self.weights.set(Vec::new());
    }

    /// Build the press handler that opens drag sessions for this split.
    fn press_handler(self: &Rc<Self>) -> Cleanup {
        let weak = Rc::downgrade(self);
        Box::new(state::on_press(move |event| {
            let Some(shared) = weak.upgrade() else {
                return false;
            };
            if shared.disposed.get() || event.button != PointerButton::Left {
                return false;
            }
            let solved = layout::solve(
                &shared.container,
                shared.axis,
                shared.handle_style.span(),
            );
            let Some(handle) = layout::hit_handle(&solved, event.x, event.y) else {
                return false;
            };
            shared.begin_drag(handle, event);
            shared.drag.is_dragging()
        }))
    }
}

// =============================================================================
// SPLIT VIEW - observed, N panels
// =============================================================================

/// Observed split: handles and weights follow the container's panel list.
pub struct SplitView {
    shared: Rc<Shared>,
    monitor: Monitor,
    unlisten_press: RefCell<Option<Cleanup>>,
}

impl std::fmt::Debug for SplitView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitView").finish_non_exhaustive()
    }
}

impl SplitView {
    /// Attach to the container in the options and begin observing it.
    ///
    /// Fails with [`SashError::MissingContainer`] when no container is
    /// supplied and [`SashError::InvalidOption`] when a floor is out of
    /// range. A panel count of 0 or 1 is fine — handles appear as soon as a
    /// second panel does.
    pub fn observe(options: SplitOptions) -> Result<Self, SashError> {
        let container = options.container.ok_or(SashError::MissingContainer)?;
        options.min_flex.validate()?;

        let shared = Shared::new(container.clone(), options.axis, options.min_flex, options.handle_style);

        // The effect fires immediately, performing the initial rebuild.
        let for_monitor = Rc::downgrade(&shared);
        let monitor = Monitor::observe(&container, move || {
            if let Some(shared) = for_monitor.upgrade() {
                shared.rebuild();
            }
        });
        let unlisten_press = shared.press_handler();

        debug!(panels = container.panel_count(), "split view observing container");
        Ok(Self {
            shared,
            monitor,
            unlisten_press: RefCell::new(Some(unlisten_press)),
        })
    }

    /// Snapshot of the current flex vector. Empty below 2 panels.
    pub fn flex_values(&self) -> Vec<f64> {
        self.shared.weights.get()
    }

    /// The flex vector normalized to fractions of the total.
    pub fn ratios(&self) -> Vec<f64> {
        ratios_of(&self.shared.weights.get())
    }

    /// Reactive mirror of the flex vector, for hosts that prefer signals
    /// over callbacks.
    pub fn weights(&self) -> Signal<Vec<f64>> {
        self.shared.weights.clone()
    }

    /// Subscribe to post-resize notifications (fired synchronously on every
    /// applied drag move).
    pub fn on_resize(&self, callback: impl Fn(&[f64]) + 'static) -> SubscriptionId {
        self.shared.subscribe(callback)
    }

    /// Unsubscribe. Returns false for an unknown id.
    pub fn off_resize(&self, id: SubscriptionId) -> bool {
        self.shared.unsubscribe(id)
    }

    /// The observed container.
    pub fn container(&self) -> &Container {
        &self.shared.container
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.drag.is_dragging()
    }

    /// Detach and restore the container. Releases, in order: the mutation
    /// subscription, any document-level pointer listeners left by a
    /// mid-drag dispose, and the handles and applied styling. Idempotent.
    pub fn dispose(&self) {
        if self.shared.disposed.replace(true) {
            return;
        }
        self.monitor.stop();
        self.shared.drag.end();
        if let Some(unlisten) = self.unlisten_press.borrow_mut().take() {
            unlisten();
        }
        self.shared.restore_container();
        debug!("split view disposed");
    }
}

impl Drop for SplitView {
    fn drop(&mut self) {
        self.dispose();
    }
}

// =============================================================================
// SPLIT PAIR - static, exactly 2 panels
// =============================================================================

/// Static two-panel split. Strict where [`SplitView`] is forgiving: the
/// container must hold exactly 2 panels at attach time, and attaching twice
/// without detaching is an error.
pub struct SplitPair {
    shared: Rc<Shared>,
    attached: Cell<bool>,
    unlisten_press: RefCell<Option<Cleanup>>,
}

impl std::fmt::Debug for SplitPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitPair").finish_non_exhaustive()
    }
}

impl SplitPair {
    /// Validate options and build the pair. Does not touch the container
    /// until [`attach`](Self::attach).
    pub fn new(options: PairOptions) -> Result<Self, SashError> {
        let container = options.container.ok_or(SashError::MissingContainer)?;
        if !options.min_flex.is_finite() || !(0.0..1.0).contains(&options.min_flex) {
            return Err(SashError::InvalidOption(format!(
                "pair min flex must be in [0, 1), got {}",
                options.min_flex
            )));
        }

        // The option is a fraction of the total; the engine works in flex
        // units, and a pair's total is 2.
        let min_flex = MinFlex::Uniform(options.min_flex * 2.0);
        Ok(Self {
            shared: Shared::new(container, options.axis, min_flex, options.handle_style),
            attached: Cell::new(false),
            unlisten_press: RefCell::new(None),
        })
    }

    /// Interleave the handle and start listening for drags.
    pub fn attach(&self) -> Result<(), SashError> {
        if self.attached.get() {
            return Err(SashError::AlreadyAttached);
        }
        let panels = self.shared.container.panel_count();
        if panels != 2 {
            return Err(SashError::InvalidChildCount(panels));
        }

        self.shared.rebuild();
        *self.unlisten_press.borrow_mut() = Some(self.shared.press_handler());
        self.attached.set(true);
        debug!("split pair attached");
        Ok(())
    }

    /// Detach and restore the container. Idempotent; the pair can be
    /// re-attached afterwards.
    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        self.shared.drag.end();
        if let Some(unlisten) = self.unlisten_press.borrow_mut().take() {
            unlisten();
        }
        self.shared.restore_container();
        debug!("split pair detached");
    }

    /// Snapshot of the current flex vector (sums to 2 once attached).
    pub fn flex_values(&self) -> Vec<f64> {
        self.shared.weights.get()
    }

    /// The flex vector normalized to fractions of the total.
    pub fn ratios(&self) -> Vec<f64> {
        ratios_of(&self.shared.weights.get())
    }

    /// Subscribe to post-resize notifications.
    pub fn on_resize(&self, callback: impl Fn(&[f64]) + 'static) -> SubscriptionId {
        self.shared.subscribe(callback)
    }

    /// Unsubscribe. Returns false for an unknown id.
    pub fn off_resize(&self, id: SubscriptionId) -> bool {
        self.shared.unsubscribe(id)
    }

    pub fn container(&self) -> &Container {
        &self.shared.container
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.drag.is_dragging()
    }
}

impl Drop for SplitPair {
    fn drop(&mut self) {
        self.detach();
    }
}

fn ratios_of(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|w| w / total).collect()
}
