//! Pointer Module - pointer event state and handler registry.
//!
//! The document-level pointer surface: controllers register *global*
//! press/move/release handlers here and receive every dispatched event no
//! matter where the pointer sits. That is what lets a drag keep tracking a
//! pointer that has long left the handle's own bounds.
//!
//! Does NOT own stdin — hosts pump whatever event source they use into
//! [`dispatch`] (see the crossterm bridge in [`crate::input`]).
//!
//! # API
//!
//! - `dispatch(event)` - Dispatch a pointer event to registered handlers
//! - `on_press(fn)` / `on_move(fn)` / `on_release(fn)` - Global handlers,
//!   each returning a cleanup function
//! - `pointer_position()` - Last dispatched position
//! - `is_pointer_down()` - Button state
//!
//! # Example
//!
//! ```ignore
//! use sash_tui::state::pointer;
//!
//! let cleanup = pointer::on_press(|event| {
//!     println!("press at ({}, {})", event.x, event.y);
//!     false // don't consume
//! });
//! // ...
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

// =============================================================================
// TYPES
// =============================================================================

/// Pointer action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press,
    Move,
    Release,
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub button: PointerButton,
    /// X coordinate (0-indexed cells).
    pub x: u16,
    /// Y coordinate (0-indexed cells).
    pub y: u16,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(action: PointerAction, button: PointerButton, x: u16, y: u16) -> Self {
        Self {
            action,
            button,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }

    /// Create a press event.
    pub fn press(button: PointerButton, x: u16, y: u16) -> Self {
        Self::new(PointerAction::Press, button, x, y)
    }

    /// Create a move event.
    pub fn move_to(x: u16, y: u16) -> Self {
        Self::new(PointerAction::Move, PointerButton::None, x, y)
    }

    /// Create a release event.
    pub fn release(button: PointerButton, x: u16, y: u16) -> Self {
        Self::new(PointerAction::Release, button, x, y)
    }
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

/// Handler for pointer events. Return true to consume the event.
///
/// Rc rather than Box so dispatch can snapshot the handler list and iterate
/// without holding the registry borrow — handlers are then free to register
/// and deregister other handlers mid-dispatch (a release handler tearing
/// down its own drag listeners does exactly that).
pub type PointerHandler = Rc<dyn Fn(&PointerEvent) -> bool>;

struct HandlerRegistry {
    press: Vec<(usize, PointerHandler)>,
    moves: Vec<(usize, PointerHandler)>,
    release: Vec<(usize, PointerHandler)>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            press: Vec::new(),
            moves: Vec::new(),
            release: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
    static POINTER_X: Signal<u16> = signal(0);
    static POINTER_Y: Signal<u16> = signal(0);
    static IS_POINTER_DOWN: Signal<bool> = signal(false);
}

/// Last dispatched pointer position.
pub fn pointer_position() -> (u16, u16) {
    (POINTER_X.with(|s| s.get()), POINTER_Y.with(|s| s.get()))
}

/// Whether a button is currently held.
pub fn is_pointer_down() -> bool {
    IS_POINTER_DOWN.with(|s| s.get())
}

// =============================================================================
// REGISTRATION
// =============================================================================

fn register(
    select: fn(&mut HandlerRegistry) -> &mut Vec<(usize, PointerHandler)>,
    handler: PointerHandler,
) -> impl FnOnce() {
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        select(&mut reg).push((id, handler));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            select(&mut reg).retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Register a global press handler. Returns a cleanup function.
pub fn on_press<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&PointerEvent) -> bool + 'static,
{
    register(|reg| &mut reg.press, Rc::new(handler))
}

/// Register a global move handler. Returns a cleanup function.
pub fn on_move<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&PointerEvent) -> bool + 'static,
{
    register(|reg| &mut reg.moves, Rc::new(handler))
}

/// Register a global release handler. Returns a cleanup function.
pub fn on_release<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&PointerEvent) -> bool + 'static,
{
    register(|reg| &mut reg.release, Rc::new(handler))
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Dispatch a pointer event to all registered handlers, in registration
/// order, stopping at the first handler that consumes it. Returns true when
/// consumed.
pub fn dispatch(event: PointerEvent) -> bool {
    POINTER_X.with(|s| s.set(event.x));
    POINTER_Y.with(|s| s.set(event.y));
    match event.action {
        PointerAction::Press => {
            IS_POINTER_DOWN.with(|s| s.set(true));
        }
        PointerAction::Release => {
            IS_POINTER_DOWN.with(|s| s.set(false));
        }
        PointerAction::Move => {}
    }

    // Snapshot before iterating: handlers may mutate the registry.
    let handlers: Vec<PointerHandler> = REGISTRY.with(|reg| {
        let reg = reg.borrow();
        let list = match event.action {
            PointerAction::Press => &reg.press,
            PointerAction::Move => &reg.moves,
            PointerAction::Release => &reg.release,
        };
        list.iter().map(|(_, h)| h.clone()).collect()
    });

    for handler in handlers {
        if handler(&event) {
            return true;
        }
    }
    false
}

// =============================================================================
// CLEANUP
// =============================================================================

/// Clear all handlers and reset pointer state (for testing).
pub fn reset_pointer_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.press.clear();
        reg.moves.clear();
        reg.release.clear();
        reg.next_id = 0;
    });
    POINTER_X.with(|s| s.set(0));
    POINTER_Y.with(|s| s.set(0));
    IS_POINTER_DOWN.with(|s| s.set(false));
}

/// Number of registered handlers across all actions (for testing and leak
/// checks).
pub fn handler_count() -> usize {
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        reg.press.len() + reg.moves.len() + reg.release.len()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() {
        reset_pointer_state();
    }

    #[test]
    fn test_dispatch_updates_state() {
        setup();

        dispatch(PointerEvent::move_to(10, 20));
        assert_eq!(pointer_position(), (10, 20));
        assert!(!is_pointer_down());

        dispatch(PointerEvent::press(PointerButton::Left, 15, 25));
        assert!(is_pointer_down());

        dispatch(PointerEvent::release(PointerButton::Left, 15, 25));
        assert!(!is_pointer_down());
    }

    #[test]
    fn test_handler_cleanup() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on_press(move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch(PointerEvent::press(PointerButton::Left, 0, 0));
        assert_eq!(count.get(), 1);

        cleanup();
        dispatch(PointerEvent::press(PointerButton::Left, 0, 0));
        assert_eq!(count.get(), 1);
        assert_eq!(handler_count(), 0);
    }

    #[test]
    fn test_consumed_event_stops_propagation() {
        setup();

        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();

        let _first = on_press(|_| true);
        let _second = on_press(move |_| {
            reached_clone.set(true);
            false
        });

        assert!(dispatch(PointerEvent::press(PointerButton::Left, 0, 0)));
        assert!(!reached.get());
    }

    #[test]
    fn test_handler_may_deregister_during_dispatch() {
        setup();

        // A release handler that removes its own registration while the
        // dispatch that called it is still walking the snapshot.
        let cleanup_slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
            Rc::new(RefCell::new(None));
        let slot_clone = cleanup_slot.clone();

        let cleanup = on_release(move |_| {
            if let Some(cleanup) = slot_clone.borrow_mut().take() {
                cleanup();
            }
            true
        });
        *cleanup_slot.borrow_mut() = Some(Box::new(cleanup));

        assert!(dispatch(PointerEvent::release(PointerButton::Left, 0, 0)));
        assert_eq!(handler_count(), 0);
        // gone: a second release reaches nothing
        assert!(!dispatch(PointerEvent::release(PointerButton::Left, 0, 0)));
    }

    #[test]
    fn test_move_handlers_only_see_moves() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let _cleanup = on_move(move |_| {
            count_clone.set(count_clone.get() + 1);
            true
        });

        dispatch(PointerEvent::press(PointerButton::Left, 0, 0));
        dispatch(PointerEvent::release(PointerButton::Left, 0, 0));
        assert_eq!(count.get(), 0);

        dispatch(PointerEvent::move_to(1, 1));
        assert_eq!(count.get(), 1);
    }
}
