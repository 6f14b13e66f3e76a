//! Input Module - crossterm event conversion.
//!
//! Bridges crossterm's event system with the pointer module. Hosts own the
//! event loop (and raw mode / mouse capture); they feed whatever crossterm
//! hands them into [`pump`] and the splits take it from there.
//!
//! # API
//!
//! - `convert_pointer_event` - Convert a crossterm MouseEvent to a PointerEvent
//! - `pump` - Convert and dispatch a crossterm event
//!
//! # Example
//!
//! ```ignore
//! use crossterm::event::read;
//! use sash_tui::input::pump;
//!
//! loop {
//!     let event = read()?;
//!     pump(&event);
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent, KeyModifiers, MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use crate::state::{Modifiers, PointerAction, PointerButton, PointerEvent, dispatch};

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a crossterm MouseEvent to a PointerEvent.
///
/// Terminals report a button held during motion as `Drag`; both `Drag` and
/// `Moved` map to pointer moves so fast drags never drop. Scroll events have
/// no pointer meaning here and convert to `None`.
pub fn convert_pointer_event(event: &CrosstermMouseEvent) -> Option<PointerEvent> {
    let (action, button) = match event.kind {
        MouseEventKind::Down(btn) => (PointerAction::Press, convert_pointer_button(btn)),
        MouseEventKind::Up(btn) => (PointerAction::Release, convert_pointer_button(btn)),
        MouseEventKind::Drag(btn) => (PointerAction::Move, convert_pointer_button(btn)),
        MouseEventKind::Moved => (PointerAction::Move, PointerButton::None),
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => return None,
    };

    Some(PointerEvent {
        action,
        button,
        x: event.column,
        y: event.row,
        modifiers: convert_modifiers(event.modifiers),
    })
}

fn convert_pointer_button(btn: CrosstermMouseButton) -> PointerButton {
    match btn {
        CrosstermMouseButton::Left => PointerButton::Left,
        CrosstermMouseButton::Right => PointerButton::Right,
        CrosstermMouseButton::Middle => PointerButton::Middle,
    }
}

fn convert_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
        meta: modifiers.contains(KeyModifiers::SUPER),
    }
}

// =============================================================================
// PUMP
// =============================================================================

/// Convert and dispatch a crossterm event. Returns true when a pointer
/// handler consumed it; key and resize events pass through untouched.
pub fn pump(event: &CrosstermEvent) -> bool {
    match event {
        CrosstermEvent::Mouse(mouse) => match convert_pointer_event(mouse) {
            Some(pointer) => dispatch(pointer),
            None => false,
        },
        _ => false,
    }
}
