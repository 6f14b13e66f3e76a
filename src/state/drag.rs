//! Drag Module - the Idle ⇄ Dragging session state machine.
//!
//! One controller guards one split's drag lifecycle. The document-level
//! move/release handlers attached at press time are held here as scoped
//! resources: every path back to Idle — a normal release, a stray release
//! with no session, a dispose mid-drag — runs the same teardown, so pointer
//! tracking can never outlive a drag.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::engine::DragSession;

type Cleanup = Box<dyn FnOnce()>;

enum Phase {
    Idle,
    Dragging {
        session: DragSession,
        /// Document-level listener cleanups, released on every exit path.
        unlisten: Vec<Cleanup>,
    },
}

/// Per-split drag state. `Clone` aliases the same state machine.
#[derive(Clone)]
pub struct DragController {
    phase: Rc<RefCell<Phase>>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(RefCell::new(Phase::Idle)),
        }
    }

    /// Idle → Dragging. The browser-equivalent environment delivers exactly
    /// one press before a release, so a second press while dragging is a
    /// programming error upstream; assert it in debug builds and recover by
    /// tearing the stale session down in release builds.
    pub fn begin(&self, session: DragSession, unlisten: Vec<Cleanup>) {
        debug_assert!(!self.is_dragging(), "drag session already active");
        self.end();
        trace!(handle = session.handle, "drag session opened");
        *self.phase.borrow_mut() = Phase::Dragging { session, unlisten };
    }

    /// Dragging → Idle. Idempotent: ending with no active session is a
    /// no-op. Returns whether a session was actually ended.
    pub fn end(&self) -> bool {
        let previous = self.phase.replace(Phase::Idle);
        match previous {
            Phase::Idle => false,
            Phase::Dragging { session, unlisten } => {
                for cleanup in unlisten {
                    cleanup();
                }
                trace!(handle = session.handle, "drag session closed");
                true
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(*self.phase.borrow(), Phase::Dragging { .. })
    }

    /// Run `f` against the active session, if any.
    pub fn with_session<R>(&self, f: impl FnOnce(&DragSession) -> R) -> Option<R> {
        match &*self.phase.borrow() {
            Phase::Idle => None,
            Phase::Dragging { session, .. } => Some(f(session)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn session() -> DragSession {
        DragSession {
            handle: 0,
            vector: vec![1.0, 1.0],
            start_coord: 50.0,
            extent: 100.0,
            generation: 0,
        }
    }

    #[test]
    fn test_begin_and_end() {
        let drag = DragController::new();
        assert!(!drag.is_dragging());

        drag.begin(session(), Vec::new());
        assert!(drag.is_dragging());
        assert_eq!(drag.with_session(|s| s.handle), Some(0));

        assert!(drag.end());
        assert!(!drag.is_dragging());
        assert_eq!(drag.with_session(|s| s.handle), None);
    }

    #[test]
    fn test_end_is_idempotent() {
        let drag = DragController::new();
        assert!(!drag.end());

        drag.begin(session(), Vec::new());
        assert!(drag.end());
        assert!(!drag.end());
    }

    #[test]
    fn test_end_releases_listeners_once() {
        let drag = DragController::new();
        let released = Rc::new(Cell::new(0));
        let released_clone = released.clone();

        drag.begin(
            session(),
            vec![Box::new(move || {
                released_clone.set(released_clone.get() + 1);
            })],
        );
        drag.end();
        drag.end();
        assert_eq!(released.get(), 1);
    }
}
