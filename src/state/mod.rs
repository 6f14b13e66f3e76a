//! State Module - runtime state for pointer interaction and observation.
//!
//! - **Pointer** - event types, dispatch, global handler registry
//! - **Drag** - the Idle ⇄ Dragging session state machine
//! - **Monitor** - reactive effect over the container's mutation channel

mod drag;
mod monitor;
mod pointer;

pub use drag::*;
pub use monitor::*;
pub use pointer::*;
