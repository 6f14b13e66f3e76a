//! Engine Module - weight redistribution and handle lifecycle.
//!
//! - **Redistribute** - pure pixel→flex conversion and the multi-neighbor
//!   floor walk
//! - **Lifecycle** - derives the handle set and (re)assigns weights from the
//!   current panel list

mod lifecycle;
mod redistribute;

pub use lifecycle::*;
pub use redistribute::*;
