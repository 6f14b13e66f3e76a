//! Redistribute - pure flex-weight redistribution for one drag.
//!
//! Every pointer move during a drag is computed from the immutable session
//! snapshot, never from the previously applied vector: the same move replayed
//! twice yields the same result, and rounding error cannot accumulate across
//! a long drag.
//!
//! The walk conserves the session total by construction — the panel beside
//! the dragged handle gains exactly what its neighbors actually gave up,
//! never the full requested delta.

// =============================================================================
// DRAG SESSION
// =============================================================================

/// Immutable snapshot captured at pointer press.
///
/// `handle` is the divider ordinal: handle `k` sits between panels `k` and
/// `k + 1`. `generation` stamps the rebuild the session was opened under; a
/// rebuild while dragging leaves the session stale and its moves become
/// no-ops.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub handle: usize,
    /// Full flex vector at press.
    pub vector: Vec<f64>,
    /// Axis-aligned pointer coordinate at press, in cells.
    pub start_coord: f64,
    /// Container extent along the resize axis, in cells.
    pub extent: f64,
    pub generation: u64,
}

// =============================================================================
// REDISTRIBUTION
// =============================================================================

/// Compute the new flex vector for a pointer at `coord`.
///
/// A positive delta moves the divider toward the end of the axis: panels
/// after the handle shrink toward their floors, nearest first, and the panel
/// just before the handle grows by the absorbed amount. A negative delta is
/// symmetric. Panels that give nothing keep their prior weight.
///
/// Floor comparisons are tolerance-free; dragging past the frontier produces
/// no further change rather than an error.
pub fn redistribute(session: &DragSession, coord: f64, floors: &[f64]) -> Vec<f64> {
    let mut vector = session.vector.clone();
    let count = vector.len();
    if count < 2 || session.handle + 1 >= count || session.extent <= 0.0 {
        return vector;
    }

    let total: f64 = vector.iter().sum();
    let delta_flex = (coord - session.start_coord) / session.extent * total;
    if delta_flex == 0.0 {
        return vector;
    }

    let floor_of = |index: usize| floors.get(index).copied().unwrap_or(0.0);

    if delta_flex > 0.0 {
        // Divider moves toward the end: shrink downstream panels, nearest
        // first, until the delta is exhausted or everyone is at the floor.
        let mut remaining = delta_flex;
        let mut absorbed = 0.0;
        for index in (session.handle + 1)..count {
            if remaining <= 0.0 {
                break;
            }
            let available = vector[index] - floor_of(index);
            if available <= 0.0 {
                continue;
            }
            let take = remaining.min(available);
            vector[index] -= take;
            absorbed += take;
            remaining -= take;
        }
        vector[session.handle] += absorbed;
    } else {
        // Divider moves toward the start: shrink upstream panels, nearest
        // first, and grow the panel just after the handle.
        let mut remaining = -delta_flex;
        let mut absorbed = 0.0;
        for index in (0..=session.handle).rev() {
            if remaining <= 0.0 {
                break;
            }
            let available = vector[index] - floor_of(index);
            if available <= 0.0 {
                continue;
            }
            let take = remaining.min(available);
            vector[index] -= take;
            absorbed += take;
            remaining -= take;
        }
        vector[session.handle + 1] += absorbed;
    }

    vector
}
