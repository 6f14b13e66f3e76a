//! Core types - axis, flex floors, subscriptions.
//!
//! Shared vocabulary for the split machinery. The flex convention used
//! throughout the crate: after every rebuild the weights of `n` panels sum to
//! `n`, so `1.0` is the standard share. Drags conserve whatever total the
//! session started with.

use crate::error::SashError;

// =============================================================================
// AXIS
// =============================================================================

/// Resize axis of a split container.
///
/// `Horizontal` lays panels out left→right and drags along x;
/// `Vertical` lays panels top→bottom and drags along y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Pick the coordinate along this axis from an (x, y) pair.
    pub fn pick(self, x: u16, y: u16) -> u16 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }
}

// =============================================================================
// MINIMUM FLEX FLOORS
// =============================================================================

/// Minimum flex weight a panel may be reduced to during redistribution.
///
/// Floors are expressed in flex units (the same units as the weights
/// themselves). A floor must stay strictly below the total available flex or
/// dragging simply stops at the frontier — the engine never errors on an
/// unreachable request.
#[derive(Debug, Clone, PartialEq)]
pub enum MinFlex {
    /// The same floor for every panel.
    Uniform(f64),
    /// One floor per panel, in panel order. Missing entries default to 0,
    /// surplus entries are ignored.
    PerPanel(Vec<f64>),
}

impl Default for MinFlex {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl MinFlex {
    /// Resolve to one floor per panel for a panel count of `n`.
    pub fn floors(&self, n: usize) -> Vec<f64> {
        match self {
            Self::Uniform(f) => vec![*f; n],
            Self::PerPanel(per) => {
                let mut floors = vec![0.0; n];
                for (slot, floor) in floors.iter_mut().zip(per.iter()) {
                    *slot = *floor;
                }
                floors
            }
        }
    }

    /// Validate that every floor is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), SashError> {
        let check = |f: f64| -> Result<(), SashError> {
            if !f.is_finite() || f < 0.0 {
                return Err(SashError::InvalidOption(format!(
                    "min flex must be a finite number >= 0, got {f}"
                )));
            }
            Ok(())
        };
        match self {
            Self::Uniform(f) => check(*f),
            Self::PerPanel(per) => per.iter().try_for_each(|f| check(*f)),
        }
    }
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

/// Identifier returned by `on_resize`, accepted by `off_resize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_pick() {
        assert_eq!(Axis::Horizontal.pick(3, 9), 3);
        assert_eq!(Axis::Vertical.pick(3, 9), 9);
    }

    #[test]
    fn test_floors_uniform() {
        assert_eq!(MinFlex::Uniform(0.25).floors(3), vec![0.25, 0.25, 0.25]);
        assert_eq!(MinFlex::default().floors(2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_floors_per_panel_pads_and_truncates() {
        let per = MinFlex::PerPanel(vec![0.1, 0.2]);
        assert_eq!(per.floors(3), vec![0.1, 0.2, 0.0]);
        assert_eq!(per.floors(1), vec![0.1]);
    }

    #[test]
    fn test_validate_rejects_bad_floors() {
        assert!(MinFlex::Uniform(-0.5).validate().is_err());
        assert!(MinFlex::Uniform(f64::NAN).validate().is_err());
        assert!(MinFlex::PerPanel(vec![0.1, f64::INFINITY]).validate().is_err());
        assert!(MinFlex::Uniform(0.3).validate().is_ok());
    }
}
