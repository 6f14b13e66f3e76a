//! Lifecycle - derives handles and weights from the current panel list.
//!
//! A rebuild makes the handle set and the flex vector consistent with
//! whatever panels the container holds right now. It runs inside the
//! container's silent bracket: the handle insertions/removals it performs
//! never re-trigger the layout monitor that called it.
//!
//! Fewer than 2 panels is a valid terminal configuration, not an error: all
//! handles are removed and all weight/layout styling is cleared.

use tracing::debug;

use crate::container::Container;
use crate::style::HandleStyle;
use crate::types::{Axis, MinFlex};

/// Result of one rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct RebuildOutcome {
    pub panel_count: usize,
    /// The applied flex vector; empty below 2 panels.
    pub weights: Vec<f64>,
}

/// Rebuild handles and weights for the container's current panel list.
///
/// Weight assignment: panels that already carry a weight keep it; newcomers
/// get the arithmetic mean of the recorded weights (or `1.0` when none
/// exist). The vector is then rescaled so it sums to the panel count, and any
/// weight that lands below its floor is clamped up — which may transiently
/// break exact conservation, accepted at rebuild time only, never during a
/// drag.
pub fn rebuild(
    container: &Container,
    axis: Axis,
    min_flex: &MinFlex,
    handle_style: &HandleStyle,
) -> RebuildOutcome {
    container.silently(|| {
        container.remove_handles();

        let recorded = container.panel_weights();
        let count = recorded.len();
        if count < 2 {
            container.clear_panel_weights();
            container.set_layout_axis(None);
            debug!(panels = count, "below 2 panels, handles removed");
            return RebuildOutcome {
                panel_count: count,
                weights: Vec::new(),
            };
        }

        // Newcomers get the mean of the recorded weights, or 1.
        let known: Vec<f64> = recorded.iter().flatten().copied().collect();
        let fallback = if known.is_empty() {
            1.0
        } else {
            known.iter().sum::<f64>() / known.len() as f64
        };
        let mut weights: Vec<f64> = recorded
            .iter()
            .map(|w| w.unwrap_or(fallback))
            .collect();

        // Renormalize so the vector sums to the panel count, then clamp
        // floors up.
        let sum: f64 = weights.iter().sum();
        if sum > 0.0 {
            let scale = count as f64 / sum;
            for weight in weights.iter_mut() {
                *weight *= scale;
            }
        } else {
            weights.fill(1.0);
        }
        let floors = min_flex.floors(count);
        for (weight, floor) in weights.iter_mut().zip(&floors) {
            if *weight < *floor {
                *weight = *floor;
            }
        }

        container.set_layout_axis(Some(axis));
        container.set_panel_weights(&weights);
        let style = handle_style.resolve(axis);
        for panel in 0..count - 1 {
            container.insert_handle_after_panel(panel, style.clone());
        }

        debug!(panels = count, handles = count - 1, "rebuilt handles");
        RebuildOutcome {
            panel_count: count,
            weights,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild_default(container: &Container) -> RebuildOutcome {
        rebuild(
            container,
            Axis::Horizontal,
            &MinFlex::default(),
            &HandleStyle::default(),
        )
    }

    #[test]
    fn test_fresh_panels_get_weight_one() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        container.add_panel();

        let outcome = rebuild_default(&container);
        assert_eq!(outcome.weights, vec![1.0, 1.0, 1.0]);
        assert_eq!(container.handle_count(), 2);
        assert_eq!(container.layout_axis(), Some(Axis::Horizontal));
    }

    #[test]
    fn test_handle_count_invariant() {
        let container = Container::new();
        for expected_handles in [0usize, 0, 1, 2, 3] {
            rebuild_default(&container);
            assert_eq!(container.handle_count(), expected_handles);
            container.add_panel();
        }
    }

    #[test]
    fn test_below_two_panels_clears_everything() {
        let container = Container::new();
        let a = container.add_panel();
        let b = container.add_panel();
        rebuild_default(&container);
        assert_eq!(container.handle_count(), 1);

        container.remove_panel(b);
        let outcome = rebuild_default(&container);
        assert_eq!(outcome.weights, Vec::<f64>::new());
        assert_eq!(container.handle_count(), 0);
        assert_eq!(container.panel_weight(a), None);
        assert_eq!(container.layout_axis(), None);
    }

    #[test]
    fn test_newcomer_gets_mean_of_recorded_weights() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        rebuild_default(&container);
        container.set_panel_weights(&[1.5, 0.5]);

        container.add_panel();
        let outcome = rebuild_default(&container);
        // mean(1.5, 0.5) = 1.0; sum already 3, no rescale
        assert_eq!(outcome.weights, vec![1.5, 0.5, 1.0]);
    }

    #[test]
    fn test_renormalizes_to_panel_count() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        rebuild_default(&container);
        container.set_panel_weights(&[2.0, 2.0]);

        let outcome = rebuild_default(&container);
        assert_eq!(outcome.weights, vec![1.0, 1.0]);
    }

    #[test]
    fn test_floor_clamp_may_break_conservation_at_rebuild() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        rebuild_default(&container);
        container.set_panel_weights(&[0.2, 3.8]);

        let outcome = rebuild(
            &container,
            Axis::Horizontal,
            &MinFlex::Uniform(0.3),
            &HandleStyle::default(),
        );
        // scaled to [0.1, 1.9], then the first panel clamps up to its floor
        assert!((outcome.weights[0] - 0.3).abs() < 1e-9);
        assert!((outcome.weights[1] - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        container.add_panel();

        let first = rebuild_default(&container);
        let second = rebuild_default(&container);
        assert_eq!(first, second);
        assert_eq!(container.handle_count(), 2);
    }

    #[test]
    fn test_rebuild_interleaves_handles() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        container.add_panel();
        rebuild_default(&container);

        let kinds: Vec<bool> = container
            .children_snapshot()
            .iter()
            .map(|c| c.is_handle())
            .collect();
        assert_eq!(kinds, vec![false, true, false, true, false]);
    }

    #[test]
    fn test_rebuild_never_notifies_the_mutation_channel() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        let version = container.version();
        rebuild_default(&container);
        assert_eq!(container.version(), version);
    }

    #[test]
    fn test_handles_carry_resolved_style() {
        let container = Container::new();
        container.add_panel();
        container.add_panel();
        rebuild(
            &container,
            Axis::Vertical,
            &MinFlex::default(),
            &HandleStyle::default(),
        );
        let style = container.handle_style(0).unwrap();
        assert_eq!(style["cursor"], "row-resize");
    }
}
