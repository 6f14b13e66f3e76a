//! End-to-end scenarios driving the public API through the pointer registry,
//! the way a host event loop would.

use sash_tui::{
    Axis, Container, MinFlex, PointerButton, PointerEvent, SplitOptions, SplitView, dispatch,
    layout,
};

const EPSILON: f64 = 1e-9;

fn assert_vec_eq(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < EPSILON, "expected {expected:?}, got {actual:?}");
    }
}

fn container_with(panels: usize, viewport: (u16, u16)) -> Container {
    let container = Container::new();
    container.set_viewport(viewport.0, viewport.1);
    for _ in 0..panels {
        container.add_panel();
    }
    container
}

/// Axis coordinate of the `handle`th divider.
fn handle_coord(container: &Container, axis: Axis, handle: usize) -> u16 {
    let solved = layout::solve(container, axis, 1);
    let rect = solved
        .iter()
        .filter(|c| c.is_handle)
        .nth(handle)
        .expect("handle exists")
        .rect;
    match axis {
        Axis::Horizontal => rect.x as u16,
        Axis::Vertical => rect.y as u16,
    }
}

#[test]
fn full_session_lifecycle_across_mutations() {
    let container = container_with(2, (100, 40));
    let view = SplitView::observe(SplitOptions {
        container: Some(container.clone()),
        ..Default::default()
    })
    .unwrap();

    // drag the only divider
    let x = handle_coord(&container, Axis::Horizontal, 0);
    dispatch(PointerEvent::press(PointerButton::Left, x, 5));
    dispatch(PointerEvent::move_to(x + 20, 5));
    dispatch(PointerEvent::release(PointerButton::Left, x + 20, 5));
    assert_vec_eq(&view.flex_values(), &[1.4, 0.6]);

    // grow the panel set: the committed weights survive, the newcomer gets
    // the mean, and a second divider appears
    container.add_panel();
    assert_eq!(container.handle_count(), 2);
    assert_vec_eq(&view.flex_values(), &[1.4, 0.6, 1.0]);

    // the new divider drags too
    let x = handle_coord(&container, Axis::Horizontal, 1);
    dispatch(PointerEvent::press(PointerButton::Left, x, 5));
    dispatch(PointerEvent::move_to(x + 10, 5));
    dispatch(PointerEvent::release(PointerButton::Left, x + 10, 5));
    // +10 cells of 100 with total 3 => +0.3 flex onto panel 1
    assert_vec_eq(&view.flex_values(), &[1.4, 0.9, 0.7]);

    // shrink back below 2 panels: the split dissolves
    let ids = container.panel_ids();
    container.remove_panel(ids[2]);
    container.remove_panel(ids[1]);
    assert_eq!(container.handle_count(), 0);
    assert!(view.flex_values().is_empty());

    view.dispose();
}

#[test]
fn conservation_holds_across_a_messy_drag() {
    let container = container_with(4, (200, 40));
    let view = SplitView::observe(SplitOptions {
        container: Some(container.clone()),
        min_flex: MinFlex::Uniform(0.2),
        ..Default::default()
    })
    .unwrap();

    let x = handle_coord(&container, Axis::Horizontal, 1);
    dispatch(PointerEvent::press(PointerButton::Left, x, 5));
    for target in [x + 13, x.saturating_sub(40), x + 199, x.saturating_sub(7), x + 2] {
        dispatch(PointerEvent::move_to(target, 5));
        let weights = view.flex_values();
        let total: f64 = weights.iter().sum();
        assert!((total - 4.0).abs() < EPSILON, "sum drifted to {total}");
        for (weight, floor) in weights.iter().zip(MinFlex::Uniform(0.2).floors(4)) {
            assert!(*weight >= floor - EPSILON, "floor broken in {weights:?}");
        }
    }
    dispatch(PointerEvent::release(PointerButton::Left, x + 2, 5));
    view.dispose();
}

#[test]
fn vertical_splits_drag_along_y() {
    let container = container_with(2, (80, 100));
    let view = SplitView::observe(SplitOptions {
        container: Some(container.clone()),
        axis: Axis::Vertical,
        ..Default::default()
    })
    .unwrap();

    let y = handle_coord(&container, Axis::Vertical, 0);
    dispatch(PointerEvent::press(PointerButton::Left, 10, y));
    dispatch(PointerEvent::move_to(10, y - 10));
    dispatch(PointerEvent::release(PointerButton::Left, 10, y - 10));
    // -10 cells of a 100-cell vertical extent with total 2 => -0.2 flex
    assert_vec_eq(&view.flex_values(), &[0.8, 1.2]);

    // x motion alone must not resize a vertical split
    let y = handle_coord(&container, Axis::Vertical, 0);
    dispatch(PointerEvent::press(PointerButton::Left, 10, y));
    dispatch(PointerEvent::move_to(70, y));
    dispatch(PointerEvent::release(PointerButton::Left, 70, y));
    assert_vec_eq(&view.flex_values(), &[0.8, 1.2]);

    view.dispose();
}

#[test]
fn handles_expose_their_resolved_style() {
    let container = container_with(3, (100, 40));
    let view = SplitView::observe(SplitOptions {
        container: Some(container.clone()),
        axis: Axis::Vertical,
        ..Default::default()
    })
    .unwrap();

    for handle in 0..2 {
        let style = container.handle_style(handle).expect("style applied");
        assert_eq!(style["cursor"], "row-resize");
        assert_eq!(style["span"], "1");
    }

    view.dispose();
    assert_eq!(container.handle_style(0), None);
}
