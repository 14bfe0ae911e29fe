//! Property-based invariant tests for tooltip placement.
//!
//! 1. Containment: for targets inside a viewport that can hold the tooltip
//!    plus padding, the tooltip lies inside the padded viewport.
//! 2. Determinism: identical inputs yield identical placements.
//! 3. Fallback chain: an overflowing preferred side resolves to the
//!    documented fallback.
//! 4. Narrow viewports never keep a left/right side.
//! 5. The pointer stays within the tooltip edge minus its margins.

use proptest::prelude::*;
use tour_core::{Rect, Side, Size};
use tour_overlay::placement::{PlacementConfig, TooltipLayout};

// ── Strategies ──────────────────────────────────────────────────────────

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right),
    ]
}

/// Viewport large enough for the default tooltip plus padding on both axes.
fn roomy_viewport() -> impl Strategy<Value = Size> {
    (352.0f32..2560.0, 232.0f32..1600.0).prop_map(|(w, h)| Size::new(w, h))
}

/// A target rectangle fully inside `viewport`.
fn target_in(viewport: Size) -> impl Strategy<Value = Rect> {
    (0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0).prop_map(move |(fx, fy, fw, fh)| {
        let width = (viewport.width * fw).max(1.0);
        let height = (viewport.height * fh).max(1.0);
        let x = (viewport.width - width) * fx;
        let y = (viewport.height - height) * fy;
        Rect::new(x, y, width, height)
    })
}

fn viewport_and_target() -> impl Strategy<Value = (Size, Rect)> {
    roomy_viewport().prop_flat_map(|viewport| (Just(viewport), target_in(viewport)))
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Containment
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tooltip_stays_inside_padded_viewport(
        (viewport, target) in viewport_and_target(),
        side in side_strategy(),
    ) {
        let cfg = PlacementConfig::default();
        let pad = cfg.viewport_padding;
        let placement = TooltipLayout::new(target, side).compute(viewport);
        let padded = Rect::new(pad, pad, viewport.width - pad * 2.0, viewport.height - pad * 2.0);
        // Allow for float rounding at the far edge.
        let slack = padded.inflate(1e-3);
        prop_assert!(
            slack.contains_rect(&placement.bounds),
            "tooltip {:?} escapes {:?}",
            placement.bounds,
            padded
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placement_is_deterministic(
        (viewport, target) in viewport_and_target(),
        side in side_strategy(),
    ) {
        let layout = TooltipLayout::new(target, side);
        prop_assert_eq!(layout.compute(viewport), layout.compute(viewport));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Fallback chain
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn right_overflow_goes_to_bottom(
        x in 900.0f32..1200.0,
        y in 16.0f32..300.0,
    ) {
        // Right side cannot fit in 1280 wide, bottom has room in 1000 tall.
        let target = Rect::new(x, y, 60.0, 30.0);
        let side = TooltipLayout::new(target, Side::Right).resolve_side(Size::new(1280.0, 1000.0));
        prop_assert_eq!(side, Side::Bottom);
    }

    #[test]
    fn left_underflow_goes_to_bottom(
        x in 0.0f32..300.0,
        y in 16.0f32..300.0,
    ) {
        let target = Rect::new(x, y, 60.0, 30.0);
        let side = TooltipLayout::new(target, Side::Left).resolve_side(Size::new(1280.0, 1000.0));
        prop_assert_eq!(side, Side::Bottom);
    }

    #[test]
    fn top_underflow_goes_to_bottom(
        x in 0.0f32..1000.0,
        y in 0.0f32..200.0,
    ) {
        let target = Rect::new(x, y, 60.0, 30.0);
        let side = TooltipLayout::new(target, Side::Top).resolve_side(Size::new(1280.0, 1000.0));
        prop_assert_eq!(side, Side::Bottom);
    }

    #[test]
    fn bottom_overflow_goes_to_top(
        x in 0.0f32..1000.0,
        y in 750.0f32..960.0,
    ) {
        let target = Rect::new(x, y, 60.0, 30.0);
        let side = TooltipLayout::new(target, Side::Bottom).resolve_side(Size::new(1280.0, 1000.0));
        prop_assert_eq!(side, Side::Top);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Narrow viewports
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn narrow_viewport_never_keeps_horizontal_side(
        width in 1.0f32..351.0,
        height in 100.0f32..1600.0,
        x in -2000.0f32..2000.0,
        fy in 0.0f32..1.0,
        side in prop_oneof![Just(Side::Left), Just(Side::Right)],
    ) {
        let target = Rect::new(x, (height - 20.0) * fy, 50.0, 20.0);
        let resolved = TooltipLayout::new(target, side).resolve_side(Size::new(width, height));
        prop_assert!(resolved.is_vertical());
    }

    #[test]
    fn narrow_rule_follows_vertical_midpoint(
        width in 1.0f32..351.0,
        height in 600.0f32..1600.0,
        x in 400.0f32..2000.0,
        fy in 0.0f32..1.0,
    ) {
        // `x` keeps the left side horizontally feasible so only the narrow
        // rule can move it.
        let y = (height - 20.0) * fy;
        let target = Rect::new(x, y, 50.0, 20.0);
        let resolved = TooltipLayout::new(target, Side::Left).resolve_side(Size::new(width, height));
        let expected = if y > height / 2.0 { Side::Top } else { Side::Bottom };
        prop_assert_eq!(resolved, expected);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Pointer bounds
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arrow_stays_inside_tooltip_edge(
        (viewport, target) in viewport_and_target(),
        side in side_strategy(),
    ) {
        let cfg = PlacementConfig::default();
        let placement = TooltipLayout::new(target, side).compute(viewport);
        let extent = if placement.side.is_vertical() {
            placement.bounds.width
        } else {
            placement.bounds.height
        };
        prop_assert!(placement.arrow.offset >= cfg.arrow_margin);
        prop_assert!(placement.arrow.offset <= extent - cfg.arrow_margin - cfg.arrow_size);
        prop_assert_eq!(placement.arrow.edge, placement.side.opposite());
    }
}
