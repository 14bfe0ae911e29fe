#![forbid(unsafe_code)]

//! Tooltip placement relative to a tracked target.
//!
//! [`TooltipLayout`] positions a fixed-width tooltip next to a target
//! rectangle. The preferred side is kept when the tooltip fits there;
//! otherwise a fixed fallback chain is applied, and the final box is clamped
//! into the viewport with an outer padding on every side.
//!
//! # Side resolution
//!
//! Each rule is applied in order to the running side:
//!
//! | Rule | Condition | Result |
//! |------|-----------|--------|
//! | 1 | right, `target.right + W + gap + pad > vw` | bottom |
//! | 2 | left, `target.left - W - gap - pad < 0` | bottom |
//! | 3 | top, `target.top - H - gap - pad < 0` | bottom |
//! | 4 | bottom, `target.bottom + H + gap + pad > vh` | top |
//! | 5 | still left/right, `vw < W + 2 * pad` | top if `target.top > vh / 2`, else bottom |
//!
//! `W` is the tooltip width and `H` its minimum height.
//!
//! # Example
//!
//! ```
//! use tour_core::{Rect, Side, Size};
//! use tour_overlay::placement::TooltipLayout;
//!
//! let target = Rect::new(10.0, 100.0, 50.0, 20.0);
//! let placement = TooltipLayout::new(target, Side::Left).compute(Size::new(400.0, 800.0));
//! assert_eq!(placement.side, Side::Bottom);
//! ```

use tour_core::{Rect, Side, Size};

/// Geometry constants for tooltip placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Fixed tooltip width.
    pub tooltip_width: f32,
    /// Minimum tooltip height used for fit checks and clamping.
    pub tooltip_min_height: f32,
    /// Distance between target and tooltip.
    pub gap: f32,
    /// Minimum distance between tooltip and viewport edges.
    pub viewport_padding: f32,
    /// Side length of the pointer square.
    pub arrow_size: f32,
    /// Minimum distance between pointer and tooltip corners.
    pub arrow_margin: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            tooltip_width: 320.0,
            tooltip_min_height: 200.0,
            gap: 16.0,
            viewport_padding: 16.0,
            arrow_size: 12.0,
            arrow_margin: 10.0,
        }
    }
}

impl PlacementConfig {
    /// Set the tooltip width.
    #[must_use]
    pub fn tooltip_width(mut self, width: f32) -> Self {
        self.tooltip_width = width;
        self
    }

    /// Set the minimum tooltip height.
    #[must_use]
    pub fn tooltip_min_height(mut self, height: f32) -> Self {
        self.tooltip_min_height = height;
        self
    }

    /// Set the target gap.
    #[must_use]
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the viewport padding.
    #[must_use]
    pub fn viewport_padding(mut self, padding: f32) -> Self {
        self.viewport_padding = padding;
        self
    }

    /// Tooltip box size used for placement.
    #[inline]
    pub fn tooltip_size(&self) -> Size {
        Size::new(self.tooltip_width, self.tooltip_min_height)
    }

    /// Validate that every value is finite and in range.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let positive = [
            ("placement.tooltip_width", self.tooltip_width),
            ("placement.tooltip_min_height", self.tooltip_min_height),
            ("placement.arrow_size", self.arrow_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be > 0, got {value}"));
            }
        }
        let non_negative = [
            ("placement.gap", self.gap),
            ("placement.viewport_padding", self.viewport_padding),
            ("placement.arrow_margin", self.arrow_margin),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }
        if self.arrow_size + self.arrow_margin * 2.0 > self.tooltip_width.min(self.tooltip_min_height)
        {
            errors.push("placement.arrow_size plus margins must fit inside the tooltip".into());
        }
        errors
    }
}

/// Pointer drawn on the tooltip edge that faces the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    /// Tooltip edge carrying the pointer.
    pub edge: Side,
    /// Offset of the pointer's leading corner along that edge, from the
    /// tooltip's left (top/bottom edges) or top (left/right edges).
    pub offset: f32,
}

/// Result of a placement computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Side of the target the tooltip ended up on.
    pub side: Side,
    /// Tooltip bounds in viewport coordinates.
    pub bounds: Rect,
    /// Pointer position.
    pub arrow: Arrow,
}

/// Placement request for one tooltip.
#[derive(Debug, Clone)]
pub struct TooltipLayout {
    /// Target rectangle the tooltip points at.
    pub target: Rect,
    /// Preferred side.
    pub preferred: Side,
    /// Geometry constants.
    pub config: PlacementConfig,
}

impl TooltipLayout {
    /// Create a layout request with default geometry.
    pub fn new(target: Rect, preferred: Side) -> Self {
        Self {
            target,
            preferred,
            config: PlacementConfig::default(),
        }
    }

    /// Use the given geometry constants.
    #[must_use]
    pub fn config(mut self, config: PlacementConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve the side the tooltip will use in `viewport`.
    pub fn resolve_side(&self, viewport: Size) -> Side {
        let PlacementConfig {
            tooltip_width: w,
            tooltip_min_height: h,
            gap,
            viewport_padding: pad,
            ..
        } = self.config;
        let t = &self.target;

        let mut side = self.preferred;
        if side == Side::Right && t.right() + w + gap + pad > viewport.width {
            side = Side::Bottom;
        }
        if side == Side::Left && t.left() - w - gap - pad < 0.0 {
            side = Side::Bottom;
        }
        if side == Side::Top && t.top() - h - gap - pad < 0.0 {
            side = Side::Bottom;
        }
        if side == Side::Bottom && t.bottom() + h + gap + pad > viewport.height {
            side = Side::Top;
        }
        if side.is_horizontal() && viewport.width < w + pad * 2.0 {
            side = if t.top() > viewport.height / 2.0 {
                Side::Top
            } else {
                Side::Bottom
            };
        }

        #[cfg(feature = "tracing")]
        if side != self.preferred {
            tracing::trace!(
                preferred = self.preferred.as_str(),
                resolved = side.as_str(),
                "tooltip side fell back"
            );
        }

        side
    }

    /// Compute the full placement within `viewport`.
    pub fn compute(&self, viewport: Size) -> Placement {
        let side = self.resolve_side(viewport);
        let cfg = &self.config;
        let (w, h) = (cfg.tooltip_width, cfg.tooltip_min_height);
        let t = &self.target;

        let (x, y) = match side {
            Side::Top => (t.center_x() - w / 2.0, t.top() - cfg.gap - h),
            Side::Bottom => (t.center_x() - w / 2.0, t.bottom() + cfg.gap),
            Side::Left => (t.left() - cfg.gap - w, t.center_y() - h / 2.0),
            Side::Right => (t.right() + cfg.gap, t.center_y() - h / 2.0),
        };
        let x = clamp_axis(x, w, viewport.width, cfg.viewport_padding);
        let y = clamp_axis(y, h, viewport.height, cfg.viewport_padding);

        let offset = if side.is_vertical() {
            arrow_offset(t.center_x() - x, w, cfg)
        } else {
            arrow_offset(t.center_y() - y, h, cfg)
        };

        Placement {
            side,
            bounds: Rect::new(x, y, w, h),
            arrow: Arrow {
                edge: side.opposite(),
                offset,
            },
        }
    }
}

/// Keep a box of `size` inside `[padding, extent - padding]` on one axis.
///
/// When the extent cannot hold the box the start is pinned at `padding`.
fn clamp_axis(start: f32, size: f32, extent: f32, padding: f32) -> f32 {
    start.min(extent - size - padding).max(padding)
}

/// Pointer offset for a target center `center` measured from the tooltip start.
fn arrow_offset(center: f32, extent: f32, cfg: &PlacementConfig) -> f32 {
    (center - cfg.arrow_size / 2.0)
        .min(extent - cfg.arrow_margin - cfg.arrow_size)
        .max(cfg.arrow_margin)
}
