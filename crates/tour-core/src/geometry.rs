#![forbid(unsafe_code)]

//! Geometric primitives in logical units.
//!
//! Coordinates follow the host's layout space: origin at the top-left of the
//! viewport, `x` growing to the right and `y` growing downwards. Values are
//! `f32` because hosts report sub-pixel layout (scrolling, zoom, fractional
//! scale factors).

/// An axis-aligned rectangle, as reported by the host for a live element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow the rectangle by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Move the rectangle by the given offset.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Whether `other` lies fully inside this rectangle (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether two measurements describe the same box for tracking purposes.
    ///
    /// Position may drift by at most `epsilon` on each axis; size must match
    /// exactly.
    pub fn same_box(&self, other: &Rect, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && self.width == other.width
            && self.height == other.height
    }
}

/// Width and height of a viewport or box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether both dimensions are finite and non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Size};

    #[test]
    fn rect_edges_and_center() {
        let rect = Rect::new(10.0, 100.0, 50.0, 20.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 100.0);
        assert_eq!(rect.right(), 60.0);
        assert_eq!(rect.bottom(), 120.0);
        assert_eq!(rect.center_x(), 35.0);
        assert_eq!(rect.center_y(), 110.0);
    }

    #[test]
    fn rect_inflate_grows_every_side() {
        let rect = Rect::new(10.0, 10.0, 4.0, 2.0).inflate(8.0);
        assert_eq!(rect, Rect::new(2.0, 2.0, 20.0, 18.0));
    }

    #[test]
    fn rect_contains_rect_is_edge_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(96.0, 10.0, 5.0, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(-1.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn same_box_tolerates_subpixel_drift_only() {
        let a = Rect::new(10.0, 10.0, 50.0, 20.0);
        assert!(a.same_box(&Rect::new(10.3, 9.6, 50.0, 20.0), 0.5));
        assert!(a.same_box(&Rect::new(10.5, 10.0, 50.0, 20.0), 0.5));
        assert!(!a.same_box(&Rect::new(10.6, 10.0, 50.0, 20.0), 0.5));
        assert!(!a.same_box(&Rect::new(10.0, 10.0, 50.5, 20.0), 0.5));
        assert!(!a.same_box(&Rect::new(10.0, 10.0, 50.0, 20.1), 0.5));
    }

    #[test]
    fn translate_keeps_size() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0).translate(-1.0, 10.0);
        assert_eq!(rect, Rect::new(0.0, 12.0, 3.0, 4.0));
        assert_eq!(rect.size(), Size::new(3.0, 4.0));
    }

    #[test]
    fn size_validity() {
        assert!(Size::new(400.0, 800.0).is_valid());
        assert!(Size::new(0.0, 0.0).is_valid());
        assert!(Size::new(0.0, 0.0).is_empty());
        assert!(!Size::new(-1.0, 10.0).is_valid());
        assert!(!Size::new(f32::NAN, 10.0).is_valid());
        assert_eq!(Size::from((3.0, 4.0)), Size::new(3.0, 4.0));
    }
}
