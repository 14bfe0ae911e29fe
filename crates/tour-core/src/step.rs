#![forbid(unsafe_code)]

//! Tour step records.
//!
//! A [`TourStep`] names the element it highlights by an opaque id and carries
//! the text shown next to it. [`TourSteps`] is the ordered, non-empty list an
//! engine runs through; an empty tour cannot be constructed.

use std::ops::Index;

use crate::error::CoreError;

/// Side of the target a tooltip is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Whether the tooltip sits beside the target (left or right).
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Whether the tooltip sits above or below the target.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    /// The side facing this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name, as used in step definitions and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One stop of a guided tour.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourStep {
    /// Identifier the host resolves to a live element.
    pub target_id: String,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Preferred tooltip side. `None` means bottom.
    #[cfg_attr(feature = "serde", serde(default, rename = "position"))]
    pub preferred_side: Option<Side>,
}

impl TourStep {
    /// Create a step with the default (bottom) side.
    pub fn new(
        target_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            title: title.into(),
            content: content.into(),
            preferred_side: None,
        }
    }

    /// Set the preferred side.
    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.preferred_side = Some(side);
        self
    }

    /// Preferred side with the default applied.
    #[inline]
    pub fn resolved_side(&self) -> Side {
        self.preferred_side.unwrap_or_default()
    }
}

/// Ordered, non-empty list of steps for one tour session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSteps {
    steps: Vec<TourStep>,
}

impl TourSteps {
    /// Build a step list. Fails if `steps` is empty.
    pub fn new(steps: Vec<TourStep>) -> Result<Self, CoreError> {
        if steps.is_empty() {
            return Err(CoreError::EmptyTour);
        }
        Ok(Self { steps })
    }

    /// Number of steps (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the final step.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Step at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TourStep> {
        self.steps.get(index)
    }

    /// Iterate over the steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TourStep> {
        self.steps.iter()
    }

    /// Borrow the steps as a slice.
    pub fn as_slice(&self) -> &[TourStep] {
        &self.steps
    }
}

impl Index<usize> for TourSteps {
    type Output = TourStep;

    fn index(&self, index: usize) -> &Self::Output {
        &self.steps[index]
    }
}

impl TryFrom<Vec<TourStep>> for TourSteps {
    type Error = CoreError;

    fn try_from(steps: Vec<TourStep>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl<'a> IntoIterator for &'a TourSteps {
    type Item = &'a TourStep;
    type IntoIter = std::slice::Iter<'a, TourStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_side_is_bottom() {
        let step = TourStep::new("tour-filter", "Smart Filters", "Use these filters.");
        assert_eq!(step.preferred_side, None);
        assert_eq!(step.resolved_side(), Side::Bottom);
        assert_eq!(step.side(Side::Left).resolved_side(), Side::Left);
    }

    #[test]
    fn side_orientation() {
        assert!(Side::Left.is_horizontal());
        assert!(Side::Right.is_horizontal());
        assert!(Side::Top.is_vertical());
        assert!(Side::Bottom.is_vertical());
        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.as_str(), "right");
    }

    #[test]
    fn empty_tour_is_rejected() {
        assert_eq!(TourSteps::new(Vec::new()), Err(CoreError::EmptyTour));
        let err = TourSteps::try_from(Vec::new()).unwrap_err();
        assert_eq!(err, CoreError::EmptyTour);
    }

    #[test]
    fn steps_index_and_iterate() {
        let steps = TourSteps::new(vec![
            TourStep::new("a", "A", "first"),
            TourStep::new("b", "B", "second").side(Side::Top),
        ])
        .unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps.last_index(), 1);
        assert_eq!(steps[1].target_id, "b");
        assert!(steps.get(2).is_none());
        let ids: Vec<_> = steps.iter().map(|s| s.target_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn step_json_uses_position_field() {
        let json = r#"[
            {"target_id": "tour-calendar", "title": "Your Calendar", "content": "c", "position": "left"},
            {"target_id": "tour-filter", "title": "Smart Filters", "content": "f"}
        ]"#;
        let steps: Vec<TourStep> = serde_json::from_str(json).unwrap();
        assert_eq!(steps[0].preferred_side, Some(Side::Left));
        assert_eq!(steps[1].preferred_side, None);
    }
}
