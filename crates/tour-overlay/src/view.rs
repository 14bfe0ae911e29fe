#![forbid(unsafe_code)]

//! Presentation model for a tour step.
//!
//! A step is presented either as a [`SpotlightView`] (dimmed page with a
//! cut-out around the target and a tooltip beside it) or, when the target
//! cannot be located, as a centered [`FallbackView`] dialog. Both carry the
//! same [`StepChrome`] and the same two actions, so hosts wire Skip and
//! Next/Finish identically.
//!
//! # Invariants
//!
//! 1. A missing target always yields [`TourView::Fallback`]; no placement is
//!    computed for it.
//! 2. The highlight is the target inflated by `highlight_padding`.
//! 3. The view is a pure function of its inputs.

use tour_core::{Rect, Size, TourStep};

use crate::placement::{Placement, PlacementConfig, TooltipLayout};

/// Notice shown in the fallback dialog.
pub const MISSING_TARGET_NOTICE: &str = "Focus element not visible in current view.";

/// Label of the dismiss action.
pub const SKIP_LABEL: &str = "Skip";

/// Presentation constants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresentationConfig {
    /// Breathing room between target and spotlight cut-out.
    pub highlight_padding: f32,
    /// Preferred width of the fallback dialog.
    pub fallback_width: f32,
    /// Minimum distance between fallback dialog and viewport edges.
    pub fallback_margin: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            highlight_padding: 8.0,
            fallback_width: 384.0,
            fallback_margin: 16.0,
        }
    }
}

impl PresentationConfig {
    /// Validate that every value is finite and non-negative.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("presentation.highlight_padding", self.highlight_padding),
            ("presentation.fallback_margin", self.fallback_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }
        if !self.fallback_width.is_finite() || self.fallback_width <= 0.0 {
            errors.push(format!(
                "presentation.fallback_width must be > 0, got {}",
                self.fallback_width
            ));
        }
        errors
    }
}

/// Primary (forward) action of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Advance to the next step.
    Next,
    /// Complete the tour from the last step.
    Finish,
}

impl PrimaryAction {
    /// Button label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Finish => "Finish",
        }
    }

    /// Whether the button shows a forward chevron.
    pub const fn shows_chevron(self) -> bool {
        matches!(self, Self::Next)
    }
}

/// Text and actions shared by both presentations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepChrome<'a> {
    /// Zero-based step index.
    pub index: usize,
    /// Total number of steps.
    pub count: usize,
    pub title: &'a str,
    pub content: &'a str,
}

impl<'a> StepChrome<'a> {
    /// Chrome for `step` at `index` of `count`.
    pub fn new(step: &'a TourStep, index: usize, count: usize) -> Self {
        Self {
            index,
            count,
            title: &step.title,
            content: &step.content,
        }
    }

    /// Progress badge, e.g. `"2/6"`.
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.count)
    }

    /// Whether this is the final step.
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.count
    }

    /// Forward action for this step.
    pub fn primary_action(&self) -> PrimaryAction {
        if self.is_last() {
            PrimaryAction::Finish
        } else {
            PrimaryAction::Next
        }
    }

    /// Label of the dismiss action.
    pub const fn skip_label(&self) -> &'static str {
        SKIP_LABEL
    }
}

/// Tooltip presentation for a located target.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightView<'a> {
    pub chrome: StepChrome<'a>,
    /// Target rectangle as last measured.
    pub target: Rect,
    /// Cut-out in the dimmed backdrop.
    pub highlight: Rect,
    /// Tooltip placement.
    pub placement: Placement,
}

/// Centered dialog for a target that cannot be located.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackView<'a> {
    pub chrome: StepChrome<'a>,
    /// Dialog bounds, centered in the viewport.
    pub dialog: Rect,
    /// Explanation shown above the actions.
    pub notice: &'static str,
}

/// How the current step is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum TourView<'a> {
    Spotlight(SpotlightView<'a>),
    Fallback(FallbackView<'a>),
}

impl<'a> TourView<'a> {
    /// Shared chrome of either presentation.
    pub fn chrome(&self) -> &StepChrome<'a> {
        match self {
            Self::Spotlight(view) => &view.chrome,
            Self::Fallback(view) => &view.chrome,
        }
    }

    /// Whether this is the fallback dialog.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Placement, for the spotlight presentation only.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Self::Spotlight(view) => Some(&view.placement),
            Self::Fallback(_) => None,
        }
    }
}

/// Builds [`TourView`]s from step data and tracked geometry.
#[derive(Debug, Clone, Default)]
pub struct OverlayBuilder {
    pub placement: PlacementConfig,
    pub presentation: PresentationConfig,
}

impl OverlayBuilder {
    /// Builder with the given settings.
    pub fn new(placement: PlacementConfig, presentation: PresentationConfig) -> Self {
        Self {
            placement,
            presentation,
        }
    }

    /// Present `step` at `index` of `count`.
    ///
    /// `target` is the tracked rectangle, or `None` when the element is
    /// missing.
    pub fn build<'a>(
        &self,
        step: &'a TourStep,
        index: usize,
        count: usize,
        target: Option<Rect>,
        viewport: Size,
    ) -> TourView<'a> {
        let chrome = StepChrome::new(step, index, count);
        match target {
            Some(target) => {
                let placement = TooltipLayout::new(target, step.resolved_side())
                    .config(self.placement.clone())
                    .compute(viewport);
                TourView::Spotlight(SpotlightView {
                    chrome,
                    target,
                    highlight: target.inflate(self.presentation.highlight_padding),
                    placement,
                })
            }
            None => TourView::Fallback(FallbackView {
                chrome,
                dialog: self.fallback_dialog(viewport),
                notice: MISSING_TARGET_NOTICE,
            }),
        }
    }

    /// Centered dialog bounds for `viewport`.
    fn fallback_dialog(&self, viewport: Size) -> Rect {
        let margin = self.presentation.fallback_margin;
        let width = self
            .presentation
            .fallback_width
            .min(viewport.width - margin * 2.0)
            .max(0.0);
        let height = self
            .placement
            .tooltip_min_height
            .min(viewport.height - margin * 2.0)
            .max(0.0);
        Rect::new(
            (viewport.width - width) / 2.0,
            (viewport.height - height) / 2.0,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tour_core::Side;

    fn step() -> TourStep {
        TourStep::new("tour-calendar", "Your Calendar", "This is your mini calendar.")
            .side(Side::Left)
    }

    #[test]
    fn located_target_builds_spotlight() {
        let step = step();
        let target = Rect::new(10.0, 100.0, 50.0, 20.0);
        let view =
            OverlayBuilder::default().build(&step, 0, 3, Some(target), Size::new(400.0, 800.0));
        let TourView::Spotlight(spot) = view else {
            panic!("expected spotlight");
        };
        assert_eq!(spot.placement.side, Side::Bottom);
        assert_eq!(spot.highlight, Rect::new(2.0, 92.0, 66.0, 36.0));
        assert_eq!(spot.chrome.progress_label(), "1/3");
        assert_eq!(spot.chrome.primary_action(), PrimaryAction::Next);
    }

    #[test]
    fn missing_target_builds_fallback_without_placement() {
        let step = TourStep::new("nonexistent", "Gone", "Missing.");
        let view = OverlayBuilder::default().build(&step, 2, 3, None, Size::new(1280.0, 800.0));
        assert!(view.is_fallback());
        assert!(view.placement().is_none());
        let TourView::Fallback(fallback) = view else {
            panic!("expected fallback");
        };
        assert_eq!(fallback.notice, MISSING_TARGET_NOTICE);
        assert_eq!(fallback.dialog, Rect::new(448.0, 300.0, 384.0, 200.0));
        assert_eq!(fallback.chrome.primary_action(), PrimaryAction::Finish);
        assert_eq!(fallback.chrome.title, "Gone");
    }

    #[test]
    fn fallback_dialog_shrinks_on_small_viewports() {
        let step = step();
        let view = OverlayBuilder::default().build(&step, 0, 1, None, Size::new(300.0, 150.0));
        let TourView::Fallback(fallback) = view else {
            panic!("expected fallback");
        };
        assert_eq!(fallback.dialog.width, 268.0);
        assert_eq!(fallback.dialog.height, 118.0);
        assert_eq!(fallback.dialog.x, 16.0);
        assert_eq!(fallback.dialog.y, 16.0);
    }

    #[test]
    fn chrome_labels() {
        let step = step();
        let middle = StepChrome::new(&step, 1, 6);
        assert_eq!(middle.progress_label(), "2/6");
        assert!(!middle.is_last());
        assert_eq!(middle.primary_action().label(), "Next");
        assert!(middle.primary_action().shows_chevron());
        assert_eq!(middle.skip_label(), "Skip");

        let last = StepChrome::new(&step, 5, 6);
        assert!(last.is_last());
        assert_eq!(last.primary_action().label(), "Finish");
        assert!(!last.primary_action().shows_chevron());
    }

    #[test]
    fn presentation_validation() {
        assert!(PresentationConfig::default().validate().is_empty());
        let cfg = PresentationConfig {
            fallback_width: 0.0,
            ..PresentationConfig::default()
        };
        assert!(
            cfg.validate()
                .iter()
                .any(|e| e.contains("presentation.fallback_width"))
        );
    }
}
