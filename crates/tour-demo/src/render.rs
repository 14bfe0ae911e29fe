//! Plain-text rendering of a tour view.

use tour::{PrimaryAction, Rect, TourView};

fn rect(r: &Rect) -> String {
    format!("({:.0}, {:.0}) {:.0}x{:.0}", r.x, r.y, r.width, r.height)
}

/// Text lines describing `view`.
pub fn describe(view: &TourView<'_>) -> Vec<String> {
    let chrome = view.chrome();
    let mut lines = vec![format!("[{}] {}", chrome.progress_label(), chrome.title)];

    match view {
        TourView::Spotlight(spot) => {
            lines.push(format!("  spotlight  {}", rect(&spot.highlight)));
            lines.push(format!(
                "  tooltip    {} on the {} side, pointer at {:.0} on its {} edge",
                rect(&spot.placement.bounds),
                spot.placement.side.as_str(),
                spot.placement.arrow.offset,
                spot.placement.arrow.edge.as_str(),
            ));
        }
        TourView::Fallback(fallback) => {
            lines.push(format!("  dialog     {}", rect(&fallback.dialog)));
            lines.push(format!("  notice     {}", fallback.notice));
        }
    }

    lines.push(format!("  {}", chrome.content));
    let primary = match chrome.primary_action() {
        PrimaryAction::Next => format!("[{} >]", PrimaryAction::Next.label()),
        PrimaryAction::Finish => format!("[{}]", PrimaryAction::Finish.label()),
    };
    lines.push(format!("  [{}] {primary}", chrome.skip_label()));
    lines
}
