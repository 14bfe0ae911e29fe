//! Mock Campus Pilot events page.
//!
//! The page lays out the elements the tour points at and answers locator
//! queries in viewport coordinates. Header controls are fixed; everything
//! else scrolls with the page. Event sections with no events are not
//! rendered at all, like the real page.

use std::cell::RefCell;
use std::rc::Rc;

use tour::{ElementLocator, Rect, Size};
use tracing::debug;

const MARGIN: f32 = 32.0;
const SECTION_GAP: f32 = 64.0;

#[derive(Debug, Clone)]
struct Element {
    id: &'static str,
    /// Page coordinates for scrolling elements, viewport coordinates for
    /// fixed ones.
    rect: Rect,
    fixed: bool,
}

/// Which optional sections have content.
#[derive(Debug, Clone, Copy)]
pub struct Sections {
    pub closing_soon: bool,
    pub upcoming: bool,
    pub past: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            closing_soon: true,
            upcoming: true,
            past: true,
        }
    }
}

/// Page layout plus scroll state.
#[derive(Debug)]
pub struct CampusPage {
    viewport: Size,
    sections: Sections,
    elements: Vec<Element>,
    content_height: f32,
    scroll_y: f32,
}

impl CampusPage {
    pub fn new(viewport: Size, sections: Sections) -> Self {
        let mut page = Self {
            viewport,
            sections,
            elements: Vec::new(),
            content_height: 0.0,
            scroll_y: 0.0,
        };
        page.relayout();
        page
    }

    fn relayout(&mut self) {
        let w = self.viewport.width;
        let content_w = (w - MARGIN * 2.0).max(0.0);
        let mut elements = vec![
            Element {
                id: "tour-notifications",
                rect: Rect::new(w - 120.0, 16.0, 40.0, 40.0),
                fixed: true,
            },
            Element {
                id: "tour-calendar",
                rect: Rect::new(w - 72.0, 16.0, 40.0, 40.0),
                fixed: true,
            },
        ];

        // Hero banner keeps a 21:9 aspect.
        let hero_bottom = 88.0 + content_w * 9.0 / 21.0;
        let filter = Rect::new(MARGIN, hero_bottom + SECTION_GAP, content_w, 56.0);
        elements.push(Element {
            id: "tour-filter",
            rect: filter,
            fixed: false,
        });

        // Cards wrap to one column on narrow screens.
        let columns: f32 = if w >= 1024.0 {
            3.0
        } else if w >= 640.0 {
            2.0
        } else {
            1.0
        };
        let mut y = filter.bottom() + SECTION_GAP;
        let grids = [
            ("tour-closing", self.sections.closing_soon, 3.0_f32),
            ("tour-upcoming", self.sections.upcoming, 6.0),
            ("tour-past", self.sections.past, 3.0),
        ];
        for (id, present, cards) in grids {
            if !present {
                continue;
            }
            let rows = (cards / columns).ceil();
            let height = 64.0 + rows * 380.0;
            elements.push(Element {
                id,
                rect: Rect::new(MARGIN, y, content_w, height),
                fixed: false,
            });
            y += height + SECTION_GAP;
        }

        self.content_height = y + 128.0;
        self.elements = elements;
        self.scroll_to(self.scroll_y);
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the window and reflow.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.relayout();
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Scroll to `y`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, y: f32) {
        let max = (self.content_height - self.viewport.height).max(0.0);
        self.scroll_y = y.clamp(0.0, max);
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.scroll_y + dy);
    }

    fn find(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Rectangle of `id` in viewport coordinates.
    pub fn locate(&self, id: &str) -> Option<Rect> {
        self.find(id).map(|e| {
            if e.fixed {
                e.rect
            } else {
                e.rect.translate(0.0, -self.scroll_y)
            }
        })
    }

    /// Scroll so `id` is vertically centered, as far as the page allows.
    pub fn center_on(&mut self, id: &str) {
        let Some(target) = self.find(id).filter(|e| !e.fixed).map(|e| e.rect) else {
            return;
        };
        self.scroll_to(target.center_y() - self.viewport.height / 2.0);
        debug!(target = id, scroll_y = self.scroll_y, "scrolled into view");
    }
}

/// Shared handle used as the tour's element locator.
#[derive(Debug, Clone)]
pub struct PageHandle(Rc<RefCell<CampusPage>>);

impl PageHandle {
    pub fn new(page: CampusPage) -> Self {
        Self(Rc::new(RefCell::new(page)))
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, CampusPage> {
        self.0.borrow_mut()
    }

    pub fn borrow(&self) -> std::cell::Ref<'_, CampusPage> {
        self.0.borrow()
    }
}

impl ElementLocator for PageHandle {
    fn locate(&self, target_id: &str) -> Option<Rect> {
        self.0.borrow().locate(target_id)
    }

    fn scroll_into_view(&self, target_id: &str) {
        self.0.borrow_mut().center_on(target_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> CampusPage {
        CampusPage::new(Size::new(1280.0, 800.0), Sections::default())
    }

    #[test]
    fn header_controls_do_not_scroll() {
        let mut page = page();
        let before = page.locate("tour-calendar");
        page.scroll_by(500.0);
        assert_eq!(page.locate("tour-calendar"), before);
        assert_eq!(
            page.locate("tour-calendar"),
            Some(Rect::new(1208.0, 16.0, 40.0, 40.0))
        );
    }

    #[test]
    fn sections_scroll_with_page() {
        let mut page = page();
        let before = page.locate("tour-upcoming").unwrap();
        page.scroll_by(300.0);
        let after = page.locate("tour-upcoming").unwrap();
        assert_eq!(after.y, before.y - 300.0);
    }

    #[test]
    fn empty_section_is_not_rendered() {
        let page = CampusPage::new(
            Size::new(1280.0, 800.0),
            Sections {
                past: false,
                ..Sections::default()
            },
        );
        assert!(page.locate("tour-past").is_none());
        assert!(page.locate("tour-upcoming").is_some());
    }

    #[test]
    fn center_on_is_clamped() {
        let mut page = page();
        page.center_on("tour-filter");
        let filter = page.locate("tour-filter").unwrap();
        assert!((filter.center_y() - 400.0).abs() < 1e-3);

        page.center_on("tour-past");
        let max = page.content_height - 800.0;
        assert!(page.scroll_y() <= max);
    }

    #[test]
    fn card_grids_wrap_by_width() {
        // Six upcoming cards: two rows at three columns, three at two, six at one.
        let mut page = page();
        assert_eq!(page.locate("tour-upcoming").unwrap().height, 64.0 + 2.0 * 380.0);
        page.set_viewport(Size::new(800.0, 800.0));
        assert_eq!(page.locate("tour-upcoming").unwrap().height, 64.0 + 3.0 * 380.0);
        page.set_viewport(Size::new(390.0, 844.0));
        assert_eq!(page.locate("tour-upcoming").unwrap().height, 64.0 + 6.0 * 380.0);
    }

    #[test]
    fn narrow_viewport_reflows_to_one_column() {
        let mut page = page();
        let wide = page.locate("tour-upcoming").unwrap().height;
        page.set_viewport(Size::new(390.0, 844.0));
        let narrow = page.locate("tour-upcoming").unwrap().height;
        assert!(narrow > wide);
        assert_eq!(page.locate("tour-filter").unwrap().width, 326.0);
    }
}
