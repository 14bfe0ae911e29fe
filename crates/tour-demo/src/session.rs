//! Demo session: page, host and engine wired together, driven by commands.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use tour::{
    HeadlessHost, Size, TourEngine, TourEvent, TourMsg, TourState, pump_frame, pump_resize,
    pump_scroll,
};

use crate::page::PageHandle;
use crate::render::describe;

/// One scripted or typed user action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Next,
    Skip,
    /// Scroll the page by this many units.
    Scroll(f32),
    /// Resize the window.
    Resize(f32, f32),
    /// Let one frame pass.
    Frame,
    /// Print the current view.
    Show,
    Quit,
}

/// Error parsing a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let err = || ParseCommandError(line.trim().to_owned());
        let mut words = line.split_whitespace();
        let number = |word: Option<&str>| word.and_then(|w| w.parse::<f32>().ok()).ok_or_else(err);
        match words.next() {
            Some("n" | "next" | "finish") => Ok(Self::Next),
            Some("s" | "skip") => Ok(Self::Skip),
            Some("scroll") => Ok(Self::Scroll(number(words.next())?)),
            Some("resize") => {
                let w = number(words.next())?;
                let h = number(words.next())?;
                Ok(Self::Resize(w, h))
            }
            Some("f" | "frame") => Ok(Self::Frame),
            Some("show") => Ok(Self::Show),
            Some("q" | "quit") => Ok(Self::Quit),
            _ => Err(err()),
        }
    }
}

/// The walkthrough used when no input is given.
pub fn default_script() -> Vec<Command> {
    vec![
        Command::Show,
        Command::Next,
        Command::Show,
        Command::Next,
        Command::Scroll(240.0),
        Command::Frame,
        Command::Show,
        Command::Next,
        Command::Resize(390.0, 844.0),
        Command::Show,
        Command::Next,
        Command::Show,
        Command::Next,
        Command::Show,
        Command::Next,
    ]
}

/// Live demo state.
pub struct Session {
    page: PageHandle,
    host: Rc<RefCell<HeadlessHost>>,
    engine: TourEngine<PageHandle>,
}

impl Session {
    pub fn new(
        page: PageHandle,
        host: Rc<RefCell<HeadlessHost>>,
        engine: TourEngine<PageHandle>,
    ) -> Self {
        Self { page, host, engine }
    }

    pub fn state(&self) -> TourState {
        self.engine.state()
    }

    /// Apply `command`, returning lines to print.
    pub fn apply(&mut self, command: Command) -> Vec<String> {
        let event = match command {
            Command::Next => self.engine.update(TourMsg::Next),
            Command::Skip => self.engine.update(TourMsg::Skip),
            Command::Scroll(dy) => {
                self.page.borrow_mut().scroll_by(dy);
                pump_scroll(&self.host, &mut self.engine)
            }
            Command::Resize(w, h) => {
                let viewport = Size::new(w, h);
                self.page.borrow_mut().set_viewport(viewport);
                pump_resize(&self.host, &mut self.engine, viewport)
            }
            Command::Frame => {
                pump_frame(&self.host, &mut self.engine);
                None
            }
            Command::Show => return self.show(),
            Command::Quit => None,
        };
        match event {
            Some(TourEvent::StepChanged { to, .. }) => {
                vec![format!("-> step {}/{}", to + 1, self.engine.step_count())]
            }
            Some(TourEvent::Completed) => vec!["tour completed".to_owned()],
            Some(TourEvent::Closed) => vec!["tour dismissed".to_owned()],
            None => Vec::new(),
        }
    }

    /// Current view, or a note when nothing is on screen.
    pub fn show(&self) -> Vec<String> {
        let mut lines = match self.engine.view() {
            Some(view) => describe(&view),
            None if self.engine.is_active() => vec!["(measuring)".to_owned()],
            None => return vec!["(tour closed)".to_owned()],
        };
        let page = self.page.borrow();
        let viewport = page.viewport();
        lines.push(format!(
            "  page scrolled to {:.0} in a {:.0}x{:.0} window",
            page.scroll_y(),
            viewport.width,
            viewport.height
        ));
        lines
    }
}
