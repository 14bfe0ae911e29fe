#![forbid(unsafe_code)]

//! Campus Pilot tour demo
//!
//! Runs the events page walkthrough against a headless page: waits out the
//! launch delay, mounts the tour if the "tour seen" flag is unset, and then
//! plays a built-in script or reads commands from stdin. Set
//! `launch.delay_ms` in the config file to shorten the wait.
//!
//! # Running
//!
//! ```sh
//! cargo run -p tour-demo                 # scripted walkthrough
//! cargo run -p tour-demo -- --stdin      # type commands
//! cargo run -p tour-demo -- --reset      # forget the flag first
//! ```
//!
//! # Commands
//!
//! `next`, `skip`, `scroll <dy>`, `resize <w> <h>`, `frame`, `show`, `quit`
//!
//! # Environment
//!
//! - `RUST_LOG`: log filter (default `info`)
//! - `TOUR_CONFIG`: TOML or JSON settings file
//! - `TOUR_FLAGS`: flag file (default in the temp directory)

mod page;
mod render;
mod session;
mod steps;

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tour::{
    Degradation, Error, FileFlagStore, FlagStore, HeadlessHost, Size, Tour, TourConfig, TourGate,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use web_time::{Duration, Instant};

use page::{CampusPage, PageHandle, Sections};
use session::{Command, Session, default_script};
use steps::campus_steps;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(
    name = "tour-demo",
    about = "Guided tour walkthrough of the Campus Pilot events page",
    version
)]
struct Args {
    /// Forget the "tour seen" flag before starting.
    #[arg(long)]
    reset: bool,

    /// Read commands from stdin instead of playing the built-in script.
    #[arg(long)]
    stdin: bool,

    /// Render the page without its past events section.
    #[arg(long = "no-past-events")]
    no_past_events: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config() -> TourConfig {
    let Some(path) = std::env::var_os("TOUR_CONFIG") else {
        return TourConfig::default();
    };
    match TourConfig::load(&path) {
        Ok(config) => {
            info!(path = %PathBuf::from(&path).display(), "loaded tour config");
            config
        }
        Err(err) => {
            let err = Error::from(err);
            warn!(
                error_type = err.error_type(),
                degradation = %err.degradation(),
                %err,
                "bad tour config"
            );
            TourConfig::default()
        }
    }
}

fn flag_path() -> PathBuf {
    std::env::var_os("TOUR_FLAGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("campus-pilot-tour.json"))
}

/// Sleep one frame at a time from page ready until `gate` is due. Returns
/// the time waited.
fn wait_until_due<S: FlagStore>(gate: &TourGate<S>, ready: Instant) -> Duration {
    while gate.should_launch() && !gate.is_due(ready.elapsed()) {
        std::thread::sleep(FRAME);
    }
    ready.elapsed()
}

fn run(args: &Args) -> Result<(), Error> {
    let config = load_config();
    let mut store = FileFlagStore::new(flag_path());
    if args.reset {
        store.clear(&config.launch.flag_key)?;
        info!(path = %store.path().display(), "tour flag reset");
    }

    let gate = Rc::new(RefCell::new(TourGate::open(store, &config.launch)?));
    if !gate.borrow().should_launch() {
        println!("Tour already seen. Run with --reset to show it again.");
        return Ok(());
    }

    let viewport = Size::new(1280.0, 800.0);
    let sections = Sections {
        past: !args.no_past_events,
        ..Sections::default()
    };
    let page = PageHandle::new(CampusPage::new(viewport, sections));
    let host = HeadlessHost::shared(viewport);

    let waited = wait_until_due(&gate.borrow(), Instant::now());
    info!(elapsed_ms = waited.as_millis() as u64, "launching tour");

    let engine = Tour::new(campus_steps())?
        .config(config)
        .remember_in(gate.clone())
        .mount(page.clone(), host.clone())?;
    let mut session = Session::new(page, host, engine);

    let started = Instant::now();
    if args.stdin {
        println!("commands: next, skip, scroll <dy>, resize <w> <h>, frame, show, quit");
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => print_lines(session.apply(command)),
                Err(err) => println!("{err}"),
            }
            if session.state().is_terminal() {
                break;
            }
        }
    } else {
        for command in default_script() {
            println!("> {command:?}");
            print_lines(session.apply(command));
        }
    }

    info!(
        state = ?session.state(),
        seen = !gate.borrow().should_launch(),
        wall_ms = started.elapsed().as_millis() as u64,
        "demo finished"
    );
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.degradation() == Degradation::RunWithoutTour => {
            warn!(error_type = err.error_type(), %err, "running without tour");
            println!("Page ready (tour unavailable: {err}).");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
