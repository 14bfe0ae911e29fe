#![forbid(unsafe_code)]

//! Structured log coverage for a tour session.
//!
//! A capture layer records every event's level and message while a short
//! session runs, then asserts the lifecycle is visible in the log.
//!
//! Run:
//!   cargo test -p tour-runtime --test tracing_events

use std::sync::{Arc, Mutex};

use tour_core::{Rect, Size, TourStep, TourSteps};
use tour_runtime::{HeadlessHost, TourEngine, TourHooks, pump_frame};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for EventCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        #[derive(Default)]
        struct MessageVisitor {
            message: String,
        }

        impl tracing::field::Visit for MessageVisitor {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = format!("{value:?}");
                }
            }

            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = value.to_owned();
                }
            }
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn has(events: &[CapturedEvent], level: tracing::Level, message: &str) -> bool {
    events
        .iter()
        .any(|e| e.level == level && e.message == message)
}

#[test]
fn session_lifecycle_is_logged() {
    let events = capture(|| {
        let steps = TourSteps::new(vec![
            TourStep::new("a", "A", "first"),
            TourStep::new("b", "B", "second"),
        ])
        .unwrap();
        let host = HeadlessHost::shared(Size::new(800.0, 600.0));
        let locate = |id: &str| (id == "a").then(|| Rect::new(10.0, 10.0, 40.0, 20.0));
        let mut engine = TourEngine::mount(steps, locate, host.clone(), TourHooks::new()).unwrap();
        pump_frame(&host, &mut engine);
        engine.next();
        engine.skip();
    });

    assert!(has(&events, tracing::Level::INFO, "tour mounted"));
    assert!(has(&events, tracing::Level::DEBUG, "entering step"));
    assert!(has(&events, tracing::Level::DEBUG, "target geometry changed"));
    assert!(has(&events, tracing::Level::DEBUG, "step resources acquired"));
    assert!(has(&events, tracing::Level::DEBUG, "step resources released"));
    assert!(has(&events, tracing::Level::INFO, "tour ended"));
    assert_eq!(
        events
            .iter()
            .filter(|e| e.message == "entering step")
            .count(),
        2
    );
}

#[test]
fn stale_frames_log_at_trace_only() {
    let events = capture(|| {
        let steps = TourSteps::new(vec![TourStep::new("a", "A", "only")]).unwrap();
        let host = HeadlessHost::shared(Size::new(800.0, 600.0));
        let mut engine =
            TourEngine::mount(steps, |_: &str| -> Option<Rect> { None }, host, TourHooks::new())
                .unwrap();
        engine.update(tour_runtime::TourMsg::Frame(tour_runtime::FrameHandle(42)));
    });

    let stale: Vec<_> = events
        .iter()
        .filter(|e| e.message == "stale frame ignored")
        .collect();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].level, tracing::Level::TRACE);
    assert!(!events.iter().any(|e| e.level == tracing::Level::WARN));
}
