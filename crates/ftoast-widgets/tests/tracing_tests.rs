#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Spans and lifecycle events enabled:
//!   cargo test -p ftoast-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p ftoast-widgets --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ftoast_core::animation::{AnimationRequest, AnimationTicket, NodeStyle};
use ftoast_core::geometry::Point;
use ftoast_widgets::{
    Animator, ContainerId, Markup, NodeId, ShowOptions, Surface, SurfaceError, Toaster,
};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    name: String,
    message: Option<String>,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records spans and events.
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn messages(&self) -> Vec<String> {
        self.events().into_iter().filter_map(|e| e.message).collect()
    }
}

impl Capture {
    fn new() -> (Self, CaptureHandle) {
        let spans = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle {
            spans: spans.clone(),
            events: events.clone(),
        };
        (Self { spans, events }, handle)
    }
}

/// Visitor that extracts fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            message: None,
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message");
        self.events.lock().unwrap().push(Captured {
            name: event.metadata().name().to_string(),
            message,
            fields,
        });
    }
}

/// Set up a tracing subscriber with capture and run a closure.
fn with_capture<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let (layer, handle) = Capture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

// ============================================================================
// Host stubs
// ============================================================================

#[derive(Default)]
struct StubSurface {
    next: u64,
}

impl Surface for StubSurface {
    fn create_container(&mut self) -> ContainerId {
        ContainerId(1)
    }

    fn destroy_container(&mut self, _container: ContainerId) {}

    fn mount(
        &mut self,
        _container: ContainerId,
        _content: &Markup,
        _classes: &[String],
    ) -> Result<NodeId, SurfaceError> {
        self.next += 1;
        Ok(NodeId(self.next))
    }

    fn detach(&mut self, _node: NodeId) {}

    fn set_style(&mut self, _node: NodeId, _style: &NodeStyle) {}

    fn node_style(&self, _node: NodeId) -> NodeStyle {
        NodeStyle::new()
    }

    fn node_width(&self, _node: NodeId) -> f32 {
        300.0
    }

    fn hit_test(&self, _point: Point) -> Option<NodeId> {
        None
    }
}

#[derive(Default)]
struct StubAnimator {
    issued: Vec<AnimationTicket>,
}

impl Animator for StubAnimator {
    fn animate(&mut self, _node: NodeId, _request: AnimationRequest) -> AnimationTicket {
        let ticket = AnimationTicket(self.issued.len() as u64 + 1);
        self.issued.push(ticket);
        ticket
    }
}

fn run_lifecycle() {
    let mut toaster = Toaster::new(StubSurface::default(), StubAnimator::default());
    toaster
        .show("Hello", ShowOptions::new().display_length(Duration::from_millis(40)))
        .expect("mount")
        .expect("non-empty");
    toaster.advance(Duration::from_millis(20));
    toaster.advance(Duration::from_millis(20));
    let tickets = std::mem::take(&mut toaster.animator_mut().issued);
    for ticket in tickets {
        toaster.animation_finished(ticket);
    }
    assert_eq!(toaster.live_count(), 0);
}

// ============================================================================
// Tests
// ============================================================================

/// Advance spans carry the elapsed time.
#[test]
#[cfg(feature = "tracing")]
fn advance_spans_created() {
    let handle = with_capture(run_lifecycle);
    let spans = handle.spans();
    let advance: Vec<_> = spans.iter().filter(|s| s.name == "toaster_advance").collect();
    assert_eq!(advance.len(), 2, "one span per advance call, got {spans:?}");
    assert_eq!(advance[0].fields.get("dt_us").map(String::as_str), Some("20000"));
}

/// Lifecycle transitions are logged in order.
#[test]
#[cfg(feature = "tracing")]
fn lifecycle_events_logged_in_order() {
    let handle = with_capture(run_lifecycle);
    let messages = handle.messages();
    let position = |needle: &str| {
        messages
            .iter()
            .position(|m| m == needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in {messages:?}"))
    };
    let created = position("toast container created");
    let shown = position("toast shown");
    let expired = position("toast countdown expired");
    let started = position("toast removal started");
    let removed = position("toast removed");
    let destroyed = position("toast container destroyed");
    assert!(created < shown);
    assert!(shown < expired);
    assert!(expired < started);
    assert!(started < removed);
    assert!(started < destroyed);
}

/// Removal events name their trigger.
#[test]
#[cfg(feature = "tracing")]
fn removal_event_names_trigger() {
    let handle = with_capture(run_lifecycle);
    let started = handle
        .events()
        .into_iter()
        .find(|e| e.message.as_deref() == Some("toast removal started"))
        .expect("removal event");
    assert_eq!(started.fields.get("trigger").map(String::as_str), Some("expired"));
}

/// Without the feature the toaster opens no spans.
#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_without_feature() {
    let handle = with_capture(run_lifecycle);
    assert!(
        handle.spans().iter().all(|s| !s.name.starts_with("toaster_")),
        "toaster spans must compile out"
    );
}
