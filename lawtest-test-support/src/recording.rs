//! In-memory capture of `tracing` spans and events.

use std::{
    collections::HashMap,
    fmt::{self, Write as _},
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span,
};
use tracing_subscriber::{Layer, layer::Context, prelude::*, registry::LookupSpan};

/// Layer recording every closed span and every event for later assertions.
///
/// Clones share storage, so a clone handed to the subscriber can be
/// inspected through the original.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Closed spans in completion order.
    ///
    /// # Examples
    /// ```
    /// use lawtest_test_support::recording::RecordingLayer;
    ///
    /// let layer = RecordingLayer::default();
    /// assert!(layer.spans().is_empty());
    /// ```
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        lock(&self.spans).clone()
    }

    /// Emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        lock(&self.events).clone()
    }

    /// Closed spans called `name`.
    #[must_use]
    pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
        lock(&self.spans)
            .iter()
            .filter(|span| span.name == name)
            .cloned()
            .collect()
    }

    /// Events whose message equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        lock(&self.events)
            .iter()
            .filter(|event| event.message() == Some(message))
            .cloned()
            .collect()
    }
}

/// Runs `f` with a fresh [`RecordingLayer`] installed as the thread's default
/// subscriber and returns its result together with the layer.
///
/// Only the calling thread is covered; events from spawned threads are not
/// recorded.
///
/// # Examples
/// ```
/// use lawtest_test_support::recording::capture;
///
/// let (value, layer) = capture(|| {
///     tracing::info!(answer = 42, "computed");
///     42
/// });
/// assert_eq!(value, 42);
/// let events = layer.events_with_message("computed");
/// assert_eq!(events[0].field("answer"), Some("42"));
/// ```
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, layer)
}

/// A closed span and the fields recorded on it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanRecord {
    /// Span name from its metadata.
    pub name: String,
    /// Fields recorded at creation or later via `Span::record`.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Returns the rendered value of `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// An emitted event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, normally the emitting module path.
    pub target: String,
    /// Names of the spans enclosing the event, outermost first.
    pub scope: Vec<String>,
    /// Structured fields, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the rendered value of `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The event's message, if it has one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

struct OpenSpan {
    name: String,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut FieldRecorder(&mut fields));
        span.extensions_mut().insert(OpenSpan {
            name: attrs.metadata().name().to_owned(),
            fields,
        });
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(open) = extensions.get_mut::<OpenSpan>() {
            values.record(&mut FieldRecorder(&mut open.fields));
        }
    }

    fn on_close(&self, id: span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
            return;
        };
        lock(&self.spans).push(SpanRecord {
            name: open.name,
            fields: open.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        let scope = ctx
            .event_scope(event)
            .map(|scope| {
                scope
                    .from_root()
                    .map(|span| span.name().to_owned())
                    .collect()
            })
            .unwrap_or_default();
        lock(&self.events).push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            scope,
            fields,
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking assertion elsewhere must not hide the records.
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl FieldRecorder<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldRecorder<'_> {
    fn record_bytes(&mut self, field: &Field, value: &[u8]) {
        let mut encoded = String::with_capacity(value.len() * 2);
        for byte in value {
            let _ = write!(&mut encoded, "{byte:02x}");
        }
        self.insert(field, encoded);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }
}
