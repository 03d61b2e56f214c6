use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tracing::{Level, Subscriber};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// A log event captured in memory
#[derive(Debug, Clone, Serialize)]
pub struct CapturedEvent {
    pub level: String,
    pub target: String,
    /// The `message` field, empty if the event had none
    pub message: String,
    /// Name of the innermost span the event was recorded in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<String>,
    pub fields: HashMap<String, serde_json::Value>,
    /// Nanoseconds since the Unix epoch
    pub timestamp: u128,
}

impl CapturedEvent {
    /// String value of a recorded field, if present
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}

/// Shared storage for captured events
#[derive(Debug, Clone, Default)]
pub struct SharedEventStorage {
    events: Arc<RwLock<Vec<CapturedEvent>>>,
}

impl SharedEventStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: CapturedEvent) {
        if let Ok(mut events) = self.events.write() {
            events.push(event);
        }
    }

    /// Snapshot of every event captured so far, oldest first
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.read().map(|events| events.clone()).unwrap_or_default()
    }

    /// Events recorded at exactly `level`
    pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
        let level = level.to_string();
        self.events().into_iter().filter(|e| e.level == level).collect()
    }

    /// Whether any captured message contains `needle`
    pub fn contains_message(&self, needle: &str) -> bool {
        self.events().iter().any(|e| e.message.contains(needle))
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }
}

/// A tracing layer that records events into a [`SharedEventStorage`]
pub struct EventCaptureLayer {
    storage: Arc<SharedEventStorage>,
    min_level: Level,
}

impl EventCaptureLayer {
    pub fn new(storage: Arc<SharedEventStorage>) -> Self {
        Self { storage, min_level: Level::TRACE }
    }

    /// Ignore events less severe than `level`
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }
}

impl<S> Layer<S> for EventCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // Level ordering: TRACE > DEBUG > ... > ERROR
        if *metadata.level() > self.min_level {
            return;
        }

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);
        let mut fields = visitor.0;
        let message = match fields.remove("message") {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        self.storage.push(CapturedEvent {
            level: metadata.level().to_string(),
            target: metadata.target().to_string(),
            message,
            span: ctx.event_span(event).map(|span| span.name().to_string()),
            fields,
            timestamp,
        });
    }
}

#[derive(Default)]
struct JsonVisitor(HashMap<String, serde_json::Value>);

impl tracing::field::Visit for JsonVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), serde_json::Value::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::Value::Bool(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::info_span;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(min_level: Level) -> (Arc<SharedEventStorage>, impl Subscriber + Send + Sync) {
        let storage = Arc::new(SharedEventStorage::new());
        let subscriber = tracing_subscriber::registry()
            .with(EventCaptureLayer::new(storage.clone()).with_min_level(min_level));
        (storage, subscriber)
    }

    #[test]
    fn captures_message_fields_and_span() {
        let (storage, subscriber) = capture(Level::TRACE);
        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("ingest", document.id = "r1");
            let _guard = span.enter();
            tracing::warn!(segment_count = 3u64, document.id = "r1", "stored without vectors");
        });

        let events = storage.events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, "WARN");
        assert_eq!(event.message, "stored without vectors");
        assert_eq!(event.span.as_deref(), Some("ingest"));
        assert_eq!(event.fields["segment_count"], serde_json::json!(3));
        assert_eq!(event.field_str("document.id"), Some("r1"));
        assert!(event.timestamp > 0);
    }

    #[test]
    fn min_level_filters_verbose_events() {
        let (storage, subscriber) = capture(Level::INFO);
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("noise");
            tracing::info!("kept");
            tracing::error!("also kept");
        });

        assert_eq!(storage.events().len(), 2);
        assert_eq!(storage.events_at(Level::ERROR).len(), 1);
        assert!(!storage.contains_message("noise"));

        storage.clear();
        assert!(storage.events().is_empty());
    }

    #[test]
    fn captured_event_serializes_without_empty_span() {
        let event = CapturedEvent {
            level: "INFO".to_string(),
            target: "resume_rag".to_string(),
            message: "hello".to_string(),
            span: None,
            fields: HashMap::new(),
            timestamp: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"message\":\"hello\""));
        assert!(!json.contains("\"span\""));
    }
}
