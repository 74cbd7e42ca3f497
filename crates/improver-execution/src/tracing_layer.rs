//! Tracing layer that streams orchestrator progress to a front end.
//!
//! Events whose target starts with the configured prefix are converted into
//! [`ProgressEvent`]s and sent down an unbounded tokio channel. Everything
//! else passes through untouched.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Progress notification delivered to the front end.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProgressEvent {
    /// Event target (e.g., "improver::progress")
    pub target: String,
    /// Log level (INFO, WARN, ...)
    pub level: String,
    /// Human-readable status line
    pub message: String,
    /// Remaining structured fields
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

pub struct ProgressEventLayer {
    sender: mpsc::UnboundedSender<ProgressEvent>,
    target_prefix: String,
}

impl ProgressEventLayer {
    pub fn new(sender: mpsc::UnboundedSender<ProgressEvent>, target_prefix: impl Into<String>) -> Self {
        Self {
            sender,
            target_prefix: target_prefix.into(),
        }
    }

    /// Creates a layer together with the receiving end of its channel.
    pub fn channel(
        target_prefix: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender, target_prefix), receiver)
    }
}

impl<S> Layer<S> for ProgressEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with(&self.target_prefix) {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        let message = match fields.remove("message") {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let progress = ProgressEvent {
            target: target.to_string(),
            level: event.metadata().level().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver gone means nobody is rendering progress any more.
        let _ = self.sender.send(progress);
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(format!("{value:?}")));
    }
}
