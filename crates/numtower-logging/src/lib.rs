//! Logging bootstrap for numtower
//!
//! Library crates log through the `log` facade. [`init_logging`] routes those
//! records into a `tracing` subscriber filtered by `RUST_LOG`/`NUMTOWER_LOG`
//! and hands every event, as a [`LogRecord`], to the hook installed with
//! [`set_log_hook`].

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::Subscriber;
use tracing_log::{LogTracer, NormalizeEvent};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Environment variable consulted after `RUST_LOG`
pub const LOG_ENV_VAR: &str = "NUMTOWER_LOG";

/// One structured log event
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub ts: String,
    pub level: String,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<JsonValue>,
}

type LogHook = Arc<dyn Fn(&LogRecord) + Send + Sync>;

static LOG_HOOK: Lazy<RwLock<Option<LogHook>>> = Lazy::new(|| RwLock::new(None));

/// Keeps a thread-scoped subscriber installed when the global one was taken
pub struct LoggingGuard {
    guard: Option<DefaultGuard>,
}

impl LoggingGuard {
    /// Whether this guard holds a thread-scoped fallback subscriber
    pub fn is_scoped(&self) -> bool {
        self.guard.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Filter directive used when neither environment variable is set
    pub level: Option<String>,
}

/// Install the hook that receives every record; replaces any previous hook
pub fn set_log_hook<F>(hook: F)
where
    F: Fn(&LogRecord) + Send + Sync + 'static,
{
    *LOG_HOOK.write() = Some(Arc::new(hook));
}

pub fn clear_log_hook() {
    *LOG_HOOK.write() = None;
}

/// Build the event filter: `RUST_LOG`, then `NUMTOWER_LOG`, then the
/// configured level, then `info`
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .or_else(|_| EnvFilter::try_new(level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_logging(opts: LoggingOptions) -> LoggingGuard {
    // Route `log` records into tracing; a second install is a no-op.
    let _ = LogTracer::init();

    let env_filter = build_filter(opts.level.as_deref());
    let build_subscriber = || {
        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(LogBridgeLayer)
    };

    let guard = match tracing::subscriber::set_global_default(build_subscriber()) {
        Ok(()) => None,
        Err(_) => Some(tracing::subscriber::set_default(build_subscriber())),
    };

    LoggingGuard { guard }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

struct LogBridgeLayer;

impl<S> Layer<S> for LogBridgeLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let hook = match LOG_HOOK.read().clone() {
            Some(hook) => hook,
            None => return,
        };

        // Records bridged from `log` carry their real target in fields.
        let normalized = event.normalized_metadata();
        let meta = normalized.as_ref().unwrap_or_else(|| event.metadata());

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord {
            ts: now_rfc3339(),
            level: meta.level().to_string(),
            target: meta.target().to_string(),
            message: visitor
                .message
                .unwrap_or_else(|| meta.name().to_string()),
            span_id: tracing::Span::current()
                .id()
                .map(|id| id.into_u64().to_string()),
            fields: (!visitor.fields.is_empty()).then(|| JsonValue::Object(visitor.fields)),
        };

        hook(&record);
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: Map<String, JsonValue>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: JsonValue) {
        let name = field.name();
        if name == "message" {
            self.message = Some(match value {
                JsonValue::String(s) => s,
                other => other.to_string(),
            });
        } else if !name.starts_with("log.") {
            self.fields.insert(name.to_string(), value);
        }
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, JsonValue::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, JsonValue::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, JsonValue::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, JsonValue::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, JsonValue::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, JsonValue::Bool(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_rfc3339_utc() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'), "{ts}");
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn record_serializes_without_empty_options() {
        let record = LogRecord {
            ts: "2024-01-01T00:00:00.000Z".to_string(),
            level: "INFO".to_string(),
            target: "numtower".to_string(),
            message: "ready".to_string(),
            span_id: None,
            fields: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["message"], "ready");
        assert!(json.get("span_id").is_none());
        assert!(json.get("fields").is_none());
    }
}
