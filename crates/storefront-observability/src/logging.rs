//! Structured logging with view context.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::ViewId;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// View ID for correlation.
    pub view_id: String,
    /// Component that logged (e.g. "review-section").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Route path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}", self.level, self.message);

        if let Some(elapsed) = self.elapsed_us {
            s.push_str(&format!(" ({}us)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }

    /// Get a field value.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// Shared buffer of emitted entries.
///
/// Cloning shares the buffer, so a test can keep one handle and give the
/// other to a logger.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogCapture {
    /// Create an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Messages of captured entries, in order.
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

/// Structured logger with view context.
///
/// Every entry carries the view ID, component and route, and is emitted as a
/// `tracing` event at the matching level under the `storefront` target.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    view_id: ViewId,
    component: Option<String>,
    route: Option<String>,
    start_time: std::time::Instant,
    min_level: LogLevel,
    format: LogFormat,
    capture: Option<LogCapture>,
}

impl StructuredLogger {
    /// Create a new logger for a page view.
    pub fn new(view_id: ViewId) -> Self {
        Self {
            view_id,
            component: None,
            route: None,
            start_time: std::time::Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            capture: None,
        }
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the route path.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Also record entries into `capture`.
    pub fn with_capture(mut self, capture: LogCapture) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Derive a logger for a child component of the same view.
    pub fn for_component(&self, component: impl Into<String>) -> Self {
        self.clone().with_component(component)
    }

    /// Log a plain info message.
    pub fn info(&self, message: &str) {
        self.entry(LogLevel::Info, message).emit();
    }

    /// Log a plain warning.
    pub fn warn(&self, message: &str) {
        self.entry(LogLevel::Warn, message).emit();
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            view_id: self.view_id.to_string(),
            component: self.component.clone(),
            route: self.route.clone(),
            fields,
            elapsed_us: Some(self.elapsed_us()),
        };

        let output = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };

        match level {
            LogLevel::Trace => tracing::trace!(target: "storefront", "{}", output),
            LogLevel::Debug => tracing::debug!(target: "storefront", "{}", output),
            LogLevel::Info => tracing::info!(target: "storefront", "{}", output),
            LogLevel::Warn => tracing::warn!(target: "storefront", "{}", output),
            LogLevel::Error => tracing::error!(target: "storefront", "{}", output),
        }

        if let Some(capture) = &self.capture {
            capture.push(entry);
        }
    }

    /// Get the view ID.
    pub fn view_id(&self) -> &ViewId {
        &self.view_id
    }

    /// Get elapsed time since logger creation.
    pub fn elapsed_us(&self) -> u64 {
        u64::try_from(self.start_time.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Entry under construction; nothing is logged until `emit`.
#[must_use = "call `emit` to log the entry"]
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl LogBuilder<'_> {
    /// Attach a field. Strings, integers, floats and booleans all work.
    pub fn field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start an entry at `level`.
    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Debug, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Warn, message)
    }

    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Error, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(capture: &LogCapture) -> StructuredLogger {
        StructuredLogger::new(ViewId::from_string("view-1"))
            .with_component("review-section")
            .with_route("/product/1")
            .with_capture(capture.clone())
    }

    #[test]
    fn test_min_level_filters() {
        let capture = LogCapture::new();
        let log = logger(&capture).with_min_level(LogLevel::Warn);
        log.info("dropped");
        log.warn("kept");

        assert_eq!(capture.messages(), vec!["kept".to_string()]);
    }

    #[test]
    fn test_builder_fields() {
        let capture = LogCapture::new();
        logger(&capture)
            .info_builder("Reviews loaded")
            .field("product_id", "p1")
            .field("count", 3)
            .field("empty", false)
            .emit();

        let entry = &capture.entries()[0];
        assert_eq!(entry.view_id, "view-1");
        assert_eq!(entry.component.as_deref(), Some("review-section"));
        assert_eq!(entry.field("count"), Some(&serde_json::json!(3)));
        assert_eq!(entry.field("product_id"), Some(&serde_json::json!("p1")));
        assert_eq!(entry.field("empty"), Some(&serde_json::json!(false)));
    }

    #[test]
    fn test_trace_level_entries_dropped_by_default() {
        let capture = LogCapture::new();
        let log = logger(&capture);
        log.entry(LogLevel::Trace, "noise").field("n", 1.5).emit();
        log.entry(LogLevel::Error, "kept").emit();

        assert_eq!(capture.messages(), vec!["kept".to_string()]);
    }

    #[test]
    fn test_json_shape() {
        let entry = LogEntry {
            level: LogLevel::Warn,
            message: "Review load failed".into(),
            view_id: "v".into(),
            component: None,
            route: None,
            fields: BTreeMap::from([("error".to_string(), serde_json::json!("timeout"))]),
            elapsed_us: None,
        };
        let json: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(json["level"], "warn");
        assert_eq!(json["error"], "timeout");
        assert!(json.get("component").is_none());
    }

    #[test]
    fn test_human_format() {
        let entry = LogEntry {
            level: LogLevel::Info,
            message: "Product loaded".into(),
            view_id: "v".into(),
            component: None,
            route: None,
            fields: BTreeMap::from([
                ("b".to_string(), serde_json::json!(2)),
                ("a".to_string(), serde_json::json!("x")),
            ]),
            elapsed_us: Some(12),
        };
        assert_eq!(entry.to_human(), "[INFO] Product loaded (12us) | a=\"x\" b=2");
    }

    #[test]
    fn test_level_config_names() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
        let format: LogFormat = serde_json::from_str("\"human\"").unwrap();
        assert_eq!(format, LogFormat::Human);
    }
}
