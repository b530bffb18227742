use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Structured single-line JSON event log.
///
/// Copied by value into every controller; it only carries the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventLog {
    min_level: LogLevel,
}

impl EventLog {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn emit(self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if !self.enabled(level) {
            return;
        }

        write_line(&format_event(now_unix_millis(), level, event, fields));
    }

    pub fn debug(self, event: &str, fields: serde_json::Value) {
        self.emit(LogLevel::Debug, event, fields);
    }

    pub fn info(self, event: &str, fields: serde_json::Value) {
        self.emit(LogLevel::Info, event, fields);
    }

    pub fn warn(self, event: &str, fields: serde_json::Value) {
        self.emit(LogLevel::Warn, event, fields);
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn write_line(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_order_debug_below_warn() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);

        let log = EventLog::new(LogLevel::Info);
        assert!(!log.enabled(LogLevel::Debug));
        assert!(log.enabled(LogLevel::Warn));
    }

    #[test]
    fn formatted_event_merges_fields_after_envelope() {
        let line = format_event(42, LogLevel::Warn, "storage_write_failed", json!({ "key": "k" }));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");

        assert_eq!(parsed["ts"], 42);
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["event"], "storage_write_failed");
        assert_eq!(parsed["key"], "k");
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let line = format_event(1, LogLevel::Info, "ping", json!(null));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");

        assert_eq!(parsed.as_object().map(|fields| fields.len()), Some(3));
    }
}
