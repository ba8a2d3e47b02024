//! JSONL file writer for execution events.
//!
//! Each [`ExecutionEvent`] becomes one JSON line carrying its payload fields
//! plus `type`, `timestamp` and the `run_id` shared by all events of one
//! logger. The file is opened in append mode so successive runs accumulate.

use costwise_application::{ExecutionEvent, ExecutionLogger};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// File name used by [`JsonlExecutionLogger::in_dir`]
pub const EXECUTION_LOG_FILE: &str = "executions.jsonl";

/// JSONL execution logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and on `Drop`.
pub struct JsonlExecutionLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
}

impl JsonlExecutionLogger {
    /// Open (or create) the log at `path` for appending.
    ///
    /// Returns `None` if the file cannot be opened; execution logging is
    /// best-effort and never blocks an analysis.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create execution log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open execution log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    /// Log to `<dir>/executions.jsonl`
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        Self::new(dir.as_ref().join(EXECUTION_LOG_FILE))
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    fn record(&self, event: ExecutionEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        map.insert("run_id".to_string(), Value::from(self.run_id.clone()));
        Value::Object(map)
    }
}

impl ExecutionLogger for JsonlExecutionLogger {
    fn log(&self, event: ExecutionEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlExecutionLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlExecutionLogger::in_dir(dir.path()).unwrap();

        logger.log(ExecutionEvent::new(
            "execution_started",
            json!({"query": "analyze my costs", "mode": "comprehensive"}),
        ));
        logger.log(ExecutionEvent::new(
            "specialist_completed",
            json!({"specialist": "cost", "success": true, "used_fallback": true}),
        ));
        let path = logger.path().to_path_buf();
        let run_id = logger.run_id().to_string();
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "execution_started");
        assert_eq!(records[0]["query"], "analyze my costs");
        assert_eq!(records[1]["specialist"], "cost");
        for record in &records {
            assert!(record["timestamp"].is_string());
            assert_eq!(record["run_id"], run_id.as_str());
        }
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.jsonl");

        for _ in 0..2 {
            let logger = JsonlExecutionLogger::new(&path).unwrap();
            logger.log(ExecutionEvent::new("execution_completed", json!({"total_ms": 5})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlExecutionLogger::in_dir(dir.path()).unwrap();
        logger.log(ExecutionEvent::new("note", json!("just a string")));
        logger.log(ExecutionEvent::new("empty", Value::Null));
        let path = logger.path().to_path_buf();
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "just a string");
        assert_eq!(records[1]["type"], "empty");
        assert!(records[1].get("data").is_none());
    }

    #[test]
    fn test_directory_in_place_of_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlExecutionLogger::new(dir.path()).is_none());
    }
}
