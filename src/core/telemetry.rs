use crate::domain::model::TelemetryEvent;
use crate::domain::ports::{Storage, TelemetrySink};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

#[derive(Serialize)]
struct StampedEvent<'a> {
    #[serde(flatten)]
    event: &'a TelemetryEvent,
    server_timestamp: String,
}

/// Append-only JSON lines log. Writers are serialized so lines from
/// concurrent callers never interleave.
pub struct JsonlTelemetry<S: Storage> {
    storage: S,
    log_file: String,
    write_lock: Mutex<()>,
}

impl<S: Storage> JsonlTelemetry<S> {
    pub fn new(storage: S, log_file: impl Into<String>) -> Self {
        Self {
            storage,
            log_file: log_file.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn log_file(&self) -> &str {
        &self.log_file
    }
}

#[async_trait]
impl<S: Storage> TelemetrySink for JsonlTelemetry<S> {
    async fn log_events(&self, events: Vec<TelemetryEvent>) -> Result<usize> {
        if events.is_empty() {
            return Ok(0);
        }

        let server_timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let mut lines = Vec::new();
        for event in &events {
            serde_json::to_writer(
                &mut lines,
                &StampedEvent {
                    event,
                    server_timestamp: server_timestamp.clone(),
                },
            )?;
            lines.push(b'\n');
        }

        let _guard = self.write_lock.lock().await;
        self.storage.append_file(&self.log_file, &lines).await?;
        tracing::debug!("Logged {} telemetry events to {}", events.len(), self.log_file);
        Ok(events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use crate::domain::model::TelemetryKind;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        files: Arc<std::sync::Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MemoryStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            Ok(self.files.lock().unwrap().get(path).cloned().unwrap_or_default())
        }

        async fn append_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .entry(path.to_string())
                .or_default()
                .extend_from_slice(data);
            Ok(())
        }
    }

    fn event(kind: TelemetryKind, timestamp: i64) -> TelemetryEvent {
        TelemetryEvent {
            kind,
            timestamp,
            data: None,
        }
    }

    #[tokio::test]
    async fn test_events_are_stamped_and_appended() {
        let storage = MemoryStorage::default();
        let telemetry = JsonlTelemetry::new(storage.clone(), "telemetry_log.jsonl");

        let logged = telemetry
            .log_events(vec![event(TelemetryKind::Click, 1), event(TelemetryKind::MouseMove, 2)])
            .await
            .unwrap();
        assert_eq!(logged, 2);
        telemetry
            .log_events(vec![event(TelemetryKind::LocationChange, 3)])
            .await
            .unwrap();

        let raw = storage.read_file("telemetry_log.jsonl").await.unwrap();
        let lines: Vec<serde_json::Value> = String::from_utf8(raw)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "click");
        assert_eq!(lines[2]["type"], "location_change");
        assert!(lines[1]["server_timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_do_not_interleave() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let telemetry = Arc::new(JsonlTelemetry::new(storage, "telemetry_log.jsonl"));

        let mut handles = Vec::new();
        for task in 0..32i64 {
            let telemetry = Arc::clone(&telemetry);
            handles.push(tokio::spawn(async move {
                let events = (0..40)
                    .map(|i| TelemetryEvent {
                        kind: TelemetryKind::MouseMove,
                        timestamp: task * 1000 + i,
                        data: Some(serde_json::json!({ "task": task, "padding": "x".repeat(256) })),
                    })
                    .collect();
                telemetry.log_events(events).await.unwrap()
            }));
        }

        let mut logged = 0;
        for handle in handles {
            logged += handle.await.unwrap();
        }
        assert_eq!(logged, 32 * 40);

        let raw = std::fs::read_to_string(dir.path().join("telemetry_log.jsonl")).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 32 * 40);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["type"], "mouse_move");
        }
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let storage = MemoryStorage::default();
        let telemetry = JsonlTelemetry::new(storage.clone(), "log.jsonl");

        let logged = tokio_test::block_on(telemetry.log_events(Vec::new())).unwrap();
        assert_eq!(logged, 0);
        assert!(storage.files.lock().unwrap().is_empty());
    }
}
