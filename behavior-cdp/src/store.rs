// Persistence collaborator
//
// Events, breakpoints and blackbox patterns outlive a single frontend
// connection; the core only reads and appends through this trait.

use crate::protocol::{BridgeResult, Notification};
use crate::types::{BlackboxPattern, BlackboxRecord, BreakpointRecord, BreakpointSpec};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stored events with the given method, in insertion order
    async fn event_get_by_method(&self, method: &str) -> BridgeResult<Vec<Notification>>;

    async fn event_add(&self, event: Notification) -> BridgeResult<()>;

    async fn breakpoint_get_all(&self) -> BridgeResult<Vec<BreakpointRecord>>;

    async fn breakpoint_add(&self, spec: BreakpointSpec) -> BridgeResult<BreakpointRecord>;

    /// Returns false when no breakpoint had that id
    async fn breakpoint_remove(&self, breakpoint_id: &str) -> BridgeResult<bool>;

    async fn blackbox_get_all(&self) -> BridgeResult<Vec<BlackboxRecord>>;

    /// Replace every stored pattern
    async fn blackbox_replace(&self, patterns: Vec<String>) -> BridgeResult<Vec<BlackboxRecord>>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<Vec<Notification>>,
    breakpoints: Mutex<Vec<BreakpointRecord>>,
    blackboxes: Mutex<Vec<BlackboxRecord>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn event_get_by_method(&self, method: &str) -> BridgeResult<Vec<Notification>> {
        let events = self.events.lock().await;
        Ok(events.iter().filter(|e| e.method == method).cloned().collect())
    }

    async fn event_add(&self, event: Notification) -> BridgeResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }

    async fn breakpoint_get_all(&self) -> BridgeResult<Vec<BreakpointRecord>> {
        Ok(self.breakpoints.lock().await.clone())
    }

    async fn breakpoint_add(&self, spec: BreakpointSpec) -> BridgeResult<BreakpointRecord> {
        let record = BreakpointRecord {
            breakpoint_id: format!("bp_{}", self.next_id()),
            spec,
        };
        self.breakpoints.lock().await.push(record.clone());
        Ok(record)
    }

    async fn breakpoint_remove(&self, breakpoint_id: &str) -> BridgeResult<bool> {
        let mut breakpoints = self.breakpoints.lock().await;
        let before = breakpoints.len();
        breakpoints.retain(|bp| bp.breakpoint_id != breakpoint_id);
        Ok(breakpoints.len() != before)
    }

    async fn blackbox_get_all(&self) -> BridgeResult<Vec<BlackboxRecord>> {
        Ok(self.blackboxes.lock().await.clone())
    }

    async fn blackbox_replace(&self, patterns: Vec<String>) -> BridgeResult<Vec<BlackboxRecord>> {
        let records: Vec<BlackboxRecord> = patterns
            .into_iter()
            .map(|pattern| BlackboxRecord {
                blackbox_id: format!("bb_{}", self.next_id()),
                pattern: BlackboxPattern { pattern },
            })
            .collect();

        *self.blackboxes.lock().await = records.clone();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(line: i64) -> BreakpointSpec {
        BreakpointSpec {
            url: "file:///a.lua".to_string(),
            line_number: line,
            column_number: 0,
            condition: String::new(),
        }
    }

    #[tokio::test]
    async fn test_events_filtered_by_method_keep_order() {
        let store = MemoryStore::new();
        store.event_add(Notification::new("Log.entryAdded", json!({"n": 1}))).await.unwrap();
        store.event_add(Notification::new("Runtime.consoleAPICalled", json!({}))).await.unwrap();
        store.event_add(Notification::new("Log.entryAdded", json!({"n": 2}))).await.unwrap();

        let logs = store.event_get_by_method("Log.entryAdded").await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].params["n"], 1);
        assert_eq!(logs[1].params["n"], 2);
    }

    #[tokio::test]
    async fn test_breakpoint_add_and_remove() {
        let store = MemoryStore::new();
        let first = store.breakpoint_add(spec(1)).await.unwrap();
        let second = store.breakpoint_add(spec(2)).await.unwrap();
        assert_ne!(first.breakpoint_id, second.breakpoint_id);

        assert!(store.breakpoint_remove(&first.breakpoint_id).await.unwrap());
        assert!(!store.breakpoint_remove(&first.breakpoint_id).await.unwrap());

        let remaining = store.breakpoint_get_all().await.unwrap();
        assert_eq!(remaining, vec![second]);
    }

    #[tokio::test]
    async fn test_blackbox_replace_drops_previous_patterns() {
        let store = MemoryStore::new();
        store.blackbox_replace(vec!["^lib/".to_string()]).await.unwrap();
        store.blackbox_replace(vec!["vendor".to_string()]).await.unwrap();

        let all = store.blackbox_get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].pattern.pattern, "vendor");
    }
}
