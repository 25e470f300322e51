use crate::models::DailyRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Keyed storage for daily records. Implementations only need plain get/put;
/// read-modify-write ordering is handled by [`crate::tracker::Tracker`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<DailyRecord>;

    async fn put(&self, key: &str, record: DailyRecord);
}

/// Process-lifetime store. Nothing is evicted and nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, DailyRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<DailyRecord> {
        self.records.lock().await.get(key).cloned()
    }

    async fn put(&self, key: &str, record: DailyRecord) {
        self.records.lock().await.insert(key.to_string(), record);
    }
}
