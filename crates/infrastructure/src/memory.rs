use async_trait::async_trait;
use domain::{Record, RecordId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::store::{RecordStore, StoreError, WriteCondition};

/// ストアへの呼び出し（テスト観測用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Put(RecordId, WriteCondition),
    Get(RecordId),
    Delete(RecordId, WriteCondition),
    Scan,
}

/// 簡易な InMemory 実装（開発/テスト用）
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<RecordId, Record>>,
    calls: Mutex<Vec<StoreCall>>,
    // true の間はすべての操作が Backend エラーになる
    failing: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::default();
        if let Ok(mut map) = store.records.lock() {
            map.extend(records.into_iter().map(|r| (r.id.clone(), r)));
        }
        store
    }

    /// 障害モードの切り替え
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 呼び出し履歴
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// 現在の内容（並び順は不定）
    pub fn snapshot(&self) -> Vec<Record> {
        self.records
            .lock()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default()
    }

    fn begin(
        &self,
        call: StoreCall,
    ) -> Result<MutexGuard<'_, HashMap<RecordId, Record>>, StoreError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated store failure".to_string()));
        }

        self.records
            .lock()
            .map_err(|_| StoreError::Backend("record map lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, record: &Record, condition: WriteCondition) -> Result<(), StoreError> {
        let mut map = self.begin(StoreCall::Put(record.id.clone(), condition))?;

        if condition == WriteCondition::MustExist && !map.contains_key(&record.id) {
            return Err(StoreError::ConditionFailed);
        }

        map.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let map = self.begin(StoreCall::Get(id.clone()))?;
        Ok(map.get(id).cloned())
    }

    async fn delete(&self, id: &RecordId, condition: WriteCondition) -> Result<(), StoreError> {
        let mut map = self.begin(StoreCall::Delete(id.clone(), condition))?;

        if map.remove(id).is_none() && condition == WriteCondition::MustExist {
            return Err(StoreError::ConditionFailed);
        }

        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Record>, StoreError> {
        let map = self.begin(StoreCall::Scan)?;
        Ok(map.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(id: &str, title: &str) -> Record {
        Record {
            id: RecordId::from_stored(id.to_string()),
            title: title.to_string(),
            content: "content".to_string(),
            expiration: "2026-12-31".to_string(),
            status: "TODO".to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryRecordStore::new();
        let r = record("1", "A");

        store.put(&r, WriteCondition::None).await.unwrap();

        assert_eq!(store.get(&r.id).await.unwrap(), Some(r));
        assert_eq!(
            store
                .get(&RecordId::from_stored("2".to_string()))
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_unconditional_put_overwrites() {
        let store = InMemoryRecordStore::with_records(vec![record("1", "A")]);

        store
            .put(&record("1", "B"), WriteCondition::None)
            .await
            .unwrap();

        let stored = store.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "B");
    }

    #[tokio::test]
    async fn test_conditional_put_requires_existing_key() {
        let store = InMemoryRecordStore::new();

        let result = store.put(&record("1", "A"), WriteCondition::MustExist).await;

        assert_eq!(result, Err(StoreError::ConditionFailed));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_without_condition() {
        let store = InMemoryRecordStore::with_records(vec![record("1", "A")]);
        let id = RecordId::from_stored("1".to_string());

        store.delete(&id, WriteCondition::None).await.unwrap();
        store.delete(&id, WriteCondition::None).await.unwrap();

        assert_eq!(
            store.delete(&id, WriteCondition::MustExist).await,
            Err(StoreError::ConditionFailed)
        );
    }

    #[tokio::test]
    async fn test_scan_returns_all_records() {
        let store = InMemoryRecordStore::with_records(vec![record("1", "A"), record("2", "B")]);

        let mut titles: Vec<String> = store
            .scan()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        titles.sort();

        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_shared_store_sees_writes_through_arc() {
        let store = Arc::new(InMemoryRecordStore::new());
        let shared = Arc::clone(&store);

        shared.put(&record("1", "A"), WriteCondition::None).await.unwrap();

        assert_eq!(store.scan().await.unwrap().len(), 1);
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_mode_returns_backend_error() {
        let store = InMemoryRecordStore::with_records(vec![record("1", "A")]);
        store.set_failing(true);

        assert!(matches!(store.scan().await, Err(StoreError::Backend(_))));
        assert_eq!(store.calls(), vec![StoreCall::Scan]);

        store.set_failing(false);
        assert_eq!(store.scan().await.unwrap().len(), 1);
    }
}
