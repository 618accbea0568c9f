use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use domain::{Record, RecordId};
use shared::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::models::{key_attribute, record_from_item, record_to_item, ID_ATTRIBUTE};
use crate::DynamoDbClient;

/// 存在条件の式（`#id` は ID_ATTRIBUTE に束縛）
const EXISTS_CONDITION: &str = "attribute_exists(#id)";

/// 書き込み時の条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCondition {
    /// 無条件（存在しなければ作成、あれば上書き）
    None,
    /// 対象キーが存在する場合のみ
    MustExist,
}

/// ストア層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Conditional check failed")]
    ConditionFailed,

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::ConditionFailed => AppError::NotFound(error.to_string()),
            StoreError::Backend(message) => AppError::DynamoDb(message),
        }
    }
}

/// 1 テーブルに対するレコード操作
///
/// 並び順は保証しない。リトライは行わない（SDK 既定の挙動のみ）。
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, record: &Record, condition: WriteCondition) -> Result<(), StoreError>;

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError>;

    async fn delete(&self, id: &RecordId, condition: WriteCondition) -> Result<(), StoreError>;

    /// テーブル全件を返す
    async fn scan(&self) -> Result<Vec<Record>, StoreError>;
}

/// 共有所有のストアへ委譲する
#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn put(&self, record: &Record, condition: WriteCondition) -> Result<(), StoreError> {
        (**self).put(record, condition).await
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        (**self).get(id).await
    }

    async fn delete(&self, id: &RecordId, condition: WriteCondition) -> Result<(), StoreError> {
        (**self).delete(id, condition).await
    }

    async fn scan(&self) -> Result<Vec<Record>, StoreError> {
        (**self).scan().await
    }
}

/// DynamoDB 実装
pub struct DynamoDbRecordStore {
    db: DynamoDbClient,
}

impl DynamoDbRecordStore {
    pub fn new(db: DynamoDbClient) -> Self {
        Self { db }
    }
}

fn write_error<E>(error: SdkError<E>, is_condition_failure: impl Fn(&E) -> bool) -> StoreError
where
    E: std::error::Error + 'static,
{
    match error.as_service_error() {
        Some(service_error) if is_condition_failure(service_error) => StoreError::ConditionFailed,
        _ => StoreError::Backend(DisplayErrorContext(&error).to_string()),
    }
}

fn read_error<E>(error: SdkError<E>) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::Backend(DisplayErrorContext(&error).to_string())
}

#[async_trait]
impl RecordStore for DynamoDbRecordStore {
    async fn put(&self, record: &Record, condition: WriteCondition) -> Result<(), StoreError> {
        let mut request = self
            .db
            .client()
            .put_item()
            .table_name(self.db.table_name())
            .set_item(Some(record_to_item(record)));

        if condition == WriteCondition::MustExist {
            request = request
                .condition_expression(EXISTS_CONDITION)
                .expression_attribute_names("#id", ID_ATTRIBUTE);
        }

        request
            .send()
            .await
            .map_err(|e| write_error(e, |se| se.is_conditional_check_failed_exception()))?;

        debug!(
            record_id = record.id.as_str(),
            table = self.db.table_name(),
            "Record saved"
        );

        Ok(())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let (key, value) = key_attribute(id);

        let output = self
            .db
            .client()
            .get_item()
            .table_name(self.db.table_name())
            .key(key, value)
            .consistent_read(true)
            .send()
            .await
            .map_err(read_error)?;

        Ok(output.item.map(|item| record_from_item(&item)))
    }

    async fn delete(&self, id: &RecordId, condition: WriteCondition) -> Result<(), StoreError> {
        let (key, value) = key_attribute(id);

        let mut request = self
            .db
            .client()
            .delete_item()
            .table_name(self.db.table_name())
            .key(key, value);

        if condition == WriteCondition::MustExist {
            request = request
                .condition_expression(EXISTS_CONDITION)
                .expression_attribute_names("#id", ID_ATTRIBUTE);
        }

        request
            .send()
            .await
            .map_err(|e| write_error(e, |se| se.is_conditional_check_failed_exception()))?;

        debug!(
            record_id = id.as_str(),
            table = self.db.table_name(),
            "Record deleted"
        );

        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Record>, StoreError> {
        let mut records = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        // 1MB 単位のページを LastEvaluatedKey がなくなるまで読み進める
        loop {
            let output = self
                .db
                .client()
                .scan()
                .table_name(self.db.table_name())
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(read_error)?;

            if let Some(items) = output.items {
                records.extend(items.iter().map(record_from_item));
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(
            count = records.len(),
            table = self.db.table_name(),
            "Table scanned"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_app_error() {
        assert!(matches!(
            AppError::from(StoreError::ConditionFailed),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Backend("timeout".to_string())),
            AppError::DynamoDb(message) if message == "timeout"
        ));
    }
}
