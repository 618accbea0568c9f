use domain::{Record, RecordId};
use infrastructure::RecordStore;
use shared::AppError;
use tracing::info;

/// 更新・削除の前に対象レコードの存在を確認する
///
/// 確認と書き込みは原子的ではないため、書き込み側でも
/// `WriteCondition::MustExist` を指定すること。
pub async fn ensure_exists<S>(store: &S, id: &RecordId) -> Result<Record, AppError>
where
    S: RecordStore + ?Sized,
{
    match store.get(id).await? {
        Some(record) => Ok(record),
        None => {
            info!(record_id = id.as_str(), "Target record not found");
            Err(AppError::NotFound(format!("record {id}")))
        }
    }
}
