use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use domain::{Record, RecordId, Validator};
use infrastructure::{RecordStore, WriteCondition};
use shared::{ApiResponse, AppError, RecordKind};
use std::collections::HashMap;
use tracing::{info, instrument};

use crate::guard::ensure_exists;

/// 作成・更新・削除を受け持つハンドラー
///
/// レコード種別（todo / task）ごとの違いはパスパラメータ名のみ。
pub struct CommandHandler<S> {
    store: S,
    id_param: &'static str,
    responses: ApiResponse,
}

impl<S: RecordStore> CommandHandler<S> {
    pub fn new(store: S, kind: RecordKind) -> Self {
        Self {
            store,
            id_param: kind.id_param(),
            responses: ApiResponse::default(),
        }
    }

    #[cfg(test)]
    pub fn with_responses(mut self, responses: ApiResponse) -> Self {
        self.responses = responses;
        self
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self, request), fields(method = %request.http_method))]
    pub async fn handle_request(
        &self,
        request: &ApiGatewayProxyRequest,
        request_id: &str,
    ) -> ApiGatewayProxyResponse {
        let body = request.body.as_deref();
        let path_parameters = &request.path_parameters;

        let result = match request.http_method.as_str() {
            "OPTIONS" => return self.responses.ok_empty(),
            "POST" => self.create(body).await.map(|r| self.responses.ok(&r)),
            "PUT" => self
                .update(body, path_parameters)
                .await
                .map(|r| self.responses.ok(&r)),
            "DELETE" => self
                .delete(path_parameters)
                .await
                .map(|()| self.responses.ok_empty()),
            _ => return self.responses.method_not_allowed(),
        };

        result.unwrap_or_else(|error| {
            error.log(request_id);
            self.responses.error(&error)
        })
    }

    /// 検証 → 採番 → 無条件 put
    pub async fn create(&self, body: Option<&str>) -> Result<Record, AppError> {
        let draft = Validator::validate_create(body)?;
        let record = Record::create(draft);

        self.store.put(&record, WriteCondition::None).await?;

        info!(record_id = record.id.as_str(), "Record created");
        Ok(record)
    }

    /// 検証 → 存在確認 → 全フィールド置き換え
    pub async fn update(
        &self,
        body: Option<&str>,
        path_parameters: &HashMap<String, String>,
    ) -> Result<Record, AppError> {
        let (id, draft) = Validator::validate_update(body, path_parameters, self.id_param)?;
        ensure_exists(&self.store, &id).await?;

        let record = Record::replace(id, draft);
        self.store.put(&record, WriteCondition::MustExist).await?;

        info!(record_id = record.id.as_str(), "Record replaced");
        Ok(record)
    }

    /// 検証 → 存在確認 → 削除
    pub async fn delete(&self, path_parameters: &HashMap<String, String>) -> Result<(), AppError> {
        let id: RecordId = Validator::validate_delete(path_parameters, self.id_param)?;
        ensure_exists(&self.store, &id).await?;

        self.store.delete(&id, WriteCondition::MustExist).await?;

        info!(record_id = id.as_str(), "Record deleted");
        Ok(())
    }
}
