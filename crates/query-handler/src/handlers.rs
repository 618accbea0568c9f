use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use domain::Record;
use infrastructure::RecordStore;
use shared::{ApiResponse, AppError};
use tracing::{info, instrument};

/// 一覧取得を受け持つハンドラー
pub struct QueryHandler<S> {
    store: S,
    responses: ApiResponse,
}

impl<S: RecordStore> QueryHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            responses: ApiResponse::default(),
        }
    }

    #[instrument(skip(self, request), fields(method = %request.http_method))]
    pub async fn handle_request(
        &self,
        request: &ApiGatewayProxyRequest,
        request_id: &str,
    ) -> ApiGatewayProxyResponse {
        match request.http_method.as_str() {
            "GET" => match self.retrieve().await {
                Ok(records) => self.responses.ok(&records),
                Err(e) => {
                    e.log(request_id);
                    self.responses.error(&e)
                }
            },
            "OPTIONS" => self.responses.ok_empty(),
            _ => self.responses.method_not_allowed(),
        }
    }

    /// テーブル全件（順不同）
    pub async fn retrieve(&self) -> Result<Vec<Record>, AppError> {
        let records = self.store.scan().await?;

        info!(count = records.len(), "Records retrieved");
        Ok(records)
    }
}
