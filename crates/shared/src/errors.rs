use domain::DomainError;
use thiserror::Error;

/// アプリケーション全体で使用されるエラー型
#[derive(Debug, Clone, Error)]
pub enum AppError {
    // ドメインエラー（入力不正）
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // インフラストラクチャエラー
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),

    // システムエラー
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// エラーの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Error,
    Critical,
}

impl AppError {
    /// エラーコード
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DynamoDb(_) => "DYNAMODB_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Domain(_) | AppError::NotFound(_) => ErrorSeverity::Info,
            AppError::DynamoDb(_) => ErrorSeverity::Error,
            AppError::Configuration(_) => ErrorSeverity::Critical,
        }
    }

    /// HTTPステータスコードを取得
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Domain(_) => 400,
            AppError::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// クライアントに返すメッセージ（400 のみ）
    ///
    /// 404 / 500 はボディを空で返すため `None`。
    pub fn client_message(&self) -> Option<String> {
        match self {
            AppError::Domain(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// 重要度に応じたレベルでエラーをログに記録
    pub fn log(&self, request_id: &str) {
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(
                    error = %self,
                    code = self.code(),
                    request_id = %request_id,
                    "Request failed"
                );
            }
            ErrorSeverity::Info => {
                tracing::info!(
                    error = %self,
                    code = self.code(),
                    request_id = %request_id,
                    "Request rejected"
                );
            }
        }
    }
}
