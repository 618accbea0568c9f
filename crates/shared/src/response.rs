use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use serde::Serialize;

use crate::errors::AppError;

/// ステータスコードとシリアライズ済みボディからレスポンスを組み立てる関数
pub type ResponseBuilder = fn(u16, String) -> ApiGatewayProxyResponse;

pub const ALLOWED_HEADERS: &str = "Content-Type";
pub const ALLOWED_ORIGIN: &str = "*";
pub const ALLOWED_METHODS: &str = "OPTIONS,POST,GET,PUT,DELETE";

/// CORS ヘッダーを常に付与するレスポンスビルダー
///
/// ボディは呼び出し側でシリアライズ済みの文字列をそのまま設定する。
pub fn cors_response(status_code: u16, body: String) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOWED_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );

    ApiGatewayProxyResponse {
        status_code: i64::from(status_code),
        headers,
        multi_value_headers: HeaderMap::new(),
        body: Some(Body::Text(body)),
        is_base64_encoded: false,
    }
}

/// ハンドラー共通のレスポンス整形
///
/// 400 は `{"message": ...}` の JSON、404 / 500 は空ボディで返す。
#[derive(Clone, Copy)]
pub struct ApiResponse {
    build: ResponseBuilder,
}

impl Default for ApiResponse {
    fn default() -> Self {
        Self::new(cors_response)
    }
}

impl ApiResponse {
    pub fn new(build: ResponseBuilder) -> Self {
        Self { build }
    }

    pub fn raw(&self, status_code: u16, body: String) -> ApiGatewayProxyResponse {
        (self.build)(status_code, body)
    }

    pub fn ok<T: Serialize>(&self, data: &T) -> ApiGatewayProxyResponse {
        match serde_json::to_string(data) {
            Ok(body) => self.raw(200, body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                self.internal_server_error()
            }
        }
    }

    pub fn ok_empty(&self) -> ApiGatewayProxyResponse {
        self.raw(200, String::new())
    }

    pub fn bad_request(&self, message: &str) -> ApiGatewayProxyResponse {
        let body = serde_json::json!({ "message": message });
        self.raw(400, body.to_string())
    }

    pub fn method_not_allowed(&self) -> ApiGatewayProxyResponse {
        self.bad_request("Method not allowed.")
    }

    pub fn not_found(&self) -> ApiGatewayProxyResponse {
        self.raw(404, String::new())
    }

    pub fn internal_server_error(&self) -> ApiGatewayProxyResponse {
        self.raw(500, String::new())
    }

    /// AppError をステータスコードとボディに変換
    pub fn error(&self, error: &AppError) -> ApiGatewayProxyResponse {
        match error.client_message() {
            Some(message) => self.bad_request(&message),
            None => self.raw(error.http_status_code(), String::new()),
        }
    }
}
