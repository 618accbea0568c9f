use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use infrastructure::{DynamoDbClient, DynamoDbRecordStore};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::{init_tracing, ApiResponse, Config};
use tracing::{error, info};

use command_handler::CommandHandler;

async fn function_handler(
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, context) = event.into_parts();

    info!(
        method = %request.http_method,
        path = ?request.path,
        request_id = %context.request_id,
        "Processing command request"
    );

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, request_id = %context.request_id, "Invalid configuration");
            return Ok(ApiResponse::default().error(&e));
        }
    };

    // 呼び出しごとにクライアントを生成する
    let db = DynamoDbClient::new(&config).await;
    let handler = CommandHandler::new(DynamoDbRecordStore::new(db), config.record_kind);

    let response = handler.handle_request(&request, &context.request_id).await;

    info!(
        status_code = response.status_code,
        request_id = %context.request_id,
        environment = %config.environment,
        table = %config.table_name,
        "Command processed"
    );

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {e}");
    }

    info!("Record Command Handler starting...");

    run(service_fn(function_handler)).await
}
