use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 未設定時のフィルタ
const DEFAULT_FILTER: &str = "info";

/// ハンドラー共通のロガーを初期化
///
/// 1 行 1 イベントの JSON で標準出力へ書き出す（Lambda では CloudWatch Logs に届く）。
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().with_target(false))
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_initialization_is_reported_as_error() {
        // 1 プロセスに登録できるグローバルサブスクライバーは 1 つだけ
        let _ = init_tracing();

        assert!(init_tracing().is_err());
    }
}
