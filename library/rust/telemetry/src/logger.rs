//! 構造化ログユーティリティ。
//! tracing クレートを使用し、JSON またはテキスト形式の構造化ログを出力する。
//!
//! # 使用例
//!
//! ```ignore
//! use tracing::{info, warn, error};
//!
//! info!(service = "rental-property-server", "Request completed");
//! warn!(method = "POST", path = "/api/v1/properties", "Slow request detected");
//! error!(error = %e, "Failed to process request");
//! ```

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// filter_directive は環境名から既定のログレベルを返す。
///
/// - dev: debug
/// - staging: info
/// - prod: warn
pub fn filter_directive(env: &str) -> &'static str {
    match env {
        "dev" => "debug",
        "staging" => "info",
        _ => "warn",
    }
}

/// init_logger は環境に応じたログレベルで tracing-subscriber を初期化する。
/// format が "text" の場合はプレーンテキスト出力、それ以外は JSON 出力。
pub fn init_logger(env: &str, format: &str) -> Result<(), TryInitError> {
    try_init(filter_directive(env), format)
}

/// `RUST_LOG` が設定されていればそれを優先し、なければ directive を使う。
pub(crate) fn try_init(directive: &str, format: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "text" {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init()
    }
}
