pub mod logger;

pub use logger::{filter_directive, init_logger};

/// TelemetryConfig は telemetry ライブラリの初期化設定を保持する。
pub struct TelemetryConfig {
    pub service_name: String,
    pub version: String,
    pub environment: String,
    /// 空文字列の場合は environment から既定レベルを決定する。
    pub log_level: String,
    /// ログ出力フォーマット。"text" の場合はプレーンテキスト、それ以外は JSON。
    pub log_format: String,
}

/// init_telemetry は tracing-subscriber を初期化し、起動ログを出力する。
/// 既にグローバルサブスクライバーが設定されている場合はエラーを返す。
pub fn init_telemetry(cfg: &TelemetryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let directive = if cfg.log_level.is_empty() {
        filter_directive(&cfg.environment).to_string()
    } else {
        cfg.log_level.clone()
    };
    logger::try_init(&directive, &cfg.log_format)?;

    tracing::info!(
        service = %cfg.service_name,
        version = %cfg.version,
        environment = %cfg.environment,
        "telemetry initialized"
    );
    Ok(())
}
