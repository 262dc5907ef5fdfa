//! rental-server-common: rental サービス群で共有するサーバー基盤。
//!
//! `RENTAL_{SERVICE}_{ERROR}` 形式の構造化エラーコード、統一エラーレスポンス、
//! axum 連携、YAML 設定読み込み、グレースフルシャットダウンを提供する。

pub mod error;

#[cfg(feature = "config-loader")]
pub mod config;

#[cfg(feature = "health")]
pub mod health;

#[cfg(feature = "shutdown")]
pub mod shutdown;

pub use error::{ErrorBody, ErrorCode, ErrorDetail, ErrorResponse, ServiceError};
