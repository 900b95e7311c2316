//! # Date Reminder インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **レコードソース**: ローカルファイル / S3 からのイベント表の取得
//! - **レコードパーサー**: CSV からイベントレコードへの変換
//! - **通知送信**: SES / SMTP / Noop によるメール送信
//! - **ファイル出力**: 開発モードでのレンダリング結果の書き出し
//!
//! ## 依存関係
//!
//! ```text
//! job → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`aws`] - AWS SDK クライアント生成
//! - [`artifact`] - レンダリング結果のファイル出力
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信
//! - [`record_parser`] - CSV パーサー
//! - [`record_source`] - レコードソース

pub mod artifact;
pub mod aws;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod record_parser;
pub mod record_source;

pub use error::{InfraError, InfraErrorKind};
