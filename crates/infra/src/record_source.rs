//! # レコードソース
//!
//! イベント表（CSV）の生バイト列を取得するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `RecordSource` trait で取得先を抽象化
//! - **2 つの実装**: ローカルファイル（開発用）、S3 オブジェクト（本番用）
//! - **リトライなし**: 取得は 1 回のみ。失敗は実行全体の失敗とする

mod local;
mod s3;

use async_trait::async_trait;
pub use local::LocalFileRecordSource;
pub use s3::{S3ObjectRef, S3RecordSource};

use crate::InfraError;

/// レコードソーストレイト
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// ソース表の生バイト列を取得する
    ///
    /// # エラー
    ///
    /// 取得に失敗した場合は `InfraErrorKind::SourceUnavailable` を返す。
    async fn fetch(&self) -> Result<Vec<u8>, InfraError>;

    /// ログ出力用の取得先表記
    fn describe(&self) -> String;
}
