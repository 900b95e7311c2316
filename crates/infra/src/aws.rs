//! # AWS クライアント生成
//!
//! S3（レコードソース）と SES v2（メール送信）のクライアントを作成する。
//!
//! 認証情報とリージョンは SDK のデフォルトチェーンで解決する:
//! - ローカル: 環境変数 `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_REGION`（`.env` で設定）
//! - 本番: 実行ロール
//!
//! リージョンが解決できない場合は `us-east-1` を使う。

use aws_config::{BehaviorVersion, Region, SdkConfig, meta::region::RegionProviderChain};

const FALLBACK_REGION: &str = "us-east-1";

/// AWS SDK 共通設定を読み込む
pub async fn load_sdk_config() -> SdkConfig {
    let region = RegionProviderChain::default_provider().or_else(Region::new(FALLBACK_REGION));

    aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await
}

/// S3 クライアントを作成する
///
/// `endpoint` が `Some` の場合は MinIO 等のカスタムエンドポイントに接続する。
/// `None` の場合は AWS S3 のデフォルトエンドポイントを使用する。
pub fn s3_client(config: &SdkConfig, endpoint: Option<&str>) -> aws_sdk_s3::Client {
    let builder = aws_sdk_s3::config::Builder::from(config);

    // MinIO はパススタイルが必要（バーチャルホスト型 URL を使わない）
    let s3_config = match endpoint {
        Some(endpoint_url) => builder
            .endpoint_url(endpoint_url)
            .force_path_style(true)
            .build(),
        None => builder.build(),
    };

    aws_sdk_s3::Client::from_conf(s3_config)
}

/// SES v2 クライアントを作成する
pub fn ses_client(config: &SdkConfig) -> aws_sdk_sesv2::Client {
    aws_sdk_sesv2::Client::new(config)
}
