//! S3 オブジェクトのレコードソース
//!
//! 本番環境で `s3://<bucket>/<key>` 形式の URI が指すオブジェクトを
//! GetObject で取得し、メモリ上に読み込む。

use async_trait::async_trait;
use aws_sdk_s3::{Client, error::DisplayErrorContext};
use percent_encoding::percent_decode_str;
use url::Url;

use super::RecordSource;
use crate::InfraError;

/// S3 オブジェクトの参照（バケット名 + キー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3ObjectRef {
    pub bucket: String,
    pub key:    String,
}

impl S3ObjectRef {
    /// `s3://<bucket>/<key>` 形式の URI をパースする
    ///
    /// ホスト部分をバケット名、先頭の `/` を除いたパス部分をキーとする。
    /// `url` はパス中の空白や非 ASCII 文字をパーセントエンコードするため、
    /// キーはデコードして URI に書かれたとおりの文字列に戻す。
    ///
    /// # エラー
    ///
    /// スキームが `s3` でない、バケット名またはキーが空、キーが UTF-8 に
    /// デコードできない場合は `InfraErrorKind::InvalidInput` を返す。
    pub fn parse(uri: &str) -> Result<Self, InfraError> {
        let url = Url::parse(uri)
            .map_err(|e| InfraError::invalid_input(format!("S3 URI '{uri}' を解釈できません: {e}")))?;

        if url.scheme() != "s3" {
            return Err(InfraError::invalid_input(format!(
                "S3 URI のスキームは s3 である必要があります: '{uri}'"
            )));
        }

        let bucket = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| InfraError::invalid_input(format!("S3 URI にバケット名がありません: '{uri}'")))?;

        let key = percent_decode_str(url.path().trim_start_matches('/'))
            .decode_utf8()
            .map_err(|e| InfraError::invalid_input(format!("S3 URI のキーが UTF-8 ではありません: '{uri}': {e}")))?;
        if key.is_empty() {
            return Err(InfraError::invalid_input(format!(
                "S3 URI にオブジェクトキーがありません: '{uri}'"
            )));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key:    key.into_owned(),
        })
    }
}

/// S3 オブジェクトのレコードソース
pub struct S3RecordSource {
    client: Client,
    object: S3ObjectRef,
}

impl S3RecordSource {
    pub fn new(client: Client, object: S3ObjectRef) -> Self {
        Self { client, object }
    }
}

#[async_trait]
impl RecordSource for S3RecordSource {
    async fn fetch(&self) -> Result<Vec<u8>, InfraError> {
        let S3ObjectRef { bucket, key } = &self.object;
        tracing::info!(%bucket, %key, "バケット '{bucket}' のファイル '{key}' を使用します");

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%bucket, %key, "ファイル '{key}' のダウンロードに失敗");
                InfraError::source_unavailable(format!(
                    "GetObject s3://{bucket}/{key} に失敗: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let body = output.body.collect().await.map_err(|e| {
            tracing::error!(%bucket, %key, "ファイル '{key}' の読み込みに失敗");
            InfraError::source_unavailable(format!(
                "s3://{bucket}/{key} の本文の読み込みに失敗: {e}"
            ))
        })?;

        Ok(body.into_bytes().to_vec())
    }

    fn describe(&self) -> String {
        format!("s3://{}/{}", self.object.bucket, self.object.key)
    }
}
