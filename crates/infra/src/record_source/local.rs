//! ローカルファイルのレコードソース
//!
//! 開発環境でリポジトリ内の CSV を読み込む。

use std::path::PathBuf;

use async_trait::async_trait;

use super::RecordSource;
use crate::InfraError;

/// ローカルファイルのレコードソース
#[derive(Debug, Clone)]
pub struct LocalFileRecordSource {
    path: PathBuf,
}

impl LocalFileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for LocalFileRecordSource {
    async fn fetch(&self) -> Result<Vec<u8>, InfraError> {
        tracing::debug!(path = %self.path.display(), "ローカルファイルを読み込みます");

        tokio::fs::read(&self.path).await.map_err(|e| {
            InfraError::source_unavailable(format!(
                "ファイル '{}' を読み込めません: {e}",
                self.path.display()
            ))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
