//! # レンダリング結果のファイル出力
//!
//! 開発モードでプレーンテキスト本文と HTML 本文を `out.txt` / `out.html` に書き出す。
//! 出力は確認用であり、送信処理はこの結果に依存しない。

use std::path::{Path, PathBuf};

use date_reminder_domain::notification::RenderedArtifacts;

use crate::InfraError;

const TEXT_FILE_NAME: &str = "out.txt";
const HTML_FILE_NAME: &str = "out.html";

/// 書き出したファイルのパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub text: PathBuf,
    pub html: PathBuf,
}

/// レンダリング結果のファイル出力
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 両方の本文を書き出す
    ///
    /// 出力ディレクトリが存在しなければ作成する。既存ファイルは上書きする。
    pub async fn write(&self, artifacts: &RenderedArtifacts) -> Result<ArtifactPaths, InfraError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let paths = ArtifactPaths {
            text: self.output_dir.join(TEXT_FILE_NAME),
            html: self.output_dir.join(HTML_FILE_NAME),
        };

        tokio::fs::write(&paths.text, &artifacts.text).await?;
        tokio::fs::write(&paths.html, &artifacts.html).await?;

        tracing::debug!(
            text = %paths.text.display(),
            html = %paths.html.display(),
            "レンダリング結果を書き出しました"
        );

        Ok(paths)
    }
}
