//! # リマインダージョブのエラー定義
//!
//! ジョブの失敗を 5 種類に分類する。
//! いずれの失敗でもメールは送信されない（送信自体の失敗を除く）。

use date_reminder_domain::notification::NotificationError;
use date_reminder_infra::InfraError;
use date_reminder_shared::event_log::error::{category, kind};
use thiserror::Error;

use crate::config::ConfigError;

/// リマインダージョブで発生するエラー
#[derive(Debug, Error)]
pub enum JobError {
    /// 必須の設定がない、または値が不正
    #[error("設定エラー: {0}")]
    Configuration(#[from] ConfigError),

    /// レコードソースを取得できない
    #[error("{0}")]
    SourceUnavailable(#[source] InfraError),

    /// CSV の内容が不正
    #[error("レコードの解析に失敗: {0}")]
    Parse(#[source] InfraError),

    /// テンプレートの読み込み・レンダリングに失敗
    #[error("{0}")]
    Template(#[source] NotificationError),

    /// メール送信に失敗
    #[error("{0}")]
    Dispatch(#[source] NotificationError),
}

impl From<InfraError> for JobError {
    fn from(err: InfraError) -> Self {
        if err.is_parse_error() {
            Self::Parse(err)
        } else {
            Self::SourceUnavailable(err)
        }
    }
}

impl JobError {
    /// ログの `error.category` フィールド値
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => category::CONFIGURATION,
            Self::SourceUnavailable(_) => category::INFRASTRUCTURE,
            Self::Parse(_) => category::INPUT_DATA,
            Self::Template(_) => category::CONFIGURATION,
            Self::Dispatch(_) => category::EXTERNAL_SERVICE,
        }
    }

    /// ログの `error.kind` フィールド値
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => kind::CONFIGURATION,
            Self::SourceUnavailable(_) => kind::SOURCE_UNAVAILABLE,
            Self::Parse(_) => kind::PARSE,
            Self::Template(_) => kind::TEMPLATE,
            Self::Dispatch(_) => kind::DISPATCH,
        }
    }
}
