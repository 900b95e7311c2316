//! # リマインダージョブ設定
//!
//! 環境変数からジョブの設定を読み込む。
//!
//! 実行モード（開発 / 本番）はレコードの取得先とファイル出力の有無の両方を決めるが、
//! 各処理で環境変数を都度参照せず、起動時に一度だけ [`ReminderConfig`] に解決する。

use std::{env, path::PathBuf, str::FromStr};

use date_reminder_infra::record_source::S3ObjectRef;
use lettre::message::Mailbox;
use thiserror::Error;

const DEFAULT_SOURCE_PATH: &str = "data/dates.csv";
const DEFAULT_OUTPUT_DIR: &str = "out";
const DEFAULT_SMTP_HOST: &str = "localhost";
const DEFAULT_SMTP_PORT: u16 = 1025;

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定（または空）
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{name} の値が不正です（{value:?}）: {reason}")]
    Invalid {
        name:   &'static str,
        value:  String,
        reason: String,
    },
}

/// 実行モード
///
/// `DR_PROD` が 0 以外なら本番。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// ローカルファイルから読み込み、レンダリング結果をファイルにも書き出す
    Development,
    /// S3 から読み込み、ファイル出力は行わない
    Production,
}

/// レコードの取得先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLocation {
    Local(PathBuf),
    S3(S3ObjectRef),
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationBackend {
    /// Amazon SES v2（Raw 送信）
    Ses,
    /// SMTP（Mailpit 等）
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知機能の設定
///
/// `DR_NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `ses`: Amazon SES v2 経由で送信（デフォルト）
/// - `smtp`: Mailpit（開発）/ SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub backend:   NotificationBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host: String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port: u16,
}

/// リマインダージョブの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    /// 送信元メールアドレス（`Name <addr>` 形式も可、起動時に検証済み）
    pub sender:          String,
    /// 送信先メールアドレス（起動時に検証済み）
    pub recipient:       String,
    pub mode:            RunMode,
    pub source:          RecordLocation,
    /// レンダリング結果の出力先（開発モードのみ使用）
    pub output_dir:      PathBuf,
    /// 埋め込みテンプレートを置き換えるディレクトリ
    pub template_dir:    Option<PathBuf>,
    /// S3 エンドポイント URL（MinIO 使用時に設定、未設定で AWS S3 デフォルト）
    pub s3_endpoint_url: Option<String>,
    pub notification:    NotificationConfig,
}

impl ReminderConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列の値は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let sender = require("DR_SENDER")?;
        validate_mailbox("DR_SENDER", &sender)?;
        let recipient = require("DR_RECIPIENT")?;
        validate_mailbox("DR_RECIPIENT", &recipient)?;

        let mode = match get("DR_PROD") {
            Some(value) => parse_mode_flag(&value)?,
            None => RunMode::Development,
        };

        let source = match mode {
            RunMode::Production => {
                let uri = require("DR_S3_PATH")?;
                let object = S3ObjectRef::parse(&uri).map_err(|e| ConfigError::Invalid {
                    name:   "DR_S3_PATH",
                    value:  uri.clone(),
                    reason: e.to_string(),
                })?;
                RecordLocation::S3(object)
            }
            RunMode::Development => RecordLocation::Local(PathBuf::from(
                get("DR_SOURCE_PATH").unwrap_or_else(|| DEFAULT_SOURCE_PATH.to_string()),
            )),
        };

        let backend = match get("DR_NOTIFICATION_BACKEND") {
            Some(value) => parse_value("DR_NOTIFICATION_BACKEND", &value)?,
            None => NotificationBackend::Ses,
        };
        let smtp_port = match get("DR_SMTP_PORT") {
            Some(value) => parse_value("DR_SMTP_PORT", &value)?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            sender,
            recipient,
            mode,
            source,
            output_dir: PathBuf::from(
                get("DR_OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ),
            template_dir: get("DR_TEMPLATE_DIR").map(PathBuf::from),
            s3_endpoint_url: get("S3_ENDPOINT_URL"),
            notification: NotificationConfig {
                backend,
                smtp_host: get("DR_SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                smtp_port,
            },
        })
    }

    /// レンダリング結果をファイルに書き出すかどうか
    pub fn writes_artifacts(&self) -> bool {
        self.mode == RunMode::Development
    }
}

/// メール送信時と同じ規則でアドレスを検証する
fn validate_mailbox(name: &'static str, value: &str) -> Result<(), ConfigError> {
    parse_value::<Mailbox>(name, value).map(|_| ())
}

/// `DR_PROD` の値を解釈する（整数で 0 以外なら本番）
fn parse_mode_flag(value: &str) -> Result<RunMode, ConfigError> {
    let flag: i64 = parse_value("DR_PROD", value)?;
    Ok(if flag == 0 {
        RunMode::Development
    } else {
        RunMode::Production
    })
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
