//! # 通知
//!
//! リマインダーメールに関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **2 形式の本文**: プレーンテキストと HTML を常にセットで扱う
//! - **テンプレート分離**: 本文の生成（TemplateRenderer）は job クレート側に置く
//! - **送信は 1 通のみ**: 宛先は設定された 1 アドレス

use chrono::NaiveDate;
use thiserror::Error;

/// 通知エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// レンダリング済みの本文
///
/// 同じイベント列とテンプレートからは常にバイト単位で同一の内容が得られる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    /// プレーンテキスト本文
    pub text: String,
    /// HTML 本文
    pub html: String,
}

/// メールメッセージ
///
/// NotificationSender に渡される送信単位。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信元メールアドレス
    pub from:      String,
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
    /// HTML 本文
    pub html_body: String,
}

impl EmailMessage {
    /// レンダリング結果からリマインダーメールを組み立てる
    pub fn reminder(
        from: impl Into<String>,
        to: impl Into<String>,
        run_date: NaiveDate,
        artifacts: RenderedArtifacts,
    ) -> Self {
        Self {
            from:      from.into(),
            to:        to.into(),
            subject:   reminder_subject(run_date),
            text_body: artifacts.text,
            html_body: artifacts.html,
        }
    }
}

/// 件名を生成する（`Date Reminder - MM/DD`）
pub fn reminder_subject(run_date: NaiveDate) -> String {
    format!("Date Reminder - {}", run_date.format("%m/%d"))
}
