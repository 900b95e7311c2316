//! # 通知送信
//!
//! リマインダーメールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SES（本番用）、SMTP（Mailpit 開発用）、Noop（ドライラン用）
//! - **MIME 組み立ての共通化**: SES の Raw 送信と SMTP は同じ multipart/alternative を送る
//! - **リトライなし**: 送信失敗はそのまま実行全体の失敗とする

mod mime;
mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
use date_reminder_domain::notification::{EmailMessage, NotificationError};
pub use mime::{build_mime_message, new_message_id};
pub use noop::NoopNotificationSender;
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信し、配信 ID を返す
    ///
    /// 配信 ID は SES の場合 `MessageId`、それ以外は生成した `Message-ID` ヘッダー値。
    async fn send_email(&self, email: &EmailMessage) -> Result<String, NotificationError>;
}
