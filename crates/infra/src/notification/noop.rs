//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! ドライランやメール送信先を持たない環境で使用する。

use async_trait::async_trait;
use date_reminder_domain::notification::{EmailMessage, NotificationError};

use super::{NotificationSender, new_message_id};

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<String, NotificationError> {
        let message_id = new_message_id();
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            %message_id,
            "Noop: メール送信をスキップ"
        );
        Ok(message_id)
    }
}
