//! SES 通知送信実装
//!
//! AWS SES v2 API の Raw コンテンツとして MIME メッセージを送信する。
//! 本番環境で使用する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    error::DisplayErrorContext,
    primitives::Blob,
    types::{EmailContent, RawMessage},
};
use date_reminder_domain::notification::{EmailMessage, NotificationError};

use super::{NotificationSender, build_mime_message, new_message_id};

/// SES 通知送信
///
/// `aws_sdk_sesv2::Client` をラップする。
/// 送信元アドレスは SES で検証済みであること。
pub struct SesNotificationSender {
    client: Client,
}

impl SesNotificationSender {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationSender for SesNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<String, NotificationError> {
        let message = build_mime_message(email, &new_message_id())?;

        let raw = RawMessage::builder()
            .data(Blob::new(message.formatted()))
            .build()
            .map_err(|e| NotificationError::SendFailed(format!("Raw メッセージ構築失敗: {e}")))?;

        let output = self
            .client
            .send_email()
            .content(EmailContent::builder().raw(raw).build())
            .send()
            .await
            .map_err(|e| {
                NotificationError::SendFailed(format!("SES 送信失敗: {}", DisplayErrorContext(&e)))
            })?;

        tracing::debug!(?output, "SES レスポンス");

        output
            .message_id()
            .map(str::to_string)
            .ok_or_else(|| NotificationError::SendFailed("SES レスポンスに MessageId がありません".to_string()))
    }
}
