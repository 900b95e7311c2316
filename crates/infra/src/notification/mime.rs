//! MIME メッセージの組み立て
//!
//! プレーンテキストと HTML を代替表現として持つ multipart/alternative を
//! lettre で組み立てる。

use date_reminder_domain::notification::{EmailMessage, NotificationError};
use lettre::message::{Message, MultiPart, SinglePart, header::ContentType};
use uuid::Uuid;

const MESSAGE_ID_DOMAIN: &str = "date-reminder";

/// `Message-ID` ヘッダー値を生成する
pub fn new_message_id() -> String {
    format!("<{}@{MESSAGE_ID_DOMAIN}>", Uuid::new_v4())
}

/// メールメッセージから MIME メッセージを組み立てる
pub fn build_mime_message(email: &EmailMessage, message_id: &str) -> Result<Message, NotificationError> {
    Message::builder()
        .from(
            email
                .from
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?,
        )
        .to(email
            .to
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
        .subject(&email.subject)
        .message_id(Some(message_id.to_string()))
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body.clone()),
                ),
        )
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
}
