//! # テスト用モック
//!
//! ジョブのユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! date-reminder-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use date_reminder_domain::notification::{EmailMessage, NotificationError};

use crate::{InfraError, notification::NotificationSender, record_source::RecordSource};

// ===== MockRecordSource =====

/// 固定の内容を返すレコードソース
///
/// `failing()` で作成すると常に `SourceUnavailable` を返す。
#[derive(Clone)]
pub struct MockRecordSource {
    content:     Option<Vec<u8>>,
    fetch_count: Arc<AtomicUsize>,
}

impl MockRecordSource {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content:     Some(content.into()),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            content:     None,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch(&self) -> Result<Vec<u8>, InfraError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.content
            .clone()
            .ok_or_else(|| InfraError::source_unavailable("mock: NoSuchKey"))
    }

    fn describe(&self) -> String {
        "mock://records".to_string()
    }
}

// ===== MockNotificationSender =====

/// 送信したメールを記録するメール送信モック
///
/// `failing()` で作成すると常に `SendFailed` を返す（送信記録は残さない）。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failing: bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            failing: true,
        }
    }

    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<String, NotificationError> {
        if self.failing {
            return Err(NotificationError::SendFailed("mock: 送信失敗".to_string()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(format!("mock-message-{}", sent.len()))
    }
}
