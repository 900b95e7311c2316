//! ローカルファイルのレコード取得と解析の統合テスト

use std::path::PathBuf;

use chrono::NaiveDate;
use date_reminder_domain::{
    notification::{EmailMessage, RenderedArtifacts},
    reminder::select_todays_events,
};
use date_reminder_infra::{
    InfraErrorKind,
    notification::{NoopNotificationSender, NotificationSender, build_mime_message, new_message_id},
    record_parser::parse_records,
    record_source::{LocalFileRecordSource, RecordSource},
};
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dates.csv")
}

#[tokio::test]
async fn test_ローカルファイルを取得して全行を解析できる() {
    // Arrange
    let source = LocalFileRecordSource::new(fixture_path());

    // Act
    let content = source.fetch().await.unwrap();
    let records = parse_records(&content).unwrap();

    // Assert
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].person_id.as_str(), "alex.smith");
    assert_eq!(records[0].display_name, None);
    assert_eq!(records[1].display_name.as_deref(), Some("Jane"));
    assert_eq!(
        records[3].date,
        NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()
    );
}

#[tokio::test]
async fn test_解析結果から当日のイベントを選択できる() {
    let content = LocalFileRecordSource::new(fixture_path())
        .fetch()
        .await
        .unwrap();
    let records = parse_records(&content).unwrap();

    let events = select_todays_events(records, NaiveDate::from_ymd_opt(2030, 3, 10).unwrap());

    let names: Vec<_> = events
        .iter()
        .map(|e| e.display_name_resolved.as_str())
        .collect();
    assert_eq!(names, vec!["Jane", "dave", "alex"]);
}

#[tokio::test]
async fn test_空ファイルは必須カラム不足になる() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let content = LocalFileRecordSource::new(file.path())
        .fetch()
        .await
        .unwrap();

    let err = parse_records(&content).unwrap_err();

    assert!(matches!(err.kind(), InfraErrorKind::MissingColumn(_)));
}

#[tokio::test]
async fn test_noop送信はmime組み立て可能なメールで配信idを返す() {
    let email = EmailMessage::reminder(
        "reminder@example.com",
        "me@example.com",
        NaiveDate::from_ymd_opt(2030, 3, 10).unwrap(),
        RenderedArtifacts {
            text: "Happy birthday, alex!".to_string(),
            html: "<p>Happy birthday, alex!</p>".to_string(),
        },
    );

    let message = build_mime_message(&email, &new_message_id()).unwrap();
    let message_id = NoopNotificationSender.send_email(&email).await.unwrap();

    let formatted = String::from_utf8(message.formatted()).unwrap();
    assert!(formatted.contains("Subject: Date Reminder - 03/10"));
    assert!(formatted.contains("multipart/alternative"));
    assert!(message_id.starts_with('<'));
}
