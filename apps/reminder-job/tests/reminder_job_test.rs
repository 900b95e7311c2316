//! リマインダージョブの統合テスト
//!
//! ローカル CSV から送信（モック）までを通しで実行する。

use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use date_reminder_domain::clock::FixedClock;
use date_reminder_infra::{
    artifact::ArtifactWriter,
    mock::{MockNotificationSender, MockRecordSource},
    record_source::LocalFileRecordSource,
};
use date_reminder_job::{
    error::JobError,
    usecase::{ReminderJob, RunOutcome, RunResult, TemplateRenderer},
};
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dates.csv")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn build_job(today: NaiveDate, sender: &MockNotificationSender) -> ReminderJob {
    ReminderJob::new(
        Arc::new(LocalFileRecordSource::new(fixture_path())),
        TemplateRenderer::new().unwrap(),
        Arc::new(sender.clone()),
        Arc::new(FixedClock::new(today)),
        "reminder@example.com",
        "me@example.com",
    )
}

#[tokio::test]
async fn test_run_当日のイベントを種別と日付の順に1通で送信する() {
    // Arrange
    let sender = MockNotificationSender::new();
    let job = build_job(date(2030, 3, 10), &sender);

    // Act
    let outcome = job.run().await.unwrap();

    // Assert
    assert_eq!(
        RunResult::from(outcome),
        RunResult {
            status_code: 200,
            body:        "Email sent successfully. MessageId is: mock-message-1".to_string(),
        }
    );

    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Date Reminder - 03/10");

    let text = &sent[0].text_body;
    let jane = text.find("Happy anniversary, Jane!").unwrap();
    let dave = text.find("Happy birthday, dave!").unwrap();
    let alex = text.find("Happy birthday, alex!").unwrap();
    assert!(jane < dave, "anniversary は birthday より前");
    assert!(dave < alex, "同じ種別では日付の昇順");
    assert!(!text.contains("Bobby"));
    assert!(!text.contains("Carol"));

    let html = &sent[0].html_body;
    assert!(html.contains("<strong>Jane</strong>"));
    assert!(html.contains("<strong>alex</strong>"));
}

#[tokio::test]
async fn test_run_うるう日のイベントはうるう年の2月29日だけ選ばれる() {
    let sender = MockNotificationSender::new();

    let leap = build_job(date(2028, 2, 29), &sender).run().await.unwrap();
    let non_leap = build_job(date(2027, 2, 28), &sender).run().await.unwrap();

    assert!(matches!(leap, RunOutcome::Sent { .. }));
    assert_eq!(non_leap, RunOutcome::NoMatchingRecords);

    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text_body.contains("Happy birthday, Carol!"));
}

#[tokio::test]
async fn test_run_一致なしなら送信もファイル出力もせずに成功結果を返す() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let sender = MockNotificationSender::new();
    let job = build_job(date(2030, 12, 25), &sender)
        .with_artifact_writer(ArtifactWriter::new(dir.path().join("out")));

    // Act
    let outcome = job.run().await.unwrap();

    // Assert
    assert_eq!(
        RunResult::from(outcome),
        RunResult {
            status_code: 200,
            body:        "No matching records found".to_string(),
        }
    );
    assert!(sender.sent_emails().is_empty());
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn test_run_開発モードではレンダリング結果をファイルに書き出す() {
    let dir = tempfile::tempdir().unwrap();
    let sender = MockNotificationSender::new();
    let job = build_job(date(2030, 3, 10), &sender)
        .with_artifact_writer(ArtifactWriter::new(dir.path().join("out")));

    job.run().await.unwrap();

    let sent = sender.sent_emails();
    let text = std::fs::read_to_string(dir.path().join("out/out.txt")).unwrap();
    let html = std::fs::read_to_string(dir.path().join("out/out.html")).unwrap();
    assert_eq!(text, sent[0].text_body);
    assert_eq!(html, sent[0].html_body);
}

#[tokio::test]
async fn test_run_ファイル出力なしではディレクトリを作らない() {
    let dir = tempfile::tempdir().unwrap();
    let sender = MockNotificationSender::new();
    let job = build_job(date(2030, 3, 10), &sender);

    job.run().await.unwrap();

    assert!(!dir.path().join("out").exists());
    assert_eq!(sender.sent_emails().len(), 1);
}

#[tokio::test]
async fn test_run_同じ日の再実行では同一の本文になる() {
    let sender = MockNotificationSender::new();

    build_job(date(2030, 3, 10), &sender).run().await.unwrap();
    build_job(date(2030, 3, 10), &sender).run().await.unwrap();

    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].text_body, sent[1].text_body);
    assert_eq!(sent[0].html_body, sent[1].html_body);
}

#[tokio::test]
async fn test_run_ソースファイルがなければsource_unavailable() {
    let sender = MockNotificationSender::new();
    let job = ReminderJob::new(
        Arc::new(LocalFileRecordSource::new("does/not/exist.csv")),
        TemplateRenderer::new().unwrap(),
        Arc::new(sender.clone()),
        Arc::new(FixedClock::new(date(2030, 3, 10))),
        "reminder@example.com",
        "me@example.com",
    );

    let err = job.run().await.unwrap_err();

    assert!(matches!(err, JobError::SourceUnavailable(_)));
    assert!(sender.sent_emails().is_empty());
}

#[tokio::test]
async fn test_run_必須カラムがなければparseエラー() {
    let sender = MockNotificationSender::new();
    let job = ReminderJob::new(
        Arc::new(MockRecordSource::new("person_id,display_name,date\nalex.smith,,1995-03-10\n")),
        TemplateRenderer::new().unwrap(),
        Arc::new(sender.clone()),
        Arc::new(FixedClock::new(date(2030, 3, 10))),
        "reminder@example.com",
        "me@example.com",
    );

    let err = job.run().await.unwrap_err();

    assert!(matches!(err, JobError::Parse(_)));
    assert!(sender.sent_emails().is_empty());
}

#[tokio::test]
async fn test_run_ヘッダーのみのcsvは一致なし() {
    let sender = MockNotificationSender::new();
    let job = ReminderJob::new(
        Arc::new(MockRecordSource::new("person_id,display_name,type,date\n")),
        TemplateRenderer::new().unwrap(),
        Arc::new(sender.clone()),
        Arc::new(FixedClock::new(date(2030, 3, 10))),
        "reminder@example.com",
        "me@example.com",
    );

    let outcome = job.run().await.unwrap();

    assert_eq!(outcome, RunOutcome::NoMatchingRecords);
}

#[tokio::test]
async fn test_run_テンプレートのレンダリングに失敗すればtemplateエラーで送信しない() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("reminder.txt"), "{{ unknown_field }}").unwrap();
    std::fs::write(dir.path().join("reminder.html"), "<p>{{ run_date }}</p>").unwrap();
    let sender = MockNotificationSender::new();
    let job = ReminderJob::new(
        Arc::new(LocalFileRecordSource::new(fixture_path())),
        TemplateRenderer::from_dir(dir.path()).unwrap(),
        Arc::new(sender.clone()),
        Arc::new(FixedClock::new(date(2030, 3, 10))),
        "reminder@example.com",
        "me@example.com",
    );

    let err = job.run().await.unwrap_err();

    assert!(matches!(err, JobError::Template(_)));
    assert!(sender.sent_emails().is_empty());
}

#[test]
fn test_from_dir_テンプレートが揃っていなければ起動時にエラー() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("reminder.txt"), "{{ run_date }}").unwrap();

    let result = TemplateRenderer::from_dir(dir.path());

    assert!(result.is_err());
}
