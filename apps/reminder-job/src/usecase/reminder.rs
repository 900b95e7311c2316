//! # リマインダージョブ
//!
//! 取得 → 解析 → 選択 → レンダリング → 出力 → 送信 の 1 回分の実行を統合する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: レコードソース、送信、時計は trait で抽象化し `Arc<dyn Trait>` で受け取る
//! - **一致なしは成功**: 当日のイベントがなければメールを送らずに正常終了する
//! - **ファイル出力は補助**: 開発モードの書き出しに失敗しても送信は続行する
//! - **1 実行 1 スパン**: すべてのログは `reminder_run` スパン配下に出力される

use std::sync::Arc;

use chrono::NaiveDate;
use date_reminder_domain::{clock::Clock, notification::EmailMessage, reminder};
use date_reminder_infra::{
    artifact::ArtifactWriter,
    notification::NotificationSender,
    record_parser,
    record_source::RecordSource,
};
use date_reminder_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};
use serde::Serialize;
use tracing::Instrument;

use super::TemplateRenderer;
use crate::error::JobError;

/// 1 回の実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 当日に該当するイベントがなく、メールは送信していない
    NoMatchingRecords,
    /// メールを送信した
    Sent { message_id: String },
}

/// 呼び出し元に返す実行結果
///
/// スケジューラ（Lambda 等）が解釈できるよう JSON で出力する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub status_code: u16,
    pub body:        String,
}

impl From<RunOutcome> for RunResult {
    fn from(outcome: RunOutcome) -> Self {
        let body = match outcome {
            RunOutcome::NoMatchingRecords => "No matching records found".to_string(),
            RunOutcome::Sent { message_id } => {
                format!("Email sent successfully. MessageId is: {message_id}")
            }
        };
        Self {
            status_code: 200,
            body,
        }
    }
}

/// リマインダージョブ
pub struct ReminderJob {
    source:          Arc<dyn RecordSource>,
    renderer:        TemplateRenderer,
    sender:          Arc<dyn NotificationSender>,
    clock:           Arc<dyn Clock>,
    from:            String,
    to:              String,
    artifact_writer: Option<ArtifactWriter>,
}

impl ReminderJob {
    pub fn new(
        source: Arc<dyn RecordSource>,
        renderer: TemplateRenderer,
        sender: Arc<dyn NotificationSender>,
        clock: Arc<dyn Clock>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            source,
            renderer,
            sender,
            clock,
            from: from.into(),
            to: to.into(),
            artifact_writer: None,
        }
    }

    /// レンダリング結果をファイルにも書き出す（開発モード）
    pub fn with_artifact_writer(mut self, writer: ArtifactWriter) -> Self {
        self.artifact_writer = Some(writer);
        self
    }

    /// ジョブを 1 回実行する
    ///
    /// 実行日は時計から一度だけ取得し、選択と件名の両方に使う。
    /// 失敗時はエラーをログ出力してから返す。
    pub async fn run(&self) -> Result<RunOutcome, JobError> {
        let run_date = self.clock.today();
        let span = tracing::info_span!(
            "reminder_run",
            %run_date,
            source = %self.source.describe()
        );

        async {
            let result = self.execute(run_date).await;
            if let Err(e) = &result {
                tracing::error!(
                    error.category = e.category(),
                    error.kind = e.kind(),
                    error = %e,
                    "リマインダージョブが失敗しました"
                );
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, run_date: NaiveDate) -> Result<RunOutcome, JobError> {
        // 取得・解析
        let content = self.source.fetch().await?;
        let records = record_parser::parse_records(&content)?;

        log_business_event!(
            event.category = event::category::REMINDER,
            event.action = event::action::RECORDS_LOADED,
            event.result = event::result::SUCCESS,
            record_count = records.len(),
            "レコードを読み込みました"
        );

        // 選択
        let events = reminder::select_todays_events(records, run_date);
        if events.is_empty() {
            log_business_event!(
                event.category = event::category::REMINDER,
                event.action = event::action::NO_MATCHING_RECORDS,
                event.result = event::result::SUCCESS,
                "本日に該当するレコードはありません"
            );
            return Ok(RunOutcome::NoMatchingRecords);
        }

        tracing::info!(match_count = events.len(), "本日のイベントを選択しました");

        // レンダリング
        let artifacts = self
            .renderer
            .render_artifacts(&events, run_date)
            .map_err(JobError::Template)?;

        if let Some(writer) = &self.artifact_writer
            && let Err(e) = writer.write(&artifacts).await
        {
            tracing::warn!(
                error.category = log_error::category::INFRASTRUCTURE,
                error.kind = log_error::kind::ARTIFACT_WRITE,
                error = %e,
                output_dir = %writer.output_dir().display(),
                "レンダリング結果の書き出しに失敗（送信は続行）"
            );
        }

        tracing::debug!(text = %artifacts.text, "プレーンテキスト本文");

        // 送信
        let email = EmailMessage::reminder(self.from.as_str(), self.to.as_str(), run_date, artifacts);

        match self.sender.send_email(&email).await {
            Ok(message_id) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %email.to,
                    notification.subject = %email.subject,
                    notification.message_id = %message_id,
                    "リマインダーメール送信成功"
                );
                Ok(RunOutcome::Sent { message_id })
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.recipient = %email.to,
                    notification.subject = %email.subject,
                    error = %e,
                    "リマインダーメール送信失敗"
                );
                Err(JobError::Dispatch(e))
            }
        }
    }
}
