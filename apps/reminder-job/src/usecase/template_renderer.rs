//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンでリマインダーメールの本文を HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: 既定のテンプレートはバイナリに埋め込まれる
//! - **ディレクトリからの差し替え**: `DR_TEMPLATE_DIR` 指定時は `reminder.txt` / `reminder.html` を読み込む
//! - **コンテキスト**: `reminders`（選択済みイベント列）と `run_date`（`MM/DD`）
//! - **HTML のみ自動エスケープ**: 拡張子 `.html` のテンプレートは tera が自動でエスケープする

use std::path::Path;

use chrono::NaiveDate;
use date_reminder_domain::{
    event::EnrichedEvent,
    notification::{NotificationError, RenderedArtifacts},
};
use tera::{Context, Tera};

/// プレーンテキスト本文のテンプレート名
pub const TEXT_TEMPLATE: &str = "reminder.txt";
/// HTML 本文のテンプレート名
pub const HTML_TEMPLATE: &str = "reminder.html";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、選択済みイベント列から
/// 2 形式の本文を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 埋め込みテンプレートでレンダラーを作成
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    TEXT_TEMPLATE,
                    include_str!("../../templates/reminder.txt"),
                ),
                (
                    HTML_TEMPLATE,
                    include_str!("../../templates/reminder.html"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// ディレクトリ内のテンプレートでレンダラーを作成
    ///
    /// ファイル名がそのままテンプレート名になる。
    /// `reminder.txt` と `reminder.html` のどちらかが見つからなければエラーとする
    /// （ディレクトリ自体が存在しない場合も含む）。
    pub fn from_dir(dir: &Path) -> Result<Self, NotificationError> {
        let pattern = dir.join("*");
        let pattern = pattern.to_str().ok_or_else(|| {
            NotificationError::TemplateFailed(format!(
                "テンプレートディレクトリのパスが UTF-8 ではありません: {}",
                dir.display()
            ))
        })?;

        let engine =
            Tera::new(pattern).map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let missing: Vec<&str> = [TEXT_TEMPLATE, HTML_TEMPLATE]
            .into_iter()
            .filter(|name| !engine.get_template_names().any(|loaded| loaded == *name))
            .collect();
        if !missing.is_empty() {
            return Err(NotificationError::TemplateFailed(format!(
                "{} にテンプレートがありません: {}",
                dir.display(),
                missing.join(", ")
            )));
        }

        tracing::debug!(
            dir = %dir.display(),
            templates = ?engine.get_template_names().collect::<Vec<_>>(),
            "テンプレートを読み込みました"
        );

        Ok(Self { engine })
    }

    /// 指定テンプレートでイベント列をレンダリングする
    pub fn render(
        &self,
        template_name: &str,
        events: &[EnrichedEvent],
        run_date: NaiveDate,
    ) -> Result<String, NotificationError> {
        let context = build_context(events, run_date);

        self.engine
            .render(template_name, &context)
            .map_err(|e| NotificationError::TemplateFailed(format!("{template_name}: {e}")))
    }

    /// プレーンテキスト本文と HTML 本文をまとめてレンダリングする
    pub fn render_artifacts(
        &self,
        events: &[EnrichedEvent],
        run_date: NaiveDate,
    ) -> Result<RenderedArtifacts, NotificationError> {
        Ok(RenderedArtifacts {
            text: self.render(TEXT_TEMPLATE, events, run_date)?,
            html: self.render(HTML_TEMPLATE, events, run_date)?,
        })
    }
}

fn build_context(events: &[EnrichedEvent], run_date: NaiveDate) -> Context {
    let mut context = Context::new();
    context.insert("reminders", events);
    context.insert("run_date", &run_date.format("%m/%d").to_string());
    context
}
