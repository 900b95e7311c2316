//! # ユースケース層
//!
//! リマインダージョブの実行フローを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: レコードソースと送信は `Arc<dyn Trait>` で外部から注入
//! - **薄い main**: main は配線のみ行い、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `reminder`: 1 回分の実行（取得から送信まで）
//! - `template_renderer`: 本文のレンダリング

pub mod reminder;
pub mod template_renderer;

pub use reminder::{ReminderJob, RunOutcome, RunResult};
pub use template_renderer::TemplateRenderer;
