//! # Date Reminder ドメイン層
//!
//! 記念日リマインダーの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **I/O を持たない**: レコードの取得・メール送信はインフラ層が担う
//! - **値オブジェクト**: [`event::PersonId`] など、生成時に検証済みの型を使う
//! - **純粋関数としての選別**: 「今日」の判定は注入された日付のみに依存する
//!
//! ## 依存関係の方向
//!
//! ```text
//! job → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`clock`] - 実行日の取得を抽象化する
//! - [`error`] - ドメイン層エラー
//! - [`event`] - イベントレコードとエンリッチ済みイベント
//! - [`notification`] - メールメッセージと通知エラー
//! - [`reminder`] - 今日のイベントの選別とメッセージ生成
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::NaiveDate;
//! use date_reminder_domain::{
//!     event::{EventRecord, PersonId},
//!     reminder::select_todays_events,
//! };
//!
//! let record = EventRecord::new(
//!     PersonId::new("alex.smith").unwrap(),
//!     None,
//!     "birthday",
//!     NaiveDate::from_ymd_opt(1995, 3, 10).unwrap(),
//! );
//! let today = NaiveDate::from_ymd_opt(2030, 3, 10).unwrap();
//!
//! let events = select_todays_events(vec![record], today);
//! assert_eq!(events[0].display_name_resolved, "alex");
//! ```

pub mod clock;
pub mod error;
pub mod event;
pub mod notification;
pub mod reminder;

pub use error::DomainError;
