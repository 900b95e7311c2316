//! # Date Reminder 共有ユーティリティ
//!
//! ジョブとインフラ層から使われる横断的なユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - トレーシング初期化は `observability` feature の背後に置く

pub mod event_log;
pub mod observability;
