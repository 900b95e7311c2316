//! # Date Reminder ジョブ ライブラリ
//!
//! ジョブの設定・エラー・ユースケースを公開する。
//! バイナリ（`main.rs`）は配線のみを担当し、統合テストはこのライブラリを直接使う。

pub mod config;
pub mod error;
pub mod usecase;
