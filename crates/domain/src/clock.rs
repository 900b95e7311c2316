//! # Clock（実行日プロバイダ）
//!
//! ジョブ内での `Local::now()` 直接呼び出しを置き換え、
//! テストで固定の実行日を注入可能にするための抽象化。
//!
//! 実行日は 1 回の実行の開始時に一度だけ取得し、以降のパイプライン全体で使い回す。
//! 実行中に日付が変わっても、選別と件名で異なる日付が使われることはない。

use chrono::{Local, NaiveDate};

/// 実行日を提供するトレイト
pub trait Clock: Send + Sync {
    /// ローカルタイムゾーンでの今日の日付を返す
    fn today(&self) -> NaiveDate;
}

/// 実際のシステム時刻から実行日を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定の日付を返すテスト用実装
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
