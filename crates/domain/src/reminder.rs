//! # 今日のイベントの選別
//!
//! イベントレコード列から実行日と月日が一致するものを選び、
//! 表示名の解決とメッセージ生成を行って決定的な順序に並べる。
//!
//! ## 一致判定
//!
//! 年を無視した毎年の記念日として扱う。`1990-07-04` のレコードは
//! 実行日が `2030-07-04` でも一致する。2 月 29 日のレコードは
//! うるう年の実行日にのみ一致する。
//!
//! ## 並び順
//!
//! `(event_type, date)` の昇順。同一キーはソースの行順を保つ（安定ソート）。

use chrono::{Datelike, NaiveDate};

use crate::event::{EnrichedEvent, EventRecord};

/// レコードの日付が実行日と同じ月日かどうか
pub fn falls_on(date: NaiveDate, today: NaiveDate) -> bool {
    date.month() == today.month() && date.day() == today.day()
}

/// 今日のイベントを選別し、エンリッチして並べ替える
///
/// 戻り値が空の場合、呼び出し側は「今日は送信なし」として正常終了する。
pub fn select_todays_events(records: Vec<EventRecord>, today: NaiveDate) -> Vec<EnrichedEvent> {
    let mut events: Vec<EnrichedEvent> = records
        .into_iter()
        .filter(|record| falls_on(record.date, today))
        .map(EnrichedEvent::from)
        .collect();

    events.sort_by(|a, b| {
        a.event_type
            .cmp(&b.event_type)
            .then_with(|| a.date.cmp(&b.date))
    });

    events
}
