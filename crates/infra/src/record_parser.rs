//! # レコードパーサー
//!
//! ヘッダー付き CSV のバイト列を [`EventRecord`] の列に変換する。
//!
//! ## 入力形式
//!
//! ```text
//! person_id,display_name,type,date
//! alex.smith,,birthday,1995-03-10
//! ```
//!
//! - `person_id`, `type`, `date` はヘッダーに必須
//! - `display_name` は空欄可（カラムごと省略した場合は全行で未設定）
//! - `date` は `YYYY-MM-DD` 固定
//!
//! 1 行でも不正な行があれば、その時点で全体をエラーとする。
//! 不正行をスキップして処理を続けることはしない。

use chrono::NaiveDate;
use date_reminder_domain::event::{EventRecord, PersonId};
use serde::Deserialize;

use crate::InfraError;

/// ヘッダーに必須のカラム
const REQUIRED_COLUMNS: [&str; 3] = ["person_id", "type", "date"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV の 1 行（検証前）
#[derive(Debug, Deserialize)]
struct RawRecord {
    person_id:    String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(rename = "type")]
    event_type:   String,
    date:         String,
}

impl RawRecord {
    fn into_event_record(self, line: u64) -> Result<EventRecord, InfraError> {
        let person_id =
            PersonId::new(self.person_id).map_err(|e| InfraError::invalid_record(line, e.to_string()))?;

        if self.event_type.is_empty() {
            return Err(InfraError::invalid_record(line, "type が空です"));
        }

        let date = parse_date(&self.date)
            .ok_or_else(|| InfraError::invalid_record(line, format!("日付が不正です: '{}'", self.date)))?;

        Ok(EventRecord::new(
            person_id,
            self.display_name,
            self.event_type,
            date,
        ))
    }
}

/// `YYYY-MM-DD` 形式の日付をパースする
///
/// 桁数が固定であることも検証する（`95-3-10` のような表記は受け付けない）。
fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// CSV バイト列をイベントレコード列にパースする
///
/// 戻り値はソースの行順を保つ。
///
/// # エラー
///
/// - 必須カラムがない: `InfraErrorKind::MissingColumn`
/// - 行の値が不正: `InfraErrorKind::InvalidRecord`
/// - CSV 構造の不正: `InfraErrorKind::Csv`
pub fn parse_records(bytes: &[u8]) -> Result<Vec<EventRecord>, InfraError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(InfraError::missing_column(missing));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| InfraError::invalid_record(line, e.to_string()))?;
        records.push(raw.into_event_record(line)?);
    }

    tracing::debug!(count = records.len(), "レコードを読み込みました");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::InfraErrorKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_行順を保ってレコードを返す() {
        let csv = "person_id,display_name,type,date\n\
                   alex.smith,,birthday,1995-03-10\n\
                   sam.lee,Samuel,anniversary,2015-06-01\n";

        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].person_id.as_str(), "alex.smith");
        assert_eq!(records[0].display_name, None);
        assert_eq!(records[0].event_type, "birthday");
        assert_eq!(records[0].date, date(1995, 3, 10));
        assert_eq!(records[1].display_name.as_deref(), Some("Samuel"));
        assert_eq!(records[1].event_type, "anniversary");
    }

    #[test]
    fn test_カラム順が異なっていてもヘッダー名で対応付ける() {
        let csv = "date,type,person_id,display_name\n1995-03-10,birthday,alex,Alex\n";

        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].person_id.as_str(), "alex");
        assert_eq!(records[0].display_name.as_deref(), Some("Alex"));
    }

    #[test]
    fn test_display_nameカラムがなければ全行未設定になる() {
        let csv = "person_id,type,date\nalex.smith,birthday,1995-03-10\n";

        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].display_name, None);
    }

    #[test]
    fn test_ヘッダーのみなら空を返す() {
        let records = parse_records(b"person_id,display_name,type,date\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_イベント種別の大文字小文字を保持する() {
        let csv = "person_id,display_name,type,date\nalex,,Birthday,1995-03-10\n";

        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].event_type, "Birthday");
    }

    #[rstest]
    #[case("person_id,display_name,date\nalex,,1995-03-10\n", "type")]
    #[case("display_name,type,date\nAlex,birthday,1995-03-10\n", "person_id")]
    #[case("person_id,display_name,type\nalex,,birthday\n", "date")]
    #[case("", "person_id")]
    fn test_必須カラムがなければmissing_column(#[case] csv: &str, #[case] expected: &str) {
        let err = parse_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err.kind(), InfraErrorKind::MissingColumn(column) if *column == expected));
    }

    #[rstest]
    #[case("1995/03/10")]
    #[case("95-03-10")]
    #[case("1995-3-10")]
    #[case("1995-02-30")]
    #[case("1995-13-01")]
    #[case("")]
    #[case("tomorrow")]
    fn test_不正な日付はinvalid_recordになる(#[case] value: &str) {
        let csv = format!("person_id,display_name,type,date\nalex,,birthday,1995-03-10\nsam,,birthday,{value}\n");

        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_空のperson_idはinvalid_recordになる() {
        let csv = "person_id,display_name,type,date\n,Alex,birthday,1995-03-10\n";

        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_空のtypeはinvalid_recordになる() {
        let csv = "person_id,display_name,type,date\nalex,,,1995-03-10\n";

        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_列数が不一致の行はcsvエラーになる() {
        let csv = "person_id,display_name,type,date\nalex,,birthday\n";

        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Csv(_)));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_2月29日のレコードを受け付ける() {
        let csv = "person_id,display_name,type,date\nleap,,birthday,2000-02-29\n";

        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].date, date(2000, 2, 29));
    }
}
