//! # イベント
//!
//! レコードソースの 1 行を表す [`EventRecord`] と、
//! 表示名の解決・メッセージ生成を経た [`EnrichedEvent`] を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`PersonId`] | 人物 ID | `<name>.<discriminator>` 形式（discriminator は省略可） |
//! | [`EventRecord`] | イベントレコード | ソース表の 1 行 |
//! | [`EnrichedEvent`] | エンリッチ済みイベント | 表示名とお祝いメッセージを付与したレコード |

use chrono::NaiveDate;
use derive_more::Display;
use serde::Serialize;

use crate::DomainError;

/// 人物 ID のうち名前部分と識別子部分を区切る文字
const PERSON_ID_SEPARATOR: char = '.';

/// 人物 ID（値オブジェクト）
///
/// 空文字列は許容しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct PersonId(String);

impl PersonId {
    /// 人物 ID を作成する
    ///
    /// # エラー
    ///
    /// 空文字列の場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("person_id は必須です".to_string()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 最初の `.` より前の名前部分を返す
    ///
    /// 区切り文字を含まない場合は ID 全体を返す。
    ///
    /// ```rust
    /// use date_reminder_domain::event::PersonId;
    ///
    /// assert_eq!(PersonId::new("alex.smith").unwrap().name_part(), "alex");
    /// assert_eq!(PersonId::new("jordan").unwrap().name_part(), "jordan");
    /// ```
    pub fn name_part(&self) -> &str {
        self.0
            .split_once(PERSON_ID_SEPARATOR)
            .map_or(self.0.as_str(), |(name, _)| name)
    }
}

/// イベントレコード
///
/// ソース表の 1 行。`date` の年は記録用として保持するが、
/// 今日との一致判定には月と日のみを使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub person_id:    PersonId,
    pub display_name: Option<String>,
    pub event_type:   String,
    pub date:         NaiveDate,
}

impl EventRecord {
    pub fn new(
        person_id: PersonId,
        display_name: Option<String>,
        event_type: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            person_id,
            display_name,
            event_type: event_type.into(),
            date,
        }
    }

    /// 宛名として使う表示名を解決する
    ///
    /// `display_name` が空でなければそのまま、空または未設定なら
    /// 人物 ID の名前部分を返す。
    pub fn resolve_display_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.person_id.name_part(),
        }
    }
}

/// エンリッチ済みイベント
///
/// テンプレートには `reminders` としてこの型のリストが渡される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedEvent {
    pub person_id:             PersonId,
    pub display_name:          Option<String>,
    pub event_type:            String,
    pub date:                  NaiveDate,
    pub display_name_resolved: String,
    pub message:               String,
}

impl From<EventRecord> for EnrichedEvent {
    fn from(record: EventRecord) -> Self {
        let display_name_resolved = record.resolve_display_name().to_string();
        let message = greeting_message(&record.event_type, &display_name_resolved);

        Self {
            person_id: record.person_id,
            display_name: record.display_name,
            event_type: record.event_type,
            date: record.date,
            display_name_resolved,
            message,
        }
    }
}

/// お祝いメッセージを生成する
///
/// イベント種別はレコードに格納された大文字・小文字をそのまま使う。
/// 小文字化は行わない。
pub fn greeting_message(event_type: &str, display_name: &str) -> String {
    format!("Happy {event_type}, {display_name}! \u{1F389} \nI hope you have a great day! \u{1F600}")
}
