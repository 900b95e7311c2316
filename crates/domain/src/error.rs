//! # ドメイン層エラー定義
//!
//! ドメインルール違反を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//!
//! ## 使用例
//!
//! ```rust
//! use date_reminder_domain::DomainError;
//!
//! fn validate_type(event_type: &str) -> Result<(), DomainError> {
//!     if event_type.is_empty() {
//!         return Err(DomainError::Validation("イベント種別は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 値オブジェクトの生成時に入力がルールに違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validationのメッセージに詳細が含まれる() {
        let err = DomainError::Validation("person_id は必須です".to_string());
        assert_eq!(err.to_string(), "バリデーションエラー: person_id は必須です");
    }
}
