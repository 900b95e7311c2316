//! # インフラ層エラー定義
//!
//! レコードソースの取得、CSV の解析、ファイル出力で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `csv::Error`, `std::io::Error` をラップ
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（SourceUnavailable, InvalidRecord 等）

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::SourceUnavailable(_) => { /* 取得失敗 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// レコードソースを取得できない
    ///
    /// ローカルファイルの読み込み失敗、S3 の GetObject 失敗
    /// （オブジェクトなし、アクセス拒否、通信失敗）など。
    #[error("レコードソースを取得できません: {0}")]
    SourceUnavailable(String),

    /// ヘッダーに必須カラムがない
    #[error("必須カラムがありません: {0}")]
    MissingColumn(&'static str),

    /// 行の内容が不正
    ///
    /// 日付が `YYYY-MM-DD` でない、必須値が空など。
    /// `line` はヘッダーを 1 行目とした行番号。
    #[error("{line} 行目が不正です: {message}")]
    InvalidRecord {
        line:    u64,
        message: String,
    },

    /// CSV の構造エラー
    ///
    /// 列数の不一致、UTF-8 として不正なバイト列など。
    #[error("CSV の解析に失敗: {0}")]
    Csv(#[source] csv::Error),

    /// ファイル I/O エラー
    #[error("ファイル I/O エラー: {0}")]
    Io(#[source] std::io::Error),

    /// 入力値エラー
    ///
    /// S3 URI の形式不正など、設定値に起因するもの。
    #[error("入力エラー: {0}")]
    InvalidInput(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 入力データ（CSV）に起因するエラーかどうか
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.kind,
            InfraErrorKind::MissingColumn(_)
                | InfraErrorKind::InvalidRecord { .. }
                | InfraErrorKind::Csv(_)
        )
    }

    // ===== Convenience constructors =====

    /// レコードソース取得エラーを生成する
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::SourceUnavailable(msg.into()))
    }

    /// 必須カラム欠落エラーを生成する
    pub fn missing_column(column: &'static str) -> Self {
        Self::new(InfraErrorKind::MissingColumn(column))
    }

    /// 不正行エラーを生成する
    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::InvalidRecord {
            line,
            message: message.into(),
        })
    }

    /// 入力値エラーを生成する
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::InvalidInput(msg.into()))
    }

    fn new(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<csv::Error> for InfraError {
    fn from(source: csv::Error) -> Self {
        Self::new(InfraErrorKind::Csv(source))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(source: std::io::Error) -> Self {
        Self::new(InfraErrorKind::Io(source))
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_source_unavailableでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_fetch", bucket = "reminders");
            let _enter = span.enter();

            let err = InfraError::source_unavailable("NoSuchKey");

            assert!(matches!(
                err.kind(),
                InfraErrorKind::SourceUnavailable(msg) if msg == "NoSuchKey"
            ));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_fetch"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_from_io_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_write");
            let _enter = span.enter();

            let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
            let err: InfraError = io_err.into();

            assert!(matches!(err.kind(), InfraErrorKind::Io(_)));
            assert!(format!("{}", err.span_trace()).contains("test_write"));
        });
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::invalid_record(3, "日付が不正です: 1995/03/10");
        assert_eq!(
            format!("{err}"),
            "3 行目が不正です: 日付が不正です: 1995/03/10"
        );
    }

    #[test]
    fn test_missing_columnのメッセージ() {
        let err = InfraError::missing_column("date");
        assert_eq!(format!("{err}"), "必須カラムがありません: date");
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: InfraError = io_err.into();

        assert!(err.source().is_some());
        assert!(InfraError::source_unavailable("x").source().is_none());
    }

    #[test]
    fn test_is_parse_errorは入力データ起因のエラーのみtrue() {
        assert!(InfraError::missing_column("type").is_parse_error());
        assert!(InfraError::invalid_record(2, "x").is_parse_error());
        assert!(!InfraError::source_unavailable("x").is_parse_error());
        assert!(!InfraError::invalid_input("x").is_parse_error());
    }
}
