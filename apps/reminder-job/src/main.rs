//! # Date Reminder ジョブ
//!
//! 誕生日・記念日などの一覧（CSV）から本日に該当するものを選び、
//! リマインダーメールを 1 通送信するバッチジョブ。
//!
//! ## 実行フロー
//!
//! ```text
//! ┌────────────────┐   ┌─────────┐   ┌──────────┐   ┌──────────────┐   ┌───────────┐
//! │ ローカル / S3   │──→│ CSV 解析 │──→│ 当日選択 │──→│ tera 本文生成 │──→│ SES / SMTP │
//! └────────────────┘   └─────────┘   └──────────┘   └──────────────┘   └───────────┘
//!                                                          │
//!                                                          └──→ out/out.txt, out/out.html（開発モード）
//! ```
//!
//! 実行結果（`{"statusCode":200,"body":"..."}`）は標準出力に JSON で出力する。
//! ログは標準エラー出力に出る。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DR_SENDER` | **Yes** | 送信元メールアドレス |
//! | `DR_RECIPIENT` | **Yes** | 送信先メールアドレス |
//! | `DR_PROD` | No | 0 以外の整数で本番モード（デフォルト: 開発モード） |
//! | `DR_S3_PATH` | 本番のみ | CSV の S3 URI（`s3://bucket/key`） |
//! | `DR_SOURCE_PATH` | No | 開発モードの CSV パス（デフォルト: `data/dates.csv`） |
//! | `DR_OUTPUT_DIR` | No | 開発モードの出力先（デフォルト: `out`） |
//! | `DR_TEMPLATE_DIR` | No | テンプレートの差し替えディレクトリ |
//! | `DR_NOTIFICATION_BACKEND` | No | `ses` / `smtp` / `noop`（デフォルト: `ses`） |
//! | `DR_SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `DR_SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//! | `S3_ENDPOINT_URL` | No | S3 互換ストレージのエンドポイント（MinIO 等） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,date_reminder=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（Mailpit に送信）
//! DR_NOTIFICATION_BACKEND=smtp cargo run -p date-reminder-job
//!
//! # 本番環境
//! DR_PROD=1 DR_S3_PATH=s3://bucket/dates.csv LOG_FORMAT=json cargo run -p date-reminder-job --release
//! ```

use std::sync::Arc;

use aws_config::SdkConfig;
use date_reminder_domain::clock::SystemClock;
use date_reminder_infra::{
    artifact::ArtifactWriter,
    aws,
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SesNotificationSender,
        SmtpNotificationSender,
    },
    record_source::{LocalFileRecordSource, RecordSource, S3RecordSource},
};
use date_reminder_job::{
    config::{NotificationBackend, RecordLocation, ReminderConfig},
    error::JobError,
    usecase::{ReminderJob, RunResult, TemplateRenderer},
};
use date_reminder_shared::observability::{self, TracingConfig};
use tokio::sync::OnceCell;
use tracing::Instrument;

const SERVICE_NAME: &str = "date-reminder-job";

/// ジョブのエントリーポイント
///
/// 1 回実行して終了する。失敗時は非ゼロで終了する。
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env(SERVICE_NAME);
    observability::init_tracing(&tracing_config);

    let span = tracing::info_span!("app", service = %tracing_config.service_name);
    let result = run().instrument(span).await?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

async fn run() -> Result<RunResult, JobError> {
    let job = prepare().await.inspect_err(|e| {
        tracing::error!(
            error.category = e.category(),
            error.kind = e.kind(),
            error = %e,
            "ジョブの初期化に失敗しました"
        );
    })?;

    // 実行時のエラーは ReminderJob::run 内でログ出力済み
    let outcome = job.run().await?;

    Ok(RunResult::from(outcome))
}

async fn prepare() -> Result<ReminderJob, JobError> {
    // 設定読み込み
    let config = ReminderConfig::from_env()?;

    tracing::info!(
        mode = ?config.mode,
        backend = %config.notification.backend,
        "リマインダージョブを開始します"
    );

    build_job(&config).await
}

/// 設定から依存コンポーネントを組み立てる
async fn build_job(config: &ReminderConfig) -> Result<ReminderJob, JobError> {
    // AWS SDK 設定は S3 / SES のいずれかを使う場合のみ読み込む
    let sdk_config: OnceCell<SdkConfig> = OnceCell::new();

    let source: Arc<dyn RecordSource> = match &config.source {
        RecordLocation::Local(path) => Arc::new(LocalFileRecordSource::new(path)),
        RecordLocation::S3(object) => {
            let sdk_config = sdk_config.get_or_init(aws::load_sdk_config).await;
            let client = aws::s3_client(sdk_config, config.s3_endpoint_url.as_deref());
            Arc::new(S3RecordSource::new(client, object.clone()))
        }
    };

    let sender: Arc<dyn NotificationSender> = match config.notification.backend {
        NotificationBackend::Ses => {
            let sdk_config = sdk_config.get_or_init(aws::load_sdk_config).await;
            Arc::new(SesNotificationSender::new(aws::ses_client(sdk_config)))
        }
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &config.notification.smtp_host,
            config.notification.smtp_port,
        )),
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    };

    let renderer = match &config.template_dir {
        Some(dir) => TemplateRenderer::from_dir(dir),
        None => TemplateRenderer::new(),
    }
    .map_err(JobError::Template)?;

    let job = ReminderJob::new(
        source,
        renderer,
        sender,
        Arc::new(SystemClock),
        config.sender.as_str(),
        config.recipient.as_str(),
    );

    Ok(if config.writes_artifacts() {
        job.with_artifact_writer(ArtifactWriter::new(&config.output_dir))
    } else {
        job
    })
}
