//! Batch Ingestion Binary
//!
//! Runs one complete batch pass over a fixed list of source URLs:
//! download each video, plan and cut 60-second clips, upload everything to
//! object storage and record it in the catalog.
//!
//! Environment Variables:
//! - STORAGE_ENDPOINT: S3-compatible storage/catalog endpoint
//! - AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY: storage credentials
//! - SOURCE_VIDEOS_BUCKET: bucket for original videos
//! - CLIPS_BUCKET: bucket for derived clips
//! - VIDEOS_TABLE / CLIPS_TABLE: catalog table names (optional)
//! - WORK_DIR, COOKIES_FILE, PACING_MS, CALL_TIMEOUT_SECS (optional)

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Credentials;
use clipline::adapters::aws::{dynamodb::DynamoCatalog, s3::S3Store};
use clipline::adapters::ffmpeg::{FfmpegCutter, FfmpegProbe};
use clipline::adapters::ytdlp::YtDlpSource;
use clipline::application::batch::BatchRunner;
use clipline::application::publisher::Publisher;
use clipline::config::IngestConfig;
use clipline::domain::media::Job;

/// Source list for one pass; static until a real feed exists.
const TEST_URLS: &[&str] = &["https://www.youtube.com/watch?v=sample_video"];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Required configuration is checked here, before any job runs.
    let config = IngestConfig::from_env();

    let credentials = Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.clone(),
        None,
        None,
        "Static",
    );
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(config.storage_endpoint.clone())
        .credentials_provider(credentials)
        .region(aws_config::Region::new("us-east-1"))
        .load()
        .await;

    let s3_client = aws_sdk_s3::Client::from_conf(
        aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build(),
    );
    let dynamo_client = aws_sdk_dynamodb::Client::new(&shared);

    // Adapters
    let store = S3Store::new(s3_client, config.storage_endpoint.clone());
    let catalog = DynamoCatalog::new(
        dynamo_client,
        config.videos_table.clone(),
        config.clips_table.clone(),
    );
    let source = YtDlpSource::new(&config.work_dir, &config.cookies_file);

    // Services
    let publisher = Publisher::new(
        store,
        catalog,
        config.source_videos_bucket.clone(),
        config.clips_bucket.clone(),
    )
    .with_call_timeout(config.call_timeout);

    let runner = BatchRunner::new(source, FfmpegProbe, FfmpegCutter, publisher)
        .with_pacing(config.pacing)
        .with_call_timeout(config.call_timeout);

    let summary = runner.run(Job::batch(TEST_URLS.iter().copied())).await;

    println!(
        "Batch finished: {} completed, {} failed, {} skipped",
        summary.completed, summary.failed, summary.skipped
    );
}
