//! Environment configuration for the ingestion pipeline.

use std::env;
use std::time::Duration;

/// Configuration for one batch run.
///
/// Storage endpoint, credentials and bucket names are required and checked
/// at startup. Everything else has a working default.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    /// S3-compatible storage/catalog service endpoint
    pub storage_endpoint: String,
    /// Access key id for the storage service
    pub access_key_id: String,
    /// Secret access key for the storage service
    pub secret_access_key: String,
    /// Bucket receiving original source videos
    pub source_videos_bucket: String,
    /// Bucket receiving derived clips
    pub clips_bucket: String,
    /// Catalog table for source video rows
    pub videos_table: String,
    /// Catalog table for clip rows
    pub clips_table: String,
    /// Directory downloads and cut clips are written to
    pub work_dir: String,
    /// Cookie jar handed to the downloader to get past bot checks
    pub cookies_file: String,
    /// Fixed delay applied after each job attempt
    pub pacing: Duration,
    /// Upper bound on any single external call
    pub call_timeout: Duration,
}

impl IngestConfig {
    /// Load configuration from environment variables.
    /// Panics if required variables are not set.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let pacing_ms: u64 = env::var("PACING_MS")
            .unwrap_or_else(|_| String::from("1000"))
            .parse()
            .unwrap_or(1000);
        let call_timeout_secs: u64 = env::var("CALL_TIMEOUT_SECS")
            .unwrap_or_else(|_| String::from("120"))
            .parse()
            .unwrap_or(120);

        Self {
            storage_endpoint: env::var("STORAGE_ENDPOINT")
                .expect("STORAGE_ENDPOINT env var required"),
            access_key_id: env::var("AWS_ACCESS_KEY_ID")
                .expect("AWS_ACCESS_KEY_ID env var required"),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .expect("AWS_SECRET_ACCESS_KEY env var required"),
            source_videos_bucket: env::var("SOURCE_VIDEOS_BUCKET")
                .expect("SOURCE_VIDEOS_BUCKET env var required"),
            clips_bucket: env::var("CLIPS_BUCKET").expect("CLIPS_BUCKET env var required"),
            videos_table: env::var("VIDEOS_TABLE").unwrap_or_else(|_| String::from("videos")),
            clips_table: env::var("CLIPS_TABLE").unwrap_or_else(|_| String::from("clips")),
            work_dir: env::var("WORK_DIR").unwrap_or_else(|_| String::from("./")),
            cookies_file: env::var("COOKIES_FILE").unwrap_or_else(|_| String::from("cookies.txt")),
            pacing: Duration::from_millis(pacing_ms),
            call_timeout: Duration::from_secs(call_timeout_secs),
        }
    }
}
