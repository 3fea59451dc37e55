//! Clipline - Batch Video Ingestion Library
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (jobs, clip planning, catalog rows)
//! - ports/: Trait definitions (acquisition, probe, cutter, storage, catalog)
//! - adapters/: Concrete implementations (yt-dlp, ffmpeg, S3, DynamoDB)
//! - application/: Generic services (publisher, batch driver)
//! - config: Environment configuration
//!
//! One batch pass processes its jobs strictly sequentially: each source is
//! downloaded, partitioned into fixed 60-second clip windows, cut, uploaded
//! to object storage and recorded in the catalog before the next job starts.
//! Failures are isolated to the job (or clip) they happened in.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use application::batch::{BatchRunner, BatchSummary};
pub use application::publisher::Publisher;
pub use config::IngestConfig;
pub use domain::media::Job;
