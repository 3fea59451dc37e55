//! Typed failures for each pipeline stage.
//!
//! Every external call resolves to one of these instead of a bare boxed
//! error, so the batch driver can pattern-match its recovery policy.

use std::fmt;
use std::path::PathBuf;

/// Source retrieval failed before a local file materialized.
#[derive(Debug)]
pub enum AcquisitionError {
    /// The downloader binary could not be spawned.
    Launch(std::io::Error),
    /// The downloader ran but reported failure (unreachable, blocked, ...).
    Fetch { url: String, detail: String },
    /// Metadata came back but could not be parsed.
    Metadata(serde_json::Error),
    /// The downloader reported success but the file is not on disk.
    MissingFile(PathBuf),
    TimedOut,
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionError::Launch(e) => write!(f, "failed to launch downloader: {}", e),
            AcquisitionError::Fetch { url, detail } => {
                write!(f, "download failed for {}: {}", url, detail)
            }
            AcquisitionError::Metadata(e) => write!(f, "malformed source metadata: {}", e),
            AcquisitionError::MissingFile(path) => {
                write!(f, "downloaded file missing at {:?}", path)
            }
            AcquisitionError::TimedOut => write!(f, "acquisition timed out"),
        }
    }
}

impl std::error::Error for AcquisitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AcquisitionError::Launch(e) => Some(e),
            AcquisitionError::Metadata(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AcquisitionError {
    fn from(err: serde_json::Error) -> Self {
        AcquisitionError::Metadata(err)
    }
}

/// The local media file could not be inspected.
#[derive(Debug)]
pub enum ProbeError {
    Open(String),
    NoVideoStream,
    NoFrames,
    ZeroFrameRate,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Open(detail) => write!(f, "failed to open media: {}", detail),
            ProbeError::NoVideoStream => write!(f, "no video stream found"),
            ProbeError::NoFrames => write!(f, "media reports zero frames"),
            ProbeError::ZeroFrameRate => write!(f, "media reports zero frame rate"),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Cutting a planned window out of the source failed.
#[derive(Debug)]
pub enum CutError {
    Launch(std::io::Error),
    Encoder(String),
    MissingOutput(PathBuf),
}

impl fmt::Display for CutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutError::Launch(e) => write!(f, "failed to launch ffmpeg: {}", e),
            CutError::Encoder(detail) => write!(f, "ffmpeg failed: {}", detail),
            CutError::MissingOutput(path) => write!(f, "cut produced no file at {:?}", path),
        }
    }
}

impl std::error::Error for CutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CutError::Launch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CutError {
    fn from(err: std::io::Error) -> Self {
        CutError::Launch(err)
    }
}

/// Object storage rejected or never acknowledged a call.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Backend(String),
    TimedOut,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
            StorageError::Backend(detail) => write!(f, "storage backend error: {}", detail),
            StorageError::TimedOut => write!(f, "storage call timed out"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// The metadata catalog rejected or never acknowledged a write.
#[derive(Debug)]
pub enum CatalogError {
    Backend(String),
    TimedOut,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Backend(detail) => write!(f, "catalog error: {}", detail),
            CatalogError::TimedOut => write!(f, "catalog call timed out"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A publish attempt (upload, verify, catalog write) failed.
///
/// `Verification` means the bytes were uploaded but no public locator could
/// be resolved afterwards; storage and catalog may diverge at that point.
#[derive(Debug)]
pub enum PublishError {
    Upload(StorageError),
    Verification { bucket: String, key: String },
    Catalog(CatalogError),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Upload(e) => write!(f, "upload failed: {}", e),
            PublishError::Verification { bucket, key } => {
                write!(f, "uploaded object not resolvable: {}/{}", bucket, key)
            }
            PublishError::Catalog(e) => write!(f, "catalog write failed: {}", e),
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PublishError::Upload(e) => Some(e),
            PublishError::Catalog(e) => Some(e),
            PublishError::Verification { .. } => None,
        }
    }
}

impl From<StorageError> for PublishError {
    fn from(err: StorageError) -> Self {
        PublishError::Upload(err)
    }
}

impl From<CatalogError> for PublishError {
    fn from(err: CatalogError) -> Self {
        PublishError::Catalog(err)
    }
}
