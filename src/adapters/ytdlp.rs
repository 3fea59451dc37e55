use crate::domain::media::SourceMedia;
use crate::error::AcquisitionError;
use crate::ports::acquisition::MediaSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;

/// Metadata yt-dlp prints for a completed download.
#[derive(Debug, Deserialize)]
struct DownloadInfo {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    uploader: String,
    #[serde(default)]
    upload_date: String,
}

/// MediaSource backed by the yt-dlp binary.
///
/// Downloads land in `work_dir` as `<source id>.mp4`. The cookie jar is the
/// out-of-band credential that gets requests past bot checks.
pub struct YtDlpSource {
    work_dir: PathBuf,
    cookies_file: PathBuf,
}

impl YtDlpSource {
    pub fn new(work_dir: impl Into<PathBuf>, cookies_file: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            cookies_file: cookies_file.into(),
        }
    }
}

#[async_trait]
impl MediaSource for YtDlpSource {
    async fn acquire(&self, url: &str) -> Result<SourceMedia, AcquisitionError> {
        let template = self.work_dir.join("%(id)s.mp4");

        let output = Command::new("yt-dlp")
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--format")
            .arg("best")
            .arg("--cookies")
            .arg(&self.cookies_file)
            .arg("--print-json")
            .arg("--output")
            .arg(&template)
            .arg(url)
            .output()
            .await
            .map_err(AcquisitionError::Launch)?;

        if !output.status.success() {
            return Err(AcquisitionError::Fetch {
                url: url.to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let info: DownloadInfo = serde_json::from_slice(&output.stdout)?;

        let local_path = self.work_dir.join(format!("{}.mp4", info.id));
        if tokio::fs::metadata(&local_path).await.is_err() {
            return Err(AcquisitionError::MissingFile(local_path));
        }

        Ok(SourceMedia {
            source_id: info.id,
            local_path,
            title: info.title,
            description: info.description,
            channel: info.uploader,
            published_at: info.upload_date,
            url: url.to_string(),
        })
    }
}
