use crate::domain::media::MediaInfo;
use crate::error::{CutError, ProbeError};
use crate::ports::cutter::ClipCutter;
use crate::ports::probe::MediaProbe;
use async_trait::async_trait;
use ffmpeg_next as ffmpeg;
use std::path::Path;
use tokio::process::Command;
use tokio::task;

/// MediaProbe backed by libav. Opening the container is blocking work, so it
/// runs on the blocking pool.
#[derive(Clone, Copy)]
pub struct FfmpegProbe;

#[async_trait]
impl MediaProbe for FfmpegProbe {
    async fn probe(&self, path: &Path) -> Result<MediaInfo, ProbeError> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            ffmpeg::init().map_err(|e| ProbeError::Open(e.to_string()))?;

            let context =
                ffmpeg::format::input(&path).map_err(|e| ProbeError::Open(e.to_string()))?;
            let stream = context
                .streams()
                .best(ffmpeg::media::Type::Video)
                .ok_or(ProbeError::NoVideoStream)?;

            let rate = stream.avg_frame_rate();
            if rate.numerator() <= 0 || rate.denominator() <= 0 {
                return Err(ProbeError::ZeroFrameRate);
            }
            let frame_rate = rate.numerator() as f64 / rate.denominator() as f64;

            let frame_count = stream.frames();
            if frame_count <= 0 {
                return Err(ProbeError::NoFrames);
            }

            Ok(MediaInfo {
                frame_count,
                frame_rate,
            })
        })
        .await
        .map_err(|e| ProbeError::Open(e.to_string()))?
    }
}

/// ClipCutter shelling out to the ffmpeg binary.
///
/// Stream-copies the window instead of re-encoding; cut boundaries therefore
/// snap to the nearest keyframe.
#[derive(Clone, Copy)]
pub struct FfmpegCutter;

#[async_trait]
impl ClipCutter for FfmpegCutter {
    async fn cut(
        &self,
        source: &Path,
        start: f64,
        end: f64,
        output: &Path,
    ) -> Result<(), CutError> {
        let duration = end - start;

        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-ss")
            .arg(start.to_string())
            .arg("-i")
            .arg(source)
            .arg("-t")
            .arg(duration.to_string())
            .arg("-c")
            .arg("copy")
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(CutError::Encoder(
                String::from_utf8_lossy(&result.stderr).trim().to_string(),
            ));
        }

        if tokio::fs::metadata(output).await.is_err() {
            return Err(CutError::MissingOutput(output.to_path_buf()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_probe_missing_file_is_an_open_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.mp4");

        let result = FfmpegProbe.probe(&missing).await;

        assert!(matches!(result, Err(ProbeError::Open(_))));
    }

    #[tokio::test]
    async fn test_probe_rejects_a_file_that_is_not_media() {
        let dir = tempdir().unwrap();
        let junk = dir.path().join("junk.mp4");
        std::fs::write(&junk, b"definitely not a video container").unwrap();

        let result = FfmpegProbe.probe(&junk).await;

        assert!(result.is_err());
    }
}
