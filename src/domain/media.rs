use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed length of every planned clip window, in seconds.
pub const CLIP_SECONDS: f64 = 60.0;

/// One unit of batch work: a source URL and its ordinal position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: usize,
    pub url: String,
}

impl Job {
    /// Build the job list for one batch pass, ordinals assigned by position.
    pub fn batch(urls: impl IntoIterator<Item = impl Into<String>>) -> Vec<Job> {
        urls.into_iter()
            .enumerate()
            .map(|(id, url)| Job {
                id,
                url: url.into(),
            })
            .collect()
    }
}

/// A retrieved source video: local bytes plus descriptive metadata.
///
/// Scoped to a single job iteration; nothing caches these across jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMedia {
    /// Identifier assigned by the source service
    pub source_id: String,
    /// Where the downloader materialized the bytes
    pub local_path: PathBuf,
    pub title: String,
    pub description: String,
    pub channel: String,
    pub published_at: String,
    /// The URL the job was built from
    pub url: String,
}

impl SourceMedia {
    /// Storage key for the original asset.
    pub fn file_name(&self) -> String {
        format!("{}.mp4", self.source_id)
    }
}

/// Structural properties read from a local media file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    pub frame_count: i64,
    pub frame_rate: f64,
}

impl MediaInfo {
    /// Duration in seconds. Zero for a non-positive frame rate, never a
    /// division fault.
    pub fn duration(&self) -> f64 {
        if self.frame_rate <= 0.0 {
            return 0.0;
        }
        self.frame_count as f64 / self.frame_rate
    }
}

/// One planned fixed-length window of a source asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipPlan {
    pub index: usize,
    /// Start offset in seconds, inclusive
    pub start: f64,
    /// End offset in seconds, exclusive
    pub end: f64,
    /// File name used both on disk and as the storage key
    pub file_name: String,
    pub transcript: String,
}

/// Partition a duration into full CLIP_SECONDS windows.
///
/// Floor semantics: a trailing window shorter than CLIP_SECONDS is dropped,
/// so anything under one full window plans nothing. The whole sequence is
/// materialized up front; nothing here touches the media bytes.
pub fn plan_clips(source_id: &str, duration: f64) -> Vec<ClipPlan> {
    if !duration.is_finite() || duration < CLIP_SECONDS {
        return Vec::new();
    }

    let count = (duration / CLIP_SECONDS).floor() as usize;
    (0..count)
        .map(|index| ClipPlan {
            index,
            start: index as f64 * CLIP_SECONDS,
            end: (index + 1) as f64 * CLIP_SECONDS,
            file_name: format!("clip_{}_{}.mp4", source_id, index),
            transcript: format!("Transcript of clip {}", index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_assigns_ordinals_in_order() {
        let jobs = Job::batch(["https://example.com/a", "https://example.com/b"]);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, 0);
        assert_eq!(jobs[1].id, 1);
        assert_eq!(jobs[1].url, "https://example.com/b");
    }

    #[test]
    fn test_plan_count_is_floor_of_duration() {
        assert_eq!(plan_clips("v1", 185.0).len(), 3);
        assert_eq!(plan_clips("v1", 180.0).len(), 3);
        assert_eq!(plan_clips("v1", 179.9).len(), 2);
        assert_eq!(plan_clips("v1", 60.0).len(), 1);
    }

    #[test]
    fn test_plan_windows_are_contiguous_sixty_second_spans() {
        let clips = plan_clips("v1", 185.0);
        assert_eq!(clips.len(), 3);
        for (i, clip) in clips.iter().enumerate() {
            assert_eq!(clip.index, i);
            assert_eq!(clip.start, i as f64 * 60.0);
            assert_eq!(clip.end, (i + 1) as f64 * 60.0);
        }
        // The trailing 5 seconds are never planned.
        assert_eq!(clips.last().unwrap().end, 180.0);
    }

    #[test]
    fn test_plan_names_derive_from_owner_and_index() {
        let clips = plan_clips("abc123", 125.0);
        assert_eq!(clips[0].file_name, "clip_abc123_0.mp4");
        assert_eq!(clips[1].file_name, "clip_abc123_1.mp4");
        assert_eq!(clips[1].transcript, "Transcript of clip 1");
    }

    #[test]
    fn test_plan_short_or_empty_durations_plan_nothing() {
        assert!(plan_clips("v1", 59.9).is_empty());
        assert!(plan_clips("v1", 0.0).is_empty());
        assert!(plan_clips("v1", -10.0).is_empty());
        assert!(plan_clips("v1", f64::NAN).is_empty());
        assert!(plan_clips("v1", f64::INFINITY).is_empty());
    }

    #[test]
    fn test_duration_guards_against_zero_frame_rate() {
        let info = MediaInfo {
            frame_count: 5550,
            frame_rate: 0.0,
        };
        assert_eq!(info.duration(), 0.0);

        let info = MediaInfo {
            frame_count: 5550,
            frame_rate: 30.0,
        };
        assert_eq!(info.duration(), 185.0);
    }

    #[test]
    fn test_zero_frames_yield_zero_duration_and_no_clips() {
        let info = MediaInfo {
            frame_count: 0,
            frame_rate: 30.0,
        };
        assert_eq!(info.duration(), 0.0);
        assert!(plan_clips("v1", info.duration()).is_empty());
    }
}
