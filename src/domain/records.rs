use super::media::{ClipPlan, Job, SourceMedia};
use serde::{Deserialize, Serialize};

/// Catalog row for an ingested source video ("videos" table).
///
/// Keyed by the job ordinal; writing the same ordinal again replaces the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: usize,
    pub filename: String,
    pub storage_path: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub channel: String,
    pub published_at: String,
}

impl VideoRecord {
    pub fn new(job: &Job, media: &SourceMedia, storage_path: &str) -> Self {
        let filename = storage_path
            .rsplit('/')
            .next()
            .unwrap_or(storage_path)
            .to_string();

        Self {
            id: job.id,
            filename,
            storage_path: storage_path.to_string(),
            url: job.url.clone(),
            title: media.title.clone(),
            description: media.description.clone(),
            channel: media.channel.clone(),
            published_at: media.published_at.clone(),
        }
    }
}

/// Catalog row for one derived clip ("clips" table). Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRecord {
    pub video_id: usize,
    pub file_path: String,
    pub original_url: String,
    pub transcript: String,
}

impl ClipRecord {
    pub fn new(job: &Job, clip: &ClipPlan, storage_path: &str) -> Self {
        Self {
            video_id: job.id,
            file_path: storage_path.to_string(),
            original_url: job.url.clone(),
            transcript: clip.transcript.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_media() -> SourceMedia {
        SourceMedia {
            source_id: String::from("v1"),
            local_path: PathBuf::from("v1.mp4"),
            title: String::from("A title"),
            description: String::from("A description"),
            channel: String::from("A channel"),
            published_at: String::from("20240101"),
            url: String::from("https://example.com/watch?v=v1"),
        }
    }

    #[test]
    fn test_video_record_takes_basename_of_storage_path() {
        let job = Job {
            id: 7,
            url: String::from("https://example.com/watch?v=v1"),
        };
        let record = VideoRecord::new(&job, &sample_media(), "source-videos/v1.mp4");

        assert_eq!(record.id, 7);
        assert_eq!(record.filename, "v1.mp4");
        assert_eq!(record.storage_path, "source-videos/v1.mp4");
        assert_eq!(record.url, job.url);
        assert_eq!(record.channel, "A channel");
    }

    #[test]
    fn test_clip_record_carries_owner_and_transcript() {
        let job = Job {
            id: 2,
            url: String::from("https://example.com/watch?v=v1"),
        };
        let clip = ClipPlan {
            index: 1,
            start: 60.0,
            end: 120.0,
            file_name: String::from("clip_v1_1.mp4"),
            transcript: String::from("Transcript of clip 1"),
        };
        let record = ClipRecord::new(&job, &clip, "clips/clip_v1_1.mp4");

        assert_eq!(record.video_id, 2);
        assert_eq!(record.file_path, "clips/clip_v1_1.mp4");
        assert_eq!(record.original_url, job.url);
        assert_eq!(record.transcript, "Transcript of clip 1");
    }
}
