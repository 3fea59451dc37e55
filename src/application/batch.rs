use super::publisher::{Publisher, DEFAULT_CALL_TIMEOUT};
use crate::domain::media::{plan_clips, Job};
use crate::error::AcquisitionError;
use crate::ports::acquisition::MediaSource;
use crate::ports::catalog::Catalog;
use crate::ports::cutter::ClipCutter;
use crate::ports::probe::MediaProbe;
use crate::ports::storage::ObjectStore;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Stage a job was in when it terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquiring,
    Planning,
    Uploading,
}

/// Terminal result of one job.
#[derive(Debug)]
pub enum JobOutcome {
    /// Every planned clip was attempted; some may have been skipped.
    Completed {
        clips_published: usize,
        clips_skipped: usize,
    },
    Failed {
        stage: Stage,
        reason: String,
    },
}

/// Counts for one whole batch pass.
///
/// `skipped` are jobs whose source never materialized (Acquiring failures);
/// `failed` are jobs that got a source but died while Planning or Uploading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Completed { .. } => self.completed += 1,
            JobOutcome::Failed {
                stage: Stage::Acquiring,
                ..
            } => self.skipped += 1,
            JobOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Batch driver. Processes jobs strictly sequentially:
/// acquire, plan, upload the asset, then cut and upload each clip.
///
/// A failure is terminal for its job (or, past the asset upload, for its
/// clip) and never for the batch. A fixed pacing delay follows every job
/// attempt to stay friendly with the source service.
pub struct BatchRunner<A, P, K, S, C> {
    source: A,
    probe: P,
    cutter: K,
    publisher: Publisher<S, C>,
    pacing: Duration,
    call_timeout: Duration,
}

impl<A, P, K, S, C> BatchRunner<A, P, K, S, C>
where
    A: MediaSource,
    P: MediaProbe,
    K: ClipCutter,
    S: ObjectStore,
    C: Catalog,
{
    pub fn new(source: A, probe: P, cutter: K, publisher: Publisher<S, C>) -> Self {
        Self {
            source,
            probe,
            cutter,
            publisher,
            pacing: Duration::from_secs(1),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Run one complete batch pass. Infallible by design: every failure is
    /// logged and folded into the summary.
    pub async fn run(&self, jobs: Vec<Job>) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let total = jobs.len();

        for job in &jobs {
            info!(job = job.id, url = %job.url, "processing job {}/{}", job.id + 1, total);

            let outcome = self.run_job(job).await;
            match &outcome {
                JobOutcome::Completed {
                    clips_published,
                    clips_skipped,
                } => {
                    info!(
                        job = job.id,
                        published = clips_published,
                        skipped = clips_skipped,
                        "job done"
                    );
                }
                JobOutcome::Failed { stage, reason } => {
                    error!(job = job.id, stage = ?stage, "job failed: {}", reason);
                }
            }
            summary.record(&outcome);

            // Fixed delay after every attempt, success or failure.
            tokio::time::sleep(self.pacing).await;
        }

        info!(
            completed = summary.completed,
            failed = summary.failed,
            skipped = summary.skipped,
            "batch finished"
        );
        summary
    }

    async fn run_job(&self, job: &Job) -> JobOutcome {
        // Acquiring
        let media = match timeout(self.call_timeout, self.source.acquire(&job.url)).await {
            Ok(Ok(media)) => media,
            Ok(Err(e)) => {
                return JobOutcome::Failed {
                    stage: Stage::Acquiring,
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                return JobOutcome::Failed {
                    stage: Stage::Acquiring,
                    reason: AcquisitionError::TimedOut.to_string(),
                }
            }
        };

        // Planning
        let media_info = match self.probe.probe(&media.local_path).await {
            Ok(media_info) => media_info,
            Err(e) => {
                return JobOutcome::Failed {
                    stage: Stage::Planning,
                    reason: e.to_string(),
                }
            }
        };

        let clips = plan_clips(&media.source_id, media_info.duration());
        if clips.is_empty() {
            return JobOutcome::Failed {
                stage: Stage::Planning,
                reason: format!(
                    "no full-length windows in {:.1}s of media",
                    media_info.duration()
                ),
            };
        }
        info!(job = job.id, clips = clips.len(), "planned clip windows");

        // Uploading: the original asset first. Its failure kills the job
        // before any clip work starts.
        if let Err(e) = self.publisher.publish_video(job, &media).await {
            return JobOutcome::Failed {
                stage: Stage::Uploading,
                reason: e.to_string(),
            };
        }

        // Then every clip in index order. A bad clip skips only itself.
        let clip_dir = media
            .local_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(PathBuf::new);

        let mut clips_published = 0;
        let mut clips_skipped = 0;
        for clip in &clips {
            let local_path = clip_dir.join(&clip.file_name);
            let result: Result<(), Box<dyn std::error::Error + Send + Sync>> = async {
                self.cutter
                    .cut(&media.local_path, clip.start, clip.end, &local_path)
                    .await?;
                self.publisher.publish_clip(job, clip, &local_path).await?;
                Ok(())
            }
            .await;

            match result {
                Ok(()) => clips_published += 1,
                Err(e) => {
                    warn!(job = job.id, clip = clip.index, "skipping clip: {}", e);
                    clips_skipped += 1;
                }
            }
        }

        JobOutcome::Completed {
            clips_published,
            clips_skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{HangingSource, InMemoryCatalog, RecordingStore};
    use crate::domain::media::{MediaInfo, SourceMedia};
    use crate::error::{CutError, ProbeError};
    use crate::ports::acquisition::MockMediaSource;
    use crate::ports::cutter::MockClipCutter;
    use crate::ports::probe::MockMediaProbe;
    use std::path::PathBuf;

    fn media_for(url: &str) -> SourceMedia {
        let source_id = url.rsplit('/').next().unwrap_or(url).to_string();
        SourceMedia {
            local_path: PathBuf::from(format!("/tmp/work/{}.mp4", source_id)),
            source_id,
            title: String::from("A title"),
            description: String::from("A description"),
            channel: String::from("A channel"),
            published_at: String::from("20240101"),
            url: url.to_string(),
        }
    }

    fn accepting_source() -> MockMediaSource {
        let mut source = MockMediaSource::new();
        source.expect_acquire().returning(|url| Ok(media_for(url)));
        source
    }

    /// 185 seconds of media at 30 fps: three full windows plus a remainder.
    fn probe_185s() -> MockMediaProbe {
        let mut probe = MockMediaProbe::new();
        probe.expect_probe().returning(|_| {
            Ok(MediaInfo {
                frame_count: 5550,
                frame_rate: 30.0,
            })
        });
        probe
    }

    fn accepting_cutter() -> MockClipCutter {
        let mut cutter = MockClipCutter::new();
        cutter.expect_cut().returning(|_, _, _, _| Ok(()));
        cutter
    }

    fn runner<A, P, K>(
        source: A,
        probe: P,
        cutter: K,
        store: RecordingStore,
        catalog: InMemoryCatalog,
    ) -> BatchRunner<A, P, K, RecordingStore, InMemoryCatalog>
    where
        A: MediaSource,
        P: MediaProbe,
        K: ClipCutter,
    {
        let publisher = Publisher::new(
            store,
            catalog,
            String::from("source-videos"),
            String::from("clips"),
        );
        BatchRunner::new(source, probe, cutter, publisher).with_pacing(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_full_job_uploads_asset_then_clips_in_order() {
        let store = RecordingStore::new();
        let catalog = InMemoryCatalog::new();

        let mut cutter = MockClipCutter::new();
        cutter.expect_cut().times(3).returning(|_, _, _, _| Ok(()));

        let runner = runner(
            accepting_source(),
            probe_185s(),
            cutter,
            store.clone(),
            catalog.clone(),
        );
        let summary = runner.run(Job::batch(["https://example.com/v1"])).await;

        assert_eq!(
            summary,
            BatchSummary {
                completed: 1,
                failed: 0,
                skipped: 0
            }
        );
        assert_eq!(
            store.uploaded(),
            vec![
                (String::from("source-videos"), String::from("v1.mp4")),
                (String::from("clips"), String::from("clip_v1_0.mp4")),
                (String::from("clips"), String::from("clip_v1_1.mp4")),
                (String::from("clips"), String::from("clip_v1_2.mp4")),
            ]
        );
        assert_eq!(catalog.video_count(), 1);
        assert_eq!(catalog.clip_count(), 3);
    }

    #[tokio::test]
    async fn test_one_unverified_clip_is_skipped_job_still_completes() {
        let store = RecordingStore::new();
        store.deny_key("clip_v1_1.mp4");
        let catalog = InMemoryCatalog::new();

        let runner = runner(
            accepting_source(),
            probe_185s(),
            accepting_cutter(),
            store.clone(),
            catalog.clone(),
        );
        let summary = runner.run(Job::batch(["https://example.com/v1"])).await;

        assert_eq!(summary.completed, 1);
        assert_eq!(catalog.video_count(), 1);
        assert_eq!(catalog.clip_count(), 2);
        let paths: Vec<String> = catalog.clips().iter().map(|c| c.file_path.clone()).collect();
        assert_eq!(paths, vec!["clip_v1_0.mp4", "clip_v1_2.mp4"]);
    }

    #[tokio::test]
    async fn test_unverified_asset_fails_job_with_zero_rows() {
        let store = RecordingStore::new();
        store.deny_key("v1.mp4");
        let catalog = InMemoryCatalog::new();

        // No cut expectations: clip work must never start.
        let cutter = MockClipCutter::new();

        let runner = runner(
            accepting_source(),
            probe_185s(),
            cutter,
            store.clone(),
            catalog.clone(),
        );
        let summary = runner.run(Job::batch(["https://example.com/v1"])).await;

        assert_eq!(
            summary,
            BatchSummary {
                completed: 0,
                failed: 1,
                skipped: 0
            }
        );
        assert_eq!(catalog.video_count(), 0);
        assert_eq!(catalog.clip_count(), 0);
        // Only the asset upload was ever attempted.
        assert_eq!(
            store.uploaded(),
            vec![(String::from("source-videos"), String::from("v1.mp4"))]
        );
    }

    #[tokio::test]
    async fn test_failed_acquisition_skips_job_batch_continues() {
        let store = RecordingStore::new();
        let catalog = InMemoryCatalog::new();

        let mut source = MockMediaSource::new();
        source
            .expect_acquire()
            .withf(|url| url.ends_with("/v2"))
            .returning(|url| {
                Err(AcquisitionError::Fetch {
                    url: url.to_string(),
                    detail: String::from("blocked"),
                })
            });
        source.expect_acquire().returning(|url| Ok(media_for(url)));

        // 65 seconds: one window per surviving job.
        let mut probe = MockMediaProbe::new();
        probe.expect_probe().returning(|_| {
            Ok(MediaInfo {
                frame_count: 1950,
                frame_rate: 30.0,
            })
        });

        let runner = runner(
            source,
            probe,
            accepting_cutter(),
            store.clone(),
            catalog.clone(),
        );
        let summary = runner
            .run(Job::batch([
                "https://example.com/v1",
                "https://example.com/v2",
                "https://example.com/v3",
            ]))
            .await;

        assert_eq!(
            summary,
            BatchSummary {
                completed: 2,
                failed: 0,
                skipped: 1
            }
        );
        assert_eq!(catalog.video_count(), 2);
        assert!(catalog.video(0).is_some());
        assert!(catalog.video(1).is_none());
        assert!(catalog.video(2).is_some());
        assert_eq!(catalog.clip_count(), 2);
    }

    #[tokio::test]
    async fn test_probe_failure_is_terminal_with_no_uploads() {
        let store = RecordingStore::new();
        let catalog = InMemoryCatalog::new();

        let mut probe = MockMediaProbe::new();
        probe
            .expect_probe()
            .returning(|_| Err(ProbeError::ZeroFrameRate));

        let runner = runner(
            accepting_source(),
            probe,
            MockClipCutter::new(),
            store.clone(),
            catalog.clone(),
        );
        let summary = runner.run(Job::batch(["https://example.com/v1"])).await;

        assert_eq!(summary.failed, 1);
        assert!(store.uploaded().is_empty());
        assert_eq!(catalog.video_count(), 0);
    }

    #[tokio::test]
    async fn test_media_shorter_than_one_window_fails_planning() {
        let store = RecordingStore::new();
        let catalog = InMemoryCatalog::new();

        // 45 seconds: floor(45 / 60) = 0 windows.
        let mut probe = MockMediaProbe::new();
        probe.expect_probe().returning(|_| {
            Ok(MediaInfo {
                frame_count: 1350,
                frame_rate: 30.0,
            })
        });

        let runner = runner(
            accepting_source(),
            probe,
            MockClipCutter::new(),
            store.clone(),
            catalog.clone(),
        );
        let summary = runner.run(Job::batch(["https://example.com/v1"])).await;

        assert_eq!(
            summary,
            BatchSummary {
                completed: 0,
                failed: 1,
                skipped: 0
            }
        );
        assert!(store.uploaded().is_empty());
    }

    #[tokio::test]
    async fn test_failed_cut_skips_only_that_clip() {
        let store = RecordingStore::new();
        let catalog = InMemoryCatalog::new();

        let mut cutter = MockClipCutter::new();
        cutter
            .expect_cut()
            .withf(|_, start, _, _| *start == 60.0)
            .returning(|_, _, _, _| Err(CutError::Encoder(String::from("broken window"))));
        cutter.expect_cut().returning(|_, _, _, _| Ok(()));

        let runner = runner(
            accepting_source(),
            probe_185s(),
            cutter,
            store.clone(),
            catalog.clone(),
        );
        let summary = runner.run(Job::batch(["https://example.com/v1"])).await;

        assert_eq!(summary.completed, 1);
        assert_eq!(catalog.clip_count(), 2);
        // The failed cut never reached storage.
        assert_eq!(
            store.uploaded(),
            vec![
                (String::from("source-videos"), String::from("v1.mp4")),
                (String::from("clips"), String::from("clip_v1_0.mp4")),
                (String::from("clips"), String::from("clip_v1_2.mp4")),
            ]
        );
    }

    #[tokio::test]
    async fn test_hanging_acquisition_times_out_and_skips_job() {
        let store = RecordingStore::new();
        let catalog = InMemoryCatalog::new();

        let runner = runner(
            HangingSource,
            MockMediaProbe::new(),
            MockClipCutter::new(),
            store.clone(),
            catalog.clone(),
        )
        .with_call_timeout(Duration::from_millis(20));

        let summary = runner.run(Job::batch(["https://example.com/v1"])).await;

        assert_eq!(
            summary,
            BatchSummary {
                completed: 0,
                failed: 0,
                skipped: 1
            }
        );
        assert_eq!(catalog.video_count(), 0);
    }
}
