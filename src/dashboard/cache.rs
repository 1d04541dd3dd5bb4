use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::pipeline::PipelineRun;

/// Holds the latest run for `ttl`; callers that find it stale serialize on the
/// lock so a single re-run happens.
pub struct RunCache {
    ttl: Duration,
    slot: Mutex<Option<(Arc<PipelineRun>, Instant)>>,
}

impl RunCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Arc<PipelineRun>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PipelineRun>,
    {
        self.get_or_refresh_at(Instant::now(), refresh).await
    }

    /// Same as [`RunCache::get_or_refresh`] with an explicit current instant
    pub async fn get_or_refresh_at<F, Fut>(&self, now: Instant, refresh: F) -> Arc<PipelineRun>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PipelineRun>,
    {
        let mut slot = self.slot.lock().await;
        if let Some((run, stored_at)) = slot.as_ref() {
            if now.saturating_duration_since(*stored_at) < self.ttl {
                debug!("Serving cached run");
                return Arc::clone(run);
            }
        }

        info!("🔄 Cache empty or expired, running pipeline");
        let run = Arc::new(refresh().await);
        *slot = Some((Arc::clone(&run), now));
        run
    }

    /// Force the next call to re-run the pipeline
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Territory;
    use crate::pipeline::normalize::NormalizationReport;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn empty_run() -> PipelineRun {
        PipelineRun {
            territory: Territory::Martinique,
            table: Vec::new(),
            report: NormalizationReport::default(),
            outcomes: Vec::new(),
            synthetic: false,
            generated_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    async fn counted(cache: &RunCache, at: Instant, runs: &AtomicUsize) {
        cache
            .get_or_refresh_at(at, || async move {
                runs.fetch_add(1, Ordering::SeqCst);
                empty_run()
            })
            .await;
    }

    #[tokio::test]
    async fn test_cache_reuses_run_until_ttl() {
        let cache = RunCache::new(Duration::from_secs(3600));
        let runs = AtomicUsize::new(0);
        let start = Instant::now();

        counted(&cache, start, &runs).await;
        counted(&cache, start + Duration::from_secs(3599), &runs).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        counted(&cache, start + Duration::from_secs(3600), &runs).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_rerun() {
        let cache = RunCache::new(Duration::from_secs(3600));
        let runs = AtomicUsize::new(0);
        let start = Instant::now();

        counted(&cache, start, &runs).await;
        cache.invalidate().await;
        counted(&cache, start, &runs).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
