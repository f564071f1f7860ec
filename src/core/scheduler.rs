use crate::core::rotation::{millis_until_next_bucket, ROTATION_BUCKET_MS};
use crate::domain::ports::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delay until the boundary after `now`. A refresh that lands exactly on a
/// boundary waits a full bucket.
fn delay_after_refresh(now_millis: i64) -> Duration {
    match millis_until_next_bucket(now_millis) {
        0 => Duration::from_millis(ROTATION_BUCKET_MS as u64),
        ms => Duration::from_millis(ms.max(0) as u64),
    }
}

/// Re-runs a refresh callback on every rotation bucket boundary.
///
/// `start` fires the callback once immediately, then sleeps until the next
/// boundary as read from the injected clock. The delay is recomputed from the
/// clock after every refresh, so a wall clock that drifts from the runtime
/// timer is re-aligned each bucket. `stop` (or dropping the scheduler) cancels
/// the pending timer; no callback runs after it returns.
pub struct RefreshScheduler {
    clock: Arc<dyn Clock>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            handle: None,
        }
    }

    /// Must be called from within a tokio runtime. Restarting replaces any
    /// previously running schedule.
    pub fn start<F>(&mut self, mut on_refresh: F)
    where
        F: FnMut(i64) + Send + 'static,
    {
        self.stop();

        let clock = Arc::clone(&self.clock);
        let now = clock.now_millis();
        on_refresh(now);

        let mut delay = Duration::from_millis(millis_until_next_bucket(now).max(0) as u64);
        tracing::debug!(delay_ms = delay.as_millis() as u64, "next rotation scheduled");

        self.handle = Some(tokio::spawn(async move {
            loop {
                sleep(delay).await;
                let now = clock.now_millis();
                on_refresh(now);
                delay = delay_after_refresh(now);
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("rotation refresh stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
