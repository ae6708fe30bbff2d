//! One-shot restart timers

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handle to a scheduled restart
///
/// Dropping the handle does not cancel the task; call [`RestartTimer::cancel`].
#[derive(Debug)]
pub struct RestartTimer {
    id: u64,
    handle: JoinHandle<()>,
}

impl RestartTimer {
    /// Run `on_fire` after `delay` on the current tokio runtime
    pub fn schedule<F>(id: u64, delay: Duration, on_fire: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire.await;
        });
        Self { id, handle }
    }

    /// Identifier used to tell a superseded timer from the current one
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Abort the task if it has not fired yet
    pub fn cancel(self) {
        tracing::debug!(timer_id = self.id, "Cancelling restart timer");
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let timer = RestartTimer::schedule(1, Duration::from_secs(10), async move {
            flag.store(true, Ordering::SeqCst);
        });
        assert_eq!(timer.id(), 1);

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let timer = RestartTimer::schedule(2, Duration::from_secs(10), async move {
            flag.store(true, Ordering::SeqCst);
        });
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
