//! Request throttle enforcing a minimum interval between requests.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Minimum spacing between outbound requests.
///
/// Callers that arrive early wait until the interval has passed since the
/// previous request. Concurrent callers are serialized by the lock.
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RequestThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until a request may be sent and records it.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            sleep_until(previous + self.interval).await;
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_request_is_immediate() {
        let throttle = RequestThrottle::new(Duration::from_millis(500));
        let start = Instant::now();
        throttle.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn consecutive_requests_are_spaced() {
        let throttle = RequestThrottle::new(Duration::from_millis(40));
        let start = Instant::now();

        throttle.acquire().await;
        throttle.acquire().await;
        throttle.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn clones_share_the_same_clock() {
        let throttle = RequestThrottle::new(Duration::from_millis(40));
        let other = throttle.clone();
        let start = Instant::now();

        throttle.acquire().await;
        other.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
