use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Enforces a minimum interval between requests, measured from the end of the
/// previous request, to prevent API throttling
pub struct RateLimiter {
    interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            last_request: None,
        }
    }

    /// Suspend until the interval since the previous request has elapsed.
    /// The first request goes through immediately.
    pub async fn wait(&mut self) {
        if let Some(remaining) = self.remaining() {
            sleep(remaining).await;
        }
    }

    /// Record the end of a request; the next wait is measured from here.
    pub fn mark(&mut self) {
        self.last_request = Some(Instant::now());
    }

    fn remaining(&self) -> Option<Duration> {
        let last = self.last_request?;
        self.interval
            .checked_sub(last.elapsed())
            .filter(|remaining| !remaining.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_wait_before_first_request() {
        let limiter = RateLimiter::new(1100);
        assert!(limiter.remaining().is_none());
    }

    #[test]
    fn test_remaining_after_mark() {
        let mut limiter = RateLimiter::new(10_000);
        limiter.mark();

        let remaining = limiter.remaining().expect("interval should not have elapsed");
        assert!(remaining <= Duration::from_millis(10_000));
        assert!(remaining > Duration::from_millis(9_000));
    }

    #[test]
    fn test_elapsed_interval_clears_wait() {
        let mut limiter = RateLimiter::new(1);
        limiter.mark();
        std::thread::sleep(Duration::from_millis(5));

        assert!(limiter.remaining().is_none());
    }
}
