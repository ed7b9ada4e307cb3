//! Token bucket pacing for the draw endpoint.
//!
//! A full history rebuild issues one request per round (potentially a few
//! thousand), so requests are paced to stay polite toward the public API.

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Token bucket rate limiter
pub struct RateLimiter {
    state: Mutex<BucketState>,
}

struct BucketState {
    tokens: f64,
    last_update: Instant,
    max_tokens: f64,
    refill_rate: f64, // tokens per second
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_minute` sustained throughput.
    pub fn new(requests_per_minute: u32) -> Self {
        let max_tokens = requests_per_minute.max(1) as f64;
        Self {
            state: Mutex::new(BucketState {
                tokens: max_tokens,
                last_update: Instant::now(),
                max_tokens,
                refill_rate: max_tokens / 60.0,
            }),
        }
    }

    #[cfg(test)]
    fn drained(requests_per_minute: u32) -> Self {
        let limiter = Self::new(requests_per_minute);
        limiter.state.try_lock().unwrap().tokens = 0.0;
        limiter
    }

    /// Acquire a token, waiting if the bucket is empty.
    pub async fn acquire(&self) {
        let wait = {
            let mut state = self.state.lock().await;

            let now = Instant::now();
            let elapsed = now.duration_since(state.last_update).as_secs_f64();
            state.tokens = (state.tokens + elapsed * state.refill_rate).min(state.max_tokens);
            state.last_update = now;

            if state.tokens >= 1.0 {
                state.tokens -= 1.0;
                None
            } else {
                let wait_secs = (1.0 - state.tokens) / state.refill_rate;
                state.tokens = 0.0;
                Some(Duration::from_secs_f64(wait_secs))
            }
        };

        if let Some(delay) = wait {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_within_bucket_is_immediate() {
        let limiter = RateLimiter::new(600);
        let start = Instant::now();
        for _ in 0..10 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_empty_bucket_waits_for_refill() {
        // 1200/min refills one token per 50ms
        let limiter = RateLimiter::drained(1200);

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(25));
    }
}
