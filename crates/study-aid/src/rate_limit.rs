use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::AppError;

/// Token bucket shared by every oracle-backed endpoint.
///
/// Holds up to `rps` tokens and refills at `rps` tokens per second.
#[derive(Clone)]
pub struct RateLimiter {
    rps: u32,
    bucket: Arc<Mutex<Bucket>>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last: Instant,
}

impl RateLimiter {
    /// `None` when `rps` is zero, i.e. limiting disabled.
    pub fn new(rps: u32) -> Option<Self> {
        (rps > 0).then(|| Self {
            rps,
            bucket: Arc::new(Mutex::new(Bucket {
                tokens: f64::from(rps),
                last: Instant::now(),
            })),
        })
    }

    pub fn rps(&self) -> u32 {
        self.rps
    }

    pub async fn acquire(&self) -> Result<(), AppError> {
        let capacity = f64::from(self.rps);
        let mut bucket = self.bucket.lock().await;
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last);
        bucket.last = now;
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * capacity).min(capacity);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return Ok(());
        }

        let wait = Duration::from_secs_f64((1.0 - bucket.tokens) / capacity);
        Err(AppError::RateLimited(format!(
            "rate limit exceeded ({} requests/s): try again in ~{}ms",
            self.rps,
            wait.as_millis().max(1)
        )))
    }
}
