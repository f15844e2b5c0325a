//! Sliding-window rate limiter for provider requests and tokens

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Rate limiter tracking requests and token usage over a sliding window
pub struct RateLimiter {
    requests_per_window: u32,
    tokens_per_window: u32,
    window: Duration,
    last_requests: Mutex<VecDeque<Instant>>,
    token_usage: Mutex<VecDeque<(Instant, u32)>>,
}

impl RateLimiter {
    /// Create a limiter over a one-minute window
    pub fn new(requests_per_minute: u32, tokens_per_minute: u32) -> Self {
        Self::with_window(requests_per_minute, tokens_per_minute, DEFAULT_WINDOW)
    }

    pub fn with_window(requests: u32, tokens: u32, window: Duration) -> Self {
        Self {
            requests_per_window: requests.max(1),
            tokens_per_window: tokens,
            window,
            last_requests: Mutex::new(VecDeque::new()),
            token_usage: Mutex::new(VecDeque::new()),
        }
    }

    /// Wait until a request slot is free, then claim it
    pub async fn acquire(&self) {
        loop {
            let mut last = self.last_requests.lock().await;
            let now = Instant::now();
            evict_before(&mut last, now, self.window, |t| *t);

            if last.len() < self.requests_per_window as usize {
                last.push_back(now);
                return;
            }

            let wait = last
                .front()
                .map(|&oldest| self.window.saturating_sub(now.duration_since(oldest)))
                .unwrap_or_default()
                + Duration::from_millis(10);
            drop(last);

            tracing::debug!("Request limit reached, waiting {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }

    /// Record token usage for rate limiting
    pub async fn record_tokens(&self, tokens: u32) {
        let mut usage = self.token_usage.lock().await;
        let now = Instant::now();
        evict_before(&mut usage, now, self.window, |(t, _)| *t);
        usage.push_back((now, tokens));
    }

    /// Tokens used within the current window
    pub async fn current_token_usage(&self) -> u32 {
        let mut usage = self.token_usage.lock().await;
        evict_before(&mut usage, Instant::now(), self.window, |(t, _)| *t);
        usage.iter().map(|(_, t)| t).sum()
    }

    /// Check if we have token capacity
    pub async fn has_token_capacity(&self, needed: u32) -> bool {
        let current = self.current_token_usage().await;
        current.saturating_add(needed) <= self.tokens_per_window
    }

    /// Wait until `needed` more tokens fit in the window
    ///
    /// A request larger than the whole budget waits for an empty window
    /// instead of forever.
    pub async fn wait_for_token_capacity(&self, needed: u32) {
        let needed = needed.min(self.tokens_per_window);
        while !self.has_token_capacity(needed).await {
            tracing::debug!("Token limit reached, waiting for capacity");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}

fn evict_before<T>(queue: &mut VecDeque<T>, now: Instant, window: Duration, at: impl Fn(&T) -> Instant) {
    while let Some(front) = queue.front() {
        if now.duration_since(at(front)) > window {
            queue.pop_front();
        } else {
            break;
        }
    }
}
