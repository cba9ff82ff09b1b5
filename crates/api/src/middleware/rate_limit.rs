//! Sliding-window rate limiting keyed by client address and route.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use teller_shared::{AppError, RateLimitRule};
use tracing::warn;

use crate::{
    error::ApiError,
    messages::{MessageCatalog, keys},
};

/// Tracks recent hits per key and enforces every configured rule at once.
///
/// Keys whose hits have all aged out are swept at most once per longest
/// window, so idle clients do not accumulate.
#[derive(Debug)]
pub struct RateLimiter {
    rules: Vec<RateLimitRule>,
    longest_window: Duration,
    hits: DashMap<String, VecDeque<Instant>>,
    epoch: Instant,
    /// Nanoseconds after `epoch` of the last sweep.
    last_sweep: AtomicU64,
}

impl RateLimiter {
    /// Creates a limiter enforcing all of `rules`.
    #[must_use]
    pub fn new(rules: Vec<RateLimitRule>) -> Self {
        let longest_window = rules
            .iter()
            .map(|rule| rule.window)
            .max()
            .unwrap_or_default();
        Self {
            rules,
            longest_window,
            hits: DashMap::new(),
            epoch: Instant::now(),
            last_sweep: AtomicU64::new(0),
        }
    }

    /// Records a hit for `key` now.
    ///
    /// # Errors
    ///
    /// Returns the time until a retry can succeed when any rule is exhausted.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.check_at(key, Instant::now())
    }

    /// Records a hit for `key` at `now`. Rejected hits are not recorded.
    ///
    /// # Errors
    ///
    /// Returns the time until a retry can succeed when any rule is exhausted.
    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        if self.rules.is_empty() {
            return Ok(());
        }
        // The entry guard must be gone before sweeping touches every shard.
        let result = self.record(key, now);
        self.sweep_if_due(now);
        result
    }

    fn record(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut hits = self.hits.entry(key.to_string()).or_default();
        prune(&mut hits, now, self.longest_window);

        let mut retry_after: Option<Duration> = None;
        for rule in &self.rules {
            let max = rule.max_hits as usize;
            let in_window = hits
                .iter()
                .rev()
                .take_while(|hit| now.saturating_duration_since(**hit) < rule.window)
                .count();
            if in_window >= max {
                // The hit that must expire before one more fits.
                let wait = match hits.len().checked_sub(max).and_then(|i| hits.get(i)) {
                    Some(blocking) if max > 0 => rule
                        .window
                        .saturating_sub(now.saturating_duration_since(*blocking)),
                    _ => rule.window,
                };
                retry_after = Some(retry_after.map_or(wait, |current| current.max(wait)));
            }
        }

        match retry_after {
            Some(wait) => Err(wait),
            None => {
                hits.push_back(now);
                Ok(())
            }
        }
    }

    fn sweep_if_due(&self, now: Instant) {
        let elapsed = as_nanos(now.saturating_duration_since(self.epoch));
        let last = self.last_sweep.load(Ordering::Relaxed);
        if elapsed.saturating_sub(last) < as_nanos(self.longest_window) {
            return;
        }
        // One caller wins the sweep; the rest carry on.
        if self
            .last_sweep
            .compare_exchange(last, elapsed, Ordering::Relaxed, Ordering::Relaxed)
            .is_err()
        {
            return;
        }
        self.hits.retain(|_, hits| {
            prune(hits, now, self.longest_window);
            !hits.is_empty()
        });
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.hits.len()
    }
}

fn prune(hits: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while hits
        .front()
        .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= window)
    {
        hits.pop_front();
    }
}

fn as_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// State handed to `rate_limit_middleware`.
#[derive(Clone)]
pub struct RateLimitState {
    /// The limiter to consult.
    pub limiter: Arc<RateLimiter>,
    /// Catalog for the rejection message.
    pub messages: Arc<dyn MessageCatalog>,
}

/// Rejects requests once the caller's address exceeds the limiter's rules
/// for the requested path.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string());
    let key = format!("{client} {}", request.uri().path());

    match state.limiter.check(&key) {
        Ok(()) => next.run(request).await,
        Err(wait) => {
            // Round up so clients never retry early.
            let retry_after_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            warn!(key = %key, retry_after_secs, "Rate limit exceeded");
            ApiError(AppError::RateLimited {
                message: state.messages.render(keys::RATE_LIMITED).into_owned(),
                retry_after_secs,
            })
            .into_response()
        }
    }
}
