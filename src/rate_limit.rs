//! Client-side request quota.
//!
//! [`RateLimiter`] approximates the server's per-minute budget so the client
//! backs off before the server starts answering 429. The remote view, when a
//! response reports it, replaces the local estimate: other processes sharing
//! the same key consume budget this tracker never sees.
//!
//! The state lock is never held across an await. Each mutation (a decrement,
//! a window roll, a header merge) happens entirely under one lock acquisition.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use tokio::time::Instant;

/// Length of one quota window.
pub const QUOTA_WINDOW: Duration = Duration::from_secs(60);

/// Header carrying the remote remaining budget.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the remote window reset.
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Reset values above this are Unix timestamps, below it relative seconds.
const EPOCH_THRESHOLD_SECS: u64 = 1_000_000_000;

/// Longest reset delay taken from a server; anything further out is treated as malformed.
const MAX_RESET_DELAY: Duration = Duration::from_secs(3_600);

/// Point-in-time view of the quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaInfo {
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the current window ends.
    pub reset_at: Instant,
}

impl QuotaInfo {
    /// Time until the current window ends (zero if already past).
    pub fn resets_in(&self) -> Duration {
        self.reset_at.saturating_duration_since(Instant::now())
    }
}

#[derive(Debug)]
struct QuotaState {
    limit: u32,
    remaining: u32,
    reset_at: Instant,
}

impl QuotaState {
    /// Opens a fresh window at `now` if the current one has ended.
    ///
    /// The new window starts at `now`, not at the stale boundary, so several
    /// elapsed windows collapse into a single roll.
    fn roll_if_elapsed(&mut self, now: Instant, window: Duration) {
        if now >= self.reset_at {
            self.remaining = self.limit;
            self.reset_at = now + window;
        }
    }
}

/// Rolling request budget for one credential.
#[derive(Debug)]
pub struct RateLimiter {
    state: Mutex<QuotaState>,
    window: Duration,
}

impl RateLimiter {
    /// Creates a tracker allowing `limit` requests per minute.
    pub fn new(limit: u32) -> Self {
        Self::with_window(limit, QUOTA_WINDOW)
    }

    /// Creates a tracker with a custom window length.
    pub fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            state: Mutex::new(QuotaState {
                limit,
                remaining: limit,
                reset_at: Instant::now() + window,
            }),
            window,
        }
    }

    /// Takes one unit of budget, waiting for the next window if none is left.
    ///
    /// Returns immediately when budget is available. Otherwise sleeps until
    /// the current window ends and tries again; concurrent waiters race for
    /// the fresh budget in no particular order.
    pub async fn check_limit(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock();
                let now = Instant::now();
                state.roll_if_elapsed(now, self.window);

                if state.remaining > 0 {
                    state.remaining -= 1;
                    return;
                }
                state.reset_at.saturating_duration_since(now)
            };

            tracing::debug!(
                wait_ms = wait.as_millis() as u64,
                "Request budget exhausted, waiting for quota window reset"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Adopts the remote quota view from response headers.
    ///
    /// Reads `X-RateLimit-Remaining` and `X-RateLimit-Reset`. Each value that
    /// is present and parses replaces the local one; anything missing,
    /// malformed or more than an hour out leaves the local estimate untouched.
    pub fn update_from_headers(&self, headers: &HeaderMap) {
        let remaining = header_u64(headers, REMAINING_HEADER)
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX));
        let reset_in = header_u64(headers, RESET_HEADER).and_then(reset_delay);

        if remaining.is_some() || reset_in.is_some() {
            tracing::trace!(?remaining, ?reset_in, "Adopting remote rate limit state");
        }
        self.update(remaining, reset_in);
    }

    /// Merges a remote quota observation into the local state.
    ///
    /// `local = remote if remote present else local`, per field. The remote
    /// remaining is capped at the configured ceiling.
    pub fn update(&self, remaining: Option<u32>, reset_in: Option<Duration>) {
        let mut state = self.state.lock();
        if let Some(remaining) = remaining {
            state.remaining = remaining.min(state.limit);
        }
        if let Some(reset_at) = reset_in.and_then(|d| Instant::now().checked_add(d)) {
            state.reset_at = reset_at;
        }
    }

    /// Returns a snapshot of the current quota without changing it.
    pub fn get_info(&self) -> QuotaInfo {
        let state = self.state.lock();
        QuotaInfo {
            limit: state.limit,
            remaining: state.remaining,
            reset_at: state.reset_at,
        }
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Converts a reset header value into a delay from now, or `None` when it
/// lies beyond [`MAX_RESET_DELAY`].
fn reset_delay(value: u64) -> Option<Duration> {
    let secs = if value < EPOCH_THRESHOLD_SECS {
        value
    } else {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        value.saturating_sub(now)
    };
    Some(Duration::from_secs(secs)).filter(|d| *d <= MAX_RESET_DELAY)
}
