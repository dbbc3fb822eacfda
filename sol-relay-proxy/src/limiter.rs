use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-IP counter for one fixed window
#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window per-IP rate limiter
///
/// Each caller gets a budget of `max` requests per `window`. The counter
/// resets when its window elapses; there is no sliding behavior, so a burst
/// straddling a window boundary can see up to `2 * max` requests through.
///
/// All counters sit behind one `Mutex` so concurrent requests from the same
/// origin never undercount.
#[derive(Debug)]
pub struct RateLimiter {
    max: u32,
    window: Duration,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max` requests per `window` per IP
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request from `ip` and report whether it fits the budget
    ///
    /// Returns `false` for the first request past the limit; the caller is
    /// expected to reject without forwarding. Over-limit requests still do
    /// not consume budget from the next window.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        let window = windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.max {
            return false;
        }
        window.count += 1;
        true
    }
}
