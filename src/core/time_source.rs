//! Wall-clock sources
//!
//! Schedule entries carry real instants. The engine asks a `TimeSource` for
//! "now" so tests and the headless driver can move time by hand.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real UTC time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven time
#[derive(Debug)]
pub struct ManualTime {
    now: Mutex<DateTime<Utc>>,
}

impl ManualTime {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
