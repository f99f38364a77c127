//! Injectable wall-clock.
//!
//! Seal decisions read "now" on every call. Production wires [`SystemClock`];
//! tests pin time with [`FixedClock`].

use chrono::{DateTime, Utc};

/// Single-method time source.
pub trait Clock: Send + Sync + core::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock each time it is asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always answers with the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Move the pinned instant (e.g. to step across a bid opening).
    pub fn set(&mut self, at: DateTime<Utc>) {
        self.at = at;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
