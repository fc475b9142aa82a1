//! Time source seam

use std::cell::Cell;

use chrono::Utc;

use crate::types::TimestampMillis;

pub trait Clock {
    fn now_millis(&self) -> TimestampMillis;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> TimestampMillis {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<TimestampMillis>,
}

impl ManualClock {
    pub fn new(now: TimestampMillis) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> TimestampMillis {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> TimestampMillis {
        (**self).now_millis()
    }
}
