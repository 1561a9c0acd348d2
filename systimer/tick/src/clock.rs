//! Run-time clock

use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};
use systimer_core::{wrapped_elapsed, wrapping_increment, RUN_TIME_SENTINEL};

/// Ticks since boot, wrapping to 0 at the sentinel.
///
/// The counter is 32 bits wide, which many buses cannot read in one access, so
/// every foreground read happens inside a critical section.
pub struct RunTimeClock {
    ticks: Mutex<Cell<i32>>,
    sentinel: i32,
}

impl RunTimeClock {
    /// Clock wrapping at [`RUN_TIME_SENTINEL`]
    pub const fn new() -> Self {
        Self::with_sentinel(RUN_TIME_SENTINEL)
    }

    /// Clock wrapping at a custom point, mostly useful to exercise the wrap
    pub const fn with_sentinel(sentinel: i32) -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
            sentinel,
        }
    }

    /// Value at which the clock wraps to 0
    pub const fn sentinel(&self) -> i32 {
        self.sentinel
    }

    /// Current tick count
    pub fn now(&self) -> i32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// Ticks elapsed since `last`, a value previously returned by [`now`].
    ///
    /// Only one wrap between the two samples is accounted for. Callers must
    /// sample more often than once per lap (about 24.85 days at 1 kHz).
    ///
    /// [`now`]: RunTimeClock::now
    pub fn elapsed_since(&self, last: i32) -> i32 {
        wrapped_elapsed(self.now(), last, self.sentinel)
    }

    /// Advance by one tick. Tick handler only.
    pub(crate) fn advance(&self, cs: CriticalSection<'_>) -> i32 {
        let ticks = self.ticks.borrow(cs);
        let next = wrapping_increment(ticks.get(), self.sentinel);
        ticks.set(next);
        next
    }
}

impl Default for RunTimeClock {
    fn default() -> Self {
        Self::new()
    }
}
