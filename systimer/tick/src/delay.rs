//! Blocking millisecond delay
//!
//! A dedicated countdown outside the timer bank. The caller arms it and spins
//! until the tick handler raises the expiry flag, so the delay must never be
//! entered from interrupt context: nothing would ever set the flag.

use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};

#[derive(Debug, Clone, Copy)]
struct DelayState {
    remaining: u32,
    expired: bool,
}

impl DelayState {
    const IDLE: Self = Self {
        remaining: 0,
        expired: false,
    };
}

/// Tick count actually waited for a request of `ticks`.
///
/// A request of one tick may be issued just before a tick boundary and end
/// almost immediately, so it is stretched to two to keep the ±1 tick bound.
pub const fn effective_ticks(ticks: u32) -> u32 {
    match ticks {
        1 => 2,
        n => n,
    }
}

/// One-slot countdown backing the blocking delay
pub struct BlockingDelay {
    state: Mutex<Cell<DelayState>>,
}

impl BlockingDelay {
    /// Idle countdown, never expired
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(DelayState::IDLE)),
        }
    }

    /// Load the countdown and clear the flag as one update
    pub fn arm(&self, ticks: u32) {
        critical_section::with(|cs| {
            self.state.borrow(cs).set(DelayState {
                remaining: ticks,
                expired: false,
            });
        });
    }

    /// Check if the armed countdown has run out
    pub fn is_expired(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).get().expired)
    }

    /// Block for `ticks` ticks, calling `idle` on every poll.
    ///
    /// Zero returns at once. Accuracy is ±1 tick.
    pub fn wait_with<F: FnMut()>(&self, ticks: u32, mut idle: F) {
        let ticks = effective_ticks(ticks);
        if ticks == 0 {
            return;
        }

        self.arm(ticks);
        while !self.is_expired() {
            idle();
        }
    }

    /// Block for `ticks` ticks, spinning in between polls
    pub fn wait(&self, ticks: u32) {
        self.wait_with(ticks, core::hint::spin_loop);
    }

    /// Count down by one tick. Tick handler only.
    pub(crate) fn tick(&self, cs: CriticalSection<'_>) {
        let cell = self.state.borrow(cs);
        let mut state = cell.get();
        if state.remaining > 0 {
            state.remaining -= 1;
            if state.remaining == 0 {
                state.expired = true;
            }
            cell.set(state);
        }
    }
}

impl Default for BlockingDelay {
    fn default() -> Self {
        Self::new()
    }
}
