//! Software timer slots and bounded run-time arithmetic

use core::fmt;

/// Wrap point of the run-time clock.
///
/// The clock never holds this value: it counts `0..RUN_TIME_SENTINEL` and
/// returns to 0 on the tick that would reach it. At 1 kHz one lap is about
/// 24.85 days.
pub const RUN_TIME_SENTINEL: i32 = i32::MAX;

/// Timer operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerMode {
    /// Expires once, then stays inert until rearmed
    #[default]
    OneShot,
    /// Reloads from the preload value on every expiry
    AutoReload,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OneShot => defmt::write!(fmt, "OneShot"),
            Self::AutoReload => defmt::write!(fmt, "AutoReload"),
        }
    }
}

/// One countdown slot of the software timer bank.
///
/// `expired` is a latch: the tick path sets it, only [`SoftTimer::take_expired`]
/// clears it. Arming and disarming overwrite every field at once, so callers
/// sharing a slot with an interrupt must do that inside a critical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftTimer {
    count: u32,
    preload: u32,
    expired: bool,
    mode: TimerMode,
}

impl SoftTimer {
    /// Disarmed, zeroed slot
    pub const IDLE: Self = Self {
        count: 0,
        preload: 0,
        expired: false,
        mode: TimerMode::OneShot,
    };

    /// Create a disarmed slot
    pub const fn new() -> Self {
        Self::IDLE
    }

    /// Re-arm the slot with a fresh period and mode
    pub fn arm(&mut self, period: u32, mode: TimerMode) {
        self.count = period;
        self.preload = period;
        self.expired = false;
        self.mode = mode;
    }

    /// Disarm the slot. The preload value is left as it was.
    pub fn disarm(&mut self) {
        self.count = 0;
        self.expired = false;
        self.mode = TimerMode::OneShot;
    }

    /// Advance the slot by one tick.
    ///
    /// Returns `true` on the tick the countdown reaches zero. Auto-reload
    /// slots are refilled from the preload in the same step.
    pub fn tick(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        if self.count != 0 {
            return false;
        }
        self.expired = true;
        if self.mode == TimerMode::AutoReload {
            self.count = self.preload;
        }
        true
    }

    /// Consume the expiry latch
    pub fn take_expired(&mut self) -> bool {
        core::mem::replace(&mut self.expired, false)
    }

    /// Remaining ticks until expiry
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Reload value
    pub const fn preload(&self) -> u32 {
        self.preload
    }

    /// Current mode
    pub const fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Peek at the expiry latch without consuming it
    pub const fn is_expired(&self) -> bool {
        self.expired
    }

    /// Check if the slot is still counting down
    pub const fn is_running(&self) -> bool {
        self.count > 0
    }
}

impl Default for SoftTimer {
    fn default() -> Self {
        Self::IDLE
    }
}

impl fmt::Display for SoftTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {}/{}ticks{}",
            self.mode,
            self.count,
            self.preload,
            if self.expired { " expired" } else { "" }
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SoftTimer {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SoftTimer mode={} count={} preload={} expired={}",
            self.mode,
            self.count,
            self.preload,
            self.expired
        );
    }
}

/// Next value of a run-time counter that wraps at `sentinel`.
pub const fn wrapping_increment(value: i32, sentinel: i32) -> i32 {
    let next = value.wrapping_add(1);
    if next >= sentinel || next < 0 {
        0
    } else {
        next
    }
}

/// Ticks between `last` and `now` on a counter that wraps at `sentinel`.
///
/// At most one wrap is assumed between the two samples. If the caller sampled
/// `last` more than one full lap ago the result is meaningless; sampling
/// faster than the wrap period is the caller's obligation.
pub const fn wrapped_elapsed(now: i32, last: i32, sentinel: i32) -> i32 {
    if now >= last {
        now.wrapping_sub(last)
    } else {
        sentinel.wrapping_sub(last).wrapping_add(now)
    }
}
