//! `embedded-hal` delay provider

use embedded_hal::delay::DelayNs;

use crate::handler::SysTimer;
use crate::micros::DownCounter;

/// [`DelayNs`] backed by the tick time base.
///
/// Millisecond requests block on the tick countdown; anything finer spins on
/// the hardware counter. Every request waits at least as long as asked.
pub struct SysDelay<'a, C, const N: usize> {
    timer: &'a SysTimer<N>,
    counter: C,
}

impl<'a, C: DownCounter, const N: usize> SysDelay<'a, C, N> {
    pub fn new(timer: &'a SysTimer<N>, counter: C) -> Self {
        Self { timer, counter }
    }

    /// Release the counter
    pub fn free(self) -> C {
        self.counter
    }

    /// Whole ticks covering `ms` milliseconds at the configured rate
    pub(crate) fn ms_to_ticks(&self, ms: u32) -> u32 {
        let tick_hz = u64::from(self.timer.config().tick_hz);
        let ticks = (u64::from(ms) * tick_hz).div_ceil(1_000);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// Countdown to arm for `ms` milliseconds.
    ///
    /// The blocking delay may be armed just before a tick boundary and lose
    /// most of its first period, so one extra tick keeps the wait a minimum.
    pub(crate) fn armed_ticks(&self, ms: u32) -> u32 {
        match self.ms_to_ticks(ms) {
            0 => 0,
            ticks => ticks.saturating_add(1),
        }
    }
}

impl<C: DownCounter, const N: usize> DelayNs for SysDelay<'_, C, N> {
    fn delay_ns(&mut self, ns: u32) {
        self.timer.delay_us(&self.counter, ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.timer.delay_us(&self.counter, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        let ticks = self.armed_ticks(ms);
        self.timer.delay_ms(ticks);
    }
}
