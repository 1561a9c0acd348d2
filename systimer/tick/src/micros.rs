//! Microsecond busy-wait on the hardware down-counter
//!
//! The tick interrupt is far too coarse for microsecond waits, so this module
//! reads the counter that generates it directly. No shared state is touched
//! and no critical section is needed. Interrupts taken during the wait only
//! make it longer: the requested time is a lower bound.

/// Free-running down-counter that reloads after reaching zero
pub trait DownCounter {
    /// Current counter value
    fn current(&self) -> u32;

    /// Value the counter restarts from after zero
    fn reload(&self) -> u32;
}

impl<C: DownCounter + ?Sized> DownCounter for &C {
    fn current(&self) -> u32 {
        (**self).current()
    }

    fn reload(&self) -> u32 {
        (**self).reload()
    }
}

/// Accumulates counter ticks across successive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicrosProbe {
    reload: u32,
    last: u32,
    elapsed: u64,
}

impl MicrosProbe {
    /// Probe for a counter reloading to `reload`, last read at `initial`
    pub const fn new(reload: u32, initial: u32) -> Self {
        Self {
            reload,
            last: initial,
            elapsed: 0,
        }
    }

    /// Probe anchored at the counter's present value
    pub fn start<C: DownCounter + ?Sized>(counter: &C) -> Self {
        Self::new(counter.reload(), counter.current())
    }

    /// Fold a new counter reading in and return the running total.
    ///
    /// A reading above the previous one means the counter passed zero and was
    /// reloaded in between.
    pub fn sample(&mut self, now: u32) -> u64 {
        if now != self.last {
            let step = if now < self.last {
                u64::from(self.last - now)
            } else {
                u64::from(self.reload.saturating_sub(now)) + u64::from(self.last)
            };
            self.elapsed += step;
            self.last = now;
        }
        self.elapsed
    }

    /// Counter ticks accumulated so far
    pub const fn elapsed(&self) -> u64 {
        self.elapsed
    }
}

/// Spin until `ticks` counter ticks have elapsed
pub fn delay_ticks<C: DownCounter + ?Sized>(counter: &C, ticks: u64) {
    if ticks == 0 {
        return;
    }

    let mut probe = MicrosProbe::start(counter);
    while probe.sample(counter.current()) < ticks {
        core::hint::spin_loop();
    }
}

/// Counter ticks covering at least `us` microseconds at `counter_hz`.
///
/// Rounded up, so clocks that are not a whole number of MHz still wait the
/// full time.
pub const fn us_to_ticks(counter_hz: u32, us: u32) -> u64 {
    (us as u64 * counter_hz as u64).div_ceil(1_000_000)
}

/// Spin for at least `us` microseconds on a counter running at `counter_hz`
pub fn delay_us<C: DownCounter + ?Sized>(counter: &C, counter_hz: u32, us: u32) {
    delay_ticks(counter, us_to_ticks(counter_hz, us));
}
