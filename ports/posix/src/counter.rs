//! Simulated SysTick down-counter
//!
//! Derives the register value from a monotonic clock: the counter runs at the
//! configured counter frequency, counts from `reload` down to zero and
//! reloads, exactly like the hardware it replaces.

use std::time::Instant;

use systimer_tick::{DownCounter, TickConfig};

const NSEC_PER_SEC: u128 = 1_000_000_000;

/// Host stand-in for the 24-bit SysTick current-value register
#[derive(Debug, Clone)]
pub struct SimulatedSysTick {
    epoch: Instant,
    counter_hz: u128,
    reload: u32,
}

impl SimulatedSysTick {
    /// Counter starting at `reload` now
    pub fn new(config: &TickConfig) -> Self {
        Self::starting_at(Instant::now(), config)
    }

    pub fn starting_at(epoch: Instant, config: &TickConfig) -> Self {
        Self {
            epoch,
            counter_hz: u128::from(config.counter_hz()),
            reload: config.reload(),
        }
    }

    /// Counter value `elapsed_ns` nanoseconds after the epoch
    pub fn value_after(&self, elapsed_ns: u128) -> u32 {
        let cycles = elapsed_ns * self.counter_hz / NSEC_PER_SEC;
        let lap = u128::from(self.reload) + 1;
        // `cycles % lap` never exceeds `reload`, which is a u32
        self.reload - (cycles % lap) as u32
    }
}

impl DownCounter for SimulatedSysTick {
    fn current(&self) -> u32 {
        self.value_after(self.epoch.elapsed().as_nanos())
    }

    fn reload(&self) -> u32 {
        self.reload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> SimulatedSysTick {
        SimulatedSysTick::new(&TickConfig::default())
    }

    #[test]
    fn test_counts_down_from_reload() {
        let counter = counter();
        assert_eq!(counter.value_after(0), 71_999);
        // 72 cycles per microsecond
        assert_eq!(counter.value_after(1_000), 71_999 - 72);
    }

    #[test]
    fn test_reloads_after_zero() {
        let counter = counter();
        // one full lap is exactly one millisecond
        assert_eq!(counter.value_after(1_000_000), 71_999);
        let almost = counter.value_after(999_990);
        assert!(almost < 1_000, "value {almost}");
    }

    #[test]
    fn test_current_stays_in_range() {
        let counter = counter();
        for _ in 0..1_000 {
            assert!(counter.current() <= counter.reload());
        }
    }
}
