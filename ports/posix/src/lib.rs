//! POSIX port of the systimer tick subsystem.
//!
//! Hosts the tick service on Linux/Unix: a thread replaces the hardware tick
//! interrupt, a monotonic-clock model replaces the SysTick counter, and the
//! `std` critical-section implementation replaces interrupt masking. Useful
//! for running firmware logic and its tests on a workstation.

mod counter;
mod logger;
mod time;

pub use counter::SimulatedSysTick;
pub use logger::init_logger;
pub use time::{is_ticking, set_tick_rate, start_ticker, stop_ticker, tick_rate, ClockTick};

use systimer_tick::{TickConfig, TickError, TickHooks, TickResult};

/// Fastest tick a sleeping thread can sustain
pub const MAX_TICK_HZ: u32 = 10_000;

/// Running host time base
///
/// Owns the simulated counter used by microsecond delays. Dropping the port
/// stops the ticker thread.
pub struct PosixPort {
    config: TickConfig,
    counter: SimulatedSysTick,
}

impl PosixPort {
    /// Initialise the global time base and start ticking
    pub fn start(config: TickConfig, hooks: TickHooks) -> TickResult<Self> {
        config.validate()?;
        if config.tick_hz > MAX_TICK_HZ {
            return Err(TickError::InvalidTickRate);
        }

        systimer_tick::init(config, hooks);
        set_tick_rate(config.tick_hz);
        let counter = SimulatedSysTick::new(&config);
        start_ticker();

        log::info!("posix port up: {}", config);
        Ok(Self { config, counter })
    }

    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Simulated hardware counter backing microsecond delays
    pub fn counter(&self) -> &SimulatedSysTick {
        &self.counter
    }

    /// Spin for at least `us` microseconds
    pub fn delay_us(&self, us: u32) {
        systimer_tick::delay_us(&self.counter, us);
    }

    /// Stop the ticker thread
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for PosixPort {
    fn drop(&mut self) {
        stop_ticker();
    }
}
