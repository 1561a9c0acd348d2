//! Tick source configuration

use core::fmt;

use crate::{TickError, TickResult};

/// Default core clock of the reference board (72 MHz).
pub const DEFAULT_CORE_CLOCK_HZ: u32 = 72_000_000;

/// Default tick rate (1 kHz, one tick per millisecond).
pub const DEFAULT_TICK_HZ: u32 = 1_000;

/// Largest reload value a SysTick-style 24-bit down-counter accepts.
pub const MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Number of ticks between two invocations of the per-10-tick hook.
pub const DECA_TICKS: u8 = 10;

/// Clock feeding the hardware down-counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Counter runs at the core clock
    Core,
    /// Counter runs at the external reference, core clock / 8
    External,
}

impl ClockSource {
    /// Divider applied to the core clock
    pub const fn divider(self) -> u32 {
        match self {
            Self::Core => 1,
            Self::External => 8,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockSource {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Core => defmt::write!(fmt, "Core"),
            Self::External => defmt::write!(fmt, "External"),
        }
    }
}

/// Configuration of the periodic tick source.
///
/// The hardware counter is reloaded with `counter_hz / tick_hz - 1` so that
/// one full countdown spans exactly one tick. The same counter backs the
/// microsecond delay, which needs at least one counter tick per microsecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    pub core_clock_hz: u32,
    pub tick_hz: u32,
    pub clock_source: ClockSource,
}

impl TickConfig {
    /// 72 MHz core, 1 kHz tick, counter on the core clock.
    pub const DEFAULT: Self = Self {
        core_clock_hz: DEFAULT_CORE_CLOCK_HZ,
        tick_hz: DEFAULT_TICK_HZ,
        clock_source: ClockSource::Core,
    };

    /// Creates a new configuration builder.
    pub fn builder() -> TickConfigBuilder {
        TickConfigBuilder::default()
    }

    /// Frequency of the hardware down-counter in hertz.
    pub const fn counter_hz(&self) -> u32 {
        self.core_clock_hz / self.clock_source.divider()
    }

    /// Value loaded into the down-counter on every wrap.
    pub const fn reload(&self) -> u32 {
        match self.counter_hz().checked_div(self.tick_hz) {
            Some(cycles) => cycles.saturating_sub(1),
            None => 0,
        }
    }

    /// Counter ticks elapsed per microsecond.
    pub const fn ticks_per_us(&self) -> u32 {
        self.counter_hz() / 1_000_000
    }

    /// Tick period in microseconds.
    pub const fn tick_period_us(&self) -> u32 {
        match 1_000_000u32.checked_div(self.tick_hz) {
            Some(period) => period,
            None => 0,
        }
    }

    /// Checks that the configuration can be programmed into the counter.
    pub fn validate(&self) -> TickResult<()> {
        if self.tick_hz == 0 || self.tick_hz > self.counter_hz() {
            return Err(TickError::InvalidTickRate);
        }
        if self.reload() > MAX_RELOAD {
            return Err(TickError::ReloadOutOfRange);
        }
        if self.ticks_per_us() == 0 {
            return Err(TickError::CounterTooSlow);
        }
        Ok(())
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TickConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Hz tick from {}Hz ({:?})",
            self.tick_hz, self.core_clock_hz, self.clock_source
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{}Hz tick from {}Hz ({})",
            self.tick_hz,
            self.core_clock_hz,
            self.clock_source
        );
    }
}

/// Builder for tick source configuration.
#[derive(Debug, Clone)]
pub struct TickConfigBuilder {
    config: TickConfig,
}

impl Default for TickConfigBuilder {
    fn default() -> Self {
        Self {
            config: TickConfig::DEFAULT,
        }
    }
}

impl TickConfigBuilder {
    /// Sets the core clock frequency.
    pub fn core_clock_hz(mut self, hz: u32) -> Self {
        self.config.core_clock_hz = hz;
        self
    }

    /// Sets the tick rate.
    ///
    /// 1000 gives a 1ms tick; 500 and 2000 give 2ms and 500us. Low-power
    /// designs commonly drop to 100 (10ms).
    pub fn tick_hz(mut self, hz: u32) -> Self {
        self.config.tick_hz = hz;
        self
    }

    /// Selects the clock feeding the down-counter.
    pub fn clock_source(mut self, source: ClockSource) -> Self {
        self.config.clock_source = source;
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> TickResult<TickConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
