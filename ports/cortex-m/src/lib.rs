#![no_std]

//! Cortex-M port of the systimer tick subsystem.
//!
//! Programs the core SysTick timer as the tick source and routes its
//! exception to [`systimer_tick::isr`]. Interrupt masking for the shared
//! state comes from cortex-m's single-core critical-section implementation.

use cortex_m::peripheral::scb::VectActive;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{SCB, SYST};
use systimer_tick::{ClockSource, DownCounter, TickConfig, TickHooks, TickResult};

/// SysTick current-value register seen as a [`DownCounter`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystCounter;

impl DownCounter for SystCounter {
    fn current(&self) -> u32 {
        SYST::get_current()
    }

    fn reload(&self) -> u32 {
        SYST::get_reload()
    }
}

/// Initialise the global time base and start SysTick.
///
/// Fails without touching the peripheral if `config` cannot be produced by
/// the 24-bit counter.
pub fn init(syst: &mut SYST, config: TickConfig, hooks: TickHooks) -> TickResult<SystCounter> {
    config.validate()?;
    systimer_tick::init(config, hooks);

    syst.disable_counter();
    syst.set_clock_source(match config.clock_source {
        ClockSource::Core => SystClkSource::Core,
        ClockSource::External => SystClkSource::External,
    });
    syst.set_reload(config.reload());
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    Ok(SystCounter)
}

/// Block for `ticks` tick periods.
///
/// # Panics
///
/// Halts when called from any exception or interrupt handler; the wait would
/// never end with the tick masked or preempted.
#[track_caller]
pub fn delay_ms(ticks: u32) {
    if SCB::vect_active() != VectActive::ThreadMode {
        let caller = core::panic::Location::caller();
        panic!(
            "delay_ms called from interrupt context ({}:{})",
            caller.file(),
            caller.line()
        );
    }
    systimer_tick::delay_ms(ticks);
}

/// Spin for at least `us` microseconds on SysTick
pub fn delay_us(us: u32) {
    systimer_tick::delay_us(&SystCounter, us);
}

#[cfg(feature = "vector")]
#[doc(hidden)]
#[cortex_m_rt::exception]
fn SysTick() {
    systimer_tick::isr();
}
