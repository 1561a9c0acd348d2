#![no_std]
#![forbid(unsafe_code)]

//! # systimer tick service
//!
//! Software timers, a run-time clock and delay services driven by one
//! periodic hardware tick.
//!
//! The board port calls [`init`] once, programs its tick source and routes
//! the tick interrupt to [`isr`]. Application modules then use the free
//! functions below; the backing state is never exposed directly, so every
//! access goes through the critical-section discipline.
//!
//! ```rust,no_run
//! use systimer_tick::{check_timer, init, start_auto_timer, TickConfig, TickHooks};
//!
//! init(TickConfig::default(), TickHooks::NONE);
//! start_auto_timer(0, 500);
//!
//! loop {
//!     if check_timer(0) {
//!         // toggle the status LED
//!     }
//! }
//! ```

#[macro_use]
mod macros;

pub mod bank;
pub mod clock;
pub mod delay;
pub mod fatal;
pub mod hal;
pub mod handler;
pub mod micros;

pub use bank::TimerBank;
pub use clock::RunTimeClock;
pub use delay::{effective_ticks, BlockingDelay};
pub use fatal::Violation;
pub use hal::SysDelay;
pub use handler::{SysTimer, TickHooks};
pub use micros::{DownCounter, MicrosProbe};
pub use systimer_core::*;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod tests;

/// Number of software timer slots in the global time base
pub const TIMER_COUNT: usize = 4;

/// Global time base instance
static SYS_TIMER: SysTimer<TIMER_COUNT> = SysTimer::new();

/// Get the global time base
pub fn sys_timer() -> &'static SysTimer<TIMER_COUNT> {
    &SYS_TIMER
}

/// Zero all timers and install configuration and hooks
pub fn init(config: TickConfig, hooks: TickHooks) {
    sys_timer().init(config, hooks)
}

/// Tick interrupt body; call from the hardware tick vector
pub fn isr() {
    sys_timer().on_tick()
}

/// Start a one-shot timer
#[track_caller]
pub fn start_timer(id: usize, period: u32) {
    sys_timer().bank().start_once(id, period)
}

/// Start an auto-reload timer
#[track_caller]
pub fn start_auto_timer(id: usize, period: u32) {
    sys_timer().bank().start_auto(id, period)
}

/// Stop a timer
#[track_caller]
pub fn stop_timer(id: usize) {
    sys_timer().bank().stop(id)
}

/// Consume a timer expiry
pub fn check_timer(id: usize) -> bool {
    sys_timer().bank().check(id)
}

/// Ticks since boot
pub fn run_time() -> i32 {
    sys_timer().clock().now()
}

/// Ticks elapsed since an earlier [`run_time`] sample
pub fn check_run_time(last: i32) -> i32 {
    sys_timer().clock().elapsed_since(last)
}

/// Block for `ticks` tick periods
pub fn delay_ms(ticks: u32) {
    sys_timer().delay_ms(ticks)
}

/// Spin for at least `us` microseconds
pub fn delay_us<C: DownCounter + ?Sized>(counter: &C, us: u32) {
    sys_timer().delay_us(counter, us)
}
