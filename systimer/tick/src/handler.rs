//! Tick interrupt handler
//!
//! [`SysTimer`] aggregates everything the periodic interrupt drives. One call
//! to [`SysTimer::on_tick`] per hardware tick, in this order:
//!
//! 1. blocking delay countdown
//! 2. every software timer slot
//! 3. run-time clock
//! 4. per-tick hook
//! 5. per-10-tick hook, every tenth call
//! 6. task bookkeeping hook
//!
//! Steps 1-3 form one critical section. Hooks run after it, so they see this
//! tick's values and may call back into the query surface.

use core::cell::Cell;

use critical_section::Mutex;
use systimer_core::{TickConfig, DECA_TICKS};

use crate::bank::TimerBank;
use crate::clock::RunTimeClock;
use crate::delay::BlockingDelay;
use crate::fatal::{self, Violation};
use crate::micros::{self, DownCounter};

fn no_hook() {}

/// Clears the in-handler flag when the hooks are done, even if one unwinds
struct HandlerExit<'a> {
    in_handler: &'a Mutex<Cell<bool>>,
}

impl Drop for HandlerExit<'_> {
    fn drop(&mut self) {
        critical_section::with(|cs| self.in_handler.borrow(cs).set(false));
    }
}

/// Outbound hooks called from the tick handler.
///
/// The bodies belong to other modules (key scanning, task dispatch...). The
/// handler only guarantees order and frequency.
#[derive(Debug, Clone, Copy)]
pub struct TickHooks {
    /// Called on every tick
    pub per_tick: fn(),
    /// Called on every tenth tick
    pub per_deca_tick: fn(),
    /// Called last on every tick, for task countdown bookkeeping
    pub task_bookkeeping: fn(),
}

impl TickHooks {
    /// Hooks that do nothing
    pub const NONE: Self = Self {
        per_tick: no_hook,
        per_deca_tick: no_hook,
        task_bookkeeping: no_hook,
    };

    pub fn per_tick(mut self, hook: fn()) -> Self {
        self.per_tick = hook;
        self
    }

    pub fn per_deca_tick(mut self, hook: fn()) -> Self {
        self.per_deca_tick = hook;
        self
    }

    pub fn task_bookkeeping(mut self, hook: fn()) -> Self {
        self.task_bookkeeping = hook;
        self
    }
}

impl Default for TickHooks {
    fn default() -> Self {
        Self::NONE
    }
}

/// Tick-driven time base with `N` software timers
pub struct SysTimer<const N: usize> {
    bank: TimerBank<N>,
    clock: RunTimeClock,
    delay: BlockingDelay,
    deca: Mutex<Cell<u8>>,
    in_handler: Mutex<Cell<bool>>,
    hooks: Mutex<Cell<TickHooks>>,
    config: Mutex<Cell<TickConfig>>,
}

impl<const N: usize> SysTimer<N> {
    pub const fn new() -> Self {
        Self::with_clock(RunTimeClock::new())
    }

    /// Time base whose run-time clock wraps at `sentinel`
    pub const fn with_sentinel(sentinel: i32) -> Self {
        Self::with_clock(RunTimeClock::with_sentinel(sentinel))
    }

    const fn with_clock(clock: RunTimeClock) -> Self {
        Self {
            bank: TimerBank::new(),
            clock,
            delay: BlockingDelay::new(),
            deca: Mutex::new(Cell::new(0)),
            in_handler: Mutex::new(Cell::new(false)),
            hooks: Mutex::new(Cell::new(TickHooks::NONE)),
            config: Mutex::new(Cell::new(TickConfig::DEFAULT)),
        }
    }

    /// Zero every timer slot and install the configuration and hooks.
    ///
    /// Programming the hardware tick source from `config` is left to the port.
    pub fn init(&self, config: TickConfig, hooks: TickHooks) {
        self.bank.clear_all();
        critical_section::with(|cs| {
            self.deca.borrow(cs).set(0);
            self.hooks.borrow(cs).set(hooks);
            self.config.borrow(cs).set(config);
        });
        diag_info!(
            "systimer: {} timers, {}Hz tick, reload {}",
            N,
            config.tick_hz,
            config.reload()
        );
    }

    /// Tick interrupt entry point.
    ///
    /// # Panics
    ///
    /// Halts if entered while a previous invocation is still running; tick
    /// interrupts are not allowed to nest.
    pub fn on_tick(&self) {
        let entry = critical_section::with(|cs| {
            let in_handler = self.in_handler.borrow(cs);
            if in_handler.get() {
                return Err(Violation::NestedTick);
            }
            in_handler.set(true);

            self.delay.tick(cs);
            self.bank.tick_all(cs);
            self.clock.advance(cs);

            let deca = self.deca.borrow(cs);
            let count = deca.get() + 1;
            let deca_due = count >= DECA_TICKS;
            deca.set(if deca_due { 0 } else { count });

            Ok((self.hooks.borrow(cs).get(), deca_due))
        });

        let (hooks, deca_due) = match entry {
            Ok(entry) => entry,
            Err(violation) => fatal::halt(violation),
        };
        let _exit = HandlerExit {
            in_handler: &self.in_handler,
        };

        (hooks.per_tick)();
        if deca_due {
            (hooks.per_deca_tick)();
        }
        (hooks.task_bookkeeping)();
    }

    pub fn bank(&self) -> &TimerBank<N> {
        &self.bank
    }

    pub fn clock(&self) -> &RunTimeClock {
        &self.clock
    }

    pub fn config(&self) -> TickConfig {
        critical_section::with(|cs| self.config.borrow(cs).get())
    }

    /// Block for `ticks` tick periods (milliseconds at the default rate).
    ///
    /// Must not be called from the tick handler or its hooks.
    pub fn delay_ms(&self, ticks: u32) {
        self.delay.wait(ticks);
    }

    /// Like [`delay_ms`](Self::delay_ms), calling `idle` while waiting
    pub fn delay_ms_with<F: FnMut()>(&self, ticks: u32, idle: F) {
        self.delay.wait_with(ticks, idle);
    }

    /// Spin for at least `us` microseconds on the tick source's counter
    pub fn delay_us<C: DownCounter + ?Sized>(&self, counter: &C, us: u32) {
        micros::delay_us(counter, self.config().counter_hz(), us);
    }
}

impl<const N: usize> Default for SysTimer<N> {
    fn default() -> Self {
        Self::new()
    }
}
