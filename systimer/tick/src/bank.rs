//! Software timer bank
//!
//! A fixed array of countdown slots addressed by caller-managed identifiers.
//! The bank does not track who owns which slot; two modules sharing an id
//! will trample each other.

use core::cell::RefCell;

use critical_section::{CriticalSection, Mutex};
use systimer_core::{SoftTimer, TickError, TickResult, TimerMode};

use crate::fatal;

/// Bank of `N` software timers shared with the tick handler
pub struct TimerBank<const N: usize> {
    slots: Mutex<RefCell<[SoftTimer; N]>>,
}

impl<const N: usize> TimerBank<N> {
    /// Create a bank with every slot disarmed
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new([SoftTimer::IDLE; N])),
        }
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Zero every slot
    pub fn clear_all(&self) {
        critical_section::with(|cs| {
            self.slots.borrow_ref_mut(cs).fill(SoftTimer::IDLE);
        });
    }

    /// Arm slot `id` to expire once after `period` ticks.
    ///
    /// # Panics
    ///
    /// Halts if `id` is not below the bank capacity.
    #[track_caller]
    pub fn start_once(&self, id: usize, period: u32) {
        if let Err(err) = self.try_start_once(id, period) {
            fatal::halt(err.into());
        }
    }

    /// Arm slot `id` to expire every `period` ticks.
    ///
    /// # Panics
    ///
    /// Halts if `id` is not below the bank capacity.
    #[track_caller]
    pub fn start_auto(&self, id: usize, period: u32) {
        if let Err(err) = self.try_start_auto(id, period) {
            fatal::halt(err.into());
        }
    }

    /// Disarm slot `id`.
    ///
    /// # Panics
    ///
    /// Halts if `id` is not below the bank capacity.
    #[track_caller]
    pub fn stop(&self, id: usize) {
        if let Err(err) = self.try_stop(id) {
            fatal::halt(err.into());
        }
    }

    /// Like [`start_once`](Self::start_once), reporting a bad id as an error
    pub fn try_start_once(&self, id: usize, period: u32) -> TickResult<()> {
        self.arm(id, period, TimerMode::OneShot)
    }

    /// Like [`start_auto`](Self::start_auto), reporting a bad id as an error
    pub fn try_start_auto(&self, id: usize, period: u32) -> TickResult<()> {
        self.arm(id, period, TimerMode::AutoReload)
    }

    /// Like [`stop`](Self::stop), reporting a bad id as an error
    pub fn try_stop(&self, id: usize) -> TickResult<()> {
        let index = Self::index(id)?;
        critical_section::with(|cs| {
            self.slots.borrow_ref_mut(cs)[index].disarm();
        });
        diag_trace!("timer {} stopped", id);
        Ok(())
    }

    /// Consume the expiry of slot `id`.
    ///
    /// Each expiry is reported once. Unknown identifiers read as not expired.
    pub fn check(&self, id: usize) -> bool {
        let Ok(index) = Self::index(id) else {
            return false;
        };
        critical_section::with(|cs| self.slots.borrow_ref_mut(cs)[index].take_expired())
    }

    /// Consistent copy of slot `id`
    pub fn snapshot(&self, id: usize) -> Option<SoftTimer> {
        let index = Self::index(id).ok()?;
        Some(critical_section::with(|cs| self.slots.borrow_ref(cs)[index]))
    }

    /// Advance every slot by one tick. Tick handler only.
    pub(crate) fn tick_all(&self, cs: CriticalSection<'_>) {
        for slot in self.slots.borrow_ref_mut(cs).iter_mut() {
            slot.tick();
        }
    }

    fn arm(&self, id: usize, period: u32, mode: TimerMode) -> TickResult<()> {
        let index = Self::index(id)?;
        critical_section::with(|cs| {
            self.slots.borrow_ref_mut(cs)[index].arm(period, mode);
        });
        diag_trace!("timer {} armed for {} ticks", id, period);
        Ok(())
    }

    fn index(id: usize) -> TickResult<usize> {
        if id < N {
            Ok(id)
        } else {
            Err(TickError::InvalidTimerId)
        }
    }
}

impl<const N: usize> Default for TimerBank<N> {
    fn default() -> Self {
        Self::new()
    }
}
