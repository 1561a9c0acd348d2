//! Clock Tick Service for POSIX
//!
//! A dedicated thread stands in for the hardware tick interrupt and calls
//! [`systimer_tick::isr`] at the configured rate. Ticks are scheduled against
//! absolute monotonic deadlines so the rate does not drift.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default tick rate in Hz
const DEFAULT_TICKS_PER_SEC: u32 = 1_000;

/// Nanoseconds per second
const NSEC_PER_SEC: u64 = 1_000_000_000;

/// Global ticker state
static TICKER_RUNNING: AtomicBool = AtomicBool::new(false);
static TICK_RATE_HZ: AtomicU32 = AtomicU32::new(DEFAULT_TICKS_PER_SEC);
static TICKER_THREAD: Mutex<Option<JoinHandle<()>>> = Mutex::new(None);

/// Clock tick configuration
pub struct ClockTick {
    rate_hz: u32,
}

impl ClockTick {
    /// Create a new clock tick configuration
    pub fn new(rate_hz: u32) -> Self {
        ClockTick { rate_hz }
    }

    /// Get the tick period as a Duration
    pub fn period(&self) -> Duration {
        Duration::from_nanos(NSEC_PER_SEC / self.rate_hz as u64)
    }
}

/// Set the clock tick rate
///
/// Takes effect the next time the ticker is started.
///
/// # Examples
///
/// ```
/// use systimer_posix::set_tick_rate;
///
/// set_tick_rate(500); // 2ms tick
/// ```
pub fn set_tick_rate(ticks_per_sec: u32) {
    assert!(ticks_per_sec > 0, "Tick rate must be greater than 0");
    assert!(ticks_per_sec <= crate::MAX_TICK_HZ, "Tick rate too high (max 10kHz)");

    TICK_RATE_HZ.store(ticks_per_sec, Ordering::SeqCst);
}

/// Get the current tick rate in Hz
pub fn tick_rate() -> u32 {
    TICK_RATE_HZ.load(Ordering::SeqCst)
}

/// Check if the ticker thread is running
pub fn is_ticking() -> bool {
    TICKER_RUNNING.load(Ordering::SeqCst)
}

/// Start the ticker thread
///
/// Does nothing if the ticker is already running.
pub fn start_ticker() {
    if TICKER_RUNNING.swap(true, Ordering::SeqCst) {
        return;
    }

    let tick_period = ClockTick::new(tick_rate()).period();
    let handle = thread::Builder::new()
        .name("systick".into())
        .spawn(move || ticker_thread(tick_period))
        .expect("failed to spawn ticker thread");

    *lock_thread_slot() = Some(handle);
    log::debug!("ticker started, period {:?}", tick_period);
}

/// Stop the ticker thread and wait for it to exit
pub fn stop_ticker() {
    TICKER_RUNNING.store(false, Ordering::SeqCst);

    let handle = lock_thread_slot().take();
    if let Some(handle) = handle {
        let _ = handle.join();
        log::debug!("ticker stopped");
    }
}

fn lock_thread_slot() -> std::sync::MutexGuard<'static, Option<JoinHandle<()>>> {
    TICKER_THREAD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ticker thread implementation
///
/// Sleeps until the next absolute deadline rather than for a relative
/// duration, so late wakeups are caught up instead of accumulating.
fn ticker_thread(tick_period: Duration) {
    let mut next_tick = Instant::now();

    while TICKER_RUNNING.load(Ordering::Relaxed) {
        next_tick += tick_period;

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }

        systimer_tick::isr();
    }
}
