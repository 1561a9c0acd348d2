#![no_std]
#![no_main]

//! Heartbeat on timer 0, a one-shot on timer 1 and a 10ms scan hook, on a
//! 168MHz Cortex-M4.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m_rt::entry;
use panic_halt as _;
use systimer_tick::{check_timer, start_auto_timer, start_timer, TickConfig, TickHooks};

const HEARTBEAT: usize = 0;
const SETTLE: usize = 1;

static SCANS: AtomicU32 = AtomicU32::new(0);

fn scan_keys() {
    SCANS.fetch_add(1, Ordering::Relaxed);
}

#[entry]
fn main() -> ! {
    let mut core = cortex_m::Peripherals::take().unwrap();

    let config = TickConfig::builder()
        .core_clock_hz(168_000_000)
        .tick_hz(1_000)
        .build()
        .unwrap();
    let hooks = TickHooks::NONE.per_deca_tick(scan_keys);
    systimer_cortex_m::init(&mut core.SYST, config, hooks).unwrap();

    start_timer(SETTLE, 50);
    while !check_timer(SETTLE) {
        cortex_m::asm::wfi();
    }

    start_auto_timer(HEARTBEAT, 500);
    let mut beats = 0u32;
    loop {
        if check_timer(HEARTBEAT) {
            beats = beats.wrapping_add(1);
            // a board would toggle its status LED here
        }
        systimer_cortex_m::delay_us(10);
        systimer_cortex_m::delay_ms(1);
    }
}
