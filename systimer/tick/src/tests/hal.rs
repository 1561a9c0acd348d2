use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

use super::micros::SteppingCounter;
use crate::hal::SysDelay;
use crate::handler::{SysTimer, TickHooks};
use crate::TickConfig;

#[test]
fn sub_millisecond_requests_spin_on_the_counter() {
    let timer: SysTimer<1> = SysTimer::new();
    let mut delay = SysDelay::new(&timer, SteppingCounter::new(71_999, 71_999, 72));

    delay.delay_us(100);
    let counter = delay.free();
    assert_eq!(counter.reads(), 101);
}

#[test]
fn nanoseconds_round_up_to_whole_microseconds() {
    let timer: SysTimer<1> = SysTimer::new();
    let mut delay = SysDelay::new(&timer, SteppingCounter::new(71_999, 71_999, 72));

    delay.delay_ns(1_500);
    assert_eq!(delay.free().reads(), 3);
}

#[test]
fn milliseconds_convert_to_ticks() {
    let timer: SysTimer<1> = SysTimer::new();
    let delay = SysDelay::new(&timer, SteppingCounter::new(0, 99, 1));
    assert_eq!(delay.ms_to_ticks(7), 7);

    let config = TickConfig::builder().tick_hz(2_000).build().unwrap();
    timer.init(config, TickHooks::NONE);
    assert_eq!(delay.ms_to_ticks(3), 6);

    let config = TickConfig::builder().tick_hz(100).build().unwrap();
    timer.init(config, TickHooks::NONE);
    assert_eq!(delay.ms_to_ticks(15), 2);
}

#[test]
fn fast_tick_rates_keep_millisecond_length() {
    let timer: SysTimer<1> = SysTimer::new();
    let config = TickConfig::builder().tick_hz(2_000_000).build().unwrap();
    assert_eq!(config.tick_period_us(), 0);
    timer.init(config, TickHooks::NONE);

    let delay = SysDelay::new(&timer, SteppingCounter::new(0, 99, 1));
    assert_eq!(delay.ms_to_ticks(3), 6_000);
}

#[test]
fn millisecond_requests_arm_a_guard_tick() {
    let timer: SysTimer<1> = SysTimer::new();
    let delay = SysDelay::new(&timer, SteppingCounter::new(0, 99, 1));

    assert_eq!(delay.armed_ticks(0), 0);
    assert_eq!(delay.armed_ticks(1), 2);
    assert_eq!(delay.armed_ticks(10), 11);
    assert_eq!(delay.armed_ticks(u32::MAX), u32::MAX);
}

#[test]
fn zero_milliseconds_returns_without_ticks() {
    let timer: SysTimer<1> = SysTimer::new();
    let mut delay = SysDelay::new(&timer, SteppingCounter::new(0, 99, 1));
    delay.delay_ms(0);
    assert_eq!(timer.clock().now(), 0);
}

#[test]
fn milliseconds_block_on_the_tick() {
    let timer: SysTimer<1> = SysTimer::new();
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        s.spawn(|| {
            while !done.load(Ordering::SeqCst) {
                timer.on_tick();
                std::thread::yield_now();
            }
        });

        let mut delay = SysDelay::new(&timer, SteppingCounter::new(0, 99, 1));
        let before = timer.clock().now();
        delay.delay_ms(10);
        let waited = timer.clock().elapsed_since(before);
        done.store(true, Ordering::SeqCst);

        assert!(waited >= 10, "waited {waited} ticks");
    });
}
