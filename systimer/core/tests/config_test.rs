//! Tick configuration tests for systimer-core

use systimer_core::{ClockSource, TickConfig, TickError, MAX_RELOAD};

#[test]
fn test_default_config() {
    let config = TickConfig::default();

    assert_eq!(config.core_clock_hz, 72_000_000);
    assert_eq!(config.tick_hz, 1000);
    assert_eq!(config.clock_source, ClockSource::Core);
    assert_eq!(config.reload(), 71_999);
    assert_eq!(config.ticks_per_us(), 72);
    assert_eq!(config.tick_period_us(), 1000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = TickConfig::builder()
        .core_clock_hz(168_000_000)
        .tick_hz(2000)
        .clock_source(ClockSource::External)
        .build()
        .unwrap();

    assert_eq!(config.counter_hz(), 21_000_000);
    assert_eq!(config.reload(), 10_499);
    assert_eq!(config.ticks_per_us(), 21);
    assert_eq!(config.tick_period_us(), 500);
}

#[test]
fn test_zero_tick_rate_rejected() {
    let result = TickConfig::builder().tick_hz(0).build();
    assert_eq!(result, Err(TickError::InvalidTickRate));
}

#[test]
fn test_reload_must_fit_counter() {
    let result = TickConfig::builder()
        .core_clock_hz(168_000_000)
        .tick_hz(1)
        .build();
    assert_eq!(result, Err(TickError::ReloadOutOfRange));

    let config = TickConfig::builder()
        .core_clock_hz(168_000_000)
        .tick_hz(100)
        .build()
        .unwrap();
    assert!(config.reload() <= MAX_RELOAD);
}

#[test]
fn test_slow_counter_rejected() {
    let result = TickConfig::builder()
        .core_clock_hz(4_000_000)
        .clock_source(ClockSource::External)
        .build();
    assert_eq!(result, Err(TickError::CounterTooSlow));
}
