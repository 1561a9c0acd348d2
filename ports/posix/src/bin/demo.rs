//! Host demo: a heartbeat timer, a one-shot timeout and a 10ms housekeeping
//! hook, running until Ctrl-C.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use log::LevelFilter;
use systimer_posix::{init_logger, PosixPort};
use systimer_tick::{
    check_run_time, check_timer, delay_ms, run_time, start_auto_timer, start_timer, stop_timer,
    TickConfig, TickHooks,
};

const HEARTBEAT: usize = 0;
const TIMEOUT: usize = 1;

static HOUSEKEEPING: AtomicU32 = AtomicU32::new(0);

fn per_deca_tick() {
    HOUSEKEEPING.fetch_add(1, Ordering::Relaxed);
}

fn main() {
    let _ = init_logger(LevelFilter::Info);

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .expect("failed to install Ctrl-C handler");
    }

    let port = match PosixPort::start(
        TickConfig::default(),
        TickHooks::NONE.per_deca_tick(per_deca_tick),
    ) {
        Ok(port) => port,
        Err(err) => {
            log::error!("cannot start tick source: {}", err);
            std::process::exit(1);
        }
    };

    start_auto_timer(HEARTBEAT, 500);
    start_timer(TIMEOUT, 2_000);
    let started = run_time();
    let mut beats = 0u32;

    while running.load(Ordering::SeqCst) {
        if check_timer(HEARTBEAT) {
            beats += 1;
            log::info!(
                "heartbeat {} ({} housekeeping passes)",
                beats,
                HOUSEKEEPING.load(Ordering::Relaxed)
            );
        }

        if check_timer(TIMEOUT) {
            log::info!("timeout after {}ms, heartbeat now every second", check_run_time(started));
            stop_timer(HEARTBEAT);
            start_auto_timer(HEARTBEAT, 1_000);
        }

        port.delay_us(250);
        delay_ms(1);
    }

    log::info!("stopping after {}ms", check_run_time(started));
    port.shutdown();
}
