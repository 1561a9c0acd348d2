use crate::bank::TimerBank;
use crate::TimerMode;

fn tick<const N: usize>(bank: &TimerBank<N>, times: usize) {
    for _ in 0..times {
        critical_section::with(|cs| bank.tick_all(cs));
    }
}

#[test]
fn one_shot_reports_exactly_once() {
    let bank: TimerBank<4> = TimerBank::new();
    bank.start_once(2, 5);

    for _ in 0..4 {
        tick(&bank, 1);
        assert!(!bank.check(2));
    }
    tick(&bank, 1);
    assert!(bank.check(2));

    for _ in 0..20 {
        tick(&bank, 1);
        assert!(!bank.check(2));
    }
}

#[test]
fn auto_reload_fires_every_period() {
    let bank: TimerBank<4> = TimerBank::new();
    bank.start_auto(0, 3);

    let mut fired_at = std::vec::Vec::new();
    for tick_no in 1..=12 {
        tick(&bank, 1);
        if bank.check(0) {
            fired_at.push(tick_no);
            assert_eq!(bank.snapshot(0).unwrap().count(), 3);
        }
    }
    assert_eq!(fired_at, [3, 6, 9, 12]);
}

#[test]
fn check_consumes_the_latch() {
    let bank: TimerBank<2> = TimerBank::new();
    bank.start_once(1, 1);
    tick(&bank, 1);

    assert!(bank.check(1));
    assert!(!bank.check(1));
}

#[test]
fn unchecked_auto_expiries_collapse() {
    let bank: TimerBank<1> = TimerBank::new();
    bank.start_auto(0, 2);
    tick(&bank, 10);

    assert!(bank.check(0));
    assert!(!bank.check(0));
}

#[test]
fn stop_silences_slot_until_rearmed() {
    let bank: TimerBank<4> = TimerBank::new();
    bank.start_auto(3, 2);
    tick(&bank, 2);
    bank.stop(3);

    let slot = bank.snapshot(3).unwrap();
    assert_eq!(slot.count(), 0);
    assert_eq!(slot.mode(), TimerMode::OneShot);
    assert!(!slot.is_expired());

    for _ in 0..10 {
        tick(&bank, 1);
        assert!(!bank.check(3));
    }

    bank.start_once(3, 1);
    tick(&bank, 1);
    assert!(bank.check(3));
}

#[test]
fn rearm_overwrites_every_field() {
    let bank: TimerBank<1> = TimerBank::new();
    bank.start_auto(0, 7);
    tick(&bank, 7);
    bank.start_once(0, 4);

    let slot = bank.snapshot(0).unwrap();
    assert_eq!(slot.count(), 4);
    assert_eq!(slot.preload(), 4);
    assert_eq!(slot.mode(), TimerMode::OneShot);
    assert!(!slot.is_expired());
}

#[test]
fn out_of_range_check_is_lenient() {
    let bank: TimerBank<4> = TimerBank::new();
    assert!(!bank.check(4));
    assert!(!bank.check(usize::MAX));
    assert!(bank.snapshot(4).is_none());
}

#[test]
fn fallible_variants_report_bad_ids() {
    let bank: TimerBank<4> = TimerBank::new();
    assert_eq!(bank.try_start_once(4, 1), Err(crate::TickError::InvalidTimerId));
    assert_eq!(bank.try_start_auto(9, 1), Err(crate::TickError::InvalidTimerId));
    assert_eq!(bank.try_stop(4), Err(crate::TickError::InvalidTimerId));
    assert_eq!(bank.try_start_once(3, 1), Ok(()));
}

#[test]
#[should_panic(expected = "Timer identifier out of range")]
fn start_once_out_of_range_halts() {
    let bank: TimerBank<4> = TimerBank::new();
    bank.start_once(4, 10);
}

#[test]
#[should_panic(expected = "Timer identifier out of range")]
fn start_auto_out_of_range_halts() {
    let bank: TimerBank<4> = TimerBank::new();
    bank.start_auto(4, 10);
}

#[test]
#[should_panic(expected = "Timer identifier out of range")]
fn stop_out_of_range_halts() {
    let bank: TimerBank<4> = TimerBank::new();
    bank.stop(17);
}

#[test]
fn halt_names_the_call_site() {
    let result = std::panic::catch_unwind(|| {
        let bank: TimerBank<1> = TimerBank::new();
        bank.stop(1);
    });
    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<std::string::String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.contains("tests/bank.rs"), "unexpected message: {message}");
}

#[test]
fn clear_all_zeroes_slots() {
    let bank: TimerBank<3> = TimerBank::new();
    for id in 0..3 {
        bank.start_auto(id, 10 + id as u32);
    }
    bank.clear_all();

    for id in 0..3 {
        assert_eq!(bank.snapshot(id), Some(crate::SoftTimer::IDLE));
    }
    assert_eq!(bank.capacity(), 3);
}
