use criterion::{black_box, criterion_group, criterion_main, Criterion};
use systimer_tick::{MicrosProbe, SysTimer, TickConfig, TickHooks};

fn bench_on_tick(c: &mut Criterion) {
    let small: SysTimer<4> = SysTimer::new();
    small.init(TickConfig::default(), TickHooks::NONE);
    for id in 0..4 {
        small.bank().start_auto(id, 10 + id as u32);
    }
    c.bench_function("on_tick/4 timers", |b| b.iter(|| small.on_tick()));

    let wide: SysTimer<32> = SysTimer::new();
    wide.init(TickConfig::default(), TickHooks::NONE);
    for id in 0..32 {
        wide.bank().start_auto(id, 10 + id as u32);
    }
    c.bench_function("on_tick/32 timers", |b| b.iter(|| wide.on_tick()));
}

fn bench_check(c: &mut Criterion) {
    let timer: SysTimer<4> = SysTimer::new();
    timer.bank().start_auto(0, 1);
    c.bench_function("check", |b| {
        b.iter(|| {
            timer.on_tick();
            black_box(timer.bank().check(0))
        })
    });
}

fn bench_probe(c: &mut Criterion) {
    c.bench_function("micros probe sample", |b| {
        let mut probe = MicrosProbe::new(71_999, 71_999);
        let mut now = 71_999u32;
        b.iter(|| {
            now = if now < 72 { 71_999 } else { now - 72 };
            black_box(probe.sample(now))
        })
    });
}

criterion_group!(benches, bench_on_tick, bench_check, bench_probe);
criterion_main!(benches);
