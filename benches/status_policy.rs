use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ina219_battery_core::{evaluate, IconPolicy, StatusPolicy};
use ina219_battery_types::battery::default_voltage_thresholds;

fn bench_evaluate(c: &mut Criterion) {
    c.bench_function("evaluate_percentage", |b| {
        b.iter(|| {
            let mut millivolts = 8500;
            while millivolts < 13000 {
                black_box(evaluate(black_box(millivolts as f64 / 1000.0), 9.0, 12.6));
                millivolts += 10;
            }
        })
    });

    let legacy = StatusPolicy::new(
        9.0,
        12.6,
        IconPolicy::LegacyVoltage {
            thresholds: default_voltage_thresholds(),
        },
    )
    .expect("valid thresholds");
    c.bench_function("evaluate_legacy_voltage", |b| {
        b.iter(|| {
            let mut millivolts = 8500;
            while millivolts < 13000 {
                black_box(legacy.evaluate(black_box(millivolts as f64 / 1000.0)));
                millivolts += 10;
            }
        })
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
