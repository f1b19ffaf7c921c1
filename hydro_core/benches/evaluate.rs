use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hydro_core::mocks::demo_snapshot;
use hydro_core::{Evaluator, HealthReport, Measurement, MeasurementKey};

// Sweep across and beyond the pH range so every severity branch is hit
fn ph_sweep(n: usize) -> Vec<Measurement> {
    (0..n)
        .map(|i| Measurement::new(MeasurementKey::Ph, 4.0 + (i as f64) * 4.0 / n as f64))
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let ev = Evaluator::default();
    let sweep = ph_sweep(1_000);
    c.bench_function("evaluate_ph_sweep_1k", |b| {
        b.iter(|| {
            for m in &sweep {
                let _ = black_box(ev.evaluate(black_box(m)));
            }
        })
    });

    let snap = demo_snapshot();
    c.bench_function("health_report_demo", |b| {
        b.iter(|| {
            let r = HealthReport::build(&ev, "Lettuce", black_box(&snap));
            let _ = black_box(r.map(|r| r.lines()));
        })
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
