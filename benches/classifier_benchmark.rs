use carbonlog::services::Classifier;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_classify(c: &mut Criterion) {
    let classifier = Classifier::default();

    // Typical short log entries, one per rule family.
    let samples = [
        "Drove 15km to college in petrol car",
        "Had a chicken sandwich for lunch",
        "Used AC for 4 hours",
        "Bought a new laptop",
        "studied in the library all evening",
    ];

    let mut group = c.benchmark_group("classify");

    group.bench_function("single_transport_entry", |b| {
        b.iter(|| classifier.classify(black_box("Drove 15km to college in petrol car")))
    });

    group.bench_function("fallback_entry", |b| {
        b.iter(|| classifier.classify(black_box("studied in the library all evening")))
    });

    group.bench_function("mixed_batch", |b| {
        b.iter(|| {
            for sample in &samples {
                classifier.classify(black_box(sample));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_classify);
criterion_main!(benches);
