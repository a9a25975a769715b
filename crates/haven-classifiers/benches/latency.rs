//! Latency benchmarks for the risk classifier
//!
//! The classifier sits on the per-message request path, so emotion scoring
//! plus the crisis rules should stay well under a millisecond.
//!
//! Run with: cargo bench -p haven-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use haven_classifiers::{EmotionClassifier, RiskClassifier};

fn benchmark_emotion_classifier(c: &mut Criterion) {
    let classifier = EmotionClassifier::new().expect("Failed to create emotion classifier");

    let test_cases = vec![
        ("neutral_short", "hoy fui al mercado con mi vecina"),
        ("single_hit", "estoy muy triste hoy"),
        (
            "multi_hit",
            "me siento solo, triste y agotado, con mucha ansiedad desde la semana pasada",
        ),
        (
            "long_neutral",
            "esta tarde estuve ordenando las fotos del viaje y preparando la cena para \
             toda la familia, mañana quiero salir a caminar temprano",
        ),
    ];

    let mut group = c.benchmark_group("Emotion_Classifier");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("score", name), &text, |b, text| {
            b.iter(|| classifier.score(black_box(text)));
        });
    }

    group.finish();
}

fn benchmark_risk_classifier(c: &mut Criterion) {
    let classifier = RiskClassifier::new().expect("Failed to create risk classifier");

    let test_cases = vec![
        ("no_risk", "¿me recomiendas una película para esta noche?"),
        ("ideation", "ya no aguanto, quiero desaparecer"),
        ("collapse", "estoy triste, ya no puedo más con todo esto"),
    ];

    let mut group = c.benchmark_group("Risk_Classifier");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| classifier.classify(black_box(text), &[]));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_emotion_classifier,
    benchmark_risk_classifier
);
criterion_main!(benches);
