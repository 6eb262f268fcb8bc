#![allow(clippy::unwrap_used)]
//! Benchmarks for preference serialization and deserialization

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use stillscreen::config::Preferences;

fn bench_preferences_serialize(c: &mut Criterion) {
    let prefs = Preferences {
        disable_dithering: true,
        disable_uniformity_2d: true,
    };

    c.bench_function("preferences_serialize", |b| {
        b.iter(|| {
            let json = serde_json::to_string_pretty(black_box(&prefs)).unwrap();
            black_box(json);
        });
    });
}

fn bench_preferences_deserialize(c: &mut Criterion) {
    let prefs = Preferences {
        disable_dithering: false,
        disable_uniformity_2d: true,
    };
    let json = serde_json::to_string_pretty(&prefs).unwrap();

    c.bench_function("preferences_deserialize", |b| {
        b.iter(|| {
            let deserialized: Preferences = serde_json::from_str(black_box(&json)).unwrap();
            black_box(deserialized);
        });
    });
}

fn bench_preferences_deserialize_partial(c: &mut Criterion) {
    // Older files miss fields; serde fills per-capability defaults
    let json = r#"{"disable_dithering": false}"#;

    c.bench_function("preferences_deserialize_partial", |b| {
        b.iter(|| {
            let deserialized: Preferences = serde_json::from_str(black_box(json)).unwrap();
            black_box(deserialized);
        });
    });
}

criterion_group!(
    benches,
    bench_preferences_serialize,
    bench_preferences_deserialize,
    bench_preferences_deserialize_partial
);
criterion_main!(benches);
