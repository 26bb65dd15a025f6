//! Preference store throughput for the in-memory and JSON file backends.

use std::{hint::black_box, sync::Arc};

use {
    criterion::{BenchmarkId, Criterion, criterion_group, criterion_main},
    tempfile::TempDir,
};

use kutils::prefs::{JsonFilePrefsBackend, PreferencesManager};

const KEY_COUNTS: [usize; 3] = [1, 32, 256];

fn seed(prefs: &PreferencesManager, count: usize) {
    for i in 0..count {
        prefs.settings().put(&format!("key_{i}"), i as i64);
    }
}

fn bench_memory_backend(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_backend");

    for count in KEY_COUNTS {
        let prefs = PreferencesManager::in_memory();
        seed(&prefs, count);

        group.bench_with_input(BenchmarkId::new("put", count), &count, |b, _| {
            b.iter(|| black_box(prefs.settings().put("hot", 42_i32)));
        });
        group.bench_with_input(BenchmarkId::new("get", count), &count, |b, _| {
            b.iter(|| black_box(prefs.settings().get("key_0", 0_i64)));
        });
    }

    group.finish();
}

fn bench_file_backend(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_backend");

    for count in KEY_COUNTS {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFilePrefsBackend::new(temp_dir.path().to_path_buf()).unwrap();
        let prefs = PreferencesManager::new(Arc::new(backend));
        seed(&prefs, count);

        // Every put rewrites the whole namespace file
        group.bench_with_input(BenchmarkId::new("put", count), &count, |b, _| {
            b.iter(|| black_box(prefs.settings().put("hot", 42_i32)));
        });
        group.bench_with_input(BenchmarkId::new("get", count), &count, |b, _| {
            b.iter(|| black_box(prefs.settings().get("key_0", 0_i64)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_memory_backend, bench_file_backend);
criterion_main!(benches);
