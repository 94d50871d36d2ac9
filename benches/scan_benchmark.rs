//! Benchmarks for incremental file scanning.
//!
//! **Benchmarks Included:**
//! - `scan_full`: scan a file from the start at several sizes
//! - `scan_resume_at_eof`: rescan a fully scanned file (the common steady state)
//! - `snapshot_take`: list a directory of 1000 entries
//!
//! **Run benchmarks:**
//! ```bash
//! cargo bench                       # Run all benchmarks
//! cargo bench -- scan_full          # Full scans only
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dirwatcher::watcher::{scan_file, ScanCursor, Snapshot};
use tempfile::TempDir;

/// Write a log file with `lines` lines, one in fifty containing the magic string.
fn write_log(dir: &TempDir, lines: usize) -> PathBuf {
    let mut content = String::new();
    for i in 0..lines {
        if i % 50 == 0 {
            let _ = writeln!(content, "{i} ERROR magic failure in worker");
        } else {
            let _ = writeln!(content, "{i} INFO request handled in 3ms");
        }
    }
    let path = dir.path().join(format!("bench-{lines}.log"));
    fs::write(&path, content).expect("failed to write bench file");
    path
}

fn bench_scan_full(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let mut group = c.benchmark_group("scan_full");

    for lines in [1_000, 10_000, 100_000] {
        let path = write_log(&tmp, lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &path, |b, path| {
            b.iter(|| scan_file(black_box(path), ScanCursor::default(), "magic").unwrap());
        });
    }

    group.finish();
}

fn bench_scan_resume_at_eof(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = write_log(&tmp, 100_000);
    let (cursor, _) = scan_file(&path, ScanCursor::default(), "magic").unwrap();

    c.bench_function("scan_resume_at_eof", |b| {
        b.iter(|| scan_file(black_box(&path), cursor, "magic").unwrap());
    });
}

fn bench_snapshot_take(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    for i in 0..1_000 {
        fs::write(tmp.path().join(format!("{i}.txt")), "").expect("failed to write file");
    }

    c.bench_function("snapshot_take", |b| {
        b.iter(|| Snapshot::take(black_box(tmp.path())).unwrap());
    });
}

criterion_group!(
    benches,
    bench_scan_full,
    bench_scan_resume_at_eof,
    bench_snapshot_take
);
criterion_main!(benches);
