use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loam_version::{Predicates, Version, VersionInterval, VersionPredicate};

fn bench_parse_versions(c: &mut Criterion) {
    let versions = [
        "1.2.3",
        "1.2.3-beta.1",
        "2.4.0+build.5",
        "0.3.1-beta.2",
        "1.16.5",
        "2020.4.20",
        "nightly-b12",
        "some-opaque-blob",
        "10.0.0-rc.1+sha.5114f85",
    ];

    c.bench_function("parse_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(Version::parse(black_box(version)));
            }
        })
    });
}

fn bench_compare_versions(c: &mut Criterion) {
    let pairs = [
        ("1.2.3", "1.2.4"),
        ("2.4.0-alpha", "2.4.0"),
        ("1.2.3+build.1", "1.2.3+build.2"),
        ("1.0.0", "1"),
        ("1.2.3-rc.1", "1.2.3-rc.2"),
        ("1.2.3-9", "1.2.3-010"),
        ("nightly-a", "nightly-b"),
        ("nightly-a", "0.0.1"),
    ];
    let parsed: Vec<(Version, Version)> = pairs
        .iter()
        .map(|(a, b)| (Version::parse(a), Version::parse(b)))
        .collect();

    c.bench_function("compare_versions", |b| {
        b.iter(|| {
            for (a, bver) in &parsed {
                black_box(black_box(a).cmp(black_box(bver)));
            }
        })
    });
}

fn bench_parse_ranges(c: &mut Criterion) {
    let ranges = [
        "*",
        "1.2.3",
        ">=1.2.3 <2.0.0",
        "^1.2.3",
        "~2.4",
        "1.2.x",
        "~1.2.1 >=1.2.3",
        ">=0.3.1-beta.2 <0.4.0",
    ];

    c.bench_function("parse_ranges", |b| {
        b.iter(|| {
            for range in ranges {
                black_box(VersionPredicate::parse(black_box(range)).ok());
            }
        })
    });
}

fn bench_matches(c: &mut Criterion) {
    let cases = [
        ("1.2.3", "^1.2.0"),
        ("1.2.3-beta", "^1.2.3"),
        ("2.4.5", "~2.4"),
        ("1.2.3", ">=1.2.3 <2.0.0"),
        ("1.9999.9999", "<2.0.0"),
        ("nightly-b12", "nightly-b12"),
        ("1.16.5", "1.16.x"),
        ("2.0.0", "^1.2.3"),
    ];

    c.bench_function("predicates_matches", |b| {
        b.iter(|| {
            for (version, range) in cases {
                black_box(Predicates::matches(black_box(version), black_box(range)));
            }
        })
    });
}

fn bench_test_parsed(c: &mut Criterion) {
    let candidates = [
        "1.2.3",
        "1.2.3-beta",
        "2.4.5",
        "1.9999.9999",
        "nightly-b12",
        "1.9.0",
        "2.0.0",
        "0.3.1",
    ];
    let parsed: Vec<Version> = candidates.iter().map(|v| Version::parse(v)).collect();
    let predicate = VersionPredicate::parse("^1.2").unwrap();

    c.bench_function("predicate_test_parsed", |b| {
        b.iter(|| {
            for version in &parsed {
                black_box(predicate.test(black_box(version)));
            }
        })
    });
}

fn bench_or_merge(c: &mut Criterion) {
    let intervals: Vec<VersionInterval> = [
        "^1.0", "~2.4", ">=3.0 <3.5", "^1.4", "~2.5", ">=5.0", "<0.2", "^4.0",
    ]
    .iter()
    .map(|range| {
        VersionPredicate::parse(range)
            .unwrap()
            .to_interval()
            .unwrap()
    })
    .collect();

    c.bench_function("interval_or_merge", |b| {
        b.iter(|| {
            let mut merged: Vec<VersionInterval> = Vec::new();
            for interval in &intervals {
                merged = VersionInterval::or_merge(black_box(merged), black_box(interval.clone()));
            }
            black_box(merged)
        })
    });
}

criterion_group!(
    benches,
    bench_parse_versions,
    bench_compare_versions,
    bench_parse_ranges,
    bench_matches,
    bench_test_parsed,
    bench_or_merge
);
criterion_main!(benches);
