use activeseries::{CustomTrackersConfig, Labels, Matchers};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const TRACKERS: &str = r#"api:{job="api"};errors:{code=~"5.."};not_dev:{job=~".+", env!="dev"};up:up{namespace="ziox-alpha1"}"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| {
            let config: CustomTrackersConfig = black_box(TRACKERS).parse().unwrap();
            black_box(config);
        })
    });
}

fn bench_matches(c: &mut Criterion) {
    let config: CustomTrackersConfig = TRACKERS.parse().unwrap();
    let matchers = Matchers::new(&config).unwrap();
    let series = Labels::new([
        ("__name__", "up"),
        ("namespace", "ziox-alpha1"),
        ("job", "api"),
        ("code", "503"),
    ]);
    c.bench_function("matches", |b| {
        b.iter(|| black_box(matchers.matches(black_box(&series))))
    });
}

criterion_group!(benches, bench_parse, bench_matches);
criterion_main!(benches);
