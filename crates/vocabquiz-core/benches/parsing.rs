use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vocabquiz_core::parser::{parse_feed, GVIZ_PREFIX, GVIZ_SUFFIX};

fn make_feed(rows: usize) -> String {
    let mut body = String::from(r#"{"version":"0.6","status":"ok","table":{"cols":[],"rows":["#);
    for i in 0..rows {
        if i > 0 {
            body.push(',');
        }
        body.push_str(&format!(
            r#"{{"c":[{{"v":"word{i}"}},null,{{"v":"noun"}},{{"v":"meaning {i}"}},{{"v":"An example for word{i}."}},{{"v":"wrong {i}a"}},{{"v":"wrong {i}b"}},{{"v":"wrong {i}c"}},{{"v":"topic{}"}}]}}"#,
            i % 8
        ));
    }
    body.push_str("]}}");
    format!("{GVIZ_PREFIX}{body}{GVIZ_SUFFIX}")
}

fn bench_parse_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_feed");

    let small = make_feed(20);
    let medium = make_feed(500);
    let large = make_feed(5000);

    group.bench_function("20_rows", |b| b.iter(|| parse_feed(black_box(&small))));

    group.bench_function("500_rows", |b| b.iter(|| parse_feed(black_box(&medium))));

    group.bench_function("5000_rows", |b| b.iter(|| parse_feed(black_box(&large))));

    group.finish();
}

criterion_group!(benches, bench_parse_feed);
criterion_main!(benches);
