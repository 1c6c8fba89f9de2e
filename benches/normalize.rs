use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use service_utils::logging::TracingSink;
use service_utils::rows::{CsvRowSource, MemoryRowSource, normalize};
use service_utils::types::RawValue;

fn memory_rows(n: usize) -> Vec<Vec<RawValue>> {
    (0..n)
        .map(|i| {
            vec![
                RawValue::from(i as i64),
                RawValue::from(format!("name-{i}")),
                if i % 3 == 0 { RawValue::Null } else { RawValue::from(i as f64 * 0.5) },
                RawValue::from(i % 2 == 0),
                RawValue::from(format!("payload-{i}").into_bytes()),
            ]
        })
        .collect()
}

fn csv_text(n: usize) -> String {
    let mut out = String::from("id,name,score,active\n");
    for i in 0..n {
        out.push_str(&format!("{i},name-{i},{}.5,{}\n", i % 100, i % 2 == 0));
    }
    out
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for n in [1_000usize, 10_000] {
        let rows = memory_rows(n);
        group.bench_with_input(BenchmarkId::new("memory", n), &rows, |b, rows| {
            b.iter(|| {
                let mut src = MemoryRowSource::new(
                    ["id", "name", "score", "active", "payload"],
                    rows.clone(),
                );
                black_box(normalize(&mut src, &TracingSink))
            })
        });

        let text = csv_text(n);
        group.bench_with_input(BenchmarkId::new("csv", n), &text, |b, text| {
            b.iter(|| {
                let mut src = CsvRowSource::from_reader(text.as_bytes());
                black_box(normalize(&mut src, &TracingSink))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
