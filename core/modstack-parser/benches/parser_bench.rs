use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use modstack_catalog::Catalog;
use modstack_parser::{ClusterParser, ParserConfig};
use modstack_types::Primitive;

const CYCLE: &[&str] = &[
    "BEVEL",
    "BEVEL",
    "BEVEL",
    "BEVEL",
    "WEIGHTED_NORMAL",
    "MIRROR",
    "SUBSURF",
    "BOOLEAN",
    "BEVEL",
    "ARRAY",
];

fn stack(len: usize) -> Vec<Primitive> {
    (0..len)
        .map(|i| Primitive::new(format!("mod.{i:04}"), CYCLE[i % CYCLE.len()]))
        .collect()
}

fn bench_parse_object(c: &mut Criterion) {
    let catalog = Catalog::with_defaults();
    let mut group = c.benchmark_group("parse_object");
    for len in [10usize, 100, 1000] {
        let input = stack(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| {
                let mut parser = ClusterParser::new(ParserConfig::default());
                black_box(parser.parse_object(input.clone(), &catalog))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_object);
criterion_main!(benches);
