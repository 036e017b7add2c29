use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use taxonomy_sunburst::config::{Config, InputConfig, LayoutConfig};
use taxonomy_sunburst::layout::compute_layout;
use taxonomy_sunburst::parser::parse_records;
use taxonomy_sunburst::render::{DEFAULT_TEMPLATE, render_svg};
use taxonomy_sunburst::render_taxonomy;
use taxonomy_sunburst::tree::WeightedTree;
use std::hint::black_box;

/// Synthetic taxonomy: `fanout` children per level, `depth` levels, with
/// weights spread unevenly so wedges differ in size.
fn synthetic_taxonomy(fanout: usize, depth: usize) -> String {
    let mut out = String::new();
    let mut path = Vec::new();
    push_paths(&mut out, &mut path, fanout, depth);
    out
}

fn push_paths(out: &mut String, path: &mut Vec<String>, fanout: usize, depth: usize) {
    if path.len() == depth {
        let weight = path.iter().map(|s| s.len()).sum::<usize>() * 7 + path.len();
        out.push_str(&format!("{}\t{}\n", path.join(";"), weight));
        return;
    }
    for i in 0..fanout {
        path.push(format!("L{}C{}", path.len(), i));
        push_paths(out, path, fanout, depth);
        path.pop();
    }
}

const SIZES: [(usize, usize); 3] = [(4, 3), (6, 4), (8, 5)];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let config = InputConfig::default();
    for (fanout, depth) in SIZES {
        let input = synthetic_taxonomy(fanout, depth);
        let name = format!("fanout{}_depth{}", fanout, depth);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let records = parse_records(black_box(data), &config).expect("parse failed");
                black_box(records.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for (fanout, depth) in SIZES {
        let input = synthetic_taxonomy(fanout, depth);
        let records = parse_records(&input, &InputConfig::default()).expect("parse failed");
        let tree = WeightedTree::from_records(&records).expect("tree failed");
        let name = format!("fanout{}_depth{}", fanout, depth);
        group.bench_with_input(BenchmarkId::from_parameter(name), &tree, |b, tree| {
            b.iter(|| {
                let layout = compute_layout(black_box(tree), &config);
                black_box(layout.wedge_count());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = Config::default();
    for (fanout, depth) in SIZES {
        let input = synthetic_taxonomy(fanout, depth);
        let records = parse_records(&input, &config.input).expect("parse failed");
        let tree = WeightedTree::from_records(&records).expect("tree failed");
        let layout = compute_layout(&tree, &config.layout);
        let name = format!("fanout{}_depth{}", fanout, depth);
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, layout| {
            b.iter(|| {
                let svg = render_svg(black_box(layout), &config, DEFAULT_TEMPLATE)
                    .expect("render failed");
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for (fanout, depth) in SIZES {
        let input = synthetic_taxonomy(fanout, depth);
        let name = format!("fanout{}_depth{}", fanout, depth);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let svg = render_taxonomy(black_box(data), &config, DEFAULT_TEMPLATE)
                    .expect("render failed");
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
