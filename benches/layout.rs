use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use moodcloud::color::{FixedRandom, SolidColor};
use moodcloud::config::Config;
use moodcloud::ir::{CloudKind, Item};
use moodcloud::layout::compute_layout_with_measure;
use moodcloud::layout::text::CharWidthMeasure;
use moodcloud::render::render_svg;
use std::hint::black_box;

fn synthetic_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            // Spread weights so both engines see a mix of large and small items.
            let weight = 12.0 + ((i * 37) % 60) as f32;
            Item::new(format!("term{i}"), weight).with_meta("rank", i as u64)
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let config = Config::default();
    let measure = CharWidthMeasure::default();
    let mut group = c.benchmark_group("layout");
    for kind in [CloudKind::Words, CloudKind::Bubbles] {
        for count in [10usize, 40, 120] {
            let items = synthetic_items(count);
            let id = format!("{}_{count}", kind.as_str());
            group.bench_with_input(BenchmarkId::from_parameter(id), &items, |b, items| {
                b.iter(|| {
                    let layout = compute_layout_with_measure(
                        kind,
                        black_box(items),
                        800.0,
                        600.0,
                        &config.layout,
                        &measure,
                        &mut SolidColor("#4D96FF".to_string()),
                        &mut FixedRandom::new(vec![0.25, 0.75]),
                    );
                    black_box(layout.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let config = Config::default();
    let measure = CharWidthMeasure::default();
    let items = synthetic_items(40);
    let layout = compute_layout_with_measure(
        CloudKind::Words,
        &items,
        800.0,
        600.0,
        &config.layout,
        &measure,
        &mut SolidColor("#4D96FF".to_string()),
        &mut FixedRandom::new(vec![0.5]),
    );
    c.bench_function("render_words_40", |b| {
        b.iter(|| {
            let svg = render_svg(black_box(&layout), Some(0), None, &config.theme, &config.render);
            black_box(svg.len());
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_render
);
criterion_main!(benches);
