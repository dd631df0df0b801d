use alder_core::geometry::{Point, Size};
use alder_text::HeuristicShaper;
use alder_ui::{Checkbox, Container, UiTree};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn build_tree(count: usize) -> (UiTree, Vec<alder_ui::ControlId>) {
    let mut tree = UiTree::new();
    let root = Container::build(&mut tree, None);
    let checkboxes: Vec<_> = (0..count).map(|_| Checkbox::build(&mut tree, root)).collect();
    tree.initialize(root);
    (tree, checkboxes)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for count in [10, 100, 1000] {
        group.bench_function(format!("{count}_checkboxes"), |b| {
            b.iter(|| black_box(build_tree(count)));
        });
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let (mut tree, checkboxes) = build_tree(100);
    c.bench_function("toggle_100", |b| {
        b.iter(|| {
            for id in &checkboxes {
                if let Some(mut checkbox) = tree.checkbox(*id) {
                    checkbox.toggle();
                }
            }
            tree.take_events()
        });
    });
}

fn bench_attribute_routing(c: &mut Criterion) {
    let (mut tree, checkboxes) = build_tree(100);
    c.bench_function("label_attr_100", |b| {
        let mut n = 0u32;
        b.iter(|| {
            n += 1;
            let text = format!("Item {n}");
            for id in &checkboxes {
                tree.add_attribute(*id, "label", &text);
            }
        });
    });
}

fn bench_layout(c: &mut Criterion) {
    let shaper = HeuristicShaper::new();
    c.bench_function("layout_100", |b| {
        b.iter_batched(
            || build_tree(100).0,
            |mut tree| {
                tree.compute_layout(Size::new(800.0, 600.0), &shaper);
                tree
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let (mut tree, _) = build_tree(100);
    tree.compute_layout(Size::new(800.0, 600.0), &HeuristicShaper::new());
    c.bench_function("hit_test_100", |b| {
        b.iter(|| black_box(tree.hit_test(Point::new(10.0, 10.0))));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_toggle,
    bench_attribute_routing,
    bench_layout,
    bench_hit_test
);
criterion_main!(benches);
