//! Benchmarks for schema sync decisions

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use formsync_core::{FieldPath, MarkerTree, SyncConfig, SyncEvent, SyncMode};
use formsync_state::{flatten, select_fields, SyncPolicy};

fn wide_tree(fields: usize) -> MarkerTree {
    MarkerTree::from_paths((0..fields).map(|i| format!("field{}", i)))
}

fn nested_tree(groups: usize, per_group: usize) -> MarkerTree {
    let mut tree = MarkerTree::empty();
    for g in 0..groups {
        let group = FieldPath::new(format!("group{}", g));
        for f in 0..per_group {
            tree.mark(&group.child(&format!("field{}", f)));
        }
    }
    tree
}

fn bench_flatten_wide(c: &mut Criterion) {
    let tree = wide_tree(100);

    c.bench_function("flatten_wide_100", |b| {
        b.iter(|| black_box(flatten(black_box(&tree))))
    });
}

fn bench_flatten_nested(c: &mut Criterion) {
    let tree = nested_tree(10, 10);

    c.bench_function("flatten_nested_10x10", |b| {
        b.iter(|| black_box(flatten(black_box(&tree))))
    });
}

fn bench_select_concat(c: &mut Criterion) {
    let touched = wide_tree(50);
    let dirty = MarkerTree::empty();

    c.bench_function("select_fields_one_side", |b| {
        b.iter(|| black_box(select_fields(SyncMode::All, black_box(&touched), black_box(&dirty))))
    });
}

fn bench_select_union(c: &mut Criterion) {
    // Half of the dirty fields overlap the touched ones
    let touched = wide_tree(50);
    let dirty = MarkerTree::from_paths((25..75).map(|i| format!("field{}", i)));

    c.bench_function("select_fields_union", |b| {
        b.iter(|| black_box(select_fields(SyncMode::All, black_box(&touched), black_box(&dirty))))
    });
}

fn bench_policy_decide(c: &mut Criterion) {
    let policy = SyncPolicy::new(SyncConfig::on_touched());

    c.bench_function("policy_decide", |b| {
        b.iter(|| black_box(policy.decide(black_box(SyncEvent::Change), black_box(true))))
    });
}

criterion_group!(
    benches,
    bench_flatten_wide,
    bench_flatten_nested,
    bench_select_concat,
    bench_select_union,
    bench_policy_decide,
);
criterion_main!(benches);
