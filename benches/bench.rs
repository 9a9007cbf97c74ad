use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bstree::tree::Tree;

/// A perfectly filled tree with `num_levels` levels, holding `0..2^levels - 1`.
fn filled_tree(num_levels: u32) -> Tree<i32> {
    let num_nodes = 2i32.pow(num_levels) - 1;
    Tree::build(0..num_nodes)
}

/// Helper to bench a function on the tree.
/// It creates a group for the given name and closure and runs the closure
/// against trees of various sizes before finishing the group. Each iteration
/// works on a fresh clone so mutations don't compound across iterations.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let largest_element_in_tree = 2i32.pow(num_levels) - 2;
        let tree = filled_tree(num_levels);
        let id = BenchmarkId::from_parameter(largest_element_in_tree);

        group.bench_function(id, |b| {
            b.iter_custom(|iters| {
                let mut time = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut tree = black_box(tree.clone());
                    let instant = std::time::Instant::now();
                    f(&mut tree, black_box(largest_element_in_tree));
                    let elapsed = instant.elapsed();
                    time += elapsed;
                }
                time
            })
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _found = black_box(tree.find(&i).is_found());
    });
    bench_helper(c, "remove", |tree, i| {
        tree.remove(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _found = black_box(tree.find(&(i + 1)).is_found());
    });
    bench_helper(c, "remove-miss", |tree, i| {
        tree.remove(&(i + 1));
    });

    bench_helper(c, "rebalance", |tree, _| {
        let _ = tree.rebalance();
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
