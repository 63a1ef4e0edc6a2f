//! Tree sort benchmarks over ascending, descending and random inputs

use avl_treesort::{tree_sort, SortConfig, Traversal, TreeSorter};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIZES: [usize; 3] = [10_000, 100_000, 200_000];

fn random_input(n: usize) -> Vec<i32> {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_7EE5);
    let upper = (n * 10) as i32;
    (0..n).map(|_| rng.gen_range(0..upper)).collect()
}

fn benchmark_input_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_sort");

    for n in SIZES {
        let shapes: [(&str, Vec<i32>); 3] = [
            ("ascending", (0..n as i32).collect()),
            ("descending", (0..n as i32).rev().collect()),
            ("random", random_input(n)),
        ];

        for (shape, input) in shapes {
            group.bench_with_input(BenchmarkId::new(shape, n), &input, |b, input| {
                b.iter_batched(
                    || input.clone(),
                    |mut values| {
                        tree_sort(&mut values).expect("sort succeeds");
                        black_box(values)
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

fn benchmark_traversal(c: &mut Criterion) {
    let input = random_input(100_000);
    let mut group = c.benchmark_group("flatten");

    for traversal in [Traversal::Recursive, Traversal::Iterative] {
        let sorter = TreeSorter::new(SortConfig {
            traversal,
            ..SortConfig::default()
        });
        group.bench_function(format!("{:?}", traversal), |b| {
            b.iter_batched(
                || input.clone(),
                |mut values| {
                    sorter.sort(&mut values).expect("sort succeeds");
                    black_box(values)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_input_shapes, benchmark_traversal);
criterion_main!(benches);
