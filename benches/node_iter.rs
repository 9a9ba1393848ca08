use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use tensor_mesh::prelude::*;

fn count_neighbors(hierarchy: &TensorMeshHierarchy<3, f64>) -> usize {
    let range = TensorNodeRange::new(hierarchy, hierarchy.finest_level()).unwrap();
    range
        .iter()
        .map(|node| node.successor(0).multiindex[0] + node.predecessor(2).multiindex[2])
        .sum()
}

fn count_reserved_neighbors(hierarchy: &TensorMeshHierarchy<3, f64>) -> usize {
    let range = TensorReservedNodeRange::new(hierarchy, hierarchy.finest_level()).unwrap();
    range
        .iter()
        .map(|node| node.successor(0).multiindex[0] + node.predecessor(2).multiindex[2])
        .sum()
}

fn node_iter_bench(c: &mut Criterion) {
    let hierarchy = TensorMeshHierarchy::<3, f64>::new([65, 65, 65]).unwrap();

    c.bench_function("node_range 65^3", |b| {
        b.iter(|| count_neighbors(black_box(&hierarchy)))
    });

    c.bench_function("reserved_node_range 65^3", |b| {
        b.iter(|| count_reserved_neighbors(black_box(&hierarchy)))
    });
}

fn shuffle_bench(c: &mut Criterion) {
    let hierarchy = TensorMeshHierarchy::<3, f64>::new([65, 65, 65]).unwrap();
    let field = ndarray::Array::random(ndarray::IxDyn(&[65, 65, 65]), Uniform::new(0., 10.));
    let row_major: Vec<f64> = field.iter().copied().collect();
    let mut shuffled = vec![0.0; row_major.len()];

    c.bench_function("shuffle 65^3", |b| {
        b.iter(|| hierarchy.shuffle(black_box(&row_major), &mut shuffled).unwrap())
    });

    c.bench_function("construct 129^3", |b| {
        b.iter(|| TensorMeshHierarchy::<3, f64>::new(black_box([129, 129, 129])).unwrap())
    });
}

criterion_group!(benches, node_iter_bench, shuffle_bench);
criterion_main!(benches);
