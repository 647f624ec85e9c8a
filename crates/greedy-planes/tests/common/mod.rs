#![allow(dead_code)]

//! Cost tables for testing.

use greedy_planes::CostTable;
use rand::prelude::*;

/// The group of each point when `sizes` consecutive points form each group.
pub fn labels(sizes: &[usize]) -> Vec<usize> {
    sizes
        .iter()
        .enumerate()
        .flat_map(|(g, &s)| core::iter::repeat(g).take(s))
        .collect()
}

/// A table with `intra` for triples within a group and `inter` for all others.
pub fn grouped(sizes: &[usize], intra: f64, inter: f64) -> CostTable {
    let labels = labels(sizes);
    CostTable::from_fn(labels.len(), |i, j, k| {
        if labels[i] == labels[j] && labels[j] == labels[k] {
            intra
        } else {
            inter
        }
    })
    .unwrap_or_else(|e| unreachable!("{e}"))
}

/// Like `grouped`, but with uniform noise of the given amplitude on every cost.
pub fn noisy_grouped(sizes: &[usize], intra: f64, inter: f64, noise: f64, seed: u64) -> CostTable {
    let labels = labels(sizes);
    let mut rng = StdRng::seed_from_u64(seed);
    let costs = CostTable::triplets(labels.len())
        .map(|(i, j, k)| {
            let base = if labels[i] == labels[j] && labels[j] == labels[k] {
                intra
            } else {
                inter
            };
            base + rng.gen_range(-noise..=noise)
        })
        .collect();
    CostTable::new(labels.len(), costs).unwrap_or_else(|e| unreachable!("{e}"))
}

/// A table of costs drawn uniformly from `[min, max)`.
pub fn random(node_count: usize, min: f64, max: f64, seed: u64) -> CostTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let costs = CostTable::triplets(node_count)
        .map(|_| rng.gen_range(min..max))
        .collect();
    CostTable::new(node_count, costs).unwrap_or_else(|e| unreachable!("{e}"))
}

/// Sorts the clusters so that partitions can be compared regardless of order.
pub fn canonical(mut clusters: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    for c in &mut clusters {
        c.sort_unstable();
    }
    clusters.sort();
    clusters
}
