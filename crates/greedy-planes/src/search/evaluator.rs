//! The marginal cost of moving a point between clusters.

use std::collections::BTreeSet;

use crate::{CostTable, Destination, PartitionState};

/// Computes how the total cost changes when a single point moves.
///
/// The total cost of a partition is the sum of the costs of every triple that
/// lies within one cluster, so moving a point `p` from `A` to `B` removes the
/// triples formed by `p` and two other members of `A` and adds those formed by
/// `p` and two members of `B`.
#[derive(Clone, Copy, Debug)]
pub struct MoveEvaluator<'a> {
    /// The costs of all triples.
    costs: &'a CostTable,
}

impl<'a> MoveEvaluator<'a> {
    /// Creates a new `MoveEvaluator` over the given costs.
    #[must_use]
    pub const fn new(costs: &'a CostTable) -> Self {
        Self { costs }
    }

    /// The costs used by the evaluator.
    #[must_use]
    pub const fn costs(&self) -> &'a CostTable {
        self.costs
    }

    /// The cost that leaves the total when `point` moves out of the cluster
    /// in slot `from`.
    ///
    /// This is zero when the cluster has fewer than three members, counting
    /// `point`, or when the slot does not exist.
    #[must_use]
    pub fn cost_removed(&self, partition: &PartitionState, point: usize, from: usize) -> f64 {
        partition.cluster(from).map_or(0.0, |members| self.pair_sum(point, members))
    }

    /// The cost that joins the total when `point` moves into `to`.
    ///
    /// This is zero for a new cluster or a cluster with fewer than two members.
    #[must_use]
    pub fn cost_added(&self, partition: &PartitionState, point: usize, to: Destination) -> f64 {
        match to {
            Destination::NewCluster => 0.0,
            Destination::Existing(slot) => partition.cluster(slot).map_or(0.0, |members| self.pair_sum(point, members)),
        }
    }

    /// The change in total cost if `point` moves from slot `from` to `to`.
    ///
    /// Negative values are improvements.
    #[must_use]
    pub fn delta(&self, partition: &PartitionState, point: usize, from: usize, to: Destination) -> f64 {
        self.cost_added(partition, point, to) - self.cost_removed(partition, point, from)
    }

    /// The sum of the costs of every triple formed by `point` and an
    /// unordered pair of the other members.
    pub(crate) fn pair_sum(&self, point: usize, members: &BTreeSet<usize>) -> f64 {
        let others = members.iter().copied().filter(|&m| m != point).collect::<Vec<_>>();

        let mut sum = 0.0;
        for (x, &a) in others.iter().enumerate() {
            for &b in &others[(x + 1)..] {
                sum += self.costs.get(point, a, b);
            }
        }
        sum
    }
}
