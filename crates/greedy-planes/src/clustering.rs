//! Greedy clustering algorithms and the results they produce.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{
    search::{run_pass, MoveEvaluator, PassReport},
    CostTable, PartitionState, SearchConfig,
};

/// The result of clustering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// The clusters, each a sorted list of points.
    pub clusters: Vec<Vec<usize>>,
    /// The reports of every pass, in order. The last one did not improve,
    /// unless the run stopped at the pass limit.
    pub passes: Vec<PassReport>,
    /// The total cost of the clusters.
    pub total_cost: f64,
    /// The time taken, if it was measured.
    pub elapsed: Option<Duration>,
}

impl Clustering {
    /// The number of clusters found.
    #[must_use]
    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// The number of passes run.
    #[must_use]
    pub fn num_passes(&self) -> usize {
        self.passes.len()
    }
}

/// An algorithm that improves a partition one pass at a time.
pub trait GreedyClustering {
    /// The costs being minimized.
    fn costs(&self) -> &CostTable;

    /// The parameters of the search.
    fn config(&self) -> &SearchConfig;

    /// The current partition.
    fn partition(&self) -> &PartitionState;

    /// Runs one pass over the current partition.
    ///
    /// # Errors
    ///
    /// Depends on the implementation.
    fn pass(&mut self) -> Result<PassReport, String>;

    /// Runs passes until one of them does not improve the partition.
    ///
    /// If `max_passes` is set in the config, at most that many passes are
    /// run.
    ///
    /// # Errors
    ///
    /// * If any pass fails.
    fn cluster(&mut self) -> Result<Clustering, String> {
        let start = self.config().measure_time.then(Instant::now);
        let max_passes = self.config().max_passes;
        let mut passes = Vec::new();

        loop {
            if max_passes.is_some_and(|m| passes.len() >= m) {
                ftlog::warn!("Stopping after reaching the limit of {} passes.", passes.len());
                break;
            }

            let report = self.pass()?;
            ftlog::info!(
                "Pass {}: kept {}/{} moves, gain {:.6e}, {} clusters.",
                passes.len() + 1,
                report.moves_kept,
                report.moves_made,
                report.best_gain,
                report.num_clusters
            );

            let improved = report.improved;
            passes.push(report);
            if !improved {
                break;
            }
        }

        let elapsed = start.map(|s| s.elapsed());
        if let Some(elapsed) = elapsed {
            ftlog::info!("Clustering took {:.3} seconds.", elapsed.as_secs_f64());
        }

        Ok(Clustering {
            clusters: self.partition().to_sets(),
            passes,
            total_cost: self.partition().total_cost(self.costs()),
            elapsed,
        })
    }
}

/// Kernighan-Lin style greedy moving.
///
/// Starting from singletons, each pass moves every point once to the cluster
/// that changes the cost the least, then keeps only the prefix of moves with
/// the lowest cumulative cost.
#[derive(Clone, Debug)]
pub struct GreedyMovingKl<'a> {
    /// The costs being minimized.
    costs: &'a CostTable,
    /// The parameters of the search.
    config: SearchConfig,
    /// The current partition.
    partition: PartitionState,
}

impl<'a> GreedyMovingKl<'a> {
    /// Creates a new `GreedyMovingKl` in which every point is its own cluster.
    #[must_use]
    pub fn new(costs: &'a CostTable, config: SearchConfig) -> Self {
        Self {
            costs,
            config,
            partition: PartitionState::singletons(costs.node_count()),
        }
    }

    /// Creates a new `GreedyMovingKl` that starts from the given partition.
    ///
    /// # Errors
    ///
    /// * If the partition does not cover the same points as the costs.
    /// * If the partition is inconsistent.
    pub fn with_partition(costs: &'a CostTable, config: SearchConfig, partition: PartitionState) -> Result<Self, String> {
        if partition.node_count() != costs.node_count() {
            return Err(format!(
                "The partition has {} points but the cost table has {}.",
                partition.node_count(),
                costs.node_count()
            ));
        }
        partition.check_invariant()?;

        Ok(Self {
            costs,
            config,
            partition,
        })
    }

    /// Consumes the algorithm and returns its partition.
    #[must_use]
    pub fn into_partition(self) -> PartitionState {
        self.partition
    }
}

impl GreedyClustering for GreedyMovingKl<'_> {
    fn costs(&self) -> &CostTable {
        self.costs
    }

    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn partition(&self) -> &PartitionState {
        &self.partition
    }

    fn pass(&mut self) -> Result<PassReport, String> {
        let evaluator = MoveEvaluator::new(self.costs);
        run_pass(&mut self.partition, &evaluator, &self.config)
    }
}
