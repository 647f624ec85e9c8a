//! Tests for `GreedyMovingKl`.

use float_cmp::approx_eq;
use greedy_planes::{CostTable, GreedyClustering, GreedyMovingKl, PartitionState, SearchConfig};
use test_case::test_case;

mod common;

#[test]
fn two_triangles() -> Result<(), String> {
    let costs = common::grouped(&[3, 3], -0.4, 0.2);
    let mut kl = GreedyMovingKl::new(&costs, SearchConfig::default());
    let result = kl.cluster()?;

    assert_eq!(result.clusters, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert!(approx_eq!(f64, result.total_cost, -0.8, epsilon = 1e-12));

    // The first pass finds both groups and the second confirms nothing is left.
    assert_eq!(result.num_passes(), 2);
    assert!(result.passes[0].improved);
    assert!(approx_eq!(f64, result.passes[0].best_gain, -0.8, epsilon = 1e-12));
    assert!(!result.passes[1].improved);
    assert_eq!(result.passes[1].moves_kept, 0);

    let report = kl.pass()?;
    assert!(!report.improved);
    assert_eq!(kl.partition().to_sets(), result.clusters);

    Ok(())
}

#[test]
fn lone_incentive_merges_all_three() -> Result<(), String> {
    let costs = CostTable::new(3, vec![-1.0])?;
    let result = GreedyMovingKl::new(&costs, SearchConfig::default()).cluster()?;

    assert_eq!(result.clusters, vec![vec![0, 1, 2]]);
    assert!(approx_eq!(f64, result.total_cost, -1.0, epsilon = 1e-12));
    Ok(())
}

#[test_case(6, 0.0 ; "zeros")]
#[test_case(8, 0.5 ; "positive")]
#[test_case(10, 1e-3 ; "tiny")]
fn no_incentive_keeps_singletons(node_count: usize, cost: f64) -> Result<(), String> {
    let costs = CostTable::from_fn(node_count, |_, _, _| cost)?;
    let result = GreedyMovingKl::new(&costs, SearchConfig::default()).cluster()?;

    assert_eq!(result.clusters, (0..node_count).map(|p| vec![p]).collect::<Vec<_>>());
    assert_eq!(result.num_passes(), 1);
    assert_eq!(result.passes[0].moves_kept, 0);
    assert!(approx_eq!(f64, result.total_cost, 0.0));
    Ok(())
}

#[test_case(0 ; "empty")]
#[test_case(1 ; "one")]
#[test_case(2 ; "two")]
fn too_few_points_for_a_triple(node_count: usize) -> Result<(), String> {
    let costs = CostTable::new(node_count, Vec::new())?;
    let result = GreedyMovingKl::new(&costs, SearchConfig::default()).cluster()?;

    assert_eq!(result.num_clusters(), node_count);
    assert!(!result.passes[0].improved);
    Ok(())
}

#[test_case(&[4, 4], 1 ; "two quads")]
#[test_case(&[5, 3, 4], 2 ; "three groups")]
#[test_case(&[6, 6, 6], 3 ; "three sixes")]
fn noisy_groups_converge(sizes: &[usize], seed: u64) -> Result<(), String> {
    let costs = common::noisy_grouped(sizes, -1.0, 0.5, 0.1, seed);
    let mut kl = GreedyMovingKl::new(&costs, SearchConfig::default());
    let result = kl.cluster()?;

    kl.partition().check_invariant()?;
    assert!(result.total_cost <= 0.0);
    assert!(approx_eq!(
        f64,
        result.total_cost,
        result.passes.iter().map(|p| p.best_gain).sum::<f64>(),
        epsilon = 1e-9
    ));
    assert!(result.clusters.iter().all(|c| !c.is_empty()));
    assert_eq!(result.clusters.iter().map(Vec::len).sum::<usize>(), costs.node_count());

    // Every improving pass lowers the cost, so the gains are all negative
    // except for the last one.
    let (last, improving) = result.passes.split_last().ok_or("No passes were run.")?;
    assert!(!last.improved);
    assert!(improving.iter().all(|p| p.improved && p.best_gain < 0.0));

    Ok(())
}

#[test_case(12, 7 ; "small")]
#[test_case(25, 11 ; "medium")]
fn random_costs_never_get_worse(node_count: usize, seed: u64) -> Result<(), String> {
    let costs = common::random(node_count, -1.0, 1.0, seed);
    let initial = PartitionState::singletons(node_count).total_cost(&costs);

    let mut kl = GreedyMovingKl::new(&costs, SearchConfig::default());
    let mut previous = initial;
    loop {
        let report = kl.pass()?;
        kl.partition().check_invariant()?;

        let current = kl.partition().total_cost(&costs);
        assert!(current <= previous + 1e-9, "Cost went from {previous} to {current}.");
        assert!(approx_eq!(f64, current - previous, report.best_gain, epsilon = 1e-9));
        previous = current;

        if !report.improved {
            break;
        }
    }

    assert!(previous <= initial);
    Ok(())
}

#[test]
fn converged_partition_is_stable() -> Result<(), String> {
    let costs = common::noisy_grouped(&[5, 5, 4], -1.0, 0.5, 0.2, 42);
    let converged = GreedyMovingKl::new(&costs, SearchConfig::default()).cluster()?;

    let partition = PartitionState::from_clusters(costs.node_count(), converged.clusters.clone())?;
    let mut kl = GreedyMovingKl::with_partition(&costs, SearchConfig::default(), partition)?;
    let report = kl.pass()?;

    assert!(!report.improved);
    assert_eq!(report.moves_kept, 0);
    assert_eq!(report.moves_rolled_back, costs.node_count());
    assert_eq!(kl.partition().to_sets(), converged.clusters);
    Ok(())
}

#[test]
fn runs_are_deterministic() -> Result<(), String> {
    let costs = common::random(20, -1.0, 0.6, 3);

    let first = GreedyMovingKl::new(&costs, SearchConfig::default()).cluster()?;
    let second = GreedyMovingKl::new(&costs, SearchConfig::default()).cluster()?;
    let parallel = GreedyMovingKl::new(&costs, SearchConfig::default().with_parallel(true)).cluster()?;

    assert_eq!(first.clusters, second.clusters);
    assert_eq!(first.passes, second.passes);
    assert_eq!(first.clusters, parallel.clusters);
    assert_eq!(first.passes, parallel.passes);
    Ok(())
}

#[test]
fn rounding_decides_near_zero_gains() -> Result<(), String> {
    let costs = CostTable::new(3, vec![-1e-17])?;

    let default = GreedyMovingKl::new(&costs, SearchConfig::default()).cluster()?;
    assert_eq!(default.clusters, vec![vec![0], vec![1], vec![2]]);

    let fine = GreedyMovingKl::new(&costs, SearchConfig::default().with_precision(20)).cluster()?;
    assert_eq!(fine.clusters, vec![vec![0, 1, 2]]);

    let costs = CostTable::new(3, vec![-1e-3])?;
    let coarse = GreedyMovingKl::new(&costs, SearchConfig::default().with_precision(2)).cluster()?;
    assert_eq!(coarse.clusters, vec![vec![0], vec![1], vec![2]]);

    let exact = GreedyMovingKl::new(&costs, SearchConfig::default().with_precision(3)).cluster()?;
    assert_eq!(exact.clusters, vec![vec![0, 1, 2]]);
    Ok(())
}

#[test]
fn pass_limit_is_respected() -> Result<(), String> {
    let costs = common::grouped(&[3, 3], -0.4, 0.2);
    let config = SearchConfig::default().with_max_passes(Some(1)).with_measure_time(true);
    let result = GreedyMovingKl::new(&costs, config).cluster()?;

    assert_eq!(result.num_passes(), 1);
    assert!(result.passes[0].improved);
    assert!(result.elapsed.is_some());
    Ok(())
}

#[test]
fn mismatched_partition_is_rejected() -> Result<(), String> {
    let costs = common::grouped(&[3, 3], -0.4, 0.2);
    let partition = PartitionState::singletons(5);
    assert!(GreedyMovingKl::with_partition(&costs, SearchConfig::default(), partition).is_err());
    Ok(())
}

#[test_case(20, 5 ; "twenty")]
#[test_case(40, 9 ; "forty")]
fn updates_are_incremental(node_count: usize, seed: u64) -> Result<(), String> {
    let costs = common::random(node_count, -1.0, 1.0, seed);
    let mut kl = GreedyMovingKl::new(&costs, SearchConfig::default());

    // Rescoring every point against every cluster after each move would cost
    // on the order of `n^3 / 2` deltas per pass.
    let full_rescan = node_count.pow(3) / 2;
    loop {
        let report = kl.pass()?;
        assert!(
            report.evaluations < full_rescan,
            "{} evaluations is not below {full_rescan}.",
            report.evaluations
        );
        if !report.improved {
            break;
        }
    }
    Ok(())
}
