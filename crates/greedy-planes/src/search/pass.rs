//! A single pass of greedy moving with best-prefix rollback.

use serde::{Deserialize, Serialize};

use crate::{Destination, PartitionState, SearchConfig};

use super::{candidates::CandidateMoves, MoveEvaluator};

/// A summary of one pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// Whether the kept moves lowered the total cost.
    pub improved: bool,
    /// The lowest cumulative change in cost reached during the pass. This is
    /// the change that the kept moves made to the total cost.
    pub best_gain: f64,
    /// The number of moves made, which is the number of points.
    pub moves_made: usize,
    /// The number of moves kept after the rollback.
    pub moves_kept: usize,
    /// The number of moves undone by the rollback.
    pub moves_rolled_back: usize,
    /// The number of candidate deltas computed.
    pub evaluations: usize,
    /// The number of clusters after the pass.
    pub num_clusters: usize,
}

/// A move that has been applied, with the slot it landed in.
#[derive(Clone, Copy, Debug)]
struct AppliedMove {
    /// The point that was moved.
    point: usize,
    /// The slot it was moved out of.
    from: usize,
    /// The slot it was moved into.
    to: usize,
}

/// The state that lives for the duration of a single pass.
struct PassContext {
    /// Whether each point has already been moved in this pass.
    frozen: Vec<bool>,
    /// The number of frozen points.
    num_frozen: usize,
    /// The cumulative change in cost of all moves so far.
    gain: f64,
    /// The lowest cumulative change seen so far.
    best_gain: f64,
    /// The moves made since `best_gain` was last lowered.
    log: Vec<AppliedMove>,
    /// The live candidate moves.
    candidates: CandidateMoves,
}

impl PassContext {
    /// Creates the context for a pass over `node_count` points.
    fn new(node_count: usize) -> Self {
        Self {
            frozen: vec![false; node_count],
            num_frozen: 0,
            gain: 0.0,
            best_gain: 0.0,
            log: Vec::new(),
            candidates: CandidateMoves::new(),
        }
    }

    /// Marks the point as moved.
    fn freeze(&mut self, point: usize) {
        if !self.frozen[point] {
            self.frozen[point] = true;
            self.num_frozen += 1;
        }
    }
}

/// Runs one pass of greedy moving over the partition.
///
/// Every point is moved exactly once. At each step the candidate with the
/// lowest delta is applied, even if it makes the total cost worse, and the
/// moved point is frozen for the rest of the pass. Whenever the rounded
/// cumulative change drops below the best seen so far, the moves made up to
/// that point become permanent. Once all points are frozen, the moves made
/// after the best point are undone, and empty clusters are removed.
///
/// # Arguments
///
/// * `partition`: The partition to improve. It is left at the best state seen.
/// * `evaluator`: Computes the deltas of moves.
/// * `config`: The rounding precision and whether to score in parallel.
///
/// # Errors
///
/// * If the partition and the cost table disagree on the number of points.
/// * If no candidate move is left while some point is still unfrozen.
pub fn run_pass(
    partition: &mut PartitionState,
    evaluator: &MoveEvaluator,
    config: &SearchConfig,
) -> Result<PassReport, String> {
    let node_count = partition.node_count();
    if evaluator.costs().node_count() != node_count {
        return Err(format!(
            "The partition has {node_count} points but the cost table has {}.",
            evaluator.costs().node_count()
        ));
    }

    let mut ctx = PassContext::new(node_count);
    let mut changed = (0..partition.num_slots()).collect::<Vec<_>>();

    while ctx.num_frozen < node_count {
        ctx.candidates
            .refresh(evaluator, partition, &ctx.frozen, &changed, config.parallel);

        let (mv, delta) = ctx.candidates.pop_best().ok_or_else(|| {
            format!(
                "No candidate moves are left with {} of {node_count} points unfrozen.",
                node_count - ctx.num_frozen
            )
        })?;

        let to = partition.move_point(mv.point, mv.from, mv.to)?;
        ctx.log.push(AppliedMove {
            point: mv.point,
            from: mv.from,
            to,
        });
        ctx.gain += delta;

        if config.improves_on(ctx.gain, ctx.best_gain) {
            ctx.best_gain = ctx.gain;
            ctx.log.clear();
        }

        ctx.freeze(mv.point);
        ctx.candidates.invalidate(mv.point, mv.from, to);
        changed = vec![mv.from, to];
    }

    let moves_rolled_back = ctx.log.len();
    for applied in ctx.log.iter().rev() {
        partition.move_point(applied.point, applied.to, Destination::Existing(applied.from))?;
    }
    if moves_rolled_back > 0 {
        ftlog::debug!(
            "Rolled back {moves_rolled_back} moves, leaving {} candidates unused.",
            ctx.candidates.len()
        );
    }

    partition.remove_empty_clusters();

    Ok(PassReport {
        improved: config.round(ctx.best_gain) < 0.0,
        best_gain: ctx.best_gain,
        moves_made: node_count,
        moves_kept: node_count - moves_rolled_back,
        moves_rolled_back,
        evaluations: ctx.candidates.evaluations(),
        num_clusters: partition.num_clusters(),
    })
}
