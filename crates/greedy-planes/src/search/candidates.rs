//! The live set of candidate moves during a pass.

use core::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use priority_queue::DoublePriorityQueue;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Destination, PartitionState};

use super::MoveEvaluator;

/// Moving a point from one cluster to another.
///
/// The derived ordering (point, then source, then destination) breaks ties
/// between moves with equal deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// The point being moved.
    pub point: usize,
    /// The slot the point is moved out of.
    pub from: usize,
    /// Where the point is moved to.
    pub to: Destination,
}

/// The priority of a candidate: its delta, then the move itself.
#[derive(Clone, Copy, Debug)]
struct Rank {
    /// The change in total cost.
    delta: f64,
    /// The move, for tie-breaking.
    mv: Move,
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rank {}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.delta.total_cmp(&other.delta).then_with(|| self.mv.cmp(&other.mv))
    }
}

/// The candidate moves of the points that are not yet frozen, keyed by move
/// and ordered by delta.
///
/// Live moves are also indexed by point and by the slots they touch, so that
/// invalidation only visits the stale moves.
#[derive(Debug, Default)]
pub struct CandidateMoves {
    /// The candidates and their ranks.
    queue: DoublePriorityQueue<Move, Rank>,
    /// The live moves of each point.
    by_point: HashMap<usize, HashSet<Move>>,
    /// The live moves out of or into each slot.
    by_slot: HashMap<usize, HashSet<Move>>,
    /// The number of deltas computed so far.
    evaluations: usize,
}

impl CandidateMoves {
    /// Creates an empty set of candidates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of live candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// The number of deltas computed since creation.
    #[must_use]
    pub const fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Removes and returns the move with the lowest delta, along with that
    /// delta.
    pub fn pop_best(&mut self) -> Option<(Move, f64)> {
        let (mv, rank) = self.queue.pop_min()?;
        self.unindex(&mv);
        Some((mv, rank.delta))
    }

    /// Adds a candidate, replacing any earlier delta for the same move.
    fn insert(&mut self, mv: Move, delta: f64) {
        self.queue.push(mv, Rank { delta, mv });
        self.by_point.entry(mv.point).or_default().insert(mv);
        self.by_slot.entry(mv.from).or_default().insert(mv);
        if let Destination::Existing(to) = mv.to {
            self.by_slot.entry(to).or_default().insert(mv);
        }
    }

    /// Drops a move from the point and slot indices.
    fn unindex(&mut self, mv: &Move) {
        if let Some(moves) = self.by_point.get_mut(&mv.point) {
            moves.remove(mv);
        }
        if let Some(moves) = self.by_slot.get_mut(&mv.from) {
            moves.remove(mv);
        }
        if let Destination::Existing(to) = mv.to {
            if let Some(moves) = self.by_slot.get_mut(&to) {
                moves.remove(mv);
            }
        }
    }

    /// Drops every candidate that involves the moved point or either of the
    /// two slots touched by the move.
    pub fn invalidate(&mut self, point: usize, from: usize, to: usize) {
        let mut stale = self.by_point.remove(&point).unwrap_or_default();
        for slot in [from, to] {
            if let Some(moves) = self.by_slot.remove(&slot) {
                stale.extend(moves);
            }
        }

        for mv in stale {
            self.queue.remove(&mv);
            self.unindex(&mv);
        }
    }

    /// Recomputes the candidates affected by changes to the given slots.
    ///
    /// For every point that is not frozen, this scores the moves whose source
    /// or destination is one of the `changed` slots. A point in a changed slot
    /// gets a move to every other non-empty cluster and to a new cluster; a
    /// point elsewhere only gets moves into the changed, non-empty slots. All
    /// other candidates depend on neither cluster and are left as they are.
    ///
    /// The scoring is spread over the `rayon` pool when `parallel` is set.
    /// Results are inserted in the same order either way.
    pub fn refresh(
        &mut self,
        evaluator: &MoveEvaluator,
        partition: &PartitionState,
        frozen: &[bool],
        changed: &[usize],
        parallel: bool,
    ) {
        let is_changed = |slot: usize| changed.contains(&slot);
        let live_targets = partition.clusters().map(|(slot, _)| slot).collect::<Vec<_>>();

        let jobs = partition
            .clusters()
            .flat_map(|(from, members)| {
                let targets = if is_changed(from) {
                    live_targets
                        .iter()
                        .filter(|&&t| t != from)
                        .map(|&t| Destination::Existing(t))
                        .chain(core::iter::once(Destination::NewCluster))
                        .collect::<Vec<_>>()
                } else {
                    live_targets
                        .iter()
                        .filter(|&&t| t != from && is_changed(t))
                        .map(|&t| Destination::Existing(t))
                        .collect::<Vec<_>>()
                };
                members
                    .iter()
                    .filter(move |&&p| !frozen[p])
                    .map(move |&point| (point, from, targets.clone()))
            })
            .filter(|(_, _, targets)| !targets.is_empty())
            .collect::<Vec<_>>();

        let score = |(point, from, targets): &(usize, usize, Vec<Destination>)| {
            let removed = evaluator.cost_removed(partition, *point, *from);
            targets
                .iter()
                .map(|&to| {
                    let delta = evaluator.cost_added(partition, *point, to) - removed;
                    let mv = Move {
                        point: *point,
                        from: *from,
                        to,
                    };
                    (mv, delta)
                })
                .collect::<Vec<_>>()
        };

        let scored = if parallel {
            jobs.par_iter().map(score).collect::<Vec<_>>()
        } else {
            jobs.iter().map(score).collect::<Vec<_>>()
        };

        for (mv, delta) in scored.into_iter().flatten() {
            self.evaluations += 1;
            self.insert(mv, delta);
        }
    }
}
