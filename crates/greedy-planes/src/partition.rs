//! The `PartitionState` of points into clusters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::CostTable;

/// Where a point is moved to.
///
/// The derived ordering places every existing slot, in ascending order, before
/// `NewCluster`. It is part of the tie-break among equally good moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Destination {
    /// An existing cluster, identified by its slot.
    Existing(usize),
    /// A new singleton cluster.
    NewCluster,
}

impl Destination {
    /// Whether this destination is the given slot.
    #[must_use]
    pub const fn is_slot(&self, slot: usize) -> bool {
        matches!(self, Self::Existing(s) if *s == slot)
    }
}

/// A partition of the points `0..n` into disjoint clusters.
///
/// Clusters live in an arena of slots. A slot keeps its index until
/// `remove_empty_clusters` compacts the arena, so slot indices are stable for
/// the duration of a pass. Between compactions a slot may be empty. Members are
/// kept in ordered sets so that iteration, and thus every floating-point sum
/// over a cluster, happens in the same order on every run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPartitionState")]
pub struct PartitionState {
    /// The members of each slot.
    slots: Vec<BTreeSet<usize>>,
    /// The slot holding each point.
    assignment: Vec<usize>,
}

/// A `PartitionState` as it is read from disk, before it is validated.
#[derive(Deserialize)]
struct RawPartitionState {
    /// The members of each slot.
    slots: Vec<BTreeSet<usize>>,
    /// The slot holding each point.
    assignment: Vec<usize>,
}

impl TryFrom<RawPartitionState> for PartitionState {
    type Error = String;

    fn try_from(raw: RawPartitionState) -> Result<Self, Self::Error> {
        let partition = Self {
            slots: raw.slots,
            assignment: raw.assignment,
        };
        partition.check_invariant()?;
        Ok(partition)
    }
}

impl PartitionState {
    /// Creates a partition in which every point is its own cluster.
    #[must_use]
    pub fn singletons(node_count: usize) -> Self {
        Self {
            slots: (0..node_count).map(|p| BTreeSet::from([p])).collect(),
            assignment: (0..node_count).collect(),
        }
    }

    /// Creates a partition from the given clusters.
    ///
    /// # Errors
    ///
    /// * If any cluster is empty.
    /// * If the clusters are not disjoint or do not cover `0..node_count`.
    pub fn from_clusters(node_count: usize, clusters: Vec<Vec<usize>>) -> Result<Self, String> {
        let mut assignment = vec![None; node_count];
        let mut slots = Vec::with_capacity(clusters.len());

        for (slot, members) in clusters.into_iter().enumerate() {
            if members.is_empty() {
                return Err(format!("Cluster {slot} is empty."));
            }
            for &p in &members {
                let entry = assignment
                    .get_mut(p)
                    .ok_or_else(|| format!("Point {p} is out of range for {node_count} points."))?;
                if let Some(other) = entry.replace(slot) {
                    return Err(format!("Point {p} is in both cluster {other} and cluster {slot}."));
                }
            }
            slots.push(members.into_iter().collect());
        }

        let assignment = assignment
            .into_iter()
            .enumerate()
            .map(|(p, slot)| slot.ok_or_else(|| format!("Point {p} is not in any cluster.")))
            .collect::<Result<_, _>>()?;

        Ok(Self { slots, assignment })
    }

    /// The number of points.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.assignment.len()
    }

    /// The number of slots, including empty ones.
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// The number of non-empty clusters.
    #[must_use]
    pub fn num_clusters(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Whether the slot exists and holds at least one point.
    #[must_use]
    pub fn is_alive(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|s| !s.is_empty())
    }

    /// The members of the cluster in the given slot.
    ///
    /// Returns `None` if the slot does not exist.
    #[must_use]
    pub fn cluster(&self, slot: usize) -> Option<&BTreeSet<usize>> {
        self.slots.get(slot)
    }

    /// Iterates over the `(slot, members)` of every non-empty cluster.
    pub fn clusters(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> + '_ {
        self.slots.iter().enumerate().filter(|(_, s)| !s.is_empty())
    }

    /// The slot holding the given point.
    ///
    /// Returns `None` if the point is out of range.
    #[must_use]
    pub fn cluster_of(&self, point: usize) -> Option<usize> {
        self.assignment.get(point).copied()
    }

    /// Moves a point out of the cluster in slot `from` and into `to`.
    ///
    /// A `NewCluster` destination appends a new slot. The source slot is left
    /// in place even if it becomes empty.
    ///
    /// # Returns
    ///
    /// The slot the point now lives in.
    ///
    /// # Errors
    ///
    /// * If the point is not in slot `from`.
    /// * If `to` is an existing slot that is out of range or is `from` itself.
    pub fn move_point(&mut self, point: usize, from: usize, to: Destination) -> Result<usize, String> {
        if self.cluster_of(point) != Some(from) {
            return Err(format!("Point {point} is not in cluster {from}."));
        }

        let to = match to {
            Destination::Existing(slot) if slot == from => {
                return Err(format!("Cannot move point {point} from cluster {from} to itself."));
            }
            Destination::Existing(slot) if slot >= self.slots.len() => {
                return Err(format!("Cluster {slot} does not exist."));
            }
            Destination::Existing(slot) => slot,
            Destination::NewCluster => {
                self.slots.push(BTreeSet::new());
                self.slots.len() - 1
            }
        };

        self.slots[from].remove(&point);
        self.slots[to].insert(point);
        self.assignment[point] = to;

        Ok(to)
    }

    /// Removes empty slots, re-indexing the remaining clusters while
    /// preserving their relative order.
    ///
    /// # Returns
    ///
    /// The number of slots removed.
    pub fn remove_empty_clusters(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| !s.is_empty());
        for (slot, members) in self.slots.iter().enumerate() {
            for &p in members {
                self.assignment[p] = slot;
            }
        }
        before - self.slots.len()
    }

    /// Checks that every point is in exactly the cluster the lookup says it is
    /// in, and that the clusters cover every point exactly once.
    ///
    /// # Errors
    ///
    /// A description of the first violation found.
    pub fn check_invariant(&self) -> Result<(), String> {
        let mut seen = vec![false; self.node_count()];
        for (slot, members) in self.slots.iter().enumerate() {
            for &p in members {
                match seen.get_mut(p) {
                    None => return Err(format!("Cluster {slot} holds out-of-range point {p}.")),
                    Some(true) => return Err(format!("Point {p} appears in more than one cluster.")),
                    Some(s) => *s = true,
                }
                if self.assignment[p] != slot {
                    return Err(format!(
                        "Point {p} is in cluster {slot} but is recorded in cluster {}.",
                        self.assignment[p]
                    ));
                }
            }
        }
        seen.iter()
            .position(|&s| !s)
            .map_or(Ok(()), |p| Err(format!("Point {p} is not in any cluster.")))
    }

    /// The sum of the triplet costs within every cluster.
    #[must_use]
    pub fn total_cost(&self, costs: &CostTable) -> f64 {
        self.clusters()
            .map(|(_, members)| costs.group_cost(&members.iter().copied().collect::<Vec<_>>()))
            .sum()
    }

    /// The non-empty clusters as sorted vectors of points, in slot order.
    #[must_use]
    pub fn to_sets(&self) -> Vec<Vec<usize>> {
        self.clusters().map(|(_, m)| m.iter().copied().collect()).collect()
    }
}
