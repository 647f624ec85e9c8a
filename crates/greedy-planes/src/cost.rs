//! The `CostTable` of triplet costs over which points are clustered.

use serde::{Deserialize, Serialize};

/// The cost of grouping every unordered triple of points together.
///
/// Negative costs are incentives to place the three points in the same
/// cluster and positive costs are penalties. The table is dense: it holds one
/// value for each of the `C(n, 3)` ascending triples `(i, j, k)` with
/// `i < j < k < n`, stored in the order of the combinatorial number system so
/// that lookups are `O(1)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCostTable")]
pub struct CostTable {
    /// The number of points, `n`.
    node_count: usize,
    /// The costs, indexed by `triplet_index`.
    costs: Vec<f64>,
}

/// A `CostTable` as it is read from disk, before it is validated.
#[derive(Deserialize)]
struct RawCostTable {
    /// The number of points.
    node_count: usize,
    /// The costs, indexed by `triplet_index`.
    costs: Vec<f64>,
}

impl TryFrom<RawCostTable> for CostTable {
    type Error = String;

    fn try_from(raw: RawCostTable) -> Result<Self, Self::Error> {
        let RawCostTable { node_count, costs } = raw;

        let expected = checked_num_triplets(node_count)
            .ok_or_else(|| format!("Too many points for a cost table: {node_count}."))?;
        if costs.len() != expected {
            return Err(format!(
                "Expected {expected} triplet costs for {node_count} points but got {}.",
                costs.len()
            ));
        }
        if let Some(cost) = costs.iter().find(|c| !c.is_finite()) {
            return Err(format!("Found a cost that is not finite: {cost}."));
        }

        Ok(Self { node_count, costs })
    }
}

impl CostTable {
    /// Creates a new `CostTable` from costs given in lexicographic order of
    /// the ascending triples, i.e. the order produced by iterating
    /// `i < j < k` with `i` outermost, which is the order of
    /// [`CostTable::triplets`].
    ///
    /// # Arguments
    ///
    /// * `node_count`: The number of points.
    /// * `costs`: One cost per ascending triple.
    ///
    /// # Errors
    ///
    /// * If the number of costs is not `C(node_count, 3)`.
    /// * If any cost is not finite.
    pub fn new(node_count: usize, costs: Vec<f64>) -> Result<Self, String> {
        let expected = num_triplets(node_count);
        if costs.len() != expected {
            return Err(format!(
                "Expected {expected} triplet costs for {node_count} points but got {}.",
                costs.len()
            ));
        }

        Self::from_triplets(node_count, Self::triplets(node_count).zip(costs))
    }

    /// Creates a new `CostTable` from `((i, j, k), cost)` entries in any order.
    ///
    /// # Errors
    ///
    /// * If a triple is not strictly ascending or refers to a point outside
    ///   `[0, node_count)`.
    /// * If a triple appears more than once.
    /// * If any cost is not finite.
    /// * If any triple is missing.
    pub fn from_triplets<I>(node_count: usize, entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = ((usize, usize, usize), f64)>,
    {
        let mut costs = vec![None; num_triplets(node_count)];

        for ((i, j, k), cost) in entries {
            if !(i < j && j < k && k < node_count) {
                return Err(format!(
                    "Triplet ({i}, {j}, {k}) is not ascending within {node_count} points."
                ));
            }
            if !cost.is_finite() {
                return Err(format!("Cost of triplet ({i}, {j}, {k}) is not finite: {cost}."));
            }
            let slot = &mut costs[triplet_index(i, j, k)];
            if slot.is_some() {
                return Err(format!("Triplet ({i}, {j}, {k}) was given more than once."));
            }
            *slot = Some(cost);
        }

        if let Some((i, j, k)) = Self::triplets(node_count).find(|&(i, j, k)| costs[triplet_index(i, j, k)].is_none()) {
            return Err(format!("Missing cost for triplet ({i}, {j}, {k})."));
        }
        let costs = costs.into_iter().flatten().collect();

        Ok(Self { node_count, costs })
    }

    /// Creates a new `CostTable` by evaluating `f` on every ascending triple.
    ///
    /// # Errors
    ///
    /// * If `f` returns a non-finite cost.
    pub fn from_fn<F: Fn(usize, usize, usize) -> f64>(node_count: usize, f: F) -> Result<Self, String> {
        Self::from_triplets(node_count, Self::triplets(node_count).map(|(i, j, k)| ((i, j, k), f(i, j, k))))
    }

    /// Iterates over all ascending triples of `node_count` points in
    /// lexicographic order.
    pub fn triplets(node_count: usize) -> impl Iterator<Item = (usize, usize, usize)> {
        (0..node_count).flat_map(move |i| {
            ((i + 1)..node_count).flat_map(move |j| ((j + 1)..node_count).map(move |k| (i, j, k)))
        })
    }

    /// The number of points covered by the table.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// The number of triples in the table.
    #[must_use]
    pub fn num_triplets(&self) -> usize {
        self.costs.len()
    }

    /// Returns the cost of the triple `{a, b, c}`.
    ///
    /// The three indices may be given in any order but must be distinct and
    /// less than `node_count`. Lookups with repeated or out-of-range indices
    /// are a caller bug and will panic on the out-of-bounds index.
    #[must_use]
    pub fn get(&self, a: usize, b: usize, c: usize) -> f64 {
        let [i, j, k] = sort3(a, b, c);
        self.costs[triplet_index(i, j, k)]
    }

    /// The sum of the costs of every triple drawn from the given members.
    #[must_use]
    pub fn group_cost(&self, members: &[usize]) -> f64 {
        let mut total = 0.0;
        for (x, &a) in members.iter().enumerate() {
            for (y, &b) in members.iter().enumerate().skip(x + 1) {
                for &c in &members[(y + 1)..] {
                    total += self.get(a, b, c);
                }
            }
        }
        total
    }
}

/// The number of unordered triples among `n` points, `C(n, 3)`.
#[must_use]
pub const fn num_triplets(n: usize) -> usize {
    if n < 3 {
        0
    } else {
        n * (n - 1) * (n - 2) / 6
    }
}

/// `C(n, 3)`, or `None` if it does not fit in a `usize`.
fn checked_num_triplets(n: usize) -> Option<usize> {
    if n < 3 {
        return Some(0);
    }
    n.checked_mul(n - 1)?.checked_mul(n - 2).map(|x| x / 6)
}

/// The position of the ascending triple `(i, j, k)` in the combinatorial
/// number system, i.e. `C(k, 3) + C(j, 2) + i`.
///
/// This differs from the lexicographic enumeration order of
/// [`CostTable::triplets`], which is why the table is always filled through
/// this function.
#[must_use]
pub const fn triplet_index(i: usize, j: usize, k: usize) -> usize {
    num_triplets(k) + j * j.saturating_sub(1) / 2 + i
}

/// Sorts three indices in ascending order.
const fn sort3(a: usize, b: usize, c: usize) -> [usize; 3] {
    let (a, b) = if a < b { (a, b) } else { (b, a) };
    let (b, c) = if b < c { (b, c) } else { (c, b) };
    let (a, b) = if a < b { (a, b) } else { (b, a) };
    [a, b, c]
}

#[cfg(test)]
mod tests {
    use super::{checked_num_triplets, num_triplets, sort3, triplet_index, CostTable};

    #[test]
    fn index_is_a_bijection() {
        let n = 9;
        let mut seen = CostTable::triplets(n).map(|(i, j, k)| triplet_index(i, j, k)).collect::<Vec<_>>();
        seen.sort_unstable();
        assert_eq!(seen, (0..num_triplets(n)).collect::<Vec<_>>());
    }

    #[test]
    fn sorting() {
        for [a, b, c] in [[0, 1, 2], [2, 1, 0], [1, 2, 0], [2, 0, 1], [0, 2, 1], [1, 0, 2]] {
            assert_eq!(sort3(a, b, c), [0, 1, 2]);
        }
    }

    #[test]
    fn overflowing_sizes_are_detected() {
        assert_eq!(checked_num_triplets(2), Some(0));
        assert_eq!(checked_num_triplets(10), Some(num_triplets(10)));
        assert_eq!(checked_num_triplets(usize::MAX), None);
    }
}
