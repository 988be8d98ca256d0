use std::collections::BTreeMap;

use tracing::trace;

/// An assignment of every atom to a color class.
///
/// `Coloring[label]` is the partition id of atom `label`. Ids are dense after
/// [`Coloring::from_keys`] and [`refine`], but a coloring is valid as long as
/// distinct classes use distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coloring(Vec<usize>);

/// Refinement signature of one atom: its own color, then the colors of its
/// neighbors in descending order.
type Signature = (usize, Vec<usize>);

impl Coloring {
    pub fn new(colors: Vec<usize>) -> Self {
        Self(colors)
    }

    /// Number the distinct keys `0..k` in ascending key order and color every
    /// atom with the number of its key.
    pub fn from_keys<K: Ord + Clone>(keys: &[K]) -> Self {
        let mut distinct = keys.to_vec();
        distinct.sort();
        distinct.dedup();
        Self(
            keys.iter()
                .map(|key| distinct.binary_search(key).unwrap_or_default())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn color(&self, atom: usize) -> usize {
        self.0[atom]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Number of distinct classes.
    pub fn class_count(&self) -> usize {
        let mut colors = self.0.clone();
        colors.sort_unstable();
        colors.dedup();
        colors.len()
    }

    /// A coloring is discrete when every class holds exactly one atom.
    pub fn is_discrete(&self) -> bool {
        self.class_count() == self.len()
    }

    /// Members of every class, keyed by partition id; members ascend.
    pub fn classes(&self) -> BTreeMap<usize, Vec<usize>> {
        let mut classes: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (atom, &color) in self.0.iter().enumerate() {
            classes.entry(color).or_default().push(atom);
        }
        classes
    }

    /// Move `atom` into a singleton class with an id no other atom uses.
    pub fn individualize(&self, atom: usize) -> Coloring {
        let fresh = self.0.iter().max().map_or(0, |max| max + 1);
        let mut colors = self.0.clone();
        colors[atom] = fresh;
        Self(colors)
    }

    /// Sorted multiset of bond endpoint colors, each pair ordered low/high.
    ///
    /// Two colorings with equal signatures cannot be told apart by what the
    /// refinement has established so far.
    pub fn edge_signature(&self, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
        let mut signature: Vec<(usize, usize)> = edges
            .iter()
            .map(|&(a, b)| {
                let (ca, cb) = (self.0[a], self.0[b]);
                (ca.min(cb), ca.max(cb))
            })
            .collect();
        signature.sort_unstable();
        signature
    }
}

fn signatures(neighbors: &[Vec<usize>], coloring: &Coloring) -> Vec<Signature> {
    neighbors
        .iter()
        .enumerate()
        .map(|(atom, adjacent)| {
            let mut colors: Vec<usize> = adjacent.iter().map(|&n| coloring.color(n)).collect();
            colors.sort_unstable_by(|a, b| b.cmp(a));
            (coloring.color(atom), colors)
        })
        .collect()
}

/// One round of color refinement: recolor every atom by the rank of its
/// signature among all distinct signatures.
fn refine_step(neighbors: &[Vec<usize>], coloring: &Coloring) -> Coloring {
    Coloring::from_keys(&signatures(neighbors, coloring))
}

/// Refine `seed` to the coarsest equitable coloring below it.
///
/// `neighbors[atom]` lists the neighbors of `atom`. Iterates until the class
/// count stops growing; since every round at least preserves the classes of
/// the previous one, this happens after at most `n` rounds.
pub fn refine(neighbors: &[Vec<usize>], seed: &Coloring) -> Coloring {
    debug_assert_eq!(neighbors.len(), seed.len());

    let mut current = refine_step(neighbors, seed);
    let mut class_count = current.class_count();
    let mut rounds = 1;
    loop {
        let next = refine_step(neighbors, &current);
        let next_count = next.class_count();
        current = next;
        if next_count <= class_count {
            break;
        }
        class_count = next_count;
        rounds += 1;
    }
    trace!(rounds, classes = class_count, "refined coloring");
    current
}

/// True when all atoms of every class share one refinement signature.
pub fn is_equitable(neighbors: &[Vec<usize>], coloring: &Coloring) -> bool {
    let mut by_class: BTreeMap<usize, Signature> = BTreeMap::new();
    for signature in signatures(neighbors, coloring) {
        match by_class.get(&signature.0) {
            Some(seen) if *seen != signature => return false,
            Some(_) => {}
            None => {
                by_class.insert(signature.0, signature);
            }
        }
    }
    true
}
