use tracing::trace;

use super::partition::Coloring;

/// The bond list of the graph as relabeled by a discrete `leaf`: pairs
/// ordered low/high, list sorted ascending.
pub fn relabeled_edges(leaf: &Coloring, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    leaf.edge_signature(edges)
}

/// Per-atom keys listed in the order of a discrete `leaf`'s labels.
pub fn labeled_keys<K: Clone>(leaf: &Coloring, keys: &[K]) -> Vec<K> {
    let mut by_label: Vec<(usize, &K)> = keys
        .iter()
        .enumerate()
        .map(|(atom, key)| (leaf.color(atom), key))
        .collect();
    by_label.sort_unstable_by_key(|&(label, _)| label);
    by_label.into_iter().map(|(_, key)| key.clone()).collect()
}

/// Choose the canonical leaf: the one whose relabeled bond list is the
/// lexicographically greatest. Leaves with equal bond lists are told apart
/// by the atom `keys` read in label order.
///
/// Leaves that tie on both describe the same labeled graph, so which of
/// them is returned does not affect the result.
pub fn select<K: Ord + Clone>(
    leaves: Vec<Coloring>,
    edges: &[(usize, usize)],
    keys: &[K],
) -> Coloring {
    let count = leaves.len();
    let (_, best) = leaves
        .into_iter()
        .map(|leaf| ((relabeled_edges(&leaf, edges), labeled_keys(&leaf, keys)), leaf))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .expect("canonical selection needs at least one leaf");
    trace!(leaves = count, "selected canonical leaf");
    best
}
