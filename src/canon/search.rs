use std::collections::HashMap;
use std::hash::Hash;

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use super::partition::{refine, Coloring};
use super::select::{labeled_keys, relabeled_edges};

/// Pick the class to branch on: the largest non-singleton class, ties going
/// to the smallest partition id. `None` for a discrete coloring.
pub fn target_class(coloring: &Coloring) -> Option<Vec<usize>> {
    let mut best: Option<(usize, Vec<usize>)> = None;
    // `classes` iterates in ascending id order, so a strict comparison keeps
    // the smallest id among equally large classes.
    for (color, members) in coloring.classes() {
        if members.len() < 2 {
            continue;
        }
        let larger = best
            .as_ref()
            .map_or(true, |(_, current)| members.len() > current.len());
        if larger {
            best = Some((color, members));
        }
    }
    best.map(|(_, members)| members)
}

/// Relabeled bond list and atom keys of a discrete leaf. Leaves with equal
/// certificates describe the same labeled graph.
type Certificate<K> = (Vec<(usize, usize)>, Vec<K>);

/// Disjoint sets of atoms, merged along automorphisms.
#[derive(Debug, Clone)]
struct Orbits {
    parent: Vec<usize>,
}

impl Orbits {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut atom: usize) -> usize {
        while self.parent[atom] != atom {
            self.parent[atom] = self.parent[self.parent[atom]];
            atom = self.parent[atom];
        }
        atom
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }

    fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// The permutation taking every atom of `first` to the atom of `second`
/// that carries the same label. Both leaves must be discrete with labels
/// `0..n`.
fn matching_permutation(first: &Coloring, second: &Coloring) -> Vec<usize> {
    let mut by_label = vec![0; second.len()];
    for atom in 0..second.len() {
        by_label[second.color(atom)] = atom;
    }
    (0..first.len())
        .map(|atom| by_label[first.color(atom)])
        .collect()
}

struct Search<'a, K> {
    neighbors: &'a [Vec<usize>],
    edges: &'a [(usize, usize)],
    keys: &'a [K],
    parallel: bool,
    leaves: Vec<Coloring>,
    certificates: HashMap<Certificate<K>, usize>,
    automorphisms: Vec<Vec<usize>>,
}

impl<K: Clone + Eq + Hash> Search<'_, K> {
    fn children(&self, node: &Coloring, members: &[usize]) -> Vec<Coloring> {
        let neighbors = self.neighbors;
        if self.parallel {
            members
                .par_iter()
                .map(|&atom| refine(neighbors, &node.individualize(atom)))
                .collect()
        } else {
            members
                .iter()
                .map(|&atom| refine(neighbors, &node.individualize(atom)))
                .collect()
        }
    }

    /// Orbits of the automorphisms found so far that fix every atom of
    /// `path`.
    fn orbits_fixing(&self, path: &[usize]) -> Orbits {
        let mut orbits = Orbits::new(self.keys.len());
        for automorphism in &self.automorphisms {
            if path.iter().all(|&atom| automorphism[atom] == atom) {
                for (atom, &image) in automorphism.iter().enumerate() {
                    orbits.union(atom, image);
                }
            }
        }
        orbits
    }

    fn visit(&mut self, node: Coloring, path: &mut Vec<usize>) {
        let Some(members) = target_class(&node) else {
            self.record_leaf(node);
            return;
        };
        let children = self.children(&node, &members);
        let mut explored: Vec<usize> = Vec::new();
        for (atom, child) in members.into_iter().zip(children) {
            if !explored.is_empty() {
                let mut orbits = self.orbits_fixing(path);
                if explored.iter().any(|&seen| orbits.same(seen, atom)) {
                    trace!(depth = path.len(), atom, "skipped equivalent sibling");
                    continue;
                }
            }
            explored.push(atom);
            path.push(atom);
            self.visit(child, path);
            path.pop();
        }
    }

    fn record_leaf(&mut self, leaf: Coloring) {
        let certificate = (
            relabeled_edges(&leaf, self.edges),
            labeled_keys(&leaf, self.keys),
        );
        match self.certificates.get(&certificate) {
            Some(&index) => {
                let automorphism = matching_permutation(&self.leaves[index], &leaf);
                trace!(found = self.automorphisms.len() + 1, "found automorphism");
                self.automorphisms.push(automorphism);
            }
            None => {
                self.certificates.insert(certificate, self.leaves.len());
                self.leaves.push(leaf);
            }
        }
    }
}

/// Depth-first individualization-refinement search.
///
/// Starting from the equitable coloring `root`, every non-discrete tree node
/// is expanded by individualizing each atom of its target class and refining
/// the result. Two leaves that relabel the graph identically (bonds and the
/// per-atom `keys`) reveal an automorphism; a sibling is skipped when an
/// automorphism fixing its ancestors maps it onto a sibling already
/// explored, since its subtree yields the same labeled graphs.
///
/// Returns one leaf per distinct labeled graph, in the order they were
/// reached. The order is the same whether or not `parallel` is set.
#[instrument(skip_all, fields(atoms = root.len()))]
pub fn search<K: Clone + Eq + Hash>(
    neighbors: &[Vec<usize>],
    edges: &[(usize, usize)],
    keys: &[K],
    root: Coloring,
    parallel: bool,
) -> Vec<Coloring> {
    debug_assert_eq!(keys.len(), root.len());
    let mut state = Search {
        neighbors,
        edges,
        keys,
        parallel,
        leaves: Vec::new(),
        certificates: HashMap::new(),
        automorphisms: Vec::new(),
    };
    state.visit(root, &mut Vec::new());

    assert!(
        !state.leaves.is_empty(),
        "individualization-refinement search produced no discrete leaf"
    );
    debug!(
        leaves = state.leaves.len(),
        automorphisms = state.automorphisms.len(),
        "search finished"
    );
    state.leaves
}
