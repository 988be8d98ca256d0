use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write;

use tracing::trace;

use crate::canon::{canonicalize, permute_labels};
use crate::Molecule;

/// Write the canonical string of an already canonicalized molecule:
/// `<formula>/<(a-b)...>[/<(label:mass=m,rad=r)...>]`.
///
/// The molecule is serialized in its current numbering (after the cosmetic
/// renumbering below), so only the output of
/// [`canonicalize`](crate::canonicalize) yields a canonical string.
pub fn serialize_molecule(molecule: &Molecule) -> String {
    let cosmetic = permute_labels(molecule, &traversal_labels(molecule));
    let sorted = permute_labels(&cosmetic, &atomic_number_order(&cosmetic));

    let mut out = sum_formula(&sorted);
    out.push('/');
    out.push_str(&edge_list(&sorted));
    let properties = atom_properties(&sorted);
    if !properties.is_empty() {
        out.push('/');
        out.push_str(&properties);
    }
    trace!(serialization = %out, "serialized molecule");
    out
}

/// Canonicalize `molecule` and serialize the result.
pub fn canonical_string(molecule: &Molecule) -> String {
    serialize_molecule(&canonicalize(molecule))
}

/// Cosmetic renumbering by breadth-first traversal.
///
/// Starting at atom 0 (and at the lowest unvisited atom whenever a component
/// is exhausted), each visited atom takes the smallest label still free in
/// its partition class. Neighbors are queued by partition relative to the
/// current atom: lower classes first, then higher, then the same class,
/// each group in label order. Within a discrete partition this is the
/// identity; it only reorders atoms that share a class.
pub fn traversal_labels(molecule: &Molecule) -> Vec<usize> {
    let n = molecule.atom_count();
    let partition = |atom: usize| molecule.atom(atom).partition;

    // free labels of every class, smallest at the front
    let mut free: BTreeMap<usize, VecDeque<usize>> = BTreeMap::new();
    for atom in 0..n {
        free.entry(partition(atom)).or_default().push_back(atom);
    }

    let mut labels = vec![usize::MAX; n];
    let mut explored = vec![false; n];
    let mut queue = VecDeque::new();

    for root in 0..n {
        if explored[root] {
            continue;
        }
        queue.push_back(root);
        while let Some(atom) = queue.pop_front() {
            if explored[atom] {
                continue;
            }
            explored[atom] = true;
            let class = partition(atom);
            labels[atom] = free
                .get_mut(&class)
                .and_then(VecDeque::pop_front)
                .expect("every class has as many labels as members");

            let mut neighbors: Vec<usize> = molecule
                .neighbors(atom)
                .filter(|&neighbor| !explored[neighbor])
                .collect();
            neighbors.sort_unstable_by_key(|&neighbor| {
                let rank = match partition(neighbor).cmp(&class) {
                    std::cmp::Ordering::Less => 0,
                    std::cmp::Ordering::Greater => 1,
                    std::cmp::Ordering::Equal => 2,
                };
                (rank, neighbor)
            });
            queue.extend(neighbors);
        }
    }
    labels
}

/// Labels that put atoms in ascending atomic-number order, keeping the
/// current order among atoms of the same element.
fn atomic_number_order(molecule: &Molecule) -> Vec<usize> {
    let mut order: Vec<usize> = (0..molecule.atom_count()).collect();
    order.sort_by_key(|&atom| molecule.atom(atom).atomic_number());
    let mut labels = vec![0; order.len()];
    for (new, &old) in order.iter().enumerate() {
        labels[old] = new;
    }
    labels
}

/// Molecular formula in Hill order: carbon, then hydrogen if there is
/// carbon, then all other elements alphabetically. Counts of one are
/// omitted.
pub fn sum_formula(molecule: &Molecule) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for atom in molecule.atoms() {
        *counts.entry(atom.symbol()).or_default() += 1;
    }

    let mut formula = String::new();
    let mut push = |symbol: &str, count: usize| {
        formula.push_str(symbol);
        if count > 1 {
            write!(formula, "{}", count).unwrap();
        }
    };
    if let Some(carbon) = counts.remove("C") {
        push("C", carbon);
        if let Some(hydrogen) = counts.remove("H") {
            push("H", hydrogen);
        }
    }
    for (symbol, count) in counts {
        push(symbol, count);
    }
    formula
}

fn edge_list(molecule: &Molecule) -> String {
    let mut out = String::new();
    for (a, b) in molecule.edge_list() {
        write!(out, "({}-{})", a + 1, b + 1).unwrap();
    }
    out
}

fn atom_properties(molecule: &Molecule) -> String {
    let mut out = String::new();
    for (label, atom) in molecule.atoms().enumerate() {
        let mut properties = Vec::new();
        if let Some(mass) = atom.mass {
            properties.push(format!("mass={}", mass));
        }
        if let Some(radical) = atom.radical {
            properties.push(format!("rad={}", radical));
        }
        if !properties.is_empty() {
            write!(out, "({}:{})", label + 1, properties.join(",")).unwrap();
        }
    }
    out
}
