use crate::{Atom, Molecule};

use super::partition::Coloring;

/// Renumber atoms so that atom `a` becomes atom `labels[a]`.
///
/// `labels` must be a permutation of `0..n`. Atom and bond attributes move
/// with their atoms; bonds are inserted in ascending order of their new
/// endpoints, so two relabelings onto the same graph are indistinguishable.
pub fn permute_labels(molecule: &Molecule, labels: &[usize]) -> Molecule {
    let n = molecule.atom_count();
    assert_eq!(labels.len(), n, "relabeling must cover every atom");

    let mut slots: Vec<Option<Atom>> = vec![None; n];
    for (old, atom) in molecule.atoms().enumerate() {
        let slot = &mut slots[labels[old]];
        assert!(slot.is_none(), "relabeling maps two atoms onto {}", labels[old]);
        *slot = Some(atom.clone());
    }
    let atoms: Vec<Atom> = slots.into_iter().flatten().collect();

    let mut bonds: Vec<_> = molecule
        .bonds()
        .map(|(a, b, bond)| {
            let (na, nb) = (labels[a], labels[b]);
            (na.min(nb), na.max(nb), *bond)
        })
        .collect();
    bonds.sort_unstable_by_key(|&(a, b, _)| (a, b));

    // A permutation of a valid molecule is valid.
    Molecule::from_parts(atoms, bonds).unwrap_or_else(|e| panic!("relabeling broke the graph: {e}"))
}

/// Apply a discrete coloring as the new atom numbering.
///
/// Panics when `coloring` is not discrete or its ids are not exactly `0..n`;
/// both indicate a bug upstream.
pub fn relabel(molecule: &Molecule, coloring: &Coloring) -> Molecule {
    assert!(
        coloring.is_discrete(),
        "cannot relabel with a non-discrete coloring"
    );
    assert!(
        coloring.as_slice().iter().all(|&c| c < coloring.len()),
        "discrete coloring ids must be dense"
    );
    permute_labels(molecule, coloring.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BondType, MoleculeBuilder};

    fn formaldehyde() -> Molecule {
        let mut builder = MoleculeBuilder::new();
        let c = builder.add_element("C").unwrap();
        let o = builder.add_element("O").unwrap();
        let h1 = builder.add_element("H").unwrap();
        let h2 = builder.add_element("H").unwrap();
        builder
            .add_typed_bond(c, o, BondType::Double)
            .add_bond(c, h1)
            .add_bond(c, h2);
        builder.build().unwrap()
    }

    #[test]
    fn test_relabel_moves_attributes() {
        let m = formaldehyde();
        let relabeled = relabel(&m, &Coloring::new(vec![3, 0, 1, 2]));
        assert_eq!(relabeled.atom(3).symbol(), "C");
        assert_eq!(relabeled.atom(0).symbol(), "O");
        assert_eq!(relabeled.edge_list(), vec![(0, 3), (1, 3), (2, 3)]);
        assert_eq!(
            relabeled.bond_between(0, 3).unwrap().order,
            Some(BondType::Double)
        );
    }

    #[test]
    fn test_identity_relabel() {
        let m = formaldehyde();
        let same = relabel(&m, &Coloring::new(vec![0, 1, 2, 3]));
        assert!(same.is_identical(&m));
    }

    #[test]
    #[should_panic(expected = "non-discrete")]
    fn test_non_discrete_coloring_panics() {
        let m = formaldehyde();
        relabel(&m, &Coloring::new(vec![0, 1, 2, 2]));
    }
}
