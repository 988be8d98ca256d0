use crate::{Atom, Molecule};

use super::partition::Coloring;

/// Per-atom key that seeds the first partition.
///
/// Only chemical identity goes into the code; connectivity is left to the
/// partition refiner. Missing isotope masses and radicals count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvariantCode {
    pub atomic_number: u8,
    pub mass: u32,
    pub radical: u32,
}

impl From<&Atom> for InvariantCode {
    fn from(atom: &Atom) -> Self {
        Self {
            atomic_number: atom.atomic_number(),
            mass: atom.mass.unwrap_or(0),
            radical: atom.radical.unwrap_or(0),
        }
    }
}

/// Invariant codes of all atoms, in label order.
pub fn invariant_codes(molecule: &Molecule) -> Vec<InvariantCode> {
    molecule.atoms().map(InvariantCode::from).collect()
}

/// The seed coloring: atoms with equal invariant codes share a class, and
/// classes are numbered in ascending code order.
pub fn initial_coloring(molecule: &Molecule) -> Coloring {
    Coloring::from_keys(&invariant_codes(molecule))
}
