//! Canonical atom numbering.
//!
//! The pipeline is:
//! 1. seed a coloring from per-atom invariant codes,
//! 2. refine it to an equitable coloring,
//! 3. if that is not discrete, run an individualization-refinement search
//!    and pick one discrete leaf by a fixed total order,
//! 4. renumber the atoms by the chosen discrete coloring.
//!
//! Each canonicalized atom keeps the id of its class in the equitable
//! coloring of step 2 in [`Atom::partition`](crate::Atom::partition); the
//! serializer uses it for its cosmetic renumbering.

mod invariant;
mod partition;
mod relabel;
mod search;
mod select;

pub use invariant::*;
pub use partition::*;
pub use relabel::*;
pub use search::*;
pub use select::*;

use tracing::{debug, instrument};

use crate::Molecule;

#[derive(Debug, Clone)]
pub struct CanonConfig {
    /// Refine sibling search-tree nodes on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CanonConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

pub trait Canonize {
    fn canonize(&self) -> Self;
}

impl Canonize for Molecule {
    fn canonize(&self) -> Self {
        canonicalize(self)
    }
}

/// Compute the canonical labeling of `molecule` as a discrete coloring:
/// `labeling[atom]` is the canonical label of `atom`.
///
/// Also returns the equitable coloring the search started from.
#[instrument(skip_all, fields(atoms = molecule.atom_count(), bonds = molecule.bond_count()))]
pub fn canonical_labeling(molecule: &Molecule, config: &CanonConfig) -> (Coloring, Coloring) {
    let neighbors = molecule.neighbor_lists();
    let edges = molecule.edge_list();

    let equitable = refine(&neighbors, &initial_coloring(molecule));
    debug!(
        classes = equitable.class_count(),
        discrete = equitable.is_discrete(),
        "equitable coloring"
    );

    let labeling = if equitable.is_discrete() {
        equitable.clone()
    } else {
        let codes = invariant_codes(molecule);
        let leaves = search(&neighbors, &edges, &codes, equitable.clone(), config.parallel);
        select(leaves, &edges, &codes)
    };
    (labeling, equitable)
}

/// Renumber the atoms of `molecule` canonically.
///
/// Any two numberings of the same molecule produce identical results.
pub fn canonicalize(molecule: &Molecule) -> Molecule {
    canonicalize_with(molecule, &CanonConfig::default())
}

pub fn canonicalize_with(molecule: &Molecule, config: &CanonConfig) -> Molecule {
    let (labeling, equitable) = canonical_labeling(molecule, config);
    let mut canonical = relabel(molecule, &labeling);
    for atom in 0..molecule.atom_count() {
        canonical.atom_mut(labeling.color(atom)).partition = equitable.color(atom);
    }
    canonical
}
