use std::fmt::{Display, Formatter, Result as FmtResult};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::element;
use crate::{InvalidGraphError, Result};

/// Bond order as recorded by the input format.
///
/// Bond orders are carried through canonicalization untouched; they do not
/// take part in the canonical identity of a molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondType {
    Single,
    Double,
    Triple,
    Aromatic,
    /// Any other table-file bond code (query bonds and the like).
    Other(u8),
}

impl BondType {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => BondType::Single,
            2 => BondType::Double,
            3 => BondType::Triple,
            4 => BondType::Aromatic,
            other => BondType::Other(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            BondType::Single => 1,
            BondType::Double => 2,
            BondType::Triple => 3,
            BondType::Aromatic => 4,
            BondType::Other(code) => *code,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bond {
    pub order: Option<BondType>,
}

impl Bond {
    pub fn new(order: BondType) -> Self {
        Self { order: Some(order) }
    }
}

/// A single atom of a molecular graph.
///
/// The element is resolved against the periodic table on construction, so an
/// `Atom` always carries a valid symbol/atomic-number pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    symbol: &'static str,
    atomic_number: u8,
    pub mass: Option<u32>,
    pub charge: Option<i32>,
    pub radical: Option<u32>,
    /// Partition (color class) id, rewritten by canonicalization.
    pub partition: usize,
    pub position: Option<[f64; 3]>,
}

impl Atom {
    pub fn new(symbol: &str) -> Result<Self> {
        let atomic_number = element::atomic_number(symbol)?;
        Ok(Self::from_atomic_number(atomic_number))
    }

    fn from_atomic_number(atomic_number: u8) -> Self {
        Self {
            // The table lookup succeeded, so the reverse lookup cannot miss.
            symbol: element::symbol(atomic_number).unwrap_or("?"),
            atomic_number,
            mass: None,
            charge: None,
            radical: None,
            partition: 0,
            position: None,
        }
    }

    pub fn with_mass(mut self, mass: u32) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = Some(charge);
        self
    }

    pub fn with_radical(mut self, radical: u32) -> Self {
        self.radical = Some(radical);
        self
    }

    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = Some(position);
        self
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.symbol)?;
        if let Some(mass) = self.mass {
            write!(f, "[mass={}]", mass)?;
        }
        if let Some(charge) = self.charge {
            write!(f, "[chg={}]", charge)?;
        }
        if let Some(radical) = self.radical {
            write!(f, "[rad={}]", radical)?;
        }
        Ok(())
    }
}

pub type MoleculeGraph = UnGraph<Atom, Bond>;

/// Largest atom count a reader accepts from a count field.
pub const MAX_ATOMS: usize = 1_000_000;

/// A molecular graph with dense atom labels `0..n`.
///
/// Atom labels are petgraph node indices. Atoms are never removed from a
/// `Molecule`, so the labels stay dense for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    graph: MoleculeGraph,
}

impl Molecule {
    /// Assemble a molecule from an atom list and a bond list, validating that
    /// every bond joins two distinct, existing atoms and that no atom pair is
    /// bonded twice.
    pub fn from_parts(
        atoms: Vec<Atom>,
        bonds: impl IntoIterator<Item = (usize, usize, Bond)>,
    ) -> Result<Self> {
        let atom_count = atoms.len();
        let mut graph = MoleculeGraph::with_capacity(atom_count, atom_count);
        for atom in atoms {
            graph.add_node(atom);
        }

        for (a, b, bond) in bonds {
            for label in [a, b] {
                if label >= atom_count {
                    return Err(InvalidGraphError::UnknownAtom {
                        bond: (a, b),
                        label,
                        atom_count,
                    }
                    .into());
                }
            }
            if a == b {
                return Err(InvalidGraphError::SelfLoop { label: a }.into());
            }
            let (na, nb) = (NodeIndex::new(a), NodeIndex::new(b));
            if graph.find_edge(na, nb).is_some() {
                return Err(InvalidGraphError::DuplicateBond {
                    a: a.min(b),
                    b: a.max(b),
                }
                .into());
            }
            graph.add_edge(na, nb, bond);
        }

        Ok(Self { graph })
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_count() == 0
    }

    pub fn atom(&self, label: usize) -> &Atom {
        &self.graph[NodeIndex::new(label)]
    }

    pub fn atom_mut(&mut self, label: usize) -> &mut Atom {
        &mut self.graph[NodeIndex::new(label)]
    }

    /// Atoms in label order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.graph.node_weights()
    }

    /// Bonds as `(a, b, bond)` with `a < b`, in insertion order.
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize, &Bond)> + '_ {
        self.graph.edge_references().map(|e| {
            let (a, b) = (e.source().index(), e.target().index());
            (a.min(b), a.max(b), e.weight())
        })
    }

    /// Sorted list of `(a, b)` label pairs with `a < b`.
    pub fn edge_list(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = self.bonds().map(|(a, b, _)| (a, b)).collect();
        edges.sort_unstable();
        edges
    }

    pub fn neighbors(&self, label: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(NodeIndex::new(label))
            .map(|n| n.index())
    }

    /// Neighbor labels of every atom, each list sorted ascending.
    pub fn neighbor_lists(&self) -> Vec<Vec<usize>> {
        (0..self.atom_count())
            .map(|label| {
                let mut neighbors: Vec<usize> = self.neighbors(label).collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect()
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .map(|e| &self.graph[e])
    }

    /// Number of connected components; zero for an empty molecule.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Compare two molecules label by label on the attributes that make up
    /// canonical identity: element, isotope mass, radical and connectivity.
    ///
    /// Charges, bond orders and coordinates are ignored.
    pub fn is_identical(&self, other: &Molecule) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        let same_atoms = self.atoms().zip(other.atoms()).all(|(a, b)| {
            a.atomic_number == b.atomic_number && a.mass == b.mass && a.radical == b.radical
        });
        same_atoms && self.edge_list() == other.edge_list()
    }
}

impl TryFrom<MoleculeGraph> for Molecule {
    type Error = crate::TucanError;

    /// Adopt a petgraph graph, re-validating self loops and parallel edges.
    fn try_from(graph: MoleculeGraph) -> Result<Self> {
        let bonds: Vec<_> = graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
            .collect();
        let (nodes, _) = graph.into_nodes_edges();
        Molecule::from_parts(nodes.into_iter().map(|n| n.weight).collect(), bonds)
    }
}

/// Incremental construction of a [`Molecule`]; validation happens in
/// [`MoleculeBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct MoleculeBuilder {
    atoms: Vec<Atom>,
    bonds: Vec<(usize, usize, Bond)>,
}

impl MoleculeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom and return its label.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Add an atom by element symbol and return its label.
    pub fn add_element(&mut self, symbol: &str) -> Result<usize> {
        Ok(self.add_atom(Atom::new(symbol)?))
    }

    pub fn add_bond(&mut self, a: usize, b: usize) -> &mut Self {
        self.bonds.push((a, b, Bond::default()));
        self
    }

    pub fn add_typed_bond(&mut self, a: usize, b: usize, order: BondType) -> &mut Self {
        self.bonds.push((a, b, Bond::new(order)));
        self
    }

    pub fn build(self) -> Result<Molecule> {
        Molecule::from_parts(self.atoms, self.bonds)
    }
}
