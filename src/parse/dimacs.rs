use thiserror::Error;
use tracing::debug;

use crate::{Atom, Bond, Molecule, Result, MAX_ATOMS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimacsError {
    #[error("DIMACS graph has no \"p edge\" problem line")]
    MissingProblemLine,
    #[error("Malformed DIMACS line {line} \"{text}\"")]
    Line { line: usize, text: String },
    #[error("DIMACS graph declares {nodes} nodes, more than the {max} supported")]
    TooManyNodes { nodes: usize, max: usize },
}

/// Read an uncolored graph in DIMACS `p edge` format. Every vertex becomes a
/// carbon atom; `e a b` lines are 1-based. Comment (`c`) and other lines are
/// skipped.
pub fn graph_from_dimacs_text(text: &str) -> Result<Molecule> {
    let mut node_count = None;
    let mut edges = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let malformed = || DimacsError::Line {
            line: number + 1,
            text: line.to_string(),
        };
        let index = |field: &str| -> std::result::Result<usize, DimacsError> {
            field.parse::<usize>().ok().filter(|&i| i >= 1).map(|i| i - 1).ok_or_else(malformed)
        };
        match fields.as_slice() {
            ["p", "edge", nodes, _edges] => {
                node_count = Some(nodes.parse::<usize>().map_err(|_| malformed())?);
            }
            ["e", a, b] => edges.push((index(a)?, index(b)?, Bond::default())),
            ["p", ..] | ["e", ..] => return Err(malformed().into()),
            _ => {}
        }
    }

    let node_count = node_count.ok_or(DimacsError::MissingProblemLine)?;
    if node_count > MAX_ATOMS {
        return Err(DimacsError::TooManyNodes {
            nodes: node_count,
            max: MAX_ATOMS,
        }
        .into());
    }
    let atoms = (0..node_count)
        .map(|_| Atom::new("C"))
        .collect::<Result<Vec<_>>>()?;
    let molecule = Molecule::from_parts(atoms, edges)?;
    debug!(
        nodes = molecule.atom_count(),
        edges = molecule.bond_count(),
        "read DIMACS graph"
    );
    Ok(molecule)
}
