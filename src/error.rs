use thiserror::Error;

use crate::parse::{DimacsError, MolfileError, ParseError};

#[derive(Error, Debug)]
pub enum TucanError {
    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("Invalid molecular graph: {0}")]
    InvalidGraph(#[from] InvalidGraphError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Molfile(#[from] MolfileError),
    #[error(transparent)]
    Dimacs(#[from] DimacsError),
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems detected while a [`crate::Molecule`] is assembled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGraphError {
    #[error("Bond {bond:?} references atom {label}, but the graph has {atom_count} atoms")]
    UnknownAtom {
        bond: (usize, usize),
        label: usize,
        atom_count: usize,
    },
    #[error("Atom {label} is bonded to itself")]
    SelfLoop { label: usize },
    #[error("Atoms {a} and {b} are bonded more than once")]
    DuplicateBond { a: usize, b: usize },
}

pub type Result<T> = std::result::Result<T, TucanError>;
