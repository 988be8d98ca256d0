//! Canonical numbering and serialization of molecular graphs.
//!
//! A [`Molecule`] is an undirected graph of atoms. [`canonicalize`] renumbers
//! its atoms so that any two numberings of the same molecule come out
//! identical, and [`canonical_string`] writes the result as a compact line
//! such as `H2O/(1-3)(2-3)/(2:mass=2)`.

use std::str::FromStr;

mod element;
pub use element::*;

mod error;
pub use error::*;

mod graph;
pub use graph::*;

mod canon;
pub use canon::*;

mod serialize;
pub use serialize::*;

mod parse;
pub use parse::*;

mod write;
pub use write::*;

/// Install a `tracing` subscriber that prints events up to `level`
/// (`error`, `warn`, `info`, `debug` or `trace`; anything else means
/// `info`). Calling it again after a subscriber is installed does nothing.
pub fn init_logging(level: &str) {
    let level = tracing::Level::from_str(level).unwrap_or(tracing::Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Are `a` and `b` the same molecule, up to the numbering of their atoms?
pub fn is_isomorphic_canonical(a: &Molecule, b: &Molecule) -> bool {
    a.atom_count() == b.atom_count()
        && a.bond_count() == b.bond_count()
        && canonical_string(a) == canonical_string(b)
}
