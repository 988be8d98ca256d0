use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{Result, TucanError};

/// Element symbols ordered by atomic number, starting at hydrogen.
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

lazy_static! {
    static ref ATOMIC_NUMBERS: HashMap<&'static str, u8> = SYMBOLS
        .iter()
        .enumerate()
        .map(|(i, symbol)| (*symbol, (i + 1) as u8))
        .collect();
}

/// Look up the atomic number of an element symbol.
///
/// Symbols are case sensitive: `Co` is cobalt, `CO` is not an element.
pub fn atomic_number(symbol: &str) -> Result<u8> {
    ATOMIC_NUMBERS
        .get(symbol)
        .copied()
        .ok_or_else(|| TucanError::UnknownElement(symbol.to_owned()))
}

/// The element symbol for an atomic number, if there is one.
pub fn symbol(atomic_number: u8) -> Option<&'static str> {
    SYMBOLS.get((atomic_number as usize).checked_sub(1)?).copied()
}

pub fn is_element(symbol: &str) -> bool {
    ATOMIC_NUMBERS.contains_key(symbol)
}

/// Resolve the hydrogen isotope aliases used by table files.
///
/// Returns the element symbol and the implied isotope mass, if any.
pub fn resolve_isotope_alias(symbol: &str) -> (&str, Option<u32>) {
    match symbol {
        "D" => ("H", Some(2)),
        "T" => ("H", Some(3)),
        other => (other, None),
    }
}
