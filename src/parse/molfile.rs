//! MDL molfile (connection table) reader for the V2000 and V3000 formats.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::element::resolve_isotope_alias;
use crate::{Atom, Bond, BondType, Molecule, Result};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MolfileError {
    #[error("Molfile ends after {0} lines, before its counts line")]
    Header(usize),
    #[error("Bad counts line \"{0}\"")]
    Counts(String),
    #[error("Invalid molfile version: expected \"V2000\" or \"V3000\", found \"{0}\"")]
    Version(String),
    #[error("Expected \"{expected}\" on line {line}, found \"{found}\"")]
    Block {
        expected: &'static str,
        line: usize,
        found: String,
    },
    #[error("Malformed line {line} \"{text}\": {reason}")]
    Line {
        line: usize,
        text: String,
        reason: String,
    },
    #[error("Unknown atom index {index} in line \"{text}\"")]
    UnknownAtomIndex { index: i64, text: String },
    #[error("Could not find end of attribute block (\"M  END\")")]
    MissingEnd,
    #[error("Two star atoms (index {0} and {1}) may not be connected")]
    ConnectedStarAtoms(i64, i64),
    #[error("Invalid concatenation of lines \"{0}\" and \"{1}\"")]
    Continuation(String, String),
    #[error("The file must be in '.mol' format, not '{0}'")]
    Extension(String),
}

/// Read a molfile from disk. Only files with the `.mol` extension are
/// accepted.
pub fn graph_from_file(path: impl AsRef<Path>) -> Result<Molecule> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    if extension != "mol" {
        return Err(MolfileError::Extension(format!(".{extension}")).into());
    }
    let text = std::fs::read_to_string(path)?;
    graph_from_molfile_text(&text)
}

/// Read a molfile from its text. The format version is taken from the last
/// token of the counts line (line 4).
#[instrument(skip_all)]
pub fn graph_from_molfile_text(text: &str) -> Result<Molecule> {
    let lines: Vec<&str> = text.lines().collect();
    let counts = lines.get(3).ok_or(MolfileError::Header(lines.len()))?;
    let molecule = match counts.split_whitespace().last() {
        Some("V2000") => read_v2000(&lines)?,
        Some("V3000") => read_v3000(&lines)?,
        other => return Err(MolfileError::Version(other.unwrap_or("").to_string()).into()),
    };
    debug!(
        atoms = molecule.atom_count(),
        bonds = molecule.bond_count(),
        "read molfile"
    );
    Ok(molecule)
}

// ---------------------------------------------------------------------
// Fixed-column fields
// ---------------------------------------------------------------------

/// The trimmed text of columns `start..end`, tolerating short lines.
fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    let start = start.min(end);
    line.get(start..end).unwrap_or("").trim()
}

fn malformed(number: usize, line: &str, reason: String) -> MolfileError {
    MolfileError::Line {
        line: number,
        text: line.to_string(),
        reason,
    }
}

/// An integer field; blank fields read as zero.
fn int_field(field: &str, number: usize, line: &str) -> std::result::Result<i64, MolfileError> {
    if field.is_empty() {
        return Ok(0);
    }
    field
        .parse()
        .map_err(|_| malformed(number, line, format!("'{field}' is not an integer")))
}

/// A float field; blank fields read as zero.
fn float_field(field: &str, number: usize, line: &str) -> std::result::Result<f64, MolfileError> {
    if field.is_empty() {
        return Ok(0.0);
    }
    field
        .parse()
        .map_err(|_| malformed(number, line, format!("'{field}' is not a number")))
}

fn in_range<T: TryFrom<i64>>(
    value: i64,
    number: usize,
    line: &str,
) -> std::result::Result<T, MolfileError> {
    T::try_from(value).map_err(|_| malformed(number, line, format!("{value} is out of range")))
}

/// The 0-based label of the 1-based atom `index`, if it exists.
fn atom_label(index: i64, atom_count: usize, line: &str) -> std::result::Result<usize, MolfileError> {
    match usize::try_from(index) {
        Ok(i) if (1..=atom_count).contains(&i) => Ok(i - 1),
        _ => Err(MolfileError::UnknownAtomIndex {
            index,
            text: line.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------
// V2000
// ---------------------------------------------------------------------

fn read_v2000(lines: &[&str]) -> Result<Molecule> {
    // counts line: aaabbblllfffcccsssxxxrrrpppiiimmmvvvvvv
    let counts = lines[3];
    let atom_count = in_range(int_field(column(counts, 0, 3), 4, counts)?, 4, counts)
        .map_err(|_| MolfileError::Counts(counts.to_string()))?;
    let bond_count: usize = in_range(int_field(column(counts, 3, 6), 4, counts)?, 4, counts)
        .map_err(|_| MolfileError::Counts(counts.to_string()))?;

    let block_line = |index: usize, expected: &'static str| {
        lines.get(index).copied().ok_or(MolfileError::Block {
            expected,
            line: index + 1,
            found: "end of file".to_string(),
        })
    };

    let mut atoms = Vec::with_capacity(atom_count);
    for index in 4..4 + atom_count {
        atoms.push(v2000_atom(block_line(index, "atom line")?, index + 1)?);
    }

    let mut bonds = Vec::with_capacity(bond_count);
    for index in 4 + atom_count..4 + atom_count + bond_count {
        let line = block_line(index, "bond line")?;
        // bond line: 111222tttsssxxxrrrccc
        let a = atom_label(int_field(column(line, 0, 3), index + 1, line)?, atom_count, line)?;
        let b = atom_label(int_field(column(line, 3, 6), index + 1, line)?, atom_count, line)?;
        let code: u8 = in_range(int_field(column(line, 6, 9), index + 1, line)?, index + 1, line)?;
        bonds.push((a, b, Bond::new(BondType::from_code(code))));
    }

    apply_property_block(&lines[4 + atom_count + bond_count..], 5 + atom_count + bond_count, &mut atoms)?;
    Molecule::from_parts(atoms, bonds)
}

fn v2000_atom(line: &str, number: usize) -> Result<Atom> {
    // atom line: xxxxx.xxxxyyyyy.yyyyzzzzz.zzzz aaaddcccssshhhbbbvvvHHHrrriiimmmnnneee
    let (symbol, isotope) = resolve_isotope_alias(column(line, 31, 34));
    let position = [
        float_field(column(line, 0, 10), number, line)?,
        float_field(column(line, 10, 20), number, line)?,
        float_field(column(line, 20, 30), number, line)?,
    ];
    let mut atom = Atom::new(symbol)?.with_position(position);
    match int_field(column(line, 36, 39), number, line)? {
        1 => atom.charge = Some(3),
        2 => atom.charge = Some(2),
        3 => atom.charge = Some(1),
        4 => atom.radical = Some(2),
        5 => atom.charge = Some(-1),
        6 => atom.charge = Some(-2),
        7 => atom.charge = Some(-3),
        _ => {}
    }
    // The "dd" mass difference field is ignored; isotopes come from D/T
    // symbols and "M  ISO" lines.
    atom.mass = isotope;
    Ok(atom)
}

#[derive(Debug, Clone, Copy)]
enum Property {
    Charge,
    Radical,
    Mass,
}

/// Apply `M  CHG`, `M  RAD` and `M  ISO` lines up to `M  END`. Charge or
/// radical lines supersede every charge and radical of the atom block; isotope
/// lines supersede every mass.
fn apply_property_block(lines: &[&str], first_number: usize, atoms: &mut [Atom]) -> Result<()> {
    let mut assignments = Vec::new();
    let (mut reset_charge_and_radical, mut reset_mass) = (false, false);
    let mut ended = false;

    for (offset, &line) in lines.iter().enumerate() {
        let number = first_number + offset;
        let property = if line.starts_with("M  CHG") {
            reset_charge_and_radical = true;
            Property::Charge
        } else if line.starts_with("M  RAD") {
            reset_charge_and_radical = true;
            Property::Radical
        } else if line.starts_with("M  ISO") {
            reset_mass = true;
            Property::Mass
        } else if line.trim_end() == "M  END" {
            ended = true;
            break;
        } else {
            continue;
        };

        // M  CHGnn8 aaa vvv ...
        let entries = int_field(column(line, 6, 9), number, line)?;
        for entry in 0..entries.max(0) as usize {
            let start = 10 + entry * 8;
            let index = int_field(column(line, start, start + 3), number, line)?;
            let label = atom_label(index, atoms.len(), line)?;
            let value = int_field(column(line, start + 4, start + 7), number, line)?;
            assignments.push((label, property, value, number, line));
        }
    }
    if !ended {
        return Err(MolfileError::MissingEnd.into());
    }

    for atom in atoms.iter_mut() {
        if reset_charge_and_radical {
            atom.charge = None;
            atom.radical = None;
        }
        if reset_mass {
            atom.mass = None;
        }
    }
    for (label, property, value, number, line) in assignments {
        let atom = &mut atoms[label];
        match property {
            Property::Charge => atom.charge = Some(in_range::<i32>(value, number, line)?),
            Property::Radical => atom.radical = Some(in_range(value, number, line)?),
            Property::Mass => atom.mass = Some(in_range(value, number, line)?),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------
// V3000
// ---------------------------------------------------------------------

const V30_PREFIX: &str = "M  V30 ";

/// Join `M  V30` lines continued with a trailing `-`.
fn join_continuations(lines: &[&str]) -> std::result::Result<Vec<String>, MolfileError> {
    let mut joined: Vec<String> = Vec::with_capacity(lines.len());
    let mut pending: Option<String> = None;
    for &line in lines {
        let line = match pending.take() {
            Some(head) => {
                if !line.starts_with(V30_PREFIX) {
                    return Err(MolfileError::Continuation(head, line.to_string()));
                }
                format!("{}{}", &head[..head.len() - 1], &line[V30_PREFIX.len()..])
            }
            None => line.to_string(),
        };
        if line.starts_with(V30_PREFIX) && line.ends_with('-') {
            pending = Some(line);
        } else {
            joined.push(line);
        }
    }
    joined.extend(pending);
    Ok(joined)
}

struct V3000<'a> {
    lines: &'a [Vec<&'a str>],
}

impl<'a> V3000<'a> {
    fn tokens(&self, index: usize) -> &'a [&'a str] {
        self.lines.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn text(&self, index: usize) -> String {
        self.tokens(index).join(" ")
    }

    /// Check that line `index` reads `M  V30 <expected>`.
    fn expect(&self, index: usize, expected: &'static str) -> std::result::Result<(), MolfileError> {
        let tokens = self.tokens(index);
        let found = tokens.get(2..).unwrap_or(&[]).join(" ");
        if found == expected {
            Ok(())
        } else {
            Err(MolfileError::Block {
                expected,
                line: index + 1,
                found,
            })
        }
    }

    fn token(&self, index: usize, position: usize) -> std::result::Result<&'a str, MolfileError> {
        self.tokens(index).get(position).copied().ok_or_else(|| {
            malformed(index + 1, &self.text(index), format!("missing field {}", position + 1))
        })
    }

    fn int(&self, index: usize, position: usize) -> std::result::Result<i64, MolfileError> {
        int_field(self.token(index, position)?, index + 1, &self.text(index))
    }
}

fn read_v3000(lines: &[&str]) -> Result<Molecule> {
    let joined = join_continuations(lines)?;
    let tokens: Vec<Vec<&str>> = joined.iter().map(|l| l.split_whitespace().collect()).collect();
    let file = V3000 { lines: &tokens };

    let counts = file.tokens(5);
    if counts.len() < 5 || counts[2] != "COUNTS" {
        return Err(MolfileError::Counts(file.text(5)).into());
    }
    let count = |position: usize| -> std::result::Result<usize, MolfileError> {
        file.int(5, position)
            .ok()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| MolfileError::Counts(file.text(5)))
    };
    let (atom_count, bond_count) = (count(3)?, count(4)?);

    const ATOM_BLOCK: usize = 7;
    file.expect(ATOM_BLOCK - 1, "BEGIN ATOM")?;
    file.expect(ATOM_BLOCK + atom_count, "END ATOM")?;

    let mut atoms = Vec::with_capacity(atom_count);
    let mut labels: HashMap<i64, usize> = HashMap::new();
    let mut stars: HashSet<i64> = HashSet::new();
    for index in ATOM_BLOCK..ATOM_BLOCK + atom_count {
        let file_index = file.int(index, 2)?;
        let symbol = file.token(index, 3)?;
        if symbol == "*" {
            stars.insert(file_index);
            continue;
        }
        labels.insert(file_index, atoms.len());
        atoms.push(v3000_atom(&file, index, symbol)?);
    }

    let mut bonds = Vec::with_capacity(bond_count);
    if bond_count > 0 {
        let bond_block = ATOM_BLOCK + atom_count + 2;
        file.expect(bond_block - 1, "BEGIN BOND")?;
        file.expect(bond_block + bond_count, "END BOND")?;

        let mut expanded: HashSet<(usize, usize)> = HashSet::new();
        for index in bond_block..bond_block + bond_count {
            let text = file.text(index);
            let code: u8 = in_range(file.int(index, 3)?, index + 1, &text)?;
            let (first, second) = (file.int(index, 4)?, file.int(index, 5)?);
            let label = |i: i64| {
                labels.get(&i).copied().ok_or_else(|| MolfileError::UnknownAtomIndex {
                    index: i,
                    text: text.clone(),
                })
            };

            let anchor = match (stars.contains(&first), stars.contains(&second)) {
                (true, true) => return Err(MolfileError::ConnectedStarAtoms(first, second).into()),
                (true, false) => second,
                (false, true) => first,
                (false, false) => {
                    bonds.push((label(first)?, label(second)?, Bond::new(BondType::from_code(code))));
                    continue;
                }
            };
            let Some(ends) = endpoints(file.tokens(index), index + 1, &text)? else {
                warn!(line = index + 1, "ignoring star atom bond without ENDPTS");
                continue;
            };
            let anchor = label(anchor)?;
            for endpoint in ends {
                let end = label(endpoint)?;
                if expanded.insert((anchor.min(end), anchor.max(end))) {
                    bonds.push((anchor, end, Bond::new(BondType::from_code(code))));
                }
            }
        }
    }

    Molecule::from_parts(atoms, bonds)
}

fn v3000_atom(file: &V3000, index: usize, symbol: &str) -> Result<Atom> {
    let text = file.text(index);
    let (symbol, isotope) = resolve_isotope_alias(symbol);
    let mut position = [0.0; 3];
    for (axis, value) in position.iter_mut().enumerate() {
        *value = float_field(file.token(index, 4 + axis)?, index + 1, &text)?;
    }
    let mut atom = Atom::new(symbol)?.with_position(position);

    for token in file.tokens(index).iter().skip(8) {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        let parsed = || int_field(value, index + 1, &text);
        match key {
            "CHG" => atom.charge = Some(in_range(parsed()?, index + 1, &text)?),
            "RAD" => atom.radical = Some(in_range(parsed()?, index + 1, &text)?),
            "MASS" => atom.mass = Some(in_range(parsed()?, index + 1, &text)?),
            _ => {}
        }
    }
    if isotope.is_some() {
        atom.mass = isotope;
    }
    Ok(atom)
}

/// The atom indices of an `ENDPTS=(n a1 ... an)` bond property, if present.
fn endpoints(
    tokens: &[&str],
    number: usize,
    text: &str,
) -> std::result::Result<Option<Vec<i64>>, MolfileError> {
    let properties = tokens.get(6..).unwrap_or(&[]).join(" ");
    let Some(start) = properties.find("ENDPTS=(") else {
        return Ok(None);
    };
    let body = &properties[start + "ENDPTS=(".len()..];
    let Some(end) = body.find(')') else {
        return Err(malformed(number, text, "unterminated ENDPTS".to_string()));
    };
    let numbers = body[..end]
        .split_whitespace()
        .map(|n| int_field(n, number, text))
        .collect::<std::result::Result<Vec<i64>, _>>()?;
    let Some((&expected, endpoints)) = numbers.split_first() else {
        return Err(malformed(number, text, "empty ENDPTS".to_string()));
    };
    if expected != endpoints.len() as i64 {
        let reason = format!(
            "expected {expected} endpoints, found {}",
            endpoints.len()
        );
        return Err(malformed(number, text, reason));
    }
    Ok(Some(endpoints.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TucanError;

    const WATER_D1_V2000: &str = "\
water-d1
  manual

  3  2  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
    0.9572    0.0000    0.0000 D   0  0  0  0  0  0  0  0  0  0  0  0
   -0.2400    0.9266    0.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  1  3  1  0
M  END
";

    const TEMPO_LIKE_V3000: &str = "\
nitroxide
  manual

  0  0  0     0  0            999 V3000
M  V30 BEGIN CTAB
M  V30 COUNTS 4 3 0 0 0
M  V30 BEGIN ATOM
M  V30 1 N 0 0 0 0
M  V30 2 O 1.2 0 0 0 RAD=2
M  V30 3 C -1 1 0 0 MASS=13
M  V30 4 C -1 -1 0 0 CHG=-1
M  V30 END ATOM
M  V30 BEGIN BOND
M  V30 1 1 1 2
M  V30 2 1 1 3
M  V30 3 2 1 4
M  V30 END BOND
M  V30 END CTAB
M  END
";

    fn molfile_error(text: &str) -> MolfileError {
        match graph_from_molfile_text(text) {
            Err(TucanError::Molfile(e)) => e,
            other => panic!("expected a molfile error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_v2000() {
        let m = graph_from_molfile_text(WATER_D1_V2000).unwrap();
        assert_eq!(m.atom_count(), 3);
        assert_eq!(m.edge_list(), vec![(0, 1), (0, 2)]);
        assert_eq!(m.atom(0).symbol(), "O");
        assert_eq!(m.atom(1).symbol(), "H");
        assert_eq!(m.atom(1).mass, Some(2));
        assert_eq!(m.atom(2).mass, None);
        assert_eq!(m.atom(2).position, Some([-0.24, 0.9266, 0.0]));
    }

    #[test]
    fn test_v2000_charge_codes() {
        let line = |code: u8| {
            format!("    0.0000    0.0000    0.0000 C   0  {code}  0  0  0  0  0  0  0  0  0  0")
        };
        let expected = [
            (0, None, None),
            (1, Some(3), None),
            (2, Some(2), None),
            (3, Some(1), None),
            (4, None, Some(2)),
            (5, Some(-1), None),
            (6, Some(-2), None),
            (7, Some(-3), None),
            (8, None, None),
        ];
        for (code, charge, radical) in expected {
            let atom = v2000_atom(&line(code), 5).unwrap();
            assert_eq!(atom.charge, charge, "code {code}");
            assert_eq!(atom.radical, radical, "code {code}");
            assert_eq!(atom.position, Some([0.0, 0.0, 0.0]));
        }
    }

    #[test]
    fn test_v2000_property_block_supersedes_atom_block() {
        let text = "\
ion
  manual

  2  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 N   0  3  0  0  0  0  0  0  0  0  0  0
    0.0000    0.0000    0.0000 C   0  4  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
M  CHG  1   2  -1
M  ISO  1   1  15
M  END
";
        let m = graph_from_molfile_text(text).unwrap();
        // the atom-block charge of N and radical of C are cleared by M  CHG
        assert_eq!(m.atom(0).charge, None);
        assert_eq!(m.atom(1).radical, None);
        assert_eq!(m.atom(1).charge, Some(-1));
        assert_eq!(m.atom(0).mass, Some(15));
    }

    #[test]
    fn test_v2000_requires_end() {
        let text = WATER_D1_V2000.replace("M  END\n", "");
        assert_eq!(molfile_error(&text), MolfileError::MissingEnd);
    }

    #[test]
    fn test_v2000_unknown_atom_index() {
        let text = WATER_D1_V2000.replace("M  END", "M  CHG  1   5   2\nM  END");
        assert_eq!(
            molfile_error(&text),
            MolfileError::UnknownAtomIndex {
                index: 5,
                text: "M  CHG  1   5   2".to_string()
            }
        );
    }

    #[test]
    fn test_read_v3000() {
        let m = graph_from_molfile_text(TEMPO_LIKE_V3000).unwrap();
        assert_eq!(m.atom_count(), 4);
        assert_eq!(m.bond_count(), 3);
        assert_eq!(m.atom(1).radical, Some(2));
        assert_eq!(m.atom(2).mass, Some(13));
        assert_eq!(m.atom(3).charge, Some(-1));
        assert_eq!(m.atom(1).position, Some([1.2, 0.0, 0.0]));
        assert_eq!(m.bond_between(0, 3).unwrap().order, Some(BondType::Double));
    }

    #[test]
    fn test_v3000_line_continuation() {
        let text = TEMPO_LIKE_V3000.replace(
            "M  V30 2 O 1.2 0 0 0 RAD=2\n",
            "M  V30 2 O 1.2 0 0 0 R-\nM  V30 AD=2\n",
        );
        let m = graph_from_molfile_text(&text).unwrap();
        assert_eq!(m.atom(1).radical, Some(2));

        let broken = TEMPO_LIKE_V3000.replace(
            "M  V30 2 O 1.2 0 0 0 RAD=2\n",
            "M  V30 2 O 1.2 0 0 0 R-\nAD=2\n",
        );
        assert!(matches!(molfile_error(&broken), MolfileError::Continuation(..)));
    }

    #[test]
    fn test_v3000_star_atom_endpoints() {
        // ferrocene-style haptic bond: Fe bonded to three ring carbons via a star atom
        let text = "\
haptic
  manual

  0  0  0     0  0            999 V3000
M  V30 BEGIN CTAB
M  V30 COUNTS 5 4 0 0 0
M  V30 BEGIN ATOM
M  V30 1 C 0 0 0 0
M  V30 2 C 1 0 0 0
M  V30 3 C 0 1 0 0
M  V30 4 * 0.3 0.3 0 0
M  V30 5 Fe 0.3 0.3 1 0
M  V30 END ATOM
M  V30 BEGIN BOND
M  V30 1 1 1 2
M  V30 2 1 2 3
M  V30 3 1 3 1
M  V30 4 9 4 5 ENDPTS=(3 1 2 3) ATTACH=ALL
M  V30 END BOND
M  V30 END CTAB
M  END
";
        let m = graph_from_molfile_text(text).unwrap();
        assert_eq!(m.atom_count(), 4);
        assert_eq!(m.atom(3).symbol(), "Fe");
        assert_eq!(m.neighbors(3).count(), 3);
        assert_eq!(m.bond_count(), 6);
    }

    #[test]
    fn test_v3000_star_atom_without_endpoints_is_ignored() {
        let text = "\
polymer
  manual

  0  0  0     0  0            999 V3000
M  V30 BEGIN CTAB
M  V30 COUNTS 2 1 0 0 0
M  V30 BEGIN ATOM
M  V30 1 C 0 0 0 0
M  V30 2 * 1 0 0 0
M  V30 END ATOM
M  V30 BEGIN BOND
M  V30 1 1 1 2
M  V30 END BOND
M  V30 END CTAB
M  END
";
        let m = graph_from_molfile_text(text).unwrap();
        assert_eq!(m.atom_count(), 1);
        assert_eq!(m.bond_count(), 0);
    }

    #[test]
    fn test_v3000_connected_star_atoms() {
        let text = "\
stars
  manual

  0  0  0     0  0            999 V3000
M  V30 BEGIN CTAB
M  V30 COUNTS 2 1 0 0 0
M  V30 BEGIN ATOM
M  V30 1 * 0 0 0 0
M  V30 2 * 1 0 0 0
M  V30 END ATOM
M  V30 BEGIN BOND
M  V30 1 1 1 2
M  V30 END BOND
M  V30 END CTAB
M  END
";
        assert_eq!(molfile_error(text), MolfileError::ConnectedStarAtoms(1, 2));
    }

    #[test]
    fn test_v3000_block_markers() {
        let text = TEMPO_LIKE_V3000.replace("M  V30 END ATOM\n", "");
        assert!(matches!(
            molfile_error(&text),
            MolfileError::Block { expected: "END ATOM", .. }
        ));

        let text = TEMPO_LIKE_V3000.replace("COUNTS 4 3", "COUNT 4 3");
        assert!(matches!(molfile_error(&text), MolfileError::Counts(_)));
    }

    #[test]
    fn test_unknown_version() {
        let text = TEMPO_LIKE_V3000.replace("999 V3000", "999 V4000");
        assert_eq!(
            molfile_error(&text),
            MolfileError::Version("V4000".to_string())
        );
        assert_eq!(molfile_error("a\nb\n"), MolfileError::Header(2));
    }

    #[test]
    fn test_file_extension() {
        match graph_from_file("molecule.sdf") {
            Err(TucanError::Molfile(MolfileError::Extension(ext))) => assert_eq!(ext, ".sdf"),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
