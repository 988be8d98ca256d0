//! Reader for canonical strings, the inverse of
//! [`serialize_molecule`](crate::serialize_molecule).

use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, satisfy},
    combinator::{all_consuming, cut, map, map_res, opt, recognize, verify},
    error::{context, VerboseError, VerboseErrorKind},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, separated_pair, terminated, tuple},
    IResult,
};
use thiserror::Error;
use tracing::debug;

use crate::element::is_element;
use crate::{Atom, Bond, Molecule, Result, MAX_ATOMS};

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// A malformed canonical string, with the 0-based column of the offending
/// character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line 1:{column} {message}\n{input}\n{}", underline(.column))]
pub struct ParseError {
    pub column: usize,
    pub message: String,
    pub input: String,
}

fn underline(column: &usize) -> String {
    format!("{}^", " ".repeat(*column))
}

/// A parsed item together with the length of the input that was left when
/// it started, from which its column is recovered.
type Located<T> = (usize, T);

fn located<'a, O>(
    mut parser: impl FnMut(&'a str) -> Res<'a, O>,
) -> impl FnMut(&'a str) -> Res<'a, Located<O>> {
    move |input: &'a str| {
        let (rest, out) = parser(input)?;
        Ok((rest, (input.len(), out)))
    }
}

/// An uppercase letter and an optional lowercase one.
fn symbol_text(input: &str) -> Res<&str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase()),
        opt(satisfy(|c| c.is_ascii_lowercase())),
    ))(input)
}

fn element_symbol(input: &str) -> Res<&str> {
    let (rest, symbol) = symbol_text(input)?;
    if is_element(symbol) {
        Ok((rest, symbol))
    } else {
        Err(nom::Err::Failure(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("unknown element symbol"))],
        }))
    }
}

/// A positive integer without leading zeros.
fn positive(input: &str) -> Res<usize> {
    map_res(
        recognize(pair(satisfy(|c| ('1'..='9').contains(&c)), digit0)),
        str::parse::<usize>,
    )(input)
}

fn element_count(input: &str) -> Res<(&str, usize)> {
    let count = verify(positive, |&n| n >= 2);
    map(pair(element_symbol, opt(count)), |(symbol, count)| {
        (symbol, count.unwrap_or(1))
    })(input)
}

fn atom_index(input: &str) -> Res<usize> {
    context("expected an atom index", positive)(input)
}

fn edge(input: &str) -> Res<(usize, usize)> {
    preceded(
        char('('),
        cut(terminated(
            separated_pair(atom_index, char('-'), atom_index),
            context("expected ')'", char(')')),
        )),
    )(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Property {
    Mass(u32),
    Radical(u32),
}

fn property(input: &str) -> Res<Property> {
    let value = || map_res(digit1, str::parse::<u32>);
    context(
        "expected 'mass' or 'rad'",
        alt((
            preceded(tag("mass="), map(value(), Property::Mass)),
            preceded(tag("rad="), map(value(), Property::Radical)),
        )),
    )(input)
}

fn attributes(input: &str) -> Res<(usize, Vec<Property>)> {
    preceded(
        char('('),
        cut(terminated(
            separated_pair(
                atom_index,
                context("expected ':'", char(':')),
                separated_list1(char(','), property),
            ),
            context("expected ')'", char(')')),
        )),
    )(input)
}

struct Document<'a> {
    formula: Vec<Located<(&'a str, usize)>>,
    edges: Vec<Located<(usize, usize)>>,
    attributes: Vec<Located<(usize, Vec<Property>)>>,
}

fn document(input: &str) -> Res<Document> {
    let (rest, (formula, _, edges, attributes)) = all_consuming(tuple((
        many0(located(element_count)),
        context("expected '/'", char('/')),
        many0(located(edge)),
        opt(preceded(char('/'), many0(located(attributes)))),
    )))(input)?;
    Ok((
        rest,
        Document {
            formula,
            edges,
            attributes: attributes.unwrap_or_default(),
        },
    ))
}

fn syntax_error(input: &str, error: VerboseError<&str>) -> ParseError {
    let column = error
        .errors
        .first()
        .map_or(0, |(rest, _)| input.len() - rest.len());
    let message = error
        .errors
        .iter()
        .find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(message) => Some(message.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| match error.errors.first() {
            Some((_, VerboseErrorKind::Char(c))) => format!("expected '{c}'"),
            Some((rest, VerboseErrorKind::Nom(nom::error::ErrorKind::Eof))) => {
                format!("unexpected input '{}'", rest.chars().next().unwrap_or(' '))
            }
            _ => "malformed input".to_string(),
        });
    ParseError {
        column,
        message,
        input: input.to_string(),
    }
}

/// Hill order position of a symbol: carbon, then hydrogen, then the rest
/// alphabetically. Without carbon every symbol is alphabetical.
fn hill_key(symbol: &str, has_carbon: bool) -> (u8, &str) {
    match symbol {
        "C" if has_carbon => (0, ""),
        "H" if has_carbon => (1, ""),
        other => (2, other),
    }
}

/// Parse a canonical string into a [`Molecule`].
///
/// Atoms are numbered by ascending atomic number, keeping formula order
/// among atoms of the same element, which is the numbering edges and
/// attributes are written in.
pub fn parse_tucan(text: &str) -> Result<Molecule> {
    let input = text.trim();
    let document = match document(input) {
        Ok((_, document)) => document,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(syntax_error(input, e).into())
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(ParseError {
                column: input.len(),
                message: "incomplete input".to_string(),
                input: input.to_string(),
            }
            .into())
        }
    };
    let error_at = |remaining: usize, message: String| ParseError {
        column: input.len() - remaining,
        message,
        input: input.to_string(),
    };

    let has_carbon = document
        .formula
        .first()
        .map_or(false, |(_, (symbol, _))| *symbol == "C");
    let mut atoms = Vec::new();
    let mut previous: Option<(u8, &str)> = None;
    for &(remaining, (symbol, count)) in &document.formula {
        let key = hill_key(symbol, has_carbon);
        if previous.map_or(false, |p| key <= p) {
            let message = format!("element symbol '{symbol}' is out of Hill order or repeated");
            return Err(error_at(remaining, message).into());
        }
        previous = Some(key);
        if count > MAX_ATOMS - atoms.len() {
            let message = format!("formula has more than {MAX_ATOMS} atoms");
            return Err(error_at(remaining, message).into());
        }
        for _ in 0..count {
            atoms.push(Atom::new(symbol)?);
        }
    }
    atoms.sort_by_key(|atom| atom.atomic_number());
    let atom_count = atoms.len();

    let mut bonds = Vec::with_capacity(document.edges.len());
    for &(remaining, (a, b)) in &document.edges {
        if a > atom_count || b > atom_count {
            let message = format!(
                "edge ({a}-{b}) references an atom beyond the {atom_count} in the formula"
            );
            return Err(error_at(remaining, message).into());
        }
        if a == b {
            return Err(error_at(remaining, format!("atom {a} is bonded to itself")).into());
        }
        bonds.push((a - 1, b - 1, Bond::default()));
    }

    let mut properties: HashMap<usize, Vec<Property>> = HashMap::new();
    for (remaining, (label, props)) in document.attributes {
        if label > atom_count {
            let message = format!(
                "attributes for atom {label}, but the formula has {atom_count} atoms"
            );
            return Err(error_at(remaining, message).into());
        }
        properties.entry(label - 1).or_default().extend(props);
    }
    for (label, props) in properties {
        for property in props {
            match property {
                Property::Mass(mass) => atoms[label].mass = Some(mass),
                Property::Radical(radical) => atoms[label].radical = Some(radical),
            }
        }
    }

    let molecule = Molecule::from_parts(atoms, bonds)?;
    debug!(
        atoms = molecule.atom_count(),
        bonds = molecule.bond_count(),
        "parsed canonical string"
    );
    Ok(molecule)
}
