use chrono::Local;

use crate::Molecule;

/// Longest `M  V30` payload that still fits an 80-column line once the
/// prefix, a continuation dash and the newline are added.
const MAX_PAYLOAD: usize = 72;

/// Write `molecule` as an MDL V3000 molfile.
///
/// Atoms without coordinates are placed at the origin. Charges outside
/// `-15..=15`, radicals outside `1..=3` and non-positive masses are not
/// written.
pub fn graph_to_molfile(molecule: &Molecule) -> String {
    let mut lines = header();
    push_v30(&mut lines, "BEGIN CTAB");
    push_v30(
        &mut lines,
        &format!(
            "COUNTS {} {} 0 0 0",
            molecule.atom_count(),
            molecule.bond_count()
        ),
    );

    push_v30(&mut lines, "BEGIN ATOM");
    for (label, atom) in molecule.atoms().enumerate() {
        let [x, y, z] = atom.position.unwrap_or([0.0; 3]);
        let mut line = format!(
            "{} {} {} {} {} 0",
            label + 1,
            atom.symbol(),
            coordinate(x),
            coordinate(y),
            coordinate(z)
        );
        if let Some(charge) = atom.charge.filter(|c| *c != 0 && (-15..=15).contains(c)) {
            line.push_str(&format!(" CHG={charge}"));
        }
        if let Some(radical) = atom.radical.filter(|r| (1..=3).contains(r)) {
            line.push_str(&format!(" RAD={radical}"));
        }
        if let Some(mass) = atom.mass.filter(|m| *m > 0) {
            line.push_str(&format!(" MASS={mass}"));
        }
        push_v30(&mut lines, &line);
    }
    push_v30(&mut lines, "END ATOM");

    if molecule.bond_count() > 0 {
        push_v30(&mut lines, "BEGIN BOND");
        for (index, (a, b, bond)) in molecule.bonds().enumerate() {
            let code = bond.order.map_or(1, |order| order.code());
            push_v30(&mut lines, &format!("{} {} {} {}", index + 1, code, a + 1, b + 1));
        }
        push_v30(&mut lines, "END BOND");
    }

    push_v30(&mut lines, "END CTAB");
    lines.push("M  END".to_string());
    lines.join("\n")
}

fn header() -> Vec<String> {
    let version: String = env!("CARGO_PKG_VERSION")
        .chars()
        .filter(|c| *c != '.')
        .take(3)
        .collect();
    vec![
        String::new(),
        // IIPPPPPPPPMMDDYYHHmm then the dimensional code
        format!("  TUCAN{version:<3}{}3D", Local::now().format("%m%d%y%H%M")),
        String::new(),
        "  0  0  0     0  0            999 V3000".to_string(),
    ]
}

/// Append `M  V30 <payload>`, wrapping long payloads with a trailing `-`.
fn push_v30(lines: &mut Vec<String>, payload: &str) {
    let mut rest = payload;
    while rest.chars().count() > MAX_PAYLOAD {
        let split = rest
            .char_indices()
            .nth(MAX_PAYLOAD - 1)
            .map_or(rest.len(), |(i, _)| i);
        lines.push(format!("M  V30 {}-", &rest[..split]));
        rest = &rest[split..];
    }
    lines.push(format!("M  V30 {rest}"));
}

/// Six significant digits without trailing zeros.
fn coordinate(value: f64) -> String {
    let rounded: f64 = format!("{value:.5e}").parse().unwrap_or(value);
    format!("{rounded}")
}
