mod common;

use std::collections::BTreeSet;

use common::*;
use proptest::prelude::*;
use tucan::*;

fn all_permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for shorter in all_permutations(n - 1) {
        for slot in 0..n {
            let mut labels = shorter.clone();
            labels.insert(slot, n - 1);
            out.push(labels);
        }
    }
    out
}

#[test]
fn test_fixtures_survive_random_renumbering() {
    for (name, _) in FIXTURES {
        let molecule = fixture(name);
        let reference = canonicalize(&molecule);
        let expected = serialize_molecule(&reference);
        for seed in 0..12 {
            let shuffled = permute(&molecule, seed);
            let canonical = canonicalize(&shuffled);
            assert!(
                canonical.is_identical(&reference),
                "{name}: seed {seed} gave a different canonical graph"
            );
            assert_eq!(serialize_molecule(&canonical), expected, "{name}: seed {seed}");
        }
    }
}

#[test]
fn test_every_numbering_of_small_molecules() {
    for name in ["water-d1", "methyl-13c"] {
        let molecule = fixture(name);
        let expected = canonical_string(&molecule);
        for labels in all_permutations(molecule.atom_count()) {
            let renumbered = permute_labels(&molecule, &labels);
            assert_eq!(canonical_string(&renumbered), expected, "{name}: {labels:?}");
        }
    }

    // methanol has six atoms, so all 720 numberings are cheap
    let methanol = parse_tucan("CH4O/(1-5)(2-5)(3-5)(4-6)(5-6)").unwrap();
    let expected = canonical_string(&methanol);
    for labels in all_permutations(6) {
        assert_eq!(canonical_string(&permute_labels(&methanol, &labels)), expected);
    }
}

#[test]
fn test_parallel_and_sequential_search_agree() {
    let sequential = CanonConfig { parallel: false };
    let parallel = CanonConfig { parallel: true };
    for (name, _) in FIXTURES {
        let molecule = permute(&fixture(name), 7);
        let a = canonicalize_with(&molecule, &sequential);
        let b = canonicalize_with(&molecule, &parallel);
        assert!(a.is_identical(&b), "{name}");
    }
}

#[test]
fn test_canonicalization_is_idempotent() {
    for (name, _) in FIXTURES {
        let once = canonicalize(&permute(&fixture(name), 3));
        let twice = once.canonize();
        assert!(once.is_identical(&twice), "{name}");
    }
}

#[test]
fn test_distinct_fixtures_stay_distinct() {
    let molecules: Vec<Molecule> = FIXTURES.iter().map(|(name, _)| fixture(name)).collect();
    for (i, a) in molecules.iter().enumerate() {
        for (j, b) in molecules.iter().enumerate() {
            assert_eq!(
                is_isomorphic_canonical(a, b),
                i == j,
                "{} vs {}",
                FIXTURES[i].0,
                FIXTURES[j].0
            );
        }
    }
}

#[test]
fn test_cube_graph() {
    // the 3-cube: vertices are 3-bit words, edges flip one bit
    let mut edges = Vec::new();
    for v in 0..8usize {
        for bit in [1, 2, 4] {
            if v & bit == 0 {
                edges.push((v + 1, (v | bit) + 1));
            }
        }
    }
    let cube = graph_from_dimacs_text(&dimacs(8, &edges)).unwrap();
    assert_eq!(cube.bond_count(), 12);

    let expected = canonical_string(&cube);
    assert!(expected.starts_with("C8/"));
    for seed in 0..20 {
        assert_eq!(canonical_string(&permute(&cube, seed)), expected);
    }

    // cutting one edge makes a different graph
    let cut = graph_from_dimacs_text(&dimacs(8, &edges[1..])).unwrap();
    assert!(!is_isomorphic_canonical(&cube, &cut));
}

#[test]
fn test_cubic_graph_with_misleading_signatures() {
    // siblings in this graph share edge signatures without being equivalent
    let edges = [
        (1, 2),
        (1, 3),
        (1, 4),
        (2, 7),
        (2, 8),
        (3, 4),
        (3, 10),
        (4, 5),
        (5, 7),
        (5, 9),
        (6, 8),
        (6, 9),
        (6, 10),
        (7, 10),
        (8, 9),
    ];
    let graph = graph_from_dimacs_text(&dimacs(10, &edges)).unwrap();
    let expected = canonical_string(&graph);
    for seed in 0..10 {
        assert_eq!(canonical_string(&permute(&graph, seed)), expected, "seed {seed}");
    }
}

#[test]
fn test_disconnected_molecules() {
    // two waters and a xenon atom
    let mixture = parse_tucan("H4O2Xe/(1-5)(2-5)(3-6)(4-6)").unwrap();
    assert_eq!(mixture.component_count(), 3);
    let expected = canonical_string(&mixture);
    for seed in 0..10 {
        assert_eq!(canonical_string(&permute(&mixture, seed)), expected);
    }
}

/// Random trees over a few elements, some of them deuterated.
fn random_tree() -> impl Strategy<Value = Molecule> {
    prop::collection::vec((0usize..4, any::<usize>(), any::<bool>()), 1..16).prop_map(|atoms| {
        let mut builder = MoleculeBuilder::new();
        for (i, &(element, parent, heavy)) in atoms.iter().enumerate() {
            let mut atom = Atom::new(["C", "N", "O", "H"][element]).unwrap();
            if element == 3 && heavy {
                atom = atom.with_mass(2);
            }
            let label = builder.add_atom(atom);
            if i > 0 {
                builder.add_bond(parent % i, label);
            }
        }
        builder.build().unwrap()
    })
}

/// Random simple graphs, cycles and all, optionally colored with two
/// elements.
fn random_graph(colored: bool) -> impl Strategy<Value = Molecule> {
    (1usize..11)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(any::<bool>(), n),
                prop::collection::vec((0..n, 0..n), 0..2 * n),
            )
        })
        .prop_map(move |(nitrogen, pairs)| {
            let mut builder = MoleculeBuilder::new();
            for &is_nitrogen in &nitrogen {
                let symbol = if colored && is_nitrogen { "N" } else { "C" };
                builder.add_element(symbol).unwrap();
            }
            let bonds: BTreeSet<(usize, usize)> = pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect();
            for (a, b) in bonds {
                builder.add_bond(a, b);
            }
            builder.build().unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_graphs_ignore_numbering(
        molecule in any::<bool>().prop_flat_map(random_graph),
        seed in any::<u64>(),
    ) {
        let shuffled = permute(&molecule, seed);
        prop_assert_eq!(canonical_string(&molecule), canonical_string(&shuffled));
    }

    /// Refinement always stops at an equitable coloring, from the seed
    /// coloring and after individualizing any atom.
    #[test]
    fn prop_refinement_is_equitable(
        molecule in any::<bool>().prop_flat_map(random_graph),
        atom in any::<prop::sample::Index>(),
    ) {
        let neighbors = molecule.neighbor_lists();
        let equitable = refine(&neighbors, &initial_coloring(&molecule));
        prop_assert!(is_equitable(&neighbors, &equitable));

        let atom = atom.index(molecule.atom_count());
        let child = refine(&neighbors, &equitable.individualize(atom));
        prop_assert!(is_equitable(&neighbors, &child));
        prop_assert!(child.class_count() >= equitable.class_count());
    }

    /// Renumbering a molecule never changes its canonical string.
    #[test]
    fn prop_trees_ignore_numbering(molecule in random_tree(), seed in any::<u64>()) {
        let shuffled = permute(&molecule, seed);
        prop_assert_eq!(canonical_string(&molecule), canonical_string(&shuffled));
    }

    /// Canonical strings read back into the same canonical string.
    #[test]
    fn prop_trees_round_trip(molecule in random_tree()) {
        let text = canonical_string(&molecule);
        let back = parse_tucan(&text).unwrap();
        prop_assert_eq!(canonical_string(&back), text);
    }
}
