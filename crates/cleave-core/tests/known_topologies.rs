//! Known-topology regression tests for betweenness and Girvan-Newman.
//!
//! Expected values were computed independently and hardcoded, so any change
//! that shifts a score or a split is caught. Tolerance is 1e-6 throughout.

use std::collections::{BTreeMap, BTreeSet};

use cleave_core::community::{GirvanNewman, Partition};
use cleave_core::graph::{DiGraph, UnGraph, read_edge_list};
use cleave_core::metrics::{
    BetweennessConfig, Method, betweenness_centrality, edge_betweenness_centrality, top_k,
};
use cleave_core::paths::{PathTable, all_shortest_paths};

const EPS: f64 = 1e-6;
const METHODS: [Method; 2] = [Method::PathEnumeration, Method::Accumulation];

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Two dense clusters {1,2,3,4} and {5,6,7,8} joined through 4, plus the
/// pendant 9 hanging off 7.
const NINE_NODE: [(u32, u32); 14] = [
    (1, 2),
    (1, 3),
    (1, 4),
    (2, 3),
    (3, 4),
    (4, 5),
    (4, 6),
    (5, 6),
    (6, 7),
    (7, 8),
    (8, 5),
    (5, 7),
    (6, 8),
    (7, 9),
];

/// Zachary's karate club.
const KARATE: [(u32, u32); 78] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (0, 6),
    (0, 7),
    (0, 8),
    (0, 10),
    (0, 11),
    (0, 12),
    (0, 13),
    (0, 17),
    (0, 19),
    (0, 21),
    (0, 31),
    (1, 2),
    (1, 3),
    (1, 7),
    (1, 13),
    (1, 17),
    (1, 19),
    (1, 21),
    (1, 30),
    (2, 3),
    (2, 7),
    (2, 8),
    (2, 9),
    (2, 13),
    (2, 27),
    (2, 28),
    (2, 32),
    (3, 7),
    (3, 12),
    (3, 13),
    (4, 6),
    (4, 10),
    (5, 6),
    (5, 10),
    (5, 16),
    (6, 16),
    (8, 30),
    (8, 32),
    (8, 33),
    (9, 33),
    (13, 33),
    (14, 32),
    (14, 33),
    (15, 32),
    (15, 33),
    (18, 32),
    (18, 33),
    (19, 33),
    (20, 32),
    (20, 33),
    (22, 32),
    (22, 33),
    (23, 25),
    (23, 27),
    (23, 29),
    (23, 32),
    (23, 33),
    (24, 25),
    (24, 27),
    (24, 31),
    (25, 31),
    (26, 29),
    (26, 33),
    (27, 33),
    (28, 31),
    (28, 33),
    (29, 32),
    (29, 33),
    (30, 32),
    (30, 33),
    (31, 32),
    (31, 33),
    (32, 33),
];

/// Padgett's Florentine families marriage network (15 families, 20 ties).
const FLORENTINE: [(&str, &str); 20] = [
    ("Acciaiuoli", "Medici"),
    ("Castellani", "Peruzzi"),
    ("Castellani", "Strozzi"),
    ("Castellani", "Barbadori"),
    ("Medici", "Barbadori"),
    ("Medici", "Ridolfi"),
    ("Medici", "Tornabuoni"),
    ("Medici", "Albizzi"),
    ("Medici", "Salviati"),
    ("Salviati", "Pazzi"),
    ("Peruzzi", "Strozzi"),
    ("Peruzzi", "Bischeri"),
    ("Strozzi", "Ridolfi"),
    ("Strozzi", "Bischeri"),
    ("Ridolfi", "Tornabuoni"),
    ("Tornabuoni", "Guadagni"),
    ("Albizzi", "Ginori"),
    ("Albizzi", "Guadagni"),
    ("Bischeri", "Guadagni"),
    ("Guadagni", "Lamberteschi"),
];

fn graph(edges: &[(u32, u32)]) -> UnGraph<u32> {
    UnGraph::from_edges(edges.iter().copied()).expect("fixture has no self loops")
}

fn config(normalized: bool, method: Method) -> BetweennessConfig {
    BetweennessConfig { normalized, method }
}

fn parts(p: &Partition<u32>) -> Vec<Vec<u32>> {
    p.iter().map(|c| c.iter().copied().collect()).collect()
}

fn assert_scores(actual: &BTreeMap<u32, f64>, expected: &[(u32, f64)], label: &str) {
    assert_eq!(actual.len(), expected.len(), "{label}: vertex count");
    for &(v, want) in expected {
        let got = actual[&v];
        assert!(
            (got - want).abs() < EPS,
            "{label}: vertex {v} expected {want}, got {got}"
        );
    }
}

// ===========================================================================
// Nine-node two-cluster graph
// ===========================================================================

#[test]
fn nine_node_normalized_betweenness() {
    let g = graph(&NINE_NODE);
    let expected = [
        (1, 0.107_142_857_1),
        (2, 0.0),
        (3, 0.107_142_857_1),
        (4, 0.535_714_285_7),
        (5, 0.214_285_714_3),
        (6, 0.214_285_714_3),
        (7, 0.25),
        (8, 0.0),
        (9, 0.0),
    ];
    for method in METHODS {
        let bc = betweenness_centrality(&g, &config(true, method));
        assert_scores(&bc, &expected, method.as_str());
    }
}

#[test]
fn nine_node_raw_betweenness() {
    let g = graph(&NINE_NODE);
    let expected = [
        (1, 3.0),
        (2, 0.0),
        (3, 3.0),
        (4, 15.0),
        (5, 6.0),
        (6, 6.0),
        (7, 7.0),
        (8, 0.0),
        (9, 0.0),
    ];
    for method in METHODS {
        let bc = betweenness_centrality(&g, &config(false, method));
        assert_scores(&bc, &expected, method.as_str());
    }
}

#[test]
fn nine_node_edge_betweenness() {
    let g = graph(&NINE_NODE);
    let expected = [
        ((1, 2), 4.0),
        ((1, 3), 1.0),
        ((1, 4), 9.0),
        ((2, 3), 4.0),
        ((3, 4), 9.0),
        ((4, 5), 10.0),
        ((4, 6), 10.0),
        ((5, 6), 1.0),
        ((5, 7), 6.0),
        ((5, 8), 3.0),
        ((6, 7), 6.0),
        ((6, 8), 3.0),
        ((7, 8), 2.0),
        ((7, 9), 8.0),
    ];
    for method in METHODS {
        let eb = edge_betweenness_centrality(&g, method);
        assert_eq!(eb.len(), expected.len());
        for ((a, b), want) in expected {
            let got = eb.get(&a, &b).expect("edge scored");
            assert!((got - want).abs() < EPS, "{method}: ({a},{b}) expected {want}, got {got}");
        }
        // (4,5) and (4,6) tie; the smaller key is reported.
        let (a, b, _) = eb.max_edge().expect("max edge");
        assert_eq!((*a, *b), (4, 5));
    }
}

#[test]
fn nine_node_top_vertices() {
    let g = graph(&NINE_NODE);
    let bc = betweenness_centrality(&g, &BetweennessConfig::default());
    let top: Vec<u32> = top_k(&bc, 4).into_iter().map(|(v, _)| v).collect();
    assert_eq!(top, vec![4, 7, 5, 6]);
}

#[test]
fn nine_node_girvan_newman_hierarchy() {
    let g = graph(&NINE_NODE);
    let levels: Vec<Vec<Vec<u32>>> = GirvanNewman::new(&g).map(|p| parts(&p)).collect();

    let expected: Vec<Vec<Vec<u32>>> = vec![
        vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8, 9]],
        vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9]],
        vec![vec![1, 3, 4], vec![2], vec![5, 6, 7, 8], vec![9]],
        vec![vec![1], vec![2], vec![3, 4], vec![5, 6, 7, 8], vec![9]],
        vec![vec![1], vec![2], vec![3], vec![4], vec![5, 6, 7, 8], vec![9]],
        vec![vec![1], vec![2], vec![3], vec![4], vec![5], vec![6, 7, 8], vec![9]],
        vec![
            vec![1],
            vec![2],
            vec![3],
            vec![4],
            vec![5],
            vec![6],
            vec![7, 8],
            vec![9],
        ],
        (1..=9).map(|v| vec![v]).collect(),
    ];
    assert_eq!(levels, expected);
}

// ===========================================================================
// Karate club
// ===========================================================================

#[test]
fn karate_normalized_betweenness() {
    let g = graph(&KARATE);
    let expected = [
        (0, 0.437_635_281),
        (1, 0.053_936_688),
        (2, 0.143_656_806),
        (3, 0.011_909_271),
        (4, 0.000_631_313),
        (5, 0.029_987_374),
        (6, 0.029_987_374),
        (7, 0.0),
        (8, 0.055_926_828),
        (9, 0.000_847_763),
        (10, 0.000_631_313),
        (11, 0.0),
        (12, 0.0),
        (13, 0.045_863_396),
        (14, 0.0),
        (15, 0.0),
        (16, 0.0),
        (17, 0.0),
        (18, 0.0),
        (19, 0.032_475_048),
        (20, 0.0),
        (21, 0.0),
        (22, 0.0),
        (23, 0.017_613_636),
        (24, 0.002_209_596),
        (25, 0.003_840_488),
        (26, 0.0),
        (27, 0.022_333_454),
        (28, 0.001_794_733),
        (29, 0.002_922_078),
        (30, 0.014_411_977),
        (31, 0.138_275_613),
        (32, 0.145_247_114),
        (33, 0.304_074_976),
    ];
    for method in METHODS {
        let bc = betweenness_centrality(&g, &config(true, method));
        assert_scores(&bc, &expected, method.as_str());
    }
}

#[test]
fn karate_first_split() {
    let g = graph(&KARATE);
    let first = GirvanNewman::new(&g).next().expect("karate splits");
    assert_eq!(
        parts(&first),
        vec![
            vec![0, 1, 3, 4, 5, 6, 7, 10, 11, 12, 13, 16, 17, 19, 21],
            vec![
                2, 8, 9, 14, 15, 18, 20, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33
            ],
        ]
    );
}

// ===========================================================================
// Florentine families
// ===========================================================================

fn florentine() -> UnGraph<&'static str> {
    UnGraph::from_edges(FLORENTINE).expect("fixture has no self loops")
}

#[test]
fn florentine_betweenness() {
    let g = florentine();
    let raw = [
        ("Acciaiuoli", 0.0),
        ("Albizzi", 19.333_333_333),
        ("Barbadori", 8.5),
        ("Bischeri", 9.5),
        ("Castellani", 5.0),
        ("Ginori", 0.0),
        ("Guadagni", 23.166_666_667),
        ("Lamberteschi", 0.0),
        ("Medici", 47.5),
        ("Pazzi", 0.0),
        ("Peruzzi", 2.0),
        ("Ridolfi", 10.333_333_333),
        ("Salviati", 13.0),
        ("Strozzi", 9.333_333_333),
        ("Tornabuoni", 8.333_333_333),
    ];
    // 2 / ((15 - 1) * (15 - 2))
    let scale = 1.0 / 91.0;

    for method in METHODS {
        let unscaled = betweenness_centrality(&g, &config(false, method));
        let normalized = betweenness_centrality(&g, &config(true, method));
        assert_eq!(unscaled.len(), raw.len());
        for (family, want) in raw {
            let got = unscaled[family];
            assert!((got - want).abs() < EPS, "{method}: {family} expected {want}, got {got}");
            let got = normalized[family];
            assert!(
                (got - want * scale).abs() < EPS,
                "{method}: normalized {family} expected {}, got {got}",
                want * scale
            );
        }
        assert!((normalized["Medici"] - 0.521_978_022).abs() < EPS);
    }
}

#[test]
fn florentine_edge_betweenness() {
    let g = florentine();
    for method in METHODS {
        let eb = edge_betweenness_centrality(&g, method);
        assert_eq!(eb.len(), 20);
        let (a, b, score) = eb.max_edge().expect("edges");
        assert_eq!((*a, *b), ("Medici", "Salviati"));
        assert!((score - 26.0).abs() < EPS);
        let albizzi = eb.get(&"Medici", &"Albizzi").expect("edge");
        assert!((albizzi - 22.333_333_333).abs() < EPS, "{method}: {albizzi}");
        let barbadori = eb.get(&"Barbadori", &"Medici").expect("edge");
        assert!((barbadori - 18.5).abs() < EPS);
    }
}

#[test]
fn florentine_girvan_newman_levels() {
    let g = florentine();
    let mut gn = GirvanNewman::new(&g);
    let mut levels = Vec::new();
    for partition in gn.by_ref().take(3) {
        let named: Vec<Vec<&str>> = partition
            .iter()
            .map(|c| c.iter().copied().collect())
            .collect();
        levels.push(named);
    }

    assert_eq!(
        levels[0],
        vec![
            vec![
                "Acciaiuoli", "Albizzi", "Barbadori", "Bischeri", "Castellani", "Ginori",
                "Guadagni", "Lamberteschi", "Medici", "Peruzzi", "Ridolfi", "Strozzi",
                "Tornabuoni",
            ],
            vec!["Pazzi", "Salviati"],
        ]
    );
    assert_eq!(
        levels[1],
        vec![
            vec![
                "Acciaiuoli", "Albizzi", "Ginori", "Guadagni", "Lamberteschi", "Medici",
                "Ridolfi", "Tornabuoni",
            ],
            vec!["Barbadori", "Bischeri", "Castellani", "Peruzzi", "Strozzi"],
            vec!["Pazzi", "Salviati"],
        ]
    );
    assert_eq!(
        levels[2],
        vec![
            vec!["Acciaiuoli", "Medici", "Ridolfi", "Tornabuoni"],
            vec!["Albizzi", "Ginori", "Guadagni", "Lamberteschi"],
            vec!["Barbadori", "Bischeri", "Castellani", "Peruzzi", "Strozzi"],
            vec!["Pazzi", "Salviati"],
        ]
    );
    assert_eq!(gn.steps(), 6);
    assert_eq!(gn.count(), 11, "fourteen levels in all");
}

// ===========================================================================
// Small shapes
// ===========================================================================

#[test]
fn path_of_four_interior_vertices() {
    let g = graph(&[(1, 2), (2, 3), (3, 4)]);
    for method in METHODS {
        let bc = betweenness_centrality(&g, &config(true, method));
        assert_scores(
            &bc,
            &[(1, 0.0), (2, 2.0 / 3.0), (3, 2.0 / 3.0), (4, 0.0)],
            method.as_str(),
        );
    }
}

#[test]
fn two_vertex_graph_is_never_scaled() {
    let g = graph(&[(1, 2)]);
    let bc = betweenness_centrality(&g, &BetweennessConfig::default());
    assert_scores(&bc, &[(1, 0.0), (2, 0.0)], "two vertices");
}

#[test]
fn directed_cycle_with_chord() {
    let g = DiGraph::from_edges([(1_u32, 2), (2, 3), (3, 4), (1, 3), (4, 1)]).expect("graph");
    for method in METHODS {
        let raw = betweenness_centrality(&g, &config(false, method));
        assert_scores(&raw, &[(1, 3.0), (2, 0.0), (3, 3.0), (4, 3.0)], "raw");

        let norm = betweenness_centrality(&g, &config(true, method));
        assert_scores(&norm, &[(1, 0.5), (2, 0.0), (3, 0.5), (4, 0.5)], "normalized");

        let eb = edge_betweenness_centrality(&g, method);
        let arcs = [
            ((1, 2), 3.0),
            ((1, 3), 3.0),
            ((2, 3), 3.0),
            ((3, 4), 6.0),
            ((4, 1), 6.0),
        ];
        for ((a, b), want) in arcs {
            let got = eb.get(&a, &b).expect("arc");
            assert!((got - want).abs() < EPS, "({a},{b}) expected {want}, got {got}");
        }
    }
}

#[test]
fn two_triangles_hierarchy() {
    let g = graph(&[(1, 2), (1, 3), (2, 3), (4, 5), (4, 6), (5, 6)]);
    let levels: Vec<Vec<Vec<u32>>> = GirvanNewman::new(&g).map(|p| parts(&p)).collect();
    assert_eq!(
        levels,
        vec![
            vec![vec![1], vec![2, 3], vec![4, 5, 6]],
            vec![vec![1], vec![2], vec![3], vec![4, 5, 6]],
            vec![vec![1], vec![2], vec![3], vec![4], vec![5, 6]],
            vec![vec![1], vec![2], vec![3], vec![4], vec![5], vec![6]],
        ]
    );
}

#[test]
fn square_has_two_shortest_paths_across() {
    let g = graph(&[(1, 2), (2, 3), (3, 4), (4, 1)]);
    let paths = all_shortest_paths(&g, &1, &3).expect("paths");
    let as_set: BTreeSet<Vec<u32>> = paths.into_iter().collect();
    assert_eq!(
        as_set,
        [vec![1, 2, 3], vec![1, 4, 3]].into_iter().collect::<BTreeSet<_>>()
    );

    let table = PathTable::build(&g);
    // 4 vertices, 6 unordered pairs, both orientations answerable.
    assert_eq!(table.paths(&g, &3, &1).expect("reverse").len(), 2);
    assert_eq!(table.paths(&g, &1, &2).expect("adjacent").distance(), Some(1));
}

#[test]
fn parsed_edge_list_matches_numeric_graph() {
    let text = "# path\na b\nb c\nc d\n";
    let g: UnGraph<String> = read_edge_list(text.as_bytes()).expect("parse");
    let bc = betweenness_centrality(&g, &BetweennessConfig::default());
    assert!((bc["b"] - 2.0 / 3.0).abs() < EPS);
    assert!(bc["a"].abs() < EPS);
}
