//! Betweenness centrality engines.
//!
//! # Overview
//!
//! - **Vertex betweenness** ([`betweenness`]): for every vertex `v`, the sum
//!   over pairs `{s, t}` (`s ≠ v ≠ t`) of the fraction of shortest `s`–`t`
//!   paths that pass through `v` as an interior vertex.
//! - **Edge betweenness** ([`edge_betweenness`]): for every edge, the sum over
//!   pairs of the fraction of shortest paths that traverse it.
//!
//! Undirected graphs sum over unordered pairs; directed graphs sum over
//! ordered pairs and only count traversals along an arc's own direction.
//! Unreachable pairs contribute zero.
//!
//! # Methods
//!
//! Both engines support two internal methods with identical output:
//!
//! - [`Method::PathEnumeration`] materializes every shortest path in a
//!   [`crate::paths::PathTable`] and counts. Exact and easy to audit, but
//!   the table can grow exponentially with the number of tied routes.
//! - [`Method::Accumulation`] runs one BFS per source and propagates
//!   dependency counts backward through the BFS tree (Brandes, 2001).
//!   `O(V * E)` without storing paths.
//!
//! ```rust,ignore
//! use cleave_core::graph::UnGraph;
//! use cleave_core::metrics::{BetweennessConfig, betweenness::betweenness_centrality, top_k};
//!
//! let g = UnGraph::from_edges([(1, 2), (2, 3), (3, 4)])?;
//! let bc = betweenness_centrality(&g, &BetweennessConfig::default());
//! let top = top_k(&bc, 2);
//! ```

pub mod betweenness;
pub mod edge_betweenness;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use betweenness::{betweenness_centrality, betweenness_from_paths};
pub use edge_betweenness::{EdgeScores, edge_betweenness_centrality, edge_betweenness_from_paths};

/// Internal method used to aggregate shortest paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Enumerate every shortest path per pair, then count.
    PathEnumeration,
    /// Single-source dependency accumulation.
    #[default]
    Accumulation,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathEnumeration => "path-enumeration",
            Self::Accumulation => "accumulation",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "path-enumeration" | "paths" | "enumeration" => Ok(Self::PathEnumeration),
            "accumulation" | "brandes" => Ok(Self::Accumulation),
            other => Err(format!(
                "unknown betweenness method '{other}' (expected path-enumeration or accumulation)"
            )),
        }
    }
}

/// Options for vertex betweenness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetweennessConfig {
    /// Scale scores by the number of pairs that exclude a given vertex.
    pub normalized: bool,
    pub method: Method,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            normalized: true,
            method: Method::default(),
        }
    }
}

/// The `k` highest-scoring vertices, score descending.
///
/// Ties are broken by vertex order so the selection is deterministic.
#[must_use]
pub fn top_k<V: Ord + Clone>(scores: &BTreeMap<V, f64>, k: usize) -> Vec<(V, f64)> {
    let mut ranked: Vec<(&V, f64)> = scores.iter().map(|(v, &s)| (v, s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(k)
        .map(|(v, s)| (v.clone(), s))
        .collect()
}

/// Normalization factor for `n` vertices, `None` when there are fewer than
/// three vertices (no pair can have an interior vertex).
#[allow(clippy::cast_precision_loss)]
pub(crate) fn normalization_scale(n: usize, directed: bool) -> Option<f64> {
    if n <= 2 {
        return None;
    }
    let pairs = ((n - 1) * (n - 2)) as f64;
    Some(if directed { 1.0 / pairs } else { 2.0 / pairs })
}
