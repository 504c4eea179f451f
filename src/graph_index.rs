//! An online symbol table that maps graphs to dense integers by
//! similarity, merging near-matches and deduplicating exact ones (spec C8).

use std::fmt;
use std::hash::Hash;

use tracing::instrument;

use crate::error::{GraphError, Result};
use crate::graph::WeightedDigraph;
use crate::operators;

/// Default lower merging margin, `θ_lo = 0.8` (spec §3).
pub const DEFAULT_THETA_LO: f64 = 0.8;
/// Default upper merging margin, `θ_hi = 0.9` (spec §3).
pub const DEFAULT_THETA_HI: f64 = 0.9;

/// Tolerance below which a near-1 similarity is treated as an exact match
/// for the purposes of stripping covered edges (spec §4.8 step 1d).
const EXACT_MATCH_EPSILON: f64 = 1e-5;

/// Maps graphs to dense integer symbols by similarity, as described in
/// spec §4.8.
///
/// Insertion order is permanent: once a graph is assigned symbol `i`, that
/// mapping never changes, even as later insertions merge more graphs into
/// entry `i`'s representative. The index owns every representative graph;
/// callers cannot mutate them directly.
pub struct GraphIndex<T, M> {
    entries: Vec<(WeightedDigraph<T>, u64)>,
    metric: M,
    theta_lo: f64,
    theta_hi: f64,
    deep_copy: bool,
}

impl<T, M> GraphIndex<T, M>
where
    T: Clone + Eq + Hash,
    M: Fn(&WeightedDigraph<T>, &WeightedDigraph<T>) -> f64,
{
    /// Builds an empty index. Rejects `theta_lo > theta_hi`.
    pub fn new(metric: M, theta_lo: f64, theta_hi: f64, deep_copy: bool) -> Result<Self> {
        if theta_lo > theta_hi {
            return Err(GraphError::InvalidMergingMargins { lo: theta_lo, hi: theta_hi });
        }
        Ok(Self {
            entries: Vec::new(),
            metric,
            theta_lo,
            theta_hi,
            deep_copy,
        })
    }

    /// Inserts `graph`, or looks up the existing entry it matches closely
    /// enough, returning the stable symbol (index) either way.
    ///
    /// Walks entries in insertion order. An entry scoring at least
    /// `theta_hi` against the working graph is returned immediately with
    /// no mutation. An entry scoring at least `theta_lo` absorbs the
    /// working graph via a weighted [`operators::union`] (learning factor
    /// `1 - c/(c+1)` for an entry seen `c` times so far) and is returned.
    /// Otherwise, if the entry is far from an exact match, its edges are
    /// stripped from the working graph via [`operators::inverse_intersection`]
    /// before moving on, so later entries are scored against only the
    /// still-unexplained remainder. If nothing matches, the (possibly
    /// stripped) working graph is appended as a new entry.
    #[instrument(skip(self, graph), fields(entries = self.entries.len()))]
    pub fn insert_or_lookup(&mut self, graph: WeightedDigraph<T>) -> usize {
        let mut working = graph;

        for (i, (representative, count)) in self.entries.iter_mut().enumerate() {
            let sigma = (self.metric)(&working, representative);

            if sigma >= self.theta_hi {
                return i;
            }

            if sigma >= self.theta_lo {
                let lf = 1.0 - (*count as f64) / (*count as f64 + 1.0);
                if self.deep_copy {
                    *representative = operators::union(representative, &working, lf);
                } else {
                    operators::union_in_place(representative, &working, lf);
                }
                *count += 1;
                return i;
            }

            if 1.0 - sigma > EXACT_MATCH_EPSILON {
                working = operators::inverse_intersection(&working, representative);
            }
        }

        self.entries.push((working, 1));
        self.entries.len() - 1
    }

    /// Returns the representative graph stored at `symbol`, if any.
    #[must_use]
    pub fn representative(&self, symbol: usize) -> Option<&WeightedDigraph<T>> {
        self.entries.get(symbol).map(|(graph, _)| graph)
    }

    /// Returns the number of entries (distinct symbols) in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index has no entries yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T, M> fmt::Display for GraphIndex<T, M> {
    /// `"length: {n}"`, mirroring the source library's `GraphIndex.__str__`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "length: {}", self.entries.len())
    }
}

impl<T, M> fmt::Debug for GraphIndex<T, M> {
    /// Deliberately does not require `M: Debug`: the metric is typically a
    /// non-`Debug` closure, so this reports the same summary as `Display`
    /// rather than deriving (which would force that bound on every caller).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphIndex")
            .field("entries", &self.entries.len())
            .field("theta_lo", &self.theta_lo)
            .field("theta_hi", &self.theta_hi)
            .field("deep_copy", &self.deep_copy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::GraphIndex;
    use crate::graph::WeightedDigraph;
    use crate::similarity::nvs;
    use crate::symbol::Symbol;

    fn sym(c: char) -> Symbol<char> {
        Symbol::singleton(c)
    }

    fn edge_graph(edges: &[(char, char, f64)]) -> WeightedDigraph<char> {
        let mut g = WeightedDigraph::new();
        for &(u, v, w) in edges {
            g.add_or_update_edge(sym(u), sym(v), w);
        }
        g
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = GraphIndex::new(nvs, 0.9, 0.8, false).expect_err("theta_lo > theta_hi must fail");
        assert_eq!(err.to_string(), "theta_lo (0.9) must not exceed theta_hi (0.8)");
    }

    #[test]
    fn display_reports_entry_count() {
        let mut index = GraphIndex::new(nvs, 0.8, 0.9, false).expect("valid thresholds");
        assert_eq!(index.to_string(), "length: 0");
        index.insert_or_lookup(edge_graph(&[('a', 'b', 1.0)]));
        assert_eq!(index.to_string(), "length: 1");
    }

    #[test]
    fn debug_reports_thresholds_and_entry_count() {
        let index = GraphIndex::new(nvs, 0.8, 0.9, false).expect("valid thresholds");
        let rendered = format!("{index:?}");
        assert!(rendered.contains("entries: 0"));
        assert!(rendered.contains("theta_lo: 0.8"));
        assert!(rendered.contains("theta_hi: 0.9"));
    }

    #[test]
    fn identical_graph_inserted_repeatedly_maps_to_same_symbol() {
        let mut index = GraphIndex::new(nvs, 0.8, 0.9, false).expect("valid thresholds");
        let g = edge_graph(&[('a', 'b', 1.0), ('b', 'c', 1.0)]);
        let first = index.insert_or_lookup(g.clone());
        for _ in 0..7 {
            let again = index.insert_or_lookup(g.clone());
            assert_eq!(again, first);
        }
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn mutually_dissimilar_graphs_get_distinct_ascending_symbols() {
        let mut index = GraphIndex::new(nvs, 0.8, 0.9, false).expect("valid thresholds");
        let letters = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        for (expected, &c) in letters.iter().enumerate() {
            let g = edge_graph(&[(c, c, 1.0)]);
            let symbol = index.insert_or_lookup(g);
            assert_eq!(symbol, expected);
        }
        assert_eq!(index.len(), 8);
    }

    #[test]
    fn deep_copy_flag_still_updates_the_stored_representative() {
        // NVS(similar, base) works out to ~0.178, landing inside a
        // [0.1, 0.5) merge band rather than the theta_hi exact-match band.
        let mut index = GraphIndex::new(nvs, 0.1, 0.5, true).expect("valid thresholds");
        let base = edge_graph(&[('a', 'b', 1.0), ('b', 'c', 1.0)]);
        let first = index.insert_or_lookup(base);
        let similar = edge_graph(&[('a', 'b', 5.0), ('b', 'c', 5.0), ('c', 'd', 1.0)]);
        let merged_symbol = index.insert_or_lookup(similar);
        assert_eq!(merged_symbol, first);
        let representative = index.representative(first).expect("entry exists");
        assert!(representative.has_edge(&sym('c'), &sym('d')), "merge should pull in the new edge");
    }
}
