//! The minimal weighted directed graph shared by every builder (spec C1).

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::symbol::Symbol;

/// A weighted directed graph over [`Symbol`] nodes.
///
/// Supports add/update/lookup of edges, iteration, node/edge counts, and
/// edge-set membership in expected `O(1)` average time (outside of
/// iteration, which is linear in edges). At most one edge exists per
/// ordered `(u, v)` pair; a second insertion updates the weight rather than
/// creating a duplicate.
#[derive(Clone, Debug)]
pub struct WeightedDigraph<T> {
    nodes: HashMap<Symbol<T>, ()>,
    out_edges: HashMap<Symbol<T>, HashMap<Symbol<T>, f64>>,
    min_w: f64,
    max_w: f64,
}

impl<T: Clone + Eq + Hash> Default for WeightedDigraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> WeightedDigraph<T> {
    /// Creates an empty graph. `min_w` starts at `+inf`, `max_w` at `0`, per
    /// spec §3.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            out_edges: HashMap::new(),
            min_w: f64::INFINITY,
            max_w: 0.0,
        }
    }

    fn touch_node(&mut self, node: &Symbol<T>) {
        if !self.nodes.contains_key(node) {
            self.nodes.insert(node.clone(), ());
        }
    }

    fn track_weight(&mut self, weight: f64) {
        self.min_w = self.min_w.min(weight);
        self.max_w = self.max_w.max(weight);
    }

    /// Inserts `(u, v)` with weight `w` if absent, else replaces the
    /// existing weight with `w`. Updates `min_w`/`max_w`.
    pub fn add_or_update_edge(&mut self, u: Symbol<T>, v: Symbol<T>, w: f64) {
        self.touch_node(&u);
        self.touch_node(&v);
        self.out_edges.entry(u).or_default().insert(v, w);
        self.track_weight(w);
    }

    /// If `(u, v)` exists, its weight becomes `old + delta`; otherwise the
    /// edge is created with weight `delta`.
    pub fn increment_edge(&mut self, u: Symbol<T>, v: Symbol<T>, delta: f64) {
        let current = self.get_edge_weight(&u, &v).unwrap_or(0.0);
        self.add_or_update_edge(u, v, current + delta);
    }

    /// Returns the weight of `(u, v)`, or `None` if the edge does not exist.
    #[must_use]
    pub fn get_edge_weight(&self, u: &Symbol<T>, v: &Symbol<T>) -> Option<f64> {
        self.out_edges.get(u).and_then(|targets| targets.get(v)).copied()
    }

    /// Returns `true` if the directed edge `(u, v)` exists.
    #[must_use]
    pub fn has_edge(&self, u: &Symbol<T>, v: &Symbol<T>) -> bool {
        self.out_edges
            .get(u)
            .is_some_and(|targets| targets.contains_key(v))
    }

    /// Iterates the out-neighbours of `u` along with their edge weight.
    pub fn neighbors_out(&self, u: &Symbol<T>) -> impl Iterator<Item = (&Symbol<T>, f64)> {
        self.out_edges
            .get(u)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(v, &w)| (v, w)))
    }

    /// Iterates every edge as `(u, v, weight)`. Linear in edge count.
    pub fn edges_with_data(&self) -> impl Iterator<Item = (&Symbol<T>, &Symbol<T>, f64)> {
        self.out_edges
            .iter()
            .flat_map(|(u, targets)| targets.iter().map(move |(v, &w)| (u, v, w)))
    }

    /// Iterates every node in the graph.
    pub fn nodes(&self) -> impl Iterator<Item = &Symbol<T>> {
        self.nodes.keys()
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the true number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.out_edges.values().map(HashMap::len).sum()
    }

    /// Legacy accessor preserved from the source library: despite the name,
    /// this returns the **node** count, not the edge count. Size Similarity
    /// (spec §4.5) is defined in terms of this accessor, not [`Self::edge_count`];
    /// see spec §9 open question 1. Use [`Self::edge_count`] when the true
    /// edge cardinality is needed.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.node_count()
    }

    /// The smallest weight tracked so far (`+inf` for an empty graph).
    #[must_use]
    pub fn min_weight(&self) -> f64 {
        self.min_w
    }

    /// The largest weight tracked so far (`0` for an empty graph).
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.max_w
    }

    /// Drops nodes whose in-degree and out-degree are both zero.
    pub fn remove_isolated_nodes(&mut self) {
        let mut touched: HashMap<Symbol<T>, usize> = HashMap::new();
        for (u, targets) in &self.out_edges {
            if !targets.is_empty() {
                *touched.entry(u.clone()).or_insert(0) += targets.len();
            }
            for v in targets.keys() {
                *touched.entry(v.clone()).or_insert(0) += 1;
            }
        }
        self.nodes.retain(|node, ()| touched.contains_key(node));
        self.out_edges.retain(|_, targets| !targets.is_empty());
    }
}

impl<T: Clone + Eq + Hash> PartialEq for WeightedDigraph<T> {
    /// Structural equality modulo node identity: same node set, same edge
    /// set, and equal weights per corresponding edge (spec §3).
    fn eq(&self, other: &Self) -> bool {
        if self.nodes.len() != other.nodes.len() {
            return false;
        }
        if !self.nodes.keys().all(|n| other.nodes.contains_key(n)) {
            return false;
        }
        if self.edge_count() != other.edge_count() {
            return false;
        }
        self.edges_with_data()
            .all(|(u, v, w)| other.get_edge_weight(u, v) == Some(w))
    }
}

impl<T: Clone + Eq + Hash> Eq for WeightedDigraph<T> {}

impl<T: Clone + Eq + Hash> fmt::Display for WeightedDigraph<T> {
    /// `"nodes: {n}, edges: {e}"`, mirroring the source library's
    /// `__str__` conventions for its graph-shaped classes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nodes: {}, edges: {}", self.node_count(), self.edge_count())
    }
}

#[cfg(test)]
mod tests {
    use super::WeightedDigraph;
    use crate::symbol::Symbol;

    fn sym(c: char) -> Symbol<char> {
        Symbol::singleton(c)
    }

    #[test]
    fn new_graph_has_sentinel_extrema() {
        let g: WeightedDigraph<char> = WeightedDigraph::new();
        assert_eq!(g.min_weight(), f64::INFINITY);
        assert_eq!(g.max_weight(), 0.0);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn add_or_update_edge_replaces_weight() {
        let mut g = WeightedDigraph::new();
        g.add_or_update_edge(sym('a'), sym('b'), 3.0);
        assert_eq!(g.get_edge_weight(&sym('a'), &sym('b')), Some(3.0));
        g.add_or_update_edge(sym('a'), sym('b'), 9.0);
        assert_eq!(g.get_edge_weight(&sym('a'), &sym('b')), Some(9.0));
        assert_eq!(g.edge_count(), 1, "a second insertion updates, not duplicates");
    }

    #[test]
    fn increment_edge_strictly_increases_weight() {
        let mut g = WeightedDigraph::new();
        g.increment_edge(sym('a'), sym('b'), 1.0);
        let first = g.get_edge_weight(&sym('a'), &sym('b')).expect("edge exists");
        g.increment_edge(sym('a'), sym('b'), 1.0);
        let second = g.get_edge_weight(&sym('a'), &sym('b')).expect("edge exists");
        assert!(second > first);
    }

    #[test]
    fn number_of_edges_returns_node_count_not_edge_count() {
        let mut g = WeightedDigraph::new();
        g.add_or_update_edge(sym('a'), sym('b'), 1.0);
        g.add_or_update_edge(sym('a'), sym('c'), 1.0);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.number_of_edges(), g.node_count());
        assert_eq!(g.number_of_edges(), 3);
    }

    #[test]
    fn remove_isolated_nodes_drops_zero_degree_nodes() {
        let mut g: WeightedDigraph<char> = WeightedDigraph::new();
        g.add_or_update_edge(sym('a'), sym('b'), 1.0);
        g.touch_node(&sym('z'));
        assert_eq!(g.node_count(), 3);
        g.remove_isolated_nodes();
        assert_eq!(g.node_count(), 2);
        assert!(!g.nodes().any(|n| n == &sym('z')));
    }

    #[test]
    fn structural_equality_requires_equal_weights() {
        let mut a = WeightedDigraph::new();
        a.add_or_update_edge(sym('a'), sym('b'), 1.0);
        let mut b = WeightedDigraph::new();
        b.add_or_update_edge(sym('a'), sym('b'), 2.0);
        assert_ne!(a, b);
        b.add_or_update_edge(sym('a'), sym('b'), 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn has_edge_reports_membership() {
        let mut g = WeightedDigraph::new();
        assert!(!g.has_edge(&sym('a'), &sym('b')));
        g.add_or_update_edge(sym('a'), sym('b'), 1.0);
        assert!(g.has_edge(&sym('a'), &sym('b')));
        assert!(!g.has_edge(&sym('b'), &sym('a')));
    }

    #[test]
    fn display_reports_node_and_edge_counts() {
        let mut g = WeightedDigraph::new();
        g.add_or_update_edge(sym('a'), sym('b'), 1.0);
        g.add_or_update_edge(sym('b'), sym('c'), 1.0);
        assert_eq!(g.to_string(), "nodes: 3, edges: 2");
    }
}
