//! Similarity metrics over [`WeightedDigraph`] pairs, plus the HPG
//! cross-level lift (spec C5).

use std::collections::BTreeMap;
use std::hash::Hash;

use crate::graph::WeightedDigraph;

/// A metric's scalar value together with the named subexpressions that
/// produced it, mirroring the component-dictionary form every metric in
/// this module exposes alongside its bare scalar.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityReport {
    /// The metric's final value.
    pub value: f64,
    /// Named intermediate values (e.g. `"a"`, `"b"` for SS; `"ss"`, `"vs"`
    /// for NVS), keyed by their role in the formula.
    pub components: BTreeMap<&'static str, f64>,
}

impl SimilarityReport {
    fn scalar(value: f64) -> Self {
        Self {
            value,
            components: BTreeMap::new(),
        }
    }

    fn with(value: f64, components: &[(&'static str, f64)]) -> Self {
        Self {
            value,
            components: components.iter().copied().collect(),
        }
    }
}

/// Size Similarity: `min(a,b)/max(a,b)` where `a`, `b` are each graph's
/// [`WeightedDigraph::number_of_edges`] (the legacy node-count accessor,
/// spec §4.1/§4.5). Returns `0` if both graphs are empty.
#[must_use]
pub fn ss<T: Clone + Eq + Hash>(g1: &WeightedDigraph<T>, g2: &WeightedDigraph<T>) -> f64 {
    ss_report(g1, g2).value
}

/// Component form of [`ss`].
#[must_use]
pub fn ss_report<T: Clone + Eq + Hash>(g1: &WeightedDigraph<T>, g2: &WeightedDigraph<T>) -> SimilarityReport {
    let a = g1.number_of_edges() as f64;
    let b = g2.number_of_edges() as f64;
    let value = if a.max(b) == 0.0 { 0.0 } else { a.min(b) / a.max(b) };
    SimilarityReport::with(value, &[("a", a), ("b", b)])
}

/// Value Similarity: sums `min(w1,w2)/max(w1,w2)` over edges shared by both
/// graphs, divided by the larger true edge count. Returns `1` if neither
/// graph has any edges.
#[must_use]
pub fn vs<T: Clone + Eq + Hash>(g1: &WeightedDigraph<T>, g2: &WeightedDigraph<T>) -> f64 {
    vs_report(g1, g2).value
}

/// Component form of [`vs`].
#[must_use]
pub fn vs_report<T: Clone + Eq + Hash>(g1: &WeightedDigraph<T>, g2: &WeightedDigraph<T>) -> SimilarityReport {
    let e1 = g1.edge_count();
    let e2 = g2.edge_count();
    if e1 == 0 && e2 == 0 {
        return SimilarityReport::with(1.0, &[("shared_sum", 0.0), ("denominator", 0.0)]);
    }

    let (smaller, larger) = if e1 <= e2 { (g1, g2) } else { (g2, g1) };
    let mut shared_sum = 0.0;
    for (u, v, w_small) in smaller.edges_with_data() {
        if let Some(w_large) = larger.get_edge_weight(u, v) {
            shared_sum += w_small.min(w_large) / w_small.max(w_large);
        }
    }

    let denominator = e1.max(e2) as f64;
    let value = shared_sum / denominator;
    SimilarityReport::with(value, &[("shared_sum", shared_sum), ("denominator", denominator)])
}

/// Normalized Value Similarity: `VS / SS`, or `0` when `SS = 0`.
#[must_use]
pub fn nvs<T: Clone + Eq + Hash>(g1: &WeightedDigraph<T>, g2: &WeightedDigraph<T>) -> f64 {
    nvs_report(g1, g2).value
}

/// Component form of [`nvs`].
#[must_use]
pub fn nvs_report<T: Clone + Eq + Hash>(g1: &WeightedDigraph<T>, g2: &WeightedDigraph<T>) -> SimilarityReport {
    let ss_value = ss(g1, g2);
    let vs_value = vs(g1, g2);
    let value = if ss_value == 0.0 { 0.0 } else { vs_value / ss_value };
    SimilarityReport::with(value, &[("ss", ss_value), ("vs", vs_value)])
}

/// Weighted cross-level similarity lift between two sequences of per-level
/// graphs (an HPG's levels, 1-indexed by `ℓ`). `metric` scores each paired
/// level; levels where both sides are empty are skipped entirely (neither
/// contributes to the numerator nor the denominator).
///
/// Returns `1` if both level sequences are empty, `0` if exactly one is,
/// and otherwise the weighted mean `Σ ℓ·s_ℓ / Σ ℓ`, or `0` if every paired
/// level was skipped.
pub fn hpg_similarity<T, M>(levels_1: &[WeightedDigraph<T>], levels_2: &[WeightedDigraph<T>], mut metric: M) -> f64
where
    T: Clone + Eq + Hash,
    M: FnMut(&WeightedDigraph<T>, &WeightedDigraph<T>) -> f64,
{
    match (levels_1.is_empty(), levels_2.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let paired = levels_1.len().min(levels_2.len());

    for (idx, (g1, g2)) in levels_1.iter().zip(levels_2.iter()).enumerate().take(paired) {
        if g1.node_count() == 0 && g2.node_count() == 0 {
            tracing::debug!(level = idx + 1, "skipping empty HPG level pair");
            continue;
        }
        let level = (idx + 1) as f64;
        numerator += level * metric(g1, g2);
        denominator += level;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
