//! Hierarchical Proximity Graph construction: iterated
//! graph -> neighbourhood-patch -> symbol -> next-level-graph, for 1D
//! sequences ([`Hpg1D`]) and 2D matrices ([`Hpg2D`]) (spec C7).
//!
//! Level `0` is the base graph over the caller's own data, built with the
//! ordinary C3/C6 builders. Levels `1..=levels` are built by windowing the
//! previous level's data into overlapping patches, collapsing each patch to
//! a dense integer symbol via a per-level [`GraphIndex`], and building a
//! graph over the resulting symbol sequence. Per the source's parent/child
//! pointers being redesigned as a flat ownership structure, levels `1..L`
//! are stored as a plain [`Vec`], never linked to one another.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use std::fmt;
use std::hash::Hash;

use tracing::instrument;

use crate::array_graph;
use crate::builder::HpgConfig;
use crate::error::Result;
use crate::graph::WeightedDigraph;
use crate::graph_index::GraphIndex;
use crate::proximity::{self, Policy};
use crate::symbol::Symbol;

/// A similarity metric with no captured state, used as a per-level
/// [`GraphIndex`] reference metric.
pub type Metric<S> = fn(&WeightedDigraph<S>, &WeightedDigraph<S>) -> f64;

#[cfg(feature = "parallel")]
fn map_parallel<I, F, R>(items: &[I], f: F) -> Vec<R>
where
    I: Sync,
    F: Fn(&I) -> R + Sync,
    R: Send,
{
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_parallel<I, F, R>(items: &[I], f: F) -> Vec<R>
where
    F: Fn(&I) -> R,
{
    items.iter().map(f).collect()
}

/// Builds one 1D HPG level from `data`, windowing it into patches of size
/// `window` (stepped by `stride`), collapsing each patch through a fresh
/// [`GraphIndex`], and building a graph over the resulting symbol
/// sequence. Returns the level graph and its symbol sequence.
fn build_one_1d_level<S>(
    data: &[Symbol<S>],
    window: usize,
    stride: usize,
    theta_lo: f64,
    theta_hi: f64,
    metric: Metric<S>,
) -> Result<(WeightedDigraph<usize>, Vec<usize>)>
where
    S: Clone + Eq + Hash + Ord + Send + Sync,
{
    let mut index = GraphIndex::new(metric, theta_lo, theta_hi, false)?;
    let half = window / 2;
    let len = data.len();

    let positions: Vec<usize> = (0..len).step_by(stride.max(1)).collect();
    let patch_graphs: Vec<WeightedDigraph<S>> = map_parallel(&positions, |&i| {
        let lo = i.saturating_sub(half);
        let hi = (i + half).min(len);
        proximity::build(&data[lo..hi], window, Policy::Asymmetric)
    });

    let symbols: Vec<usize> = patch_graphs.into_iter().map(|patch| index.insert_or_lookup(patch)).collect();
    let wrapped: Vec<Symbol<usize>> = symbols.iter().map(|&s| Symbol::singleton(s)).collect();
    let graph = proximity::build(&wrapped, window, Policy::Asymmetric);

    Ok((graph, symbols))
}

/// Builds one 2D HPG level analogously to [`build_one_1d_level`], over a
/// rectangular matrix of patches collapsed through [`array_graph::build`].
fn build_one_2d_level<S>(
    data: &[Vec<S>],
    window: usize,
    stride: usize,
    theta_lo: f64,
    theta_hi: f64,
    metric: Metric<S>,
) -> Result<(WeightedDigraph<usize>, Vec<Vec<usize>>)>
where
    S: Clone + Eq + Hash + Send + Sync,
{
    let mut index = GraphIndex::new(metric, theta_lo, theta_hi, false)?;
    let height = data.len();
    let width = if height == 0 { 0 } else { data[0].len() };
    let half = window / 2;
    let stride = stride.max(1);

    let rows: Vec<usize> = (0..height).step_by(stride).collect();
    let cols: Vec<usize> = (0..width).step_by(stride).collect();
    let cells: Vec<(usize, usize)> = rows
        .iter()
        .flat_map(|&y| cols.iter().map(move |&x| (y, x)))
        .collect();

    let patch_graphs: Vec<WeightedDigraph<S>> = map_parallel(&cells, |&(y, x)| {
        let y_lo = y.saturating_sub(half);
        let y_hi = (y + half).min(height);
        let x_lo = x.saturating_sub(half);
        let x_hi = (x + half).min(width);
        let patch: Vec<Vec<S>> = data[y_lo..y_hi].iter().map(|row| row[x_lo..x_hi].to_vec()).collect();
        array_graph::build(&patch, window, 1)
    });

    let col_count = cols.len().max(1);
    let mut symbols = vec![vec![0usize; cols.len()]; rows.len()];
    for (idx, patch_graph) in patch_graphs.into_iter().enumerate() {
        let symbol = index.insert_or_lookup(patch_graph);
        symbols[idx / col_count][idx % col_count] = symbol;
    }

    let graph = array_graph::build(&symbols, window, stride);
    Ok((graph, symbols))
}

/// A hierarchical proximity graph built over a 1D sequence of n-grams.
#[derive(Debug)]
pub struct Hpg1D<T> {
    base_graph: WeightedDigraph<T>,
    level_graphs: Vec<WeightedDigraph<usize>>,
    level_data: Vec<Vec<usize>>,
}

impl<T: Clone + Eq + Hash + Ord + Send + Sync> Hpg1D<T> {
    /// Builds an HPG over already-extracted n-grams, as configured by
    /// `config`.
    ///
    /// `config`'s `base_window` is the window used for level 0; level `ℓ`
    /// uses `base_window * ℓ` for both patch extraction and the graph
    /// built over the resulting symbol sequence. `metric0` scores level-1
    /// patch graphs (which still carry the original alphabet `T`);
    /// `metric` scores every later level's patch graphs (already collapsed
    /// to `usize` symbols). `config` is validated here (`levels < 1`,
    /// `base_window < 1`, `stride < 1`, `theta_lo > theta_hi`); there is no
    /// separate raw-parameter validation path.
    #[instrument(skip(ngrams, config, metric0, metric), fields(ngram_count = ngrams.len()))]
    pub fn build(
        ngrams: &[Symbol<T>],
        config: HpgConfig,
        metric0: Metric<T>,
        metric: Metric<usize>,
    ) -> Result<Self> {
        let config = config.build()?;
        let base_window = config.base_window();
        let levels = config.levels();
        let stride = config.stride();
        let theta_lo = config.theta_lo();
        let theta_hi = config.theta_hi();

        let base_graph = proximity::build(ngrams, base_window, Policy::Asymmetric);

        let mut level_graphs = Vec::with_capacity(levels);
        let mut level_data: Vec<Vec<usize>> = Vec::with_capacity(levels);

        let (g1, data1) = build_one_1d_level(ngrams, base_window, stride, theta_lo, theta_hi, metric0)?;
        level_graphs.push(g1);
        level_data.push(data1);

        for level in 2..=levels {
            let window_l = base_window * level;
            let prev_data = level_data.last().expect("level 1 already pushed");
            let prev_symbols: Vec<Symbol<usize>> = prev_data.iter().map(|&s| Symbol::singleton(s)).collect();
            let (g_l, data_l) = build_one_1d_level(&prev_symbols, window_l, stride, theta_lo, theta_hi, metric)?;
            level_graphs.push(g_l);
            level_data.push(data_l);
        }

        Ok(Self {
            base_graph,
            level_graphs,
            level_data,
        })
    }

    /// The level-0 graph, built directly over the input n-grams.
    #[must_use]
    pub fn base_graph(&self) -> &WeightedDigraph<T> {
        &self.base_graph
    }

    /// The level `1..=L` graphs, in order, never cross-linked (spec §9
    /// redesign note on parent/child pointers).
    #[must_use]
    pub fn levels(&self) -> &[WeightedDigraph<usize>] {
        &self.level_graphs
    }

    /// The level `1..=L` symbol sequences, in order.
    #[must_use]
    pub fn level_data(&self) -> &[Vec<usize>] {
        &self.level_data
    }
}

impl<T> fmt::Display for Hpg1D<T> {
    /// `"levels: {L}"`, mirroring the source library's `ArrayGraph.__str__`
    /// family (`"length: {n}, window size: {w}, stride: {s}"`), adapted to
    /// what an HPG actually varies across instances: its level count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "levels: {}", self.level_graphs.len())
    }
}

/// A hierarchical proximity graph built over a 2D matrix of symbols.
#[derive(Debug)]
pub struct Hpg2D<T> {
    base_graph: WeightedDigraph<T>,
    level_graphs: Vec<WeightedDigraph<usize>>,
    level_data: Vec<Vec<Vec<usize>>>,
}

impl<T: Clone + Eq + Hash + Send + Sync> Hpg2D<T> {
    /// Builds a 2D HPG over `matrix`, as configured by `config`. See
    /// [`Hpg1D::build`] for the parameter meanings; here, a cell's
    /// neighbourhood window is square. `config` is validated here; there
    /// is no separate raw-parameter validation path.
    #[instrument(skip(matrix, config, metric0, metric), fields(row_count = matrix.len()))]
    pub fn build(
        matrix: &[Vec<T>],
        config: HpgConfig,
        metric0: Metric<T>,
        metric: Metric<usize>,
    ) -> Result<Self> {
        let config = config.build()?;
        let base_window = config.base_window();
        let levels = config.levels();
        let stride = config.stride();
        let theta_lo = config.theta_lo();
        let theta_hi = config.theta_hi();

        let base_graph = array_graph::build(matrix, base_window, stride);

        let mut level_graphs = Vec::with_capacity(levels);
        let mut level_data: Vec<Vec<Vec<usize>>> = Vec::with_capacity(levels);

        let (g1, data1) = build_one_2d_level(matrix, base_window, stride, theta_lo, theta_hi, metric0)?;
        level_graphs.push(g1);
        level_data.push(data1);

        for level in 2..=levels {
            let window_l = base_window * level;
            let prev_data = level_data.last().expect("level 1 already pushed");
            let (g_l, data_l) = build_one_2d_level(prev_data, window_l, stride, theta_lo, theta_hi, metric)?;
            level_graphs.push(g_l);
            level_data.push(data_l);
        }

        Ok(Self {
            base_graph,
            level_graphs,
            level_data,
        })
    }

    /// The level-0 graph, built directly over the input matrix.
    #[must_use]
    pub fn base_graph(&self) -> &WeightedDigraph<T> {
        &self.base_graph
    }

    /// The level `1..=L` graphs, in order.
    #[must_use]
    pub fn levels(&self) -> &[WeightedDigraph<usize>] {
        &self.level_graphs
    }

    /// The level `1..=L` symbol matrices, in order.
    #[must_use]
    pub fn level_data(&self) -> &[Vec<Vec<usize>>] {
        &self.level_data
    }
}

impl<T> fmt::Display for Hpg2D<T> {
    /// `"levels: {L}"`, see [`Hpg1D`]'s `Display` impl.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "levels: {}", self.level_graphs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{Hpg1D, Hpg2D};
    use crate::builder::HpgConfig;
    use crate::ngram;
    use crate::similarity::nvs;

    fn ngrams(text: &str, n: usize) -> Vec<crate::symbol::Symbol<char>> {
        let data: Vec<char> = text.chars().collect();
        ngram::extract(&data, n, false, &'\0')
    }

    fn config(base_window: usize, levels: usize, stride: usize, theta_lo: f64, theta_hi: f64) -> HpgConfig {
        HpgConfig::new()
            .with_base_window(base_window)
            .with_levels(levels)
            .with_stride(stride)
            .with_merging_margins(theta_lo, theta_hi)
    }

    #[test]
    fn display_reports_level_count() {
        let grams = ngrams("the quick brown fox jumps over the lazy dog", 3);
        let hpg = Hpg1D::build(&grams, config(3, 3, 1, 0.8, 0.9), nvs, nvs).expect("valid config");
        assert_eq!(hpg.to_string(), "levels: 3");
    }

    #[test]
    fn single_level_hpg_produces_one_level_graph() {
        let grams = ngrams("GATTACATTAGGATTACATTAG", 3);
        let hpg = Hpg1D::build(&grams, config(2, 1, 1, 0.8, 0.9), nvs, nvs).expect("valid config");
        assert_eq!(hpg.levels().len(), 1);
        assert_eq!(hpg.level_data().len(), 1);
        assert!(hpg.base_graph().node_count() > 0);
    }

    #[test]
    fn multi_level_hpg_builds_the_requested_level_count() {
        let grams = ngrams("the quick brown fox jumps over the lazy dog", 3);
        let hpg = Hpg1D::build(&grams, config(3, 3, 1, 0.8, 0.9), nvs, nvs).expect("valid config");
        assert_eq!(hpg.levels().len(), 3);
        assert_eq!(hpg.level_data().len(), 3);
    }

    #[test]
    fn rejects_inverted_merging_margins() {
        let grams = ngrams("abcdef", 2);
        let err =
            Hpg1D::build(&grams, config(2, 2, 1, 0.9, 0.1), nvs, nvs).expect_err("must reject theta_lo > theta_hi");
        assert_eq!(err.to_string(), "theta_lo (0.9) must not exceed theta_hi (0.1)");
    }

    #[test]
    fn large_stride_can_collapse_a_level_to_a_near_empty_graph() {
        // Spec edge case: with stride > data length, D_l collapses to a
        // singleton and G_l may have no edges, but construction must not
        // fail.
        let grams = ngrams("ab", 1);
        let hpg = Hpg1D::build(&grams, config(2, 1, 100, 0.8, 0.9), nvs, nvs).expect("valid config");
        assert_eq!(hpg.levels().len(), 1);
    }

    #[test]
    fn hpg2d_builds_requested_levels_over_a_matrix() {
        let matrix: Vec<Vec<char>> = vec![
            "abcd".chars().collect(),
            "efgh".chars().collect(),
            "ijkl".chars().collect(),
            "mnop".chars().collect(),
        ];
        let hpg = Hpg2D::build(&matrix, config(2, 2, 1, 0.8, 0.9), nvs, nvs).expect("valid config");
        assert_eq!(hpg.levels().len(), 2);
        assert!(hpg.base_graph().node_count() > 0);
    }

    #[test]
    fn hpg1d_rejects_zero_levels_and_zero_window() {
        let grams = ngrams("abcdef", 2);
        let zero_levels =
            Hpg1D::build(&grams, config(2, 0, 1, 0.8, 0.9), nvs, nvs).expect_err("levels=0 must fail");
        assert_eq!(zero_levels.to_string(), "number of levels must be at least 1 (got 0)");
        let zero_window =
            Hpg1D::build(&grams, config(0, 1, 1, 0.8, 0.9), nvs, nvs).expect_err("window=0 must fail");
        assert_eq!(zero_window.to_string(), "window size must be at least 1 (got 0)");
    }

    #[test]
    fn hpg2d_rejects_zero_stride() {
        let matrix: Vec<Vec<char>> = vec!["ab".chars().collect(), "cd".chars().collect()];
        let err = Hpg2D::build(&matrix, config(2, 1, 0, 0.8, 0.9), nvs, nvs).expect_err("stride=0 must fail");
        assert_eq!(err.to_string(), "stride must be at least 1 (got 0)");
    }
}
