//! Builds a [`WeightedDigraph`] from n-grams using a sliding proximity
//! window (spec C3): asymmetric, symmetric, and gaussian-normalized
//! variants.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::graph::WeightedDigraph;
use crate::symbol::Symbol;

/// Returns the default gaussian standard deviation for a given window,
/// `sigma = D_win / 2`, per spec §4.3 (pinning the previously undocumented
/// policy, spec §9 open question 5).
#[must_use]
pub fn default_sigma(d_win: usize) -> f64 {
    let d_win = d_win as f64;
    d_win / 2.0
}

fn gaussian_contribution(distance: usize, sigma: f64) -> f64 {
    let d = distance as f64;
    let numerator = -((d - 1.0).powi(2));
    let denominator = 2.0 * sigma * sigma;
    (numerator / denominator).exp()
}

/// Builds the asymmetric proximity graph: `t_i` connects to each of the
/// preceding `min(i, D_win + 1)` neighbours via directed edges `(t_j, t_i)`,
/// incrementing the edge weight by 1 per co-occurrence.
///
/// The `+ 1` matches the reference implementation's sliding window, whose
/// ramp-up phase grows the window to `D_win + 1` entries before the steady
/// state pops the oldest on every push; a window literally capped at
/// `D_win` under-connects relative to that behavior and fails to reproduce
/// the worked example in spec §8's S2 scenario (see DESIGN.md).
pub fn build_asymmetric<T: Clone + Eq + Hash>(
    ngrams: &[Symbol<T>],
    d_win: usize,
) -> WeightedDigraph<T> {
    let mut graph = WeightedDigraph::new();
    let capacity = d_win + 1;
    let mut window: VecDeque<Symbol<T>> = VecDeque::with_capacity(capacity);

    for gram in ngrams {
        for earlier in &window {
            graph.increment_edge(earlier.clone(), gram.clone(), 1.0);
        }
        window.push_back(gram.clone());
        if window.len() > capacity {
            window.pop_front();
        }
    }

    graph
}

/// Builds the symmetric proximity graph: `t_i` connects to every neighbour
/// in `[i - D_win, i + D_win]` excluding itself, with the stored directed
/// edge canonically oriented from the lexicographically smaller endpoint
/// to the larger one to avoid double-counting (spec §4.3).
pub fn build_symmetric<T: Clone + Eq + Hash + Ord>(
    ngrams: &[Symbol<T>],
    d_win: usize,
) -> WeightedDigraph<T> {
    let mut graph = WeightedDigraph::new();
    let len = ngrams.len();

    for i in 0..len {
        let first = i.saturating_sub(d_win);
        let last = (i + d_win + 1).min(len);
        for j in first..last {
            if j == i {
                continue;
            }
            let (u, v) = canonical_pair(&ngrams[i], &ngrams[j]);
            graph.increment_edge(u, v, 1.0);
        }
    }

    graph
}

/// Builds the gaussian-normalized proximity graph: same connectivity as
/// [`build_symmetric`], but each co-occurrence at positional distance `d`
/// contributes `exp(-(d-1)^2 / (2*sigma^2))` instead of a flat `1`.
pub fn build_gauss_norm<T: Clone + Eq + Hash + Ord>(
    ngrams: &[Symbol<T>],
    d_win: usize,
    sigma: f64,
) -> WeightedDigraph<T> {
    let mut graph = WeightedDigraph::new();
    let len = ngrams.len();

    for i in 0..len {
        let first = i.saturating_sub(d_win);
        let last = (i + d_win + 1).min(len);
        for j in first..last {
            if j == i {
                continue;
            }
            let distance = i.abs_diff(j);
            let contribution = gaussian_contribution(distance, sigma);
            let (u, v) = canonical_pair(&ngrams[i], &ngrams[j]);
            graph.increment_edge(u, v, contribution);
        }
    }

    graph
}

/// Selects which of the three connectivity/weighting rules a call site
/// wants, so higher-level builders ([`crate::hpg`]) can stay generic over
/// the choice instead of hard-coding one variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Policy {
    /// See [`build_asymmetric`].
    Asymmetric,
    /// See [`build_symmetric`].
    Symmetric,
    /// See [`build_gauss_norm`]. Carries its own `sigma`, since a sensible
    /// default depends on the window size in effect at the call site.
    GaussNorm {
        /// Standard deviation of the gaussian falloff.
        sigma: f64,
    },
}

/// Dispatches to the variant selected by `policy`.
pub fn build<T: Clone + Eq + Hash + Ord>(ngrams: &[Symbol<T>], d_win: usize, policy: Policy) -> WeightedDigraph<T> {
    match policy {
        Policy::Asymmetric => build_asymmetric(ngrams, d_win),
        Policy::Symmetric => build_symmetric(ngrams, d_win),
        Policy::GaussNorm { sigma } => build_gauss_norm(ngrams, d_win, sigma),
    }
}

fn canonical_pair<T: Clone + Ord>(a: &Symbol<T>, b: &Symbol<T>) -> (Symbol<T>, Symbol<T>) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
