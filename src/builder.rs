//! Validated configuration builders for extractors, proximity graphs, the
//! collector, and HPG construction.
//!
//! Every builder here follows the same shape: fluent `with_*` setters that
//! cannot fail, and a terminal `build()` that performs the one-time
//! validation spec §7 requires (`n < 1`, `D_win < 1`, `window < 1`,
//! `stride < 1`, `levels < 1`, `theta_lo > theta_hi`) and returns a
//! [`GraphError`] rather than panicking.

use std::hash::Hash;

use crate::error::{GraphError, Result};
use crate::graph::WeightedDigraph;
use crate::ngram;
use crate::proximity::{self, default_sigma, Policy};
use crate::symbol::Symbol;

/// Configures n-gram extraction (spec C2): the rank `n` and whether the
/// input is right-padded before extraction.
#[derive(Debug, Clone, Copy)]
pub struct ExtractorConfig {
    n: usize,
    pad: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { n: 3, pad: false }
    }
}

impl ExtractorConfig {
    /// Creates a builder populated with default parameters (`n = 3`, no
    /// padding).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the n-gram rank.
    ///
    /// # Examples
    /// ```
    /// use ngram_graph::ExtractorConfig;
    ///
    /// let config = ExtractorConfig::new().with_rank(4).build().expect("rank 4 is valid");
    /// assert_eq!(config.n(), 4);
    /// ```
    #[must_use]
    pub const fn with_rank(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Enables right-padding with `n - 1` pad symbols before extraction.
    #[must_use]
    pub const fn with_padding(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    /// Validates the configuration, rejecting `n < 1`.
    pub fn build(self) -> Result<Self> {
        if self.n < 1 {
            return Err(GraphError::InvalidRank { got: self.n });
        }
        Ok(self)
    }

    /// The configured n-gram rank.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Whether extraction pads the input before windowing.
    #[must_use]
    pub const fn pad(&self) -> bool {
        self.pad
    }

    /// Extracts n-grams from `data` using this configuration's rank and
    /// padding settings. `pad_value` is only consulted when padding is
    /// enabled.
    ///
    /// # Examples
    /// ```
    /// use ngram_graph::ExtractorConfig;
    ///
    /// let config = ExtractorConfig::new().with_rank(2).build().expect("rank 2 is valid");
    /// let grams: Vec<_> = config.extract(&['a', 'b', 'c'], &'\0');
    /// assert_eq!(grams.len(), 2);
    /// ```
    #[must_use]
    pub fn extract<T: Clone>(&self, data: &[T], pad_value: &T) -> Vec<Symbol<T>> {
        ngram::extract(data, self.n, self.pad, pad_value)
    }
}

/// Configures a proximity graph builder (spec C3): the window, the
/// connectivity/weighting policy, and (for the gaussian variant) an
/// explicit override of `sigma`.
#[derive(Debug, Clone, Copy)]
pub struct ProximityConfig {
    d_win: usize,
    symmetry: Symmetry,
    sigma_override: Option<f64>,
}

/// Which connectivity/weighting rule a [`ProximityConfig`] selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// See [`crate::build_asymmetric`].
    Asymmetric,
    /// See [`crate::build_symmetric`].
    Symmetric,
    /// See [`crate::build_gauss_norm`].
    Gauss,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            d_win: 2,
            symmetry: Symmetry::Asymmetric,
            sigma_override: None,
        }
    }
}

impl ProximityConfig {
    /// Creates a builder populated with default parameters (`D_win = 2`,
    /// asymmetric connectivity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the proximity window `D_win`.
    #[must_use]
    pub const fn with_window(mut self, d_win: usize) -> Self {
        self.d_win = d_win;
        self
    }

    /// Selects the connectivity/weighting policy.
    #[must_use]
    pub const fn with_symmetry(mut self, symmetry: Symmetry) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Overrides the gaussian `sigma`; ignored unless `symmetry` is
    /// [`Symmetry::Gauss`]. Without an override, `sigma = D_win / 2`
    /// (spec §4.3, §9 open question 5).
    #[must_use]
    pub const fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma_override = Some(sigma);
        self
    }

    /// Validates the configuration, rejecting `D_win < 1`.
    ///
    /// # Examples
    /// ```
    /// use ngram_graph::{ProximityConfig, Symmetry};
    ///
    /// let config = ProximityConfig::new()
    ///     .with_window(3)
    ///     .with_symmetry(Symmetry::Symmetric)
    ///     .build()
    ///     .expect("window 3 is valid");
    /// assert_eq!(config.d_win(), 3);
    /// ```
    pub fn build(self) -> Result<Self> {
        if self.d_win < 1 {
            return Err(GraphError::InvalidWindow { got: self.d_win });
        }
        Ok(self)
    }

    /// The configured proximity window.
    #[must_use]
    pub const fn d_win(&self) -> usize {
        self.d_win
    }

    /// The configured connectivity/weighting policy.
    #[must_use]
    pub const fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Resolves the effective [`Policy`] for this configuration, applying
    /// the default `sigma = D_win / 2` when the gaussian variant has no
    /// explicit override.
    #[must_use]
    pub fn resolve_policy(&self) -> Policy {
        match self.symmetry {
            Symmetry::Asymmetric => Policy::Asymmetric,
            Symmetry::Symmetric => Policy::Symmetric,
            Symmetry::Gauss => Policy::GaussNorm {
                sigma: self.sigma_override.unwrap_or_else(|| default_sigma(self.d_win)),
            },
        }
    }

    /// Builds a proximity graph over `ngrams` using this configuration's
    /// window and connectivity/weighting policy.
    ///
    /// # Examples
    /// ```
    /// use ngram_graph::{extract_ngrams, ProximityConfig};
    ///
    /// let grams = extract_ngrams(&['a', 'b', 'c', 'd'], 2, false, &'\0');
    /// let config = ProximityConfig::new().with_window(1).build().expect("window 1 is valid");
    /// let graph = config.build_graph(&grams);
    /// assert!(graph.node_count() > 0);
    /// ```
    #[must_use]
    pub fn build_graph<T: Clone + Eq + Hash + Ord>(&self, ngrams: &[Symbol<T>]) -> WeightedDigraph<T> {
        proximity::build(ngrams, self.d_win, self.resolve_policy())
    }
}

/// Configures an incremental [`crate::collector::Collector`] (spec C9): the
/// n-gram rank and proximity window its internal builder uses.
#[derive(Debug, Clone, Copy)]
pub struct CollectorConfig {
    extractor: ExtractorConfig,
    proximity: ProximityConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            proximity: ProximityConfig::default(),
        }
    }
}

impl CollectorConfig {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the n-gram rank used to build each document's graph.
    #[must_use]
    pub const fn with_rank(mut self, n: usize) -> Self {
        self.extractor = self.extractor.with_rank(n);
        self
    }

    /// Sets the proximity window used to build each document's graph.
    #[must_use]
    pub const fn with_window(mut self, d_win: usize) -> Self {
        self.proximity = self.proximity.with_window(d_win);
        self
    }

    /// Selects the connectivity/weighting policy used to build each
    /// document's graph.
    #[must_use]
    pub const fn with_symmetry(mut self, symmetry: Symmetry) -> Self {
        self.proximity = self.proximity.with_symmetry(symmetry);
        self
    }

    /// Validates the configuration, rejecting `n < 1` or `D_win < 1`.
    pub fn build(self) -> Result<Self> {
        self.extractor.build()?;
        self.proximity.build()?;
        Ok(self)
    }

    /// The configured n-gram rank.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.extractor.n()
    }

    /// The configured proximity window.
    #[must_use]
    pub const fn d_win(&self) -> usize {
        self.proximity.d_win()
    }

    /// Resolves the effective connectivity/weighting [`Policy`].
    #[must_use]
    pub fn resolve_policy(&self) -> Policy {
        self.proximity.resolve_policy()
    }

    /// Returns a document-graph builder closure driven by this
    /// configuration: n-gram extraction followed by a proximity graph
    /// build, ready to hand to [`crate::collector::Collector::new`] or
    /// [`crate::collector::Collector::with_nvs`]. `pad_value` is only
    /// consulted when extraction padding is enabled.
    #[must_use]
    pub fn document_builder<T>(self, pad_value: T) -> impl Fn(&[T]) -> WeightedDigraph<T>
    where
        T: Clone + Eq + Hash + Ord,
    {
        move |doc: &[T]| {
            let grams = self.extractor.extract(doc, &pad_value);
            self.proximity.build_graph(&grams)
        }
    }
}

/// Configures a hierarchical proximity graph build (spec C7): level count,
/// base window, stride, and the `GraphIndex` merging margins shared by
/// every level.
#[derive(Debug, Clone, Copy)]
pub struct HpgConfig {
    levels: usize,
    base_window: usize,
    stride: usize,
    theta_lo: f64,
    theta_hi: f64,
}

impl Default for HpgConfig {
    fn default() -> Self {
        Self {
            levels: 1,
            base_window: 2,
            stride: 1,
            theta_lo: crate::graph_index::DEFAULT_THETA_LO,
            theta_hi: crate::graph_index::DEFAULT_THETA_HI,
        }
    }
}

impl HpgConfig {
    /// Creates a builder populated with default parameters (one level,
    /// base window 2, stride 1, and default merging margins `0.8`/`0.9`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of levels above level 0 to build.
    #[must_use]
    pub const fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the base window size; level `ℓ` uses `base_window * ℓ`.
    #[must_use]
    pub const fn with_base_window(mut self, base_window: usize) -> Self {
        self.base_window = base_window;
        self
    }

    /// Sets the stride used when walking each level's data.
    #[must_use]
    pub const fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Sets the `GraphIndex` merging margins shared by every level.
    #[must_use]
    pub const fn with_merging_margins(mut self, theta_lo: f64, theta_hi: f64) -> Self {
        self.theta_lo = theta_lo;
        self.theta_hi = theta_hi;
        self
    }

    /// Validates the configuration: `levels < 1`, `base_window < 1`,
    /// `stride < 1`, and `theta_lo > theta_hi` are all rejected.
    ///
    /// # Examples
    /// ```
    /// use ngram_graph::HpgConfig;
    ///
    /// let config = HpgConfig::new().with_levels(3).build().expect("defaults are valid");
    /// assert_eq!(config.levels(), 3);
    /// ```
    pub fn build(self) -> Result<Self> {
        if self.levels < 1 {
            return Err(GraphError::InvalidLevels { got: self.levels });
        }
        if self.base_window < 1 {
            return Err(GraphError::InvalidWindow { got: self.base_window });
        }
        if self.stride < 1 {
            return Err(GraphError::InvalidStride { got: self.stride });
        }
        if self.theta_lo > self.theta_hi {
            return Err(GraphError::InvalidMergingMargins {
                lo: self.theta_lo,
                hi: self.theta_hi,
            });
        }
        Ok(self)
    }

    /// The configured number of levels above level 0.
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.levels
    }

    /// The configured base window.
    #[must_use]
    pub const fn base_window(&self) -> usize {
        self.base_window
    }

    /// The configured stride.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The configured lower merging margin.
    #[must_use]
    pub const fn theta_lo(&self) -> f64 {
        self.theta_lo
    }

    /// The configured upper merging margin.
    #[must_use]
    pub const fn theta_hi(&self) -> f64 {
        self.theta_hi
    }
}
