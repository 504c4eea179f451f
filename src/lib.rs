//! N-gram proximity graphs, weighted graph algebra, and hierarchical
//! proximity graph (HPG) construction.
//!
//! This crate turns sequences (text, or 2D matrices of symbols) into
//! weighted directed graphs that capture co-occurrence of fixed-size
//! substrings within a proximity window, defines algebraic operators over
//! such graphs (union, intersection, inverse-intersection, delta), computes
//! a family of graph-similarity measures, and supports building a
//! hierarchical proximity graph (HPG) that abstracts local neighbourhoods
//! of a graph into symbols of a higher-level graph. A representative-graph
//! [`collector`] incrementally merges documents into a running centroid and
//! scores new documents against it.
//!
//! Out of scope: CLI/script entry points, plotting, persistent storage of
//! graphs, and any pre-tokenization beyond producing a sequence of symbols.
//! All logging is injected via [`tracing`]; the crate never installs a
//! process-wide subscriber.

mod array_graph;
mod builder;
mod collector;
mod error;
mod graph;
mod graph_index;
mod hpg;
mod ngram;
mod operators;
mod proximity;
mod similarity;
mod symbol;

pub use crate::array_graph::build as build_array_graph_2d;
pub use crate::builder::{CollectorConfig, ExtractorConfig, HpgConfig, ProximityConfig, Symmetry};
pub use crate::collector::{Collector, HpgCollector};
pub use crate::error::{GraphError, GraphErrorCode, Result};
pub use crate::graph::WeightedDigraph;
pub use crate::graph_index::{GraphIndex, DEFAULT_THETA_HI, DEFAULT_THETA_LO};
pub use crate::hpg::{Hpg1D, Hpg2D, Metric};
pub use crate::ngram::extract as extract_ngrams;
pub use crate::operators::{delta, intersect, inverse_intersection, ltor_nary, union, union_in_place, OperatorConfig};
pub use crate::proximity::{build, build_asymmetric, build_gauss_norm, build_symmetric, default_sigma, Policy};
pub use crate::similarity::{hpg_similarity, nvs, nvs_report, ss, ss_report, vs, vs_report, SimilarityReport};
pub use crate::symbol::Symbol;
