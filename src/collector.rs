//! Two distinct "how appropriate is this document" policies over a stream
//! of documents (spec C9).
//!
//! [`Collector`] maintains a single running centroid graph, updated via a
//! decaying-learning-factor [`operators::union`] as each document arrives.
//! [`HpgCollector`] instead accumulates every per-document graph and scores
//! appropriateness as the *mean* similarity to each of them — the policy
//! 2D and HPG collectors use instead of a centroid (spec §4.9, last
//! paragraph).

use std::hash::Hash;

use tracing::instrument;

use crate::error::{GraphError, Result};
use crate::graph::WeightedDigraph;
use crate::operators;
use crate::similarity::nvs;

/// Incremental centroid collector.
///
/// `builder` turns a raw document (`&[T]`) into a [`WeightedDigraph`];
/// `metric` scores a candidate document's graph against the running
/// centroid. Use [`Collector::with_nvs`] for the default metric.
pub struct Collector<T, B, M> {
    builder: B,
    metric: M,
    docs_count: u64,
    representative: Option<WeightedDigraph<T>>,
}

impl<T, B, M> Collector<T, B, M>
where
    T: Clone + Eq + Hash,
    B: Fn(&[T]) -> WeightedDigraph<T>,
    M: Fn(&WeightedDigraph<T>, &WeightedDigraph<T>) -> f64,
{
    /// Builds an empty collector with a custom builder and metric.
    pub fn new(builder: B, metric: M) -> Self {
        Self {
            builder,
            metric,
            docs_count: 0,
            representative: None,
        }
    }

    /// Absorbs `doc` into the running centroid.
    ///
    /// The first document becomes the centroid outright. Every later
    /// document is merged in via a weighted union with learning factor
    /// `1 / (docs_count + 1)`, so earlier documents are progressively
    /// outweighed less by each new one (spec §4.9). Rejects an empty `doc`
    /// with [`GraphError::EmptyOperand`]; a built graph can be empty
    /// without the input itself being empty, so only the latter raises.
    #[instrument(skip(self, doc), fields(doc_len = doc.len(), docs_count = self.docs_count))]
    pub fn add(&mut self, doc: &[T]) -> Result<()> {
        if doc.is_empty() {
            return Err(GraphError::EmptyOperand);
        }
        let g_doc = (self.builder)(doc);
        match &mut self.representative {
            None => self.representative = Some(g_doc),
            Some(representative) => {
                let lf = 1.0 / (self.docs_count as f64 + 1.0);
                operators::union_in_place(representative, &g_doc, lf);
            }
        }
        self.docs_count += 1;
        Ok(())
    }

    /// Scores how well `doc` fits the current centroid. Returns `0` before
    /// any document has been added.
    #[must_use]
    pub fn appropriateness_of(&self, doc: &[T]) -> f64 {
        match &self.representative {
            None => 0.0,
            Some(representative) => {
                let g_doc = (self.builder)(doc);
                (self.metric)(&g_doc, representative)
            }
        }
    }

    /// The current centroid graph, if any document has been absorbed yet.
    #[must_use]
    pub fn representative_graph(&self) -> Option<&WeightedDigraph<T>> {
        self.representative.as_ref()
    }

    /// The number of documents absorbed so far.
    #[must_use]
    pub fn docs_count(&self) -> u64 {
        self.docs_count
    }
}

impl<T, B> Collector<T, B, fn(&WeightedDigraph<T>, &WeightedDigraph<T>) -> f64>
where
    T: Clone + Eq + Hash,
    B: Fn(&[T]) -> WeightedDigraph<T>,
{
    /// Builds a collector scoring appropriateness with [`nvs`], the
    /// default metric.
    pub fn with_nvs(builder: B) -> Self {
        Self::new(builder, nvs)
    }
}

#[expect(clippy::type_complexity, reason = "boxed closure + fn-pointer metric is the simplest nameable type for a config-driven constructor")]
impl<T> Collector<T, Box<dyn Fn(&[T]) -> WeightedDigraph<T>>, fn(&WeightedDigraph<T>, &WeightedDigraph<T>) -> f64>
where
    T: Clone + Eq + Hash + Ord + 'static,
{
    /// Builds a collector from a validated [`crate::builder::CollectorConfig`],
    /// scoring appropriateness with [`nvs`]. `pad_value` is only consulted
    /// when the configuration enables extractor padding.
    #[must_use]
    pub fn from_config(config: crate::builder::CollectorConfig, pad_value: T) -> Self {
        Self::with_nvs(Box::new(config.document_builder(pad_value)))
    }
}

/// Accumulate-and-average collector, used by 2D and HPG variants.
///
/// Unlike [`Collector`], no centroid is ever formed: every absorbed
/// document's graph is kept, and appropriateness is the mean of the
/// metric applied between the candidate document and each stored one.
pub struct HpgCollector<T, B, M> {
    builder: B,
    metric: M,
    documents: Vec<WeightedDigraph<T>>,
}

impl<T, B, M> HpgCollector<T, B, M>
where
    T: Clone + Eq + Hash,
    B: Fn(&[T]) -> WeightedDigraph<T>,
    M: Fn(&WeightedDigraph<T>, &WeightedDigraph<T>) -> f64,
{
    /// Builds an empty accumulate-and-average collector.
    pub fn new(builder: B, metric: M) -> Self {
        Self {
            builder,
            metric,
            documents: Vec::new(),
        }
    }

    /// Stores `doc`'s graph for future appropriateness scoring. Rejects an
    /// empty `doc` with [`GraphError::EmptyOperand`].
    pub fn add(&mut self, doc: &[T]) -> Result<()> {
        if doc.is_empty() {
            return Err(GraphError::EmptyOperand);
        }
        self.documents.push((self.builder)(doc));
        Ok(())
    }

    /// Mean of the metric between `doc`'s graph and every stored document.
    /// Returns `0` before any document has been added.
    #[must_use]
    pub fn appropriateness_of(&self, doc: &[T]) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        let g_doc = (self.builder)(doc);
        let sum: f64 = self.documents.iter().map(|stored| (self.metric)(&g_doc, stored)).sum();
        sum / self.documents.len() as f64
    }

    /// The number of documents absorbed so far.
    #[must_use]
    pub fn docs_count(&self) -> usize {
        self.documents.len()
    }
}
