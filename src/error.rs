//! Error types for the n-gram graph engine.
//!
//! Defines the error enum exposed by the public builders and a convenient
//! result alias. Per spec §7, builders raise at construction time; metrics
//! and operators never raise on ordinary (including empty) data.

use std::fmt;

use thiserror::Error;

/// Stable codes describing [`GraphError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GraphErrorCode {
    /// The n-gram rank was less than 1.
    InvalidRank,
    /// A proximity/array window size was less than 1.
    InvalidWindow,
    /// A 2D stride was less than 1.
    InvalidStride,
    /// The requested number of HPG levels was less than 1.
    InvalidLevels,
    /// `theta_lo > theta_hi` for a `GraphIndex`/HPG merging margin pair.
    InvalidMergingMargins,
    /// A metric or operator was applied to a null/missing operand.
    EmptyOperand,
}

impl GraphErrorCode {
    /// Returns the stable, machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRank => "GRAPH_INVALID_RANK",
            Self::InvalidWindow => "GRAPH_INVALID_WINDOW",
            Self::InvalidStride => "GRAPH_INVALID_STRIDE",
            Self::InvalidLevels => "GRAPH_INVALID_LEVELS",
            Self::InvalidMergingMargins => "GRAPH_INVALID_MERGING_MARGINS",
            Self::EmptyOperand => "GRAPH_EMPTY_OPERAND",
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when constructing builders or running operations
/// that require a non-null operand.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The n-gram rank `n` must be at least 1.
    #[error("n-gram rank must be at least 1 (got {got})")]
    InvalidRank {
        /// The rejected rank.
        got: usize,
    },
    /// A proximity or array window size must be at least 1.
    #[error("window size must be at least 1 (got {got})")]
    InvalidWindow {
        /// The rejected window size.
        got: usize,
    },
    /// A 2D stride must be at least 1.
    #[error("stride must be at least 1 (got {got})")]
    InvalidStride {
        /// The rejected stride.
        got: usize,
    },
    /// An HPG level count must be at least 1.
    #[error("number of levels must be at least 1 (got {got})")]
    InvalidLevels {
        /// The rejected level count.
        got: usize,
    },
    /// `theta_lo` must not exceed `theta_hi`.
    #[error("theta_lo ({lo}) must not exceed theta_hi ({hi})")]
    InvalidMergingMargins {
        /// The rejected lower threshold.
        lo: f64,
        /// The rejected upper threshold.
        hi: f64,
    },
    /// A metric or operator received a null/missing operand where a graph
    /// was required.
    #[error("operation requires a non-null operand")]
    EmptyOperand,
}

impl GraphError {
    /// Retrieves the stable [`GraphErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::InvalidRank { .. } => GraphErrorCode::InvalidRank,
            Self::InvalidWindow { .. } => GraphErrorCode::InvalidWindow,
            Self::InvalidStride { .. } => GraphErrorCode::InvalidStride,
            Self::InvalidLevels { .. } => GraphErrorCode::InvalidLevels,
            Self::InvalidMergingMargins { .. } => GraphErrorCode::InvalidMergingMargins,
            Self::EmptyOperand => GraphErrorCode::EmptyOperand,
        }
    }
}

/// Convenient alias for results returned by the public API.
pub type Result<T> = core::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::{GraphError, GraphErrorCode};

    #[test]
    fn code_round_trips_through_display() {
        let err = GraphError::InvalidRank { got: 0 };
        assert_eq!(err.code(), GraphErrorCode::InvalidRank);
        assert_eq!(err.code().as_str(), "GRAPH_INVALID_RANK");
        assert_eq!(err.code().to_string(), "GRAPH_INVALID_RANK");
    }

    #[test]
    fn merging_margins_error_reports_both_bounds() {
        let err = GraphError::InvalidMergingMargins { lo: 0.9, hi: 0.8 };
        assert_eq!(err.to_string(), "theta_lo (0.9) must not exceed theta_hi (0.8)");
    }
}
