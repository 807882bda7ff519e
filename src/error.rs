//! Error types for the split graph engine.
//!
//! This module provides exhaustive, strongly-typed errors for ingestion,
//! filtering, tree refinement, and the CLI driver.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building and filtering the split graph.
#[derive(Debug, Error)]
pub enum PhyloError {
    /// K-mer length is outside the supported range.
    #[error("invalid k-mer length {k}: must be between {min} and {max}")]
    InvalidKmerLength { k: usize, min: usize, max: usize },

    /// `N` (the number of colors) is zero, or a color index was seen that is
    /// `>= N`.
    #[error("invalid color index {color}: universe has only {n} colors")]
    InvalidColorIndex { color: usize, n: usize },

    /// The top-list capacity `t` was zero.
    #[error("split list capacity must be at least 1")]
    ZeroCapacity,

    /// `filter_n_tree` was called with `n == 0`.
    #[error("n-tree filter requires n >= 1")]
    ZeroTreeCount,

    /// A split that passed [`crate::compat::test_strict`] failed to refine
    /// the tree under construction. This indicates a bug in the filter or
    /// refinement invariant, not a data problem.
    #[error("split {colors} passed strict compatibility but could not refine the tree")]
    RefinementInconsistency { colors: String },

    /// Failed to read a sequence file.
    #[error("failed to read sequence file '{path}': {source}")]
    SequenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to parse a sequence record.
    #[error("failed to parse sequence record in '{path}': {details}")]
    SequenceParse { details: String, path: PathBuf },

    /// Failed to write output.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read a taxon name map.
    #[error("failed to read taxon map '{path}': {details}")]
    InvalidTaxonMap { details: String, path: PathBuf },
}

impl From<std::io::Error> for PhyloError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteError { source }
    }
}

impl From<serde_json::Error> for PhyloError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonError { source }
    }
}
