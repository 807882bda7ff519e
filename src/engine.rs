//! The owning engine object wiring index, weighting, filters, and tree
//! construction together behind the operation names in §6.
//!
//! The original surfaces this as a class of static members; here it is one
//! owned struct built through [`SansEngine::new`], matching the teacher's
//! builder-style `KmerCounter` rather than process-wide statics (§5, §9).

use std::collections::HashMap;

use crate::compat;
use crate::error::PhyloError;
use crate::filter;
use crate::index::Index;
use crate::kmer::KmerLength;
use crate::split::Split;
use crate::tree::{join_newick, Tree};

/// Owns the presence index for one run: fixed `N` colors and k-mer length
/// `k`, accumulating k-mers until [`SansEngine::add_weights`] consumes the
/// index and produces a ranked split list.
pub struct SansEngine {
    index: Index,
}

/// The outcome of a filter call: the accepted splits plus, where the filter
/// produces a tree, its Newick serialisation.
pub struct FilterOutcome {
    pub accepted: Vec<Split>,
    pub newick: Option<String>,
}

impl SansEngine {
    /// `init(t)`: starts a fresh engine over `n` colors and k-mer length `k`.
    /// The top-list capacity `t` is supplied later, at [`Self::add_weights`],
    /// since it governs the split list rather than the index.
    #[must_use]
    pub fn new(n: usize, k: KmerLength) -> Self {
        Self {
            index: Index::new(n, k),
        }
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.index.n()
    }

    #[must_use]
    pub fn k(&self) -> KmerLength {
        self.index.k()
    }

    /// `add_kmers(seq, c, canonicalise, max_iupac)`: indexes one sequence
    /// under color `c`.
    ///
    /// # Errors
    ///
    /// Returns [`PhyloError::InvalidColorIndex`] if `c >= n`.
    pub fn add_kmers(
        &self,
        dna: &[u8],
        color: usize,
        canonicalise: bool,
        max_iupac: u32,
    ) -> Result<(), PhyloError> {
        self.index.add_kmers(dna, color, canonicalise, max_iupac)
    }

    /// `add_weights(reducer, t)`: consumes the index and produces the
    /// top-`t` weight-ordered splits.
    #[must_use]
    pub fn add_weights(self, t: usize, reducer: fn(u32, u32) -> f64) -> Vec<Split> {
        self.index.add_weights(t, reducer).into_sorted_vec()
    }

    /// `filter_strict([map])`: keeps the strictly compatible subset and
    /// builds its tree.
    ///
    /// `n` is the engine's color universe size, not inferred from `splits` —
    /// a run producing zero non-trivial splits (e.g. a single input, or
    /// identical genomes) must still emit the `n`-leaf star tree rather than
    /// a degenerate 0-leaf one.
    ///
    /// # Errors
    ///
    /// Returns [`PhyloError::RefinementInconsistency`] if an accepted split
    /// cannot be folded into the refinement tree — this indicates a bug in
    /// the filter or refinement invariant, not a data problem, since every
    /// split offered here already passed [`compat::test_strict`].
    pub fn filter_strict(
        n: usize,
        splits: &[Split],
        names: Option<&HashMap<usize, String>>,
    ) -> Result<FilterOutcome, PhyloError> {
        let accepted = filter::filter_strict(splits);
        let tree = Tree::build(n, &accepted)?;
        Ok(FilterOutcome {
            accepted,
            newick: Some(tree.to_newick(names)),
        })
    }

    /// `filter_weakly()`: keeps the weakly compatible subset. No Newick is
    /// produced — a weakly compatible split system is not in general a tree
    /// (§9 open question), so this crate does not define a projection for one.
    #[must_use]
    pub fn filter_weakly(splits: &[Split]) -> FilterOutcome {
        FilterOutcome {
            accepted: filter::filter_weakly(splits),
            newick: None,
        }
    }

    /// `filter_n_tree(colors, n, [map])`: partitions into up to `n` strictly
    /// compatible trees, each over the full `colors`-color universe (see
    /// [`Self::filter_strict`] on why this isn't inferred from `splits`).
    ///
    /// # Errors
    ///
    /// Returns [`PhyloError::ZeroTreeCount`] if `n == 0`, or
    /// [`PhyloError::RefinementInconsistency`] if a tree fails to refine.
    pub fn filter_n_tree(
        colors: usize,
        splits: &[Split],
        n: usize,
        names: Option<&HashMap<usize, String>>,
    ) -> Result<Vec<FilterOutcome>, PhyloError> {
        let trees = filter::filter_n_tree(splits, n)?;
        trees
            .into_iter()
            .map(|accepted| {
                let tree = Tree::build(colors, &accepted)?;
                Ok(FilterOutcome {
                    newick: Some(tree.to_newick(names)),
                    accepted,
                })
            })
            .collect()
    }
}

/// Joins Newick strings for an n-tree outcome list, one tree per line,
/// skipping any outcome whose filter produced no tree (there currently is
/// none, but this stays robust if a future filter variant omits one).
#[must_use]
pub fn join_n_tree_newick(outcomes: &[FilterOutcome]) -> String {
    let trees: Vec<String> = outcomes.iter().filter_map(|o| o.newick.clone()).collect();
    join_newick(&trees)
}
