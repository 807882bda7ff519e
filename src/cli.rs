//! Command-line interface definition (§4.7).

use std::path::PathBuf;

use clap::Parser;

use crate::format::SplitListFormat;
use crate::reducer::ReducerKind;

/// Computes a weighted split graph over a set of DNA inputs and distils it
/// into one or more phylogenetic trees in Newick form.
///
/// Each positional file becomes one color, in argument order. Input format
/// (FASTA or FASTQ) is auto-detected per file from its extension.
///
/// # Examples
///
/// ```bash
/// # Strict-compatible tree over three genomes, k=21, top 1000 candidates
/// sans-rs 21 1000 a.fa b.fa c.fa
///
/// # Two trees via the n-tree filter, with taxon names
/// sans-rs 21 1000 a.fa b.fa c.fa d.fa --filter n-tree -n 2 --taxa names.tsv
///
/// # Dump the ranked candidate splits instead of building a tree
/// sans-rs 21 1000 a.fa b.fa --split-list --output splits.tsv
/// ```
#[derive(Parser, Debug)]
#[command(name = "sans-rs")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// K-mer length (1-500)
    #[arg(value_parser = parse_k)]
    pub k: usize,

    /// Split list top-list capacity
    #[arg(value_parser = parse_t)]
    pub t: usize,

    /// Input FASTA/FASTQ files, one per color, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Canonicalise k-mers (min of the k-mer and its reverse complement)
    #[arg(long = "canonical", default_value_t = true, overrides_with = "no_canonical")]
    pub canonical: bool,

    /// Disable canonicalisation
    #[arg(long = "no-canonical")]
    pub no_canonical: bool,

    /// Multiplicative cap on IUPAC ambiguity expansion per window
    #[arg(long = "max-iupac", default_value = "1")]
    pub max_iupac: u32,

    /// Reducer folding (occurrences, total) into a split weight
    #[arg(long = "reducer", value_enum, default_value = "mean")]
    pub reducer: ReducerKind,

    /// Compatibility filter applied to the ranked split list
    #[arg(long = "filter", value_enum, default_value = "strict")]
    pub filter: FilterKind,

    /// Number of trees for the n-tree filter
    #[arg(short = 'n', long = "num-trees", default_value = "1")]
    pub num_trees: usize,

    /// Optional TSV file mapping color index to taxon name
    #[arg(long = "taxa")]
    pub taxa: Option<PathBuf>,

    /// Output path ('-' or omitted for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Dump the ranked candidate splits (pre-filter) instead of building a tree
    #[arg(long = "split-list")]
    pub split_list: bool,

    /// Serialisation format for --split-list
    #[arg(long = "split-list-format", value_enum, default_value = "tsv")]
    pub split_list_format: SplitListFormat,

    /// Suppress the startup banner
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Resolves `--canonical`/`--no-canonical` to the effective boolean.
    #[must_use]
    pub fn canonicalise(&self) -> bool {
        self.canonical && !self.no_canonical
    }
}

/// Compatibility filter selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterKind {
    Strict,
    Weakly,
    NTree,
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s.parse().map_err(|_| format!("'{s}' is not a valid number"))?;
    if k == 0 {
        return Err("k-mer length must be at least 1".to_string());
    }
    if k > crate::kmer::KmerLength::MAX {
        return Err(format!(
            "k-mer length must be at most {}",
            crate::kmer::KmerLength::MAX
        ));
    }
    Ok(k)
}

fn parse_t(s: &str) -> Result<usize, String> {
    let t: usize = s.parse().map_err(|_| format!("'{s}' is not a valid number"))?;
    if t == 0 {
        return Err("split list capacity must be at least 1".to_string());
    }
    Ok(t)
}
