//! Input format detection and split/tree output writers (§4.7, §4.9).
//!
//! [`SequenceFormat`] auto-detects FASTA vs FASTQ for each input file, the
//! way the teacher's reader selection does. [`SplitListFormat`] and the
//! `write_*` functions cover the output side: dumping the ranked candidate
//! splits as TSV or JSON, and writing a Newick tree, mirroring the teacher's
//! `output_counts` writer.

use clap::ValueEnum;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::PhyloError;
use crate::split::Split;

/// Input sequence file format.
///
/// Used to specify the format of input files. When set to `Auto`, the format
/// is detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SequenceFormat {
    /// Auto-detect format from file extension.
    ///
    /// Detection rules:
    /// - `.fq`, `.fastq`, `.fq.gz`, `.fastq.gz` -> FASTQ
    /// - `.fa`, `.fasta`, `.fna`, `.fa.gz`, `.fasta.gz`, `.fna.gz` -> FASTA
    /// - Unknown or stdin -> FASTA (default)
    #[default]
    Auto,
    /// FASTA format (`.fa`, `.fasta`, `.fna`).
    Fasta,
    /// FASTQ format (`.fq`, `.fastq`).
    Fastq,
}

impl SequenceFormat {
    /// Detects the sequence format from a file path's extension.
    ///
    /// Handles gzip-compressed files by stripping the `.gz` extension first.
    ///
    /// # Examples
    ///
    /// ```
    /// use sans_rs::format::SequenceFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(SequenceFormat::from_extension(Path::new("reads.fq")), SequenceFormat::Fastq);
    /// assert_eq!(SequenceFormat::from_extension(Path::new("reads.fastq.gz")), SequenceFormat::Fastq);
    /// assert_eq!(SequenceFormat::from_extension(Path::new("genome.fa")), SequenceFormat::Fasta);
    /// assert_eq!(SequenceFormat::from_extension(Path::new("genome.fasta.gz")), SequenceFormat::Fasta);
    /// ```
    #[must_use]
    pub fn from_extension(path: &Path) -> Self {
        // Get the extension, stripping .gz if present
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .map(|e| e.to_lowercase());

        let effective_ext = match ext.as_deref() {
            Some("gz") => {
                // Strip .gz and get the real extension
                path.file_stem()
                    .and_then(|stem| Path::new(stem).extension())
                    .and_then(OsStr::to_str)
                    .map(|e| e.to_lowercase())
            }
            other => other.map(String::from),
        };

        match effective_ext.as_deref() {
            Some("fq" | "fastq") => Self::Fastq,
            Some("fa" | "fasta" | "fna") => Self::Fasta,
            _ => Self::Fasta, // Default to FASTA for unknown extensions
        }
    }

    /// Resolves `Auto` format to a concrete format based on the file path.
    ///
    /// - If format is already `Fasta` or `Fastq`, returns it unchanged.
    /// - If format is `Auto` and a path is provided, detects from extension.
    /// - If format is `Auto` and no path is provided (stdin), defaults to `Fasta`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sans_rs::format::SequenceFormat;
    /// use std::path::Path;
    ///
    /// // Auto-detection from path
    /// let format = SequenceFormat::Auto.resolve(Some(Path::new("reads.fq")));
    /// assert_eq!(format, SequenceFormat::Fastq);
    ///
    /// // Explicit format is unchanged
    /// let format = SequenceFormat::Fasta.resolve(Some(Path::new("reads.fq")));
    /// assert_eq!(format, SequenceFormat::Fasta);
    ///
    /// // Stdin defaults to FASTA
    /// let format = SequenceFormat::Auto.resolve(None);
    /// assert_eq!(format, SequenceFormat::Fasta);
    /// ```
    #[must_use]
    pub fn resolve(self, path: Option<&Path>) -> Self {
        match self {
            Self::Auto => path.map_or(Self::Fasta, Self::from_extension),
            other => other,
        }
    }

    /// Returns `true` if this format is FASTQ.
    #[must_use]
    pub fn is_fastq(self) -> bool {
        matches!(self, Self::Fastq)
    }

    /// Returns `true` if this format is FASTA.
    #[must_use]
    pub fn is_fasta(self) -> bool {
        matches!(self, Self::Fasta)
    }
}

impl std::fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fasta => write!(f, "fasta"),
            Self::Fastq => write!(f, "fastq"),
        }
    }
}

/// Serialisation format for a `--split-list` dump (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SplitListFormat {
    /// `weight\tcolor_bits\tside_a_count\tside_b_count` per line.
    #[default]
    Tsv,
    /// A JSON array of the same fields.
    Json,
}

#[derive(Serialize)]
struct SplitRecord {
    weight: f64,
    color_bits: String,
    side_a_count: u32,
    side_b_count: u32,
}

impl From<&Split> for SplitRecord {
    fn from(split: &Split) -> Self {
        let side_a_count = split.color.popcount();
        let side_b_count = split.color.universe() as u32 - side_a_count;
        Self {
            weight: split.weight,
            color_bits: split.color.to_string(),
            side_a_count,
            side_b_count,
        }
    }
}

/// Writes `splits` to `writer` in the requested [`SplitListFormat`] (§4.9).
///
/// # Errors
///
/// Returns [`PhyloError::WriteError`] on an I/O failure, or
/// [`PhyloError::JsonError`] if JSON serialisation fails.
pub fn write_split_list(
    writer: &mut impl Write,
    splits: &[Split],
    format: SplitListFormat,
) -> Result<(), PhyloError> {
    let records: Vec<SplitRecord> = splits.iter().map(SplitRecord::from).collect();
    match format {
        SplitListFormat::Tsv => {
            for r in &records {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    r.weight, r.color_bits, r.side_a_count, r.side_b_count
                )?;
            }
        }
        SplitListFormat::Json => {
            let json = serde_json::to_string_pretty(&records)?;
            writeln!(writer, "{json}")?;
        }
    }
    Ok(())
}

/// Writes a Newick string to `writer`, per §4.6.
///
/// # Errors
///
/// Returns [`PhyloError::WriteError`] on an I/O failure.
pub fn write_newick(writer: &mut impl Write, newick: &str) -> Result<(), PhyloError> {
    writeln!(writer, "{newick}")?;
    Ok(())
}
