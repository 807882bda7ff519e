//! Sequence readers for one input file's worth of DNA records (§4.7).
//!
//! One color corresponds to one file; this module turns that file's records
//! (FASTA or FASTQ, auto-detected via [`crate::format::SequenceFormat`]) into
//! a sequence of owned byte strings fed straight into
//! [`crate::engine::SansEngine::add_kmers`]. Records are read and collected
//! in parallel with `rayon::par_bridge`, the same idiom the teacher's
//! `RustBio` reader uses.

use std::error::Error;
use std::fmt::Debug;
use std::path::Path;
use std::vec::IntoIter;

use bio::io::{fasta, fastq};
use bytes::Bytes;
use rayon::prelude::{ParallelBridge, ParallelIterator};

use crate::error::PhyloError;
use crate::format::SequenceFormat;

pub(crate) trait SequenceReader {
    fn sequence_reader<P: AsRef<Path> + Debug>(
        path: P,
    ) -> Result<IntoIter<Bytes>, Box<dyn Error>>;
}

pub(crate) struct RustBioFasta;

impl SequenceReader for RustBioFasta {
    fn sequence_reader<P: AsRef<Path> + Debug>(
        path: P,
    ) -> Result<IntoIter<Bytes>, Box<dyn Error>> {
        Ok(fasta::Reader::from_file(path)?
            .records()
            .par_bridge()
            .map(|read| read.expect("error reading fasta record"))
            .map(|record| Bytes::copy_from_slice(record.seq()))
            .collect::<Vec<Bytes>>()
            .into_iter())
    }
}

pub(crate) struct RustBioFastq;

impl SequenceReader for RustBioFastq {
    fn sequence_reader<P: AsRef<Path> + Debug>(
        path: P,
    ) -> Result<IntoIter<Bytes>, Box<dyn Error>> {
        Ok(fastq::Reader::from_file(path)?
            .records()
            .par_bridge()
            .map(|read| read.expect("error reading fastq record"))
            .map(|record| Bytes::copy_from_slice(record.seq()))
            .collect::<Vec<Bytes>>()
            .into_iter())
    }
}

/// Reads every sequence out of `path`, dispatching to the FASTA or FASTQ
/// reader according to `format`.
///
/// # Errors
///
/// Returns [`PhyloError::SequenceRead`] if the file cannot be opened or
/// parsed.
pub fn read_sequences(path: &Path, format: SequenceFormat) -> Result<Vec<Bytes>, PhyloError> {
    let result = if format.is_fastq() {
        RustBioFastq::sequence_reader(path)
    } else {
        RustBioFasta::sequence_reader(path)
    };
    result
        .map(Iterator::collect)
        .map_err(|source| PhyloError::SequenceRead {
            source: std::io::Error::other(source.to_string()),
            path: path.to_path_buf(),
        })
}
