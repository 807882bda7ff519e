//! Optional taxon name map: color index -> human-readable name (§6).
//!
//! The file is a plain TSV, one `index<TAB>name` pair per line; blank lines
//! and lines starting with `#` are skipped. When no map is supplied, Newick
//! output falls back to printing the bare integer color index.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::PhyloError;

/// Reads a color-index-to-taxon-name map from `path`.
///
/// # Errors
///
/// Returns [`PhyloError::InvalidTaxonMap`] if a line is malformed (missing
/// the tab-separated index, or the index is not a valid `usize`).
pub fn load(path: &Path) -> Result<HashMap<usize, String>, PhyloError> {
    let contents = fs::read_to_string(path).map_err(|e| PhyloError::InvalidTaxonMap {
        details: e.to_string(),
        path: path.to_path_buf(),
    })?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<HashMap<usize, String>, PhyloError> {
    let mut map = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (index, name) = line.split_once('\t').ok_or_else(|| PhyloError::InvalidTaxonMap {
            details: format!("expected '<index>\\t<name>', got '{line}'"),
            path: path.to_path_buf(),
        })?;
        let index: usize = index.trim().parse().map_err(|_| PhyloError::InvalidTaxonMap {
            details: format!("'{index}' is not a valid color index"),
            path: path.to_path_buf(),
        })?;
        map.insert(index, name.trim().to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("taxa.tsv")
    }

    #[test]
    fn parses_simple_map() {
        let map = parse("0\tE. coli\n1\tB. subtilis\n", &p()).unwrap();
        assert_eq!(map.get(&0).unwrap(), "E. coli");
        assert_eq!(map.get(&1).unwrap(), "B. subtilis");
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let map = parse("# comment\n\n0\tfoo\n", &p()).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn rejects_missing_tab() {
        let err = parse("0 foo\n", &p()).unwrap_err();
        assert!(matches!(err, PhyloError::InvalidTaxonMap { .. }));
    }

    #[test]
    fn rejects_non_numeric_index() {
        let err = parse("x\tfoo\n", &p()).unwrap_err();
        assert!(matches!(err, PhyloError::InvalidTaxonMap { .. }));
    }
}
