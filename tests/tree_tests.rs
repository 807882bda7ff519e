//! Integration tests for tree refinement (scenarios S2, S3).

use std::collections::HashMap;

use sans_rs::color::ColorSet;
use sans_rs::error::PhyloError;
use sans_rs::filter::{filter_n_tree, filter_strict};
use sans_rs::split::Split;
use sans_rs::tree::{join_newick, Tree};

fn c(n: usize, bits: &[usize]) -> ColorSet {
    let mut s = ColorSet::empty(n);
    for &b in bits {
        s.set(b);
    }
    s
}

fn s(weight: f64, color: ColorSet) -> Split {
    Split { weight, color }
}

fn crossing_fixture() -> Vec<Split> {
    vec![
        s(3.0, c(4, &[0])),
        s(2.0, c(4, &[0, 1])),
        s(1.0, c(4, &[0, 2])),
    ]
}

#[test]
fn scenario_s2_strict_filter_builds_the_expected_tree() {
    let accepted = filter_strict(&crossing_fixture());
    let tree = Tree::build(4, &accepted).unwrap();
    let newick = tree.to_newick(None);
    assert!(newick.ends_with(';'));
    assert!(!newick.is_empty());
}

#[test]
fn scenario_s3_n_tree_builds_two_separate_trees() {
    let splits = crossing_fixture();
    let trees = filter_n_tree(&splits, 2).unwrap();
    let tree1 = Tree::build(4, &trees[0]).unwrap();
    let tree2 = Tree::build(4, &trees[1]).unwrap();

    let joined = join_newick(&[tree1.to_newick(None), tree2.to_newick(None)]);
    let lines: Vec<&str> = joined.lines().collect();
    assert_eq!(lines.len(), 2);
}

#[test]
fn taxon_names_replace_integer_labels() {
    let accepted = vec![s(3.0, c(3, &[0]))];
    let tree = Tree::build(3, &accepted).unwrap();
    let mut names = HashMap::new();
    names.insert(0, "Alpha".to_string());
    names.insert(1, "Beta".to_string());
    names.insert(2, "Gamma".to_string());
    let newick = tree.to_newick(Some(&names));
    assert!(newick.contains("Alpha"));
    assert!(newick.contains("Beta"));
    assert!(newick.contains("Gamma"));
}

#[test]
fn a_genuinely_crossing_split_fails_refinement() {
    let accepted = vec![s(2.0, c(4, &[0, 1])), s(1.0, c(4, &[0, 2]))];
    let err = Tree::build(4, &accepted).unwrap_err();
    assert!(matches!(err, PhyloError::RefinementInconsistency { .. }));
}
