//! Mirrors `original_source/FSMlibTest/PrefixSetTests.cpp`.

use fsmlib::prefix_set::PrefixSet;

#[test]
fn a_fresh_set_is_empty() {
    let set = PrefixSet::new();
    assert!(set.is_empty());
    assert_eq!(set.contains(&[0, 1]), 0);
}

#[test]
fn inserting_a_sequence_twice_reports_already_present_on_the_second_call() {
    let mut set = PrefixSet::new();
    assert!(set.insert(&[0, 1, 0]));
    assert!(!set.insert(&[0, 1, 0]));
}

#[test]
fn contains_reports_the_longest_stored_prefix() {
    let mut set = PrefixSet::new();
    set.insert(&[0, 1]);
    assert_eq!(set.contains(&[0, 1, 0, 1]), 2);
    assert_eq!(set.contains(&[0, 1]), PrefixSet::ALL);
    assert_eq!(set.contains(&[1, 0]), 0);
}

#[test]
fn maximal_sequences_excludes_sequences_that_are_prefixes_of_others() {
    let mut set = PrefixSet::new();
    set.insert(&[0]);
    set.insert(&[0, 1]);
    let maximal = set.maximal_sequences();
    assert!(maximal.contains(&vec![0, 1]));
    assert!(!maximal.contains(&vec![0]));
}

#[test]
fn pop_maximal_drains_every_leaf_exactly_once() {
    let mut set = PrefixSet::new();
    set.insert(&[0]);
    set.insert(&[1]);
    set.insert(&[0, 1]);
    let mut popped = Vec::new();
    while let Some(seq) = set.pop_maximal() {
        popped.push(seq);
    }
    assert!(set.is_empty());
    assert_eq!(popped.len(), 2);
    assert!(popped.contains(&vec![0, 1]));
    assert!(popped.contains(&vec![1]));
}

#[test]
fn pop_maximal_with_prefix_only_drains_matching_branches() {
    let mut set = PrefixSet::new();
    set.insert(&[0, 0]);
    set.insert(&[1, 1]);
    let popped = set.pop_maximal_with_prefix(&[0]);
    assert_eq!(popped, Some(vec![0, 0]));
    assert_eq!(set.contains(&[1, 1]), PrefixSet::ALL);
    assert_eq!(set.pop_maximal_with_prefix(&[0]), None);
}
