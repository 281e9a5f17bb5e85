//! Tests for feature-path comparison

use akin::domain::codec;
use akin::domain::error::DomainError;
use akin::domain::{DecisionTree, FeatureClause};
use akin::util::testing;
use rstest::{fixture, rstest};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const ANIMALS_BASE: &str = "\
?Is it alive??
  ?Is it man-made??
    'Cloud'
    'Brick'
  ?Does it bark??
    'Cat'
    'Dog'
";

#[fixture]
fn animals() -> DecisionTree {
    codec::parse(ANIMALS_BASE).unwrap()
}

fn clause(feature: &str, affirmed: bool) -> FeatureClause {
    FeatureClause {
        feature: feature.to_string(),
        affirmed,
    }
}

#[rstest]
fn given_siblings_when_comparing_then_shared_prefix_is_collected(animals: DecisionTree) {
    let cat = animals.find_path("Cat").unwrap();
    let dog = animals.find_path("Dog").unwrap();

    let report = animals.compare(&cat, &dog).unwrap();

    assert_eq!(report.shared, vec![clause("Is it alive?", true)]);
    assert_eq!(report.first_only, vec![clause("Does it bark?", false)]);
    assert_eq!(report.second_only, vec![clause("Does it bark?", true)]);
}

#[rstest]
fn given_paths_diverging_below_root_when_comparing_then_nothing_is_shared(
    animals: DecisionTree,
) {
    let brick = animals.find_path("Brick").unwrap();
    let dog = animals.find_path("Dog").unwrap();

    let report = animals.compare(&brick, &dog).unwrap();

    // The root feature is answered differently, so the whole paths are
    // distinguishing, the root clause included
    assert!(report.shared.is_empty());
    assert_eq!(
        report.first_only,
        vec![clause("Is it alive?", false), clause("Is it man-made?", true)]
    );
    assert_eq!(
        report.second_only,
        vec![clause("Is it alive?", true), clause("Does it bark?", true)]
    );
}

#[test]
fn given_equal_valued_nodes_in_both_subtrees_when_comparing_then_still_nothing_shared() {
    // The divergence check is deliberately shallow: a feature with the same
    // text on both sides of the root does not count as a shared discriminator
    let tree = codec::parse(
        "?Is it alive?? ?Is it big?? 'Pebble' 'Mountain' ?Is it big?? 'Mouse' 'Elephant'",
    )
    .unwrap();
    let pebble = tree.find_path("Pebble").unwrap();
    let mouse = tree.find_path("Mouse").unwrap();

    let report = tree.compare(&pebble, &mouse).unwrap();

    assert!(report.shared.is_empty());
    assert_eq!(report.first_only.len(), 2);
    assert_eq!(report.second_only.len(), 2);
}

#[rstest]
fn given_same_character_twice_when_comparing_then_everything_is_shared(animals: DecisionTree) {
    let cat = animals.find_path("Cat").unwrap();

    let report = animals.compare(&cat, &cat).unwrap();

    assert_eq!(
        report.shared,
        vec![clause("Is it alive?", true), clause("Does it bark?", false)]
    );
    assert!(report.first_only.is_empty());
    assert!(report.second_only.is_empty());
}

#[test]
fn given_root_leaf_paths_when_comparing_then_report_is_empty() {
    let tree = codec::parse("'Cat'").unwrap();
    let cat = tree.find_path("Cat").unwrap();

    let report = tree.compare(&cat, &cat).unwrap();

    assert!(report.shared.is_empty());
    assert!(report.first_only.is_empty());
    assert!(report.second_only.is_empty());
}

#[rstest]
fn given_non_adjacent_indices_when_comparing_then_reports_corrupt_path(animals: DecisionTree) {
    let root = animals.arena.root().unwrap();
    let fake = vec![root, root];

    let err = animals.compare(&fake, &fake).unwrap_err();

    assert!(matches!(err, DomainError::CorruptPath));
}

#[rstest]
fn given_found_path_when_listing_clauses_then_orientation_follows_branches(
    animals: DecisionTree,
) {
    let cat = animals.find_path("Cat").unwrap();

    let clauses = animals.clauses(&cat).unwrap();

    assert_eq!(
        clauses,
        vec![clause("Is it alive?", true), clause("Does it bark?", false)]
    );
}

#[test]
fn given_negated_clause_when_rendering_then_prefixes_not() {
    assert_eq!(clause("Does it bark?", false).to_string(), "not Does it bark?");
    assert_eq!(clause("Does it bark?", true).to_string(), "Does it bark?");
}
