// Unit tests for Date Matcher

use date_matcher::core::{
    capability::{validate_contract, Compatibility, CompatibilityTable},
    constraints::ConstraintBuilder,
    filters::{is_pairable, preference_score, ParticipantCompatibility},
    model::Relation,
    objective::{pair_score, ObjectiveBuilder, ObjectiveWeights},
    pairs::{CandidatePair, CandidatePairSpace},
    similarity::{cosine_similarity, round_to},
    variables::DecisionVariableStore,
    MatchError,
};
use date_matcher::models::{Participant, WILDCARD_DAY};
use date_matcher::services::render_lp;
use date_matcher::Matchmaker;

fn create_test_participant(name: &str, gender: &str, seeking: &[&str], day: &str, answers: Vec<f64>) -> Participant {
    Participant {
        name: name.to_string(),
        gender: gender.to_string(),
        seeking: seeking.iter().map(|s| s.to_string()).collect(),
        day_choice: day.to_string(),
        answers,
        excluded: vec![],
    }
}

#[test]
fn test_cosine_similarity_identical() {
    let similarity = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
    assert!((similarity - 1.0).abs() < 1e-9);
}

#[test]
fn test_cosine_similarity_orthogonal() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
}

#[test]
fn test_cosine_similarity_missing_answers() {
    assert_eq!(cosine_similarity(&[], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(0.12345, 2), 0.12);
    assert_eq!(round_to(0.987, 1), 1.0);
}

#[test]
fn test_pairable_respects_days() {
    let fri = create_test_participant("Robin", "woman", &["man"], "Friday", vec![1.0]);
    let sat = create_test_participant("Alex", "man", &["woman"], "Saturday", vec![1.0]);
    let either = create_test_participant("Kim", "man", &["woman"], "Either", vec![1.0]);

    assert!(!is_pairable(&fri, &sat, WILDCARD_DAY));
    assert!(is_pairable(&fri, &either, WILDCARD_DAY));
    assert!(is_pairable(&either, &sat, WILDCARD_DAY));
}

#[test]
fn test_pairable_respects_exclusions_both_ways() {
    let mut robin = create_test_participant("Robin", "woman", &["man"], "Either", vec![1.0]);
    let alex = create_test_participant("Alex", "man", &["woman"], "Either", vec![1.0]);
    robin.excluded.push("alex".to_string());

    assert!(!is_pairable(&robin, &alex, WILDCARD_DAY));
    assert!(!is_pairable(&alex, &robin, WILDCARD_DAY));
}

#[test]
fn test_preference_score_levels() {
    let robin = create_test_participant("Robin", "woman", &["man"], "Either", vec![1.0]);
    let alex = create_test_participant("Alex", "man", &["woman"], "Either", vec![1.0]);
    let kim = create_test_participant("Kim", "man", &["man"], "Either", vec![1.0]);
    let sam = create_test_participant("Sam", "woman", &["woman"], "Either", vec![1.0]);

    assert_eq!(preference_score(&robin, &alex), 1.0);
    assert_eq!(preference_score(&robin, &kim), 0.5);
    assert_eq!(preference_score(&kim, &sam), 0.0);
}

#[test]
fn test_participant_capability_honours_contract() {
    let roster = vec![
        create_test_participant("Robin", "woman", &["man"], "Friday", vec![1.0, 2.0]),
        create_test_participant("Alex", "man", &["woman"], "Saturday", vec![2.0, 1.0]),
        create_test_participant("Kim", "nonbinary", &[], "Either", vec![0.0, 3.0]),
    ];
    let capability = ParticipantCompatibility::new(&roster);

    assert!(validate_contract(&capability).is_ok());
    assert_eq!(capability.similarity(1, 1), 0.0);
    assert_eq!(capability.preferred(1, 1), 1.0);
    assert_eq!(capability.pairable(1, 1), 1.0);
    assert_eq!(capability.pairable(0, 1), 0.0);
    assert_eq!(capability.pairable(0, 1), capability.pairable(1, 0));
}

#[test]
fn test_contract_violation_is_named() {
    let table = CompatibilityTable::new(3).with_pairable(2, 2, 0.0);
    match validate_contract(&table) {
        Err(MatchError::CapabilityContractViolation { function, .. }) => assert_eq!(function, "pairable"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_candidate_pair_space_size() {
    for n in [2usize, 3, 5, 8] {
        let space = CandidatePairSpace::new(n);
        assert_eq!(space.len(), n * (n + 1) / 2);
        assert_eq!(space.len(), CandidatePairSpace::expected_len(n));
        assert_eq!(space.iter().filter(|p| p.is_self_pair()).count(), n);
    }
}

#[test]
fn test_candidate_pair_is_canonical() {
    assert_eq!(CandidatePair::new(3, 1), CandidatePair::new(1, 3));
    assert_eq!(CandidatePair::new(3, 1).first(), 1);
    assert_eq!(CandidatePair::new(3, 1).to_string(), "(1, 3)");
}

#[test]
fn test_variable_lookup_unknown_pair() {
    let store = DecisionVariableStore::new(&CandidatePairSpace::new(3));
    assert!(store.variable_for(&CandidatePair::new(0, 2)).is_ok());
    assert!(matches!(
        store.variable_for(&CandidatePair::new(0, 7)),
        Err(MatchError::KeyNotFound(_))
    ));
}

#[test]
fn test_each_participant_touches_every_partner_and_self() {
    let store = DecisionVariableStore::new(&CandidatePairSpace::new(5));
    for idx in 0..5 {
        assert_eq!(store.variables_touching(idx).len(), 5);
    }
}

#[test]
fn test_constraint_families() {
    let table = CompatibilityTable::new(4).forbid(1, 2);
    let store = DecisionVariableStore::new(&CandidatePairSpace::new(4));
    let constraints = ConstraintBuilder::build(&store, &table);

    assert_eq!(constraints.coverage_count(), 4);
    assert_eq!(constraints.eligibility_count(), store.len());
    assert!(constraints.coverage.iter().all(|c| c.relation == Relation::Eq && c.rhs == 1.0));

    let forbidden = constraints
        .eligibility
        .iter()
        .find(|c| c.name == "eligible_1_2")
        .unwrap();
    assert_eq!(forbidden.relation, Relation::Le);
    assert_eq!(forbidden.rhs, 0.0);
}

#[test]
fn test_objective_penalizes_unwanted_gender() {
    let table = CompatibilityTable::new(2)
        .with_similarity(0, 1, 0.8)
        .with_preference(0, 1, 0.5);
    let weights = ObjectiveWeights::default();

    assert!((pair_score(&table, 0, 1, &weights) - 0.75).abs() < 1e-9);
    assert_eq!(pair_score(&table, 0, 0, &weights), 0.0);

    let store = DecisionVariableStore::new(&CandidatePairSpace::new(2));
    let objective = ObjectiveBuilder::new(weights).build(&store, &table);
    assert_eq!(objective.terms.len(), store.len());
}

#[test]
fn test_lp_dump_format() {
    let table = CompatibilityTable::new(2).with_similarity(0, 1, 0.5);
    let built = Matchmaker::default().build(&table).unwrap();
    let lp = render_lp(&built.model);

    assert!(lp.starts_with("\\* Date_Pairing_Problem *\\"));
    assert!(lp.contains("Maximize"));
    assert!(lp.contains("cover_0:"));
    assert!(lp.contains("Binaries"));
    assert!(lp.trim_end().ends_with("End"));
}
