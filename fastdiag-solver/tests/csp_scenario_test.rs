#![cfg(test)]

use std::num::NonZero;

use fastdiag_solver::algorithms::DirectDebug;
use fastdiag_solver::algorithms::FastDiag;
use fastdiag_solver::algorithms::FlexDiag;
use fastdiag_solver::algorithms::QuickXplain;
use fastdiag_solver::csp::constraints::Clause;
use fastdiag_solver::csp::constraints::Comparator;
use fastdiag_solver::csp::constraints::LinearComparison;
use fastdiag_solver::csp::CspOracle;
use fastdiag_solver::csp::KnowledgeBase;
use fastdiag_solver::csp::VariableId;
use fastdiag_solver::hitting_set::HittingSetEngine;
use fastdiag_solver::hitting_set::HittingSetOptions;
use fastdiag_solver::hitting_set::HittingSetVariant;
use fastdiag_solver::labelers::QuickXplainLabeler;
use fastdiag_solver::oracle::ConsistencyOracle;
use fastdiag_solver::oracle::MonitoredOracle;
use fastdiag_solver::ConstraintId;
use fastdiag_solver::ConstraintSet;

/// `v1, v2, v3 ∈ {1, 2, 3}` and the constraints `c1` to `c7`; with `disjoint_conflicts` the
/// minimal conflicts are `{c2, c5}` and `{c1, c6}`, otherwise `{c2, c5}` is the only one.
struct Scenario {
    knowledge_base: KnowledgeBase,
    constraints: Vec<ConstraintId>,
}

impl Scenario {
    fn new(disjoint_conflicts: bool) -> Scenario {
        let mut knowledge_base = KnowledgeBase::default();
        let v: Vec<VariableId> = (1..=3)
            .map(|index| {
                knowledge_base
                    .new_named_bounded_integer(1, 3, format!("v{index}"))
                    .expect("non-empty domain")
            })
            .collect();

        let comparison = |terms: &[(i32, usize)], constant, comparator| {
            LinearComparison::new(
                terms
                    .iter()
                    .map(|&(coefficient, index)| (coefficient, v[index]))
                    .collect(),
                constant,
                comparator,
            )
        };

        let first = if disjoint_conflicts {
            // v3 = 3
            comparison(&[(1, 2)], -3, Comparator::Equal)
        } else {
            // v1 + v2 + v3 >= 3
            comparison(&[(1, 0), (1, 1), (1, 2)], -3, Comparator::GreaterOrEqual)
        };
        let sixth = if disjoint_conflicts {
            // v3 <= 2
            comparison(&[(1, 2)], -2, Comparator::LessOrEqual)
        } else {
            // v2 + v3 <= 6
            comparison(&[(1, 1), (1, 2)], -6, Comparator::LessOrEqual)
        };

        let definitions = [
            first,
            // v1 <= 2
            comparison(&[(1, 0)], -2, Comparator::LessOrEqual),
            // v2 >= 2
            comparison(&[(1, 1)], -2, Comparator::GreaterOrEqual),
            // v3 != 2
            comparison(&[(1, 2)], -2, Comparator::NotEqual),
            // v1 = 3
            comparison(&[(1, 0)], -3, Comparator::Equal),
            sixth,
            // v1 != v2
            comparison(&[(1, 0), (-1, 1)], 0, Comparator::NotEqual),
        ];

        let constraints = definitions
            .into_iter()
            .enumerate()
            .map(|(index, definition)| {
                knowledge_base
                    .add_constraint(format!("c{}", index + 1), Clause::from(definition))
                    .expect("fresh name")
            })
            .collect();

        Scenario {
            knowledge_base,
            constraints,
        }
    }

    /// The constraints `c_i` for the given (1-based) `i`.
    fn named(&self, indices: &[usize]) -> ConstraintSet {
        indices
            .iter()
            .map(|&index| self.constraints[index - 1])
            .collect()
    }

    fn consideration(&self) -> ConstraintSet {
        self.knowledge_base.consideration().clone()
    }

    fn oracle(&self) -> CspOracle {
        CspOracle::with_test_cases(self.knowledge_base.clone())
    }
}

#[test]
fn quickxplain_returns_the_conflicting_pair() {
    let scenario = Scenario::new(false);
    let mut quickxplain = QuickXplain::new(scenario.oracle());

    let conflict = quickxplain
        .find_conflict_set(&scenario.consideration(), &ConstraintSet::default())
        .expect("no oracle failure");

    assert_eq!(conflict, scenario.named(&[2, 5]));
}

#[test]
fn fastdiag_removes_one_side_of_the_conflicting_pair() {
    let scenario = Scenario::new(false);
    let consideration = scenario.consideration();
    let mut fastdiag = FastDiag::new(scenario.oracle());

    let diagnosis = fastdiag
        .find_diagnosis(&consideration, &consideration)
        .expect("no oracle failure");

    assert_eq!(diagnosis.len(), 1);
    assert!(diagnosis.is_subset(&scenario.named(&[2, 5])));

    let mut oracle = fastdiag.into_oracle();
    assert!(oracle
        .is_consistent(&consideration.difference(&diagnosis))
        .expect("no oracle failure"));
}

#[test]
fn fastdiag_returns_a_two_element_diagnosis_for_disjoint_conflicts() {
    let scenario = Scenario::new(true);
    let consideration = scenario.consideration();
    let mut fastdiag = FastDiag::new(scenario.oracle());

    let diagnosis = fastdiag
        .find_diagnosis(&consideration, &consideration)
        .expect("no oracle failure");

    assert_eq!(diagnosis.len(), 2);
    assert!(!diagnosis.is_disjoint(&scenario.named(&[2, 5])));
    assert!(!diagnosis.is_disjoint(&scenario.named(&[1, 6])));
}

#[test]
fn direct_debug_without_violated_test_cases_does_not_recurse() {
    let mut knowledge_base = KnowledgeBase::default();
    let x = knowledge_base
        .new_named_bounded_integer(1, 3, "x")
        .expect("non-empty domain");
    let at_most_two = LinearComparison::new(vec![(1, x)], -2, Comparator::LessOrEqual);
    let is_one = LinearComparison::new(vec![(1, x)], -1, Comparator::Equal);
    let _ = knowledge_base
        .add_constraint("at_most_two", Clause::from(at_most_two))
        .expect("fresh name");
    let _ = knowledge_base
        .add_test_case("is_one", vec![Clause::from(is_one)])
        .expect("fresh name");

    let consideration = knowledge_base.consideration().clone();
    let test_cases = knowledge_base.all_test_cases();
    let mut direct_debug =
        DirectDebug::new(MonitoredOracle::new(CspOracle::with_test_cases(knowledge_base)));

    let diagnosis = direct_debug
        .find_diagnosis(&consideration, &ConstraintSet::default(), &test_cases)
        .expect("no oracle failure");

    assert!(diagnosis.is_empty());
    let statistics = direct_debug.oracle().statistics();
    assert_eq!(statistics.num_violation_queries, 1);
    assert_eq!(statistics.num_violated_test_cases, 0);
    assert_eq!(statistics.num_consistency_checks, 0);
}

#[test]
fn flexdiag_with_m_one_is_never_larger_than_fastdiag() {
    let mut scenario = Scenario::new(true);
    let v2 = scenario
        .knowledge_base
        .variable_by_name("v2")
        .expect("declared");
    let eighth = scenario
        .knowledge_base
        .add_constraint(
            "c8",
            Clause::from(LinearComparison::new(
                vec![(1, v2)],
                -3,
                Comparator::LessOrEqual,
            )),
        )
        .expect("fresh name");
    scenario.constraints.push(eighth);

    let consideration = scenario.consideration();
    assert_eq!(consideration.len(), 8);

    let fastdiag = FastDiag::new(scenario.oracle())
        .find_diagnosis(&consideration, &consideration)
        .expect("no oracle failure");
    let flexdiag = FlexDiag::new(scenario.oracle(), NonZero::<usize>::MIN)
        .find_diagnosis(&consideration, &consideration)
        .expect("no oracle failure");

    assert!(flexdiag.len() <= fastdiag.len());
    assert_eq!(flexdiag.len(), 2);
}

#[test]
fn hitting_set_search_finds_every_minimal_diagnosis() {
    let scenario = Scenario::new(true);

    for variant in [HittingSetVariant::Tree, HittingSetVariant::Dag] {
        let labeler = QuickXplainLabeler::new(
            scenario.oracle(),
            scenario.consideration(),
            ConstraintSet::default(),
        );
        let mut engine = HittingSetEngine::new(
            labeler,
            HittingSetOptions {
                variant,
                ..Default::default()
            },
        );
        let _ = engine.construct().expect("no oracle failure");

        let mut diagnoses = engine
            .diagnoses()
            .iter()
            .map(ConstraintSet::sorted_elements)
            .collect::<Vec<_>>();
        diagnoses.sort();

        let mut expected = [[1, 2], [1, 5], [2, 6], [5, 6]]
            .iter()
            .map(|indices| scenario.named(indices).sorted_elements())
            .collect::<Vec<_>>();
        expected.sort();

        assert_eq!(diagnoses, expected, "{variant}");
    }
}

#[test]
fn every_diagnosis_restores_consistency_minimally() {
    let scenario = Scenario::new(true);
    let consideration = scenario.consideration();
    let labeler = QuickXplainLabeler::new(
        scenario.oracle(),
        consideration.clone(),
        ConstraintSet::default(),
    );
    let mut engine = HittingSetEngine::new(labeler, HittingSetOptions::default());
    let _ = engine.construct().expect("no oracle failure");

    let mut oracle = scenario.oracle();
    for diagnosis in engine.diagnoses() {
        assert!(oracle
            .is_consistent(&consideration.difference(diagnosis))
            .expect("no oracle failure"));

        for constraint in diagnosis {
            let restored = consideration.difference(&diagnosis.without(constraint));
            assert!(!oracle.is_consistent(&restored).expect("no oracle failure"));
        }
    }
}

#[test]
fn oracle_answers_do_not_depend_on_earlier_checks() {
    let scenario = Scenario::new(true);
    let mut oracle = scenario.oracle();
    let conflict = scenario.named(&[2, 5]);
    let consistent = scenario.named(&[2, 3, 4]);

    let first = oracle.is_consistent(&conflict).expect("no oracle failure");
    let between = oracle.is_consistent(&consistent).expect("no oracle failure");
    let second = oracle.is_consistent(&conflict).expect("no oracle failure");

    assert!(!first);
    assert!(between);
    assert!(!second);
}
