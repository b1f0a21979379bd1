use fastdiag_core::oracle::ConsistencyOracle;
use fastdiag_core::ConstraintSet;
use fastdiag_core::DiagnosisError;
use fastdiag_core::TestCaseId;
use log::trace;

use crate::constraints::Clause;
use crate::search::is_satisfiable;
use crate::KnowledgeBase;

/// A [`ConsistencyOracle`] which decides the consistency of the constraints of a
/// [`KnowledgeBase`] by searching for a satisfying assignment.
///
/// A check only considers the constraints it is given (and the test case, if any); the other
/// constraints of the knowledge base, including the background, are ignored. Nothing is retained
/// between two checks. A test case may be checked against an empty set of constraints, which
/// decides whether it is satisfiable on its own.
#[derive(Debug)]
pub struct CspOracle {
    knowledge_base: Option<KnowledgeBase>,
    supports_test_cases: bool,
}

impl CspOracle {
    /// Creates an oracle which rejects test cases with [`DiagnosisError::UnsupportedMode`].
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        CspOracle {
            knowledge_base: Some(knowledge_base),
            supports_test_cases: false,
        }
    }

    /// Creates an oracle which can also evaluate the test cases of `knowledge_base`.
    pub fn with_test_cases(knowledge_base: KnowledgeBase) -> Self {
        CspOracle {
            knowledge_base: Some(knowledge_base),
            supports_test_cases: true,
        }
    }

    /// The knowledge base, or [`None`] once the oracle has been disposed.
    pub fn knowledge_base(&self) -> Option<&KnowledgeBase> {
        self.knowledge_base.as_ref()
    }

    fn check(
        &self,
        constraints: &ConstraintSet,
        test_case: Option<TestCaseId>,
    ) -> Result<bool, DiagnosisError> {
        let knowledge_base = self
            .knowledge_base
            .as_ref()
            .ok_or(DiagnosisError::OracleDisposed)?;
        if constraints.is_empty() && test_case.is_none() {
            return Err(DiagnosisError::EmptyInput("constraint"));
        }

        let mut clauses: Vec<&Clause> = constraints
            .iter()
            .map(|constraint| {
                knowledge_base
                    .get_constraint(constraint)
                    .map(|constraint| &constraint.clause)
                    .ok_or_else(|| {
                        DiagnosisError::Oracle(format!("unknown constraint {constraint}"))
                    })
            })
            .collect::<Result<_, _>>()?;

        if let Some(test_case) = test_case {
            let test_case = knowledge_base.get_test_case(test_case).ok_or_else(|| {
                DiagnosisError::Oracle(format!("unknown test case {test_case}"))
            })?;
            clauses.extend(test_case.clauses.iter());
        }

        Ok(is_satisfiable(knowledge_base, &clauses))
    }
}

impl ConsistencyOracle for CspOracle {
    fn is_consistent(&mut self, constraints: &ConstraintSet) -> Result<bool, DiagnosisError> {
        self.check(constraints, None)
    }

    fn is_consistent_with_test_case(
        &mut self,
        constraints: &ConstraintSet,
        test_case: TestCaseId,
    ) -> Result<bool, DiagnosisError> {
        if self.knowledge_base.is_none() {
            return Err(DiagnosisError::OracleDisposed);
        }
        if !self.supports_test_cases {
            return Err(DiagnosisError::UnsupportedMode);
        }

        self.check(constraints, Some(test_case))
    }

    fn reset(&mut self) {
        trace!("Resetting the CSP oracle");
    }

    fn dispose(&mut self) {
        self.knowledge_base = None;
    }
}

#[cfg(test)]
mod tests {
    use fastdiag_core::oracle::ConsistencyOracle;
    use fastdiag_core::ConstraintId;
    use fastdiag_core::ConstraintSet;
    use fastdiag_core::DiagnosisError;
    use fastdiag_core::TestCaseId;

    use super::CspOracle;
    use crate::constraints::Clause;
    use crate::constraints::Comparator;
    use crate::constraints::LinearComparison;
    use crate::KnowledgeBase;

    /// `x, y ∈ [1, 3]` with the constraints `x < y`, `y < x` and `x = 2`, and the test case
    /// `y = 1`.
    fn knowledge_base() -> (KnowledgeBase, [ConstraintId; 3], TestCaseId) {
        let mut knowledge_base = KnowledgeBase::default();
        let x = knowledge_base
            .new_named_bounded_integer(1, 3, "x")
            .expect("non-empty domain");
        let y = knowledge_base
            .new_named_bounded_integer(1, 3, "y")
            .expect("non-empty domain");

        let less = |a, b| {
            Clause::from(LinearComparison::new(
                vec![(1, a), (-1, b)],
                0,
                Comparator::Less,
            ))
        };
        let constraints = [
            knowledge_base
                .add_constraint("x_below_y", less(x, y))
                .expect("fresh name"),
            knowledge_base
                .add_constraint("y_below_x", less(y, x))
                .expect("fresh name"),
            knowledge_base
                .add_constraint(
                    "x_is_two",
                    Clause::from(LinearComparison::new(vec![(1, x)], -2, Comparator::Equal)),
                )
                .expect("fresh name"),
        ];
        let test_case = knowledge_base
            .add_test_case(
                "y_is_one",
                vec![Clause::from(LinearComparison::new(
                    vec![(1, y)],
                    -1,
                    Comparator::Equal,
                ))],
            )
            .expect("fresh name");

        (knowledge_base, constraints, test_case)
    }

    #[test]
    fn checks_only_the_given_constraints() {
        let (knowledge_base, [x_below_y, y_below_x, x_is_two], _) = knowledge_base();
        let mut oracle = CspOracle::new(knowledge_base);

        assert!(oracle
            .is_consistent(&[x_below_y, x_is_two].into())
            .expect("valid input"));
        assert!(!oracle
            .is_consistent(&[x_below_y, y_below_x].into())
            .expect("valid input"));
    }

    #[test]
    fn repeated_checks_give_the_same_answer() {
        let (knowledge_base, [x_below_y, y_below_x, _], _) = knowledge_base();
        let mut oracle = CspOracle::new(knowledge_base);
        let conflict: ConstraintSet = [x_below_y, y_below_x].into();
        let consistent: ConstraintSet = [x_below_y].into();

        let answers: Vec<bool> = (0..3)
            .flat_map(|_| [conflict.clone(), consistent.clone()])
            .map(|constraints| oracle.is_consistent(&constraints).expect("valid input"))
            .collect();

        assert_eq!(answers, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn test_cases_need_the_test_case_mode() {
        let (knowledge_base, [x_below_y, _, _], test_case) = knowledge_base();
        let mut oracle = CspOracle::new(knowledge_base);

        assert_eq!(
            oracle.is_consistent_with_test_case(&[x_below_y].into(), test_case),
            Err(DiagnosisError::UnsupportedMode)
        );
    }

    #[test]
    fn test_cases_are_checked_together_with_the_constraints() {
        let (knowledge_base, [x_below_y, y_below_x, x_is_two], test_case) = knowledge_base();
        let mut oracle = CspOracle::with_test_cases(knowledge_base);

        // y = 1 leaves no room for x < y
        assert!(!oracle
            .is_consistent_with_test_case(&[x_below_y].into(), test_case)
            .expect("valid input"));
        assert!(oracle
            .is_consistent_with_test_case(&[y_below_x, x_is_two].into(), test_case)
            .expect("valid input"));

        let violated = oracle
            .violated_test_cases(&[x_below_y].into(), &[test_case].into(), false)
            .expect("valid input");
        assert!(violated.contains(test_case));
    }

    #[test]
    fn empty_input_is_rejected() {
        let (knowledge_base, _, _) = knowledge_base();
        let mut oracle = CspOracle::new(knowledge_base);

        assert_eq!(
            oracle.is_consistent(&ConstraintSet::default()),
            Err(DiagnosisError::EmptyInput("constraint"))
        );
    }

    #[test]
    fn test_case_is_checked_on_its_own_without_constraints() {
        let (mut knowledge_base, _, satisfiable) = knowledge_base();
        let x = knowledge_base.variable_by_name("x").expect("declared");
        let x_equals = |value: i32| {
            Clause::from(LinearComparison::new(vec![(1, x)], -value, Comparator::Equal))
        };
        let unsatisfiable = knowledge_base
            .add_test_case("x_is_one_and_two", vec![x_equals(1), x_equals(2)])
            .expect("fresh name");
        let mut oracle = CspOracle::with_test_cases(knowledge_base);

        assert!(oracle
            .is_consistent_with_test_case(&ConstraintSet::default(), satisfiable)
            .expect("a test case is a non-empty input"));
        assert!(!oracle
            .is_consistent_with_test_case(&ConstraintSet::default(), unsatisfiable)
            .expect("a test case is a non-empty input"));
    }

    #[test]
    fn reset_is_idempotent_and_dispose_is_final() {
        let (knowledge_base, [x_below_y, _, _], _) = knowledge_base();
        let mut oracle = CspOracle::new(knowledge_base);

        oracle.reset();
        oracle.reset();
        assert!(oracle
            .is_consistent(&[x_below_y].into())
            .expect("valid input"));

        oracle.dispose();
        assert!(oracle.knowledge_base().is_none());
        assert_eq!(
            oracle.is_consistent(&[x_below_y].into()),
            Err(DiagnosisError::OracleDisposed)
        );
    }
}
