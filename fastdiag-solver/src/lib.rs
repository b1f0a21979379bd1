//! # FastDiag
//! FastDiag explains and repairs inconsistent knowledge bases. Given a set of constraints which
//! cannot be satisfied together, it computes
//! - _conflicts_: minimal subsets of the constraints which are inconsistent on their own, and
//! - _diagnoses_: minimal subsets of the constraints whose removal restores consistency.
//!
//! Constraints are split into a _consideration set_, the constraints which may be faulty, and a
//! _background_, which is assumed to be correct and is never part of a conflict or diagnosis.
//!
//! This crate bundles the diagnosis algorithms of `fastdiag-core` with the finite-domain
//! knowledge bases of `fastdiag-csp` (available as [`csp`]).
//!
//! # Finding a single diagnosis
//! ```rust
//! # use fastdiag_solver::algorithms::FastDiag;
//! # use fastdiag_solver::csp::constraints::Clause;
//! # use fastdiag_solver::csp::constraints::Comparator;
//! # use fastdiag_solver::csp::constraints::LinearComparison;
//! # use fastdiag_solver::csp::CspOracle;
//! # use fastdiag_solver::csp::KnowledgeBase;
//! let mut knowledge_base = KnowledgeBase::default();
//! let x = knowledge_base.new_named_bounded_integer(0, 5, "x").unwrap();
//!
//! // x >= 4 and x <= 2 cannot both hold
//! let at_least_four = knowledge_base
//!     .add_constraint(
//!         "at_least_four",
//!         Clause::from(LinearComparison::new(vec![(1, x)], -4, Comparator::GreaterOrEqual)),
//!     )
//!     .unwrap();
//! let _ = knowledge_base
//!     .add_background_constraint(
//!         "at_most_two",
//!         Clause::from(LinearComparison::new(vec![(1, x)], -2, Comparator::LessOrEqual)),
//!     )
//!     .unwrap();
//!
//! let consideration = knowledge_base.consideration().clone();
//! let all_constraints = consideration.union(knowledge_base.background());
//!
//! let mut fastdiag = FastDiag::new(CspOracle::new(knowledge_base));
//! let diagnosis = fastdiag
//!     .find_diagnosis(&consideration, &all_constraints)
//!     .unwrap();
//!
//! // The background cannot be blamed, so the diagnosis is the other constraint
//! assert_eq!(diagnosis, [at_least_four].into());
//! ```
//!
//! # Enumerating diagnoses
//! All minimal diagnoses are found by a
//! [`HittingSetEngine`](hitting_set::HittingSetEngine), which repeatedly asks a
//! [`Labeler`](labelers::Labeler) for conflicts and builds their minimal hitting sets:
//! ```rust
//! # use fastdiag_solver::csp::constraints::Clause;
//! # use fastdiag_solver::csp::constraints::Comparator;
//! # use fastdiag_solver::csp::constraints::LinearComparison;
//! # use fastdiag_solver::csp::CspOracle;
//! # use fastdiag_solver::csp::KnowledgeBase;
//! # use fastdiag_solver::hitting_set::HittingSetEngine;
//! # use fastdiag_solver::hitting_set::HittingSetOptions;
//! # use fastdiag_solver::labelers::QuickXplainLabeler;
//! # let mut knowledge_base = KnowledgeBase::default();
//! # let x = knowledge_base.new_named_bounded_integer(0, 5, "x").unwrap();
//! # for (name, constant, comparator) in [
//! #     ("at_least_four", -4, Comparator::GreaterOrEqual),
//! #     ("at_most_two", -2, Comparator::LessOrEqual),
//! #     ("equals_three", -3, Comparator::Equal),
//! # ] {
//! #     let _ = knowledge_base
//! #         .add_constraint(
//! #             name,
//! #             Clause::from(LinearComparison::new(vec![(1, x)], constant, comparator)),
//! #         )
//! #         .unwrap();
//! # }
//! let labeler = QuickXplainLabeler::new(
//!     CspOracle::new(knowledge_base.clone()),
//!     knowledge_base.consideration().clone(),
//!     knowledge_base.background().clone(),
//! );
//! let mut engine = HittingSetEngine::new(labeler, HittingSetOptions::default());
//! let _ = engine.construct().unwrap();
//!
//! // Every pair of the three constraints is a conflict, so each diagnosis keeps one of them
//! assert_eq!(engine.diagnoses().len(), 3);
//! for diagnosis in engine.diagnoses() {
//!     println!("{}", knowledge_base.describe(diagnosis));
//! }
//! ```
//!
//! ## Feature Flags
//! - `debug-checks`: Enable expensive assertions in the algorithms and the hitting-set engine.
pub use fastdiag_core::*;
pub use fastdiag_csp as csp;
