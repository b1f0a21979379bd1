//! # FastDiag CSP
//! Finite-domain knowledge bases and a [`CspOracle`] which decides their consistency, so that the
//! algorithms of [`fastdiag_core`] can be run on an actual constraint model.
//!
//! A [`KnowledgeBase`] consists of integer variables with finite domains, constraints which may
//! be faulty, background constraints which are assumed to be correct, and test cases which
//! describe the intended behaviour of the knowledge base.
//!
//! # Example
//! ```rust
//! # use fastdiag_csp::constraints::Comparator;
//! # use fastdiag_csp::constraints::Clause;
//! # use fastdiag_csp::constraints::LinearComparison;
//! # use fastdiag_csp::CspOracle;
//! # use fastdiag_csp::KnowledgeBase;
//! # use fastdiag_core::algorithms::QuickXplain;
//! let mut knowledge_base = KnowledgeBase::default();
//! let x = knowledge_base.new_named_bounded_integer(1, 3, "x").unwrap();
//! let y = knowledge_base.new_named_bounded_integer(1, 3, "y").unwrap();
//!
//! // x < y, y < x
//! let _ = knowledge_base
//!     .add_constraint(
//!         "x_below_y",
//!         Clause::from(LinearComparison::new(vec![(1, x), (-1, y)], 0, Comparator::Less)),
//!     )
//!     .unwrap();
//! let _ = knowledge_base
//!     .add_constraint(
//!         "y_below_x",
//!         Clause::from(LinearComparison::new(vec![(1, y), (-1, x)], 0, Comparator::Less)),
//!     )
//!     .unwrap();
//!
//! let consideration = knowledge_base.consideration().clone();
//! let background = knowledge_base.background().clone();
//! let mut quickxplain = QuickXplain::new(CspOracle::new(knowledge_base));
//! let conflict = quickxplain
//!     .find_conflict_set(&consideration, &background)
//!     .unwrap();
//!
//! assert_eq!(conflict.len(), 2);
//! ```
pub mod constraints;
mod error;
mod knowledge_base;
mod oracle;
mod search;
mod variables;

pub use error::ModelError;
pub use knowledge_base::*;
pub use oracle::CspOracle;
pub use variables::*;
