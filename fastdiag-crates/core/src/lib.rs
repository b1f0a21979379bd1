//! # FastDiag
//! This crate contains the diagnosis core of FastDiag: algorithms which explain why a set of
//! constraints is inconsistent, and which find out how to repair it.
//!
//! The algorithms never look at constraints themselves. A knowledge base is a set of
//! [`ConstraintId`]s, and all reasoning about what these ids mean is delegated to a
//! [`ConsistencyOracle`](oracle::ConsistencyOracle), which answers whether a set of constraints is
//! satisfiable.
//!
//! The crate provides:
//! - [`algorithms::QuickXplain`], which computes a minimal conflict set: a minimal subset of the
//!   constraints which is inconsistent;
//! - [`algorithms::FastDiag`], [`algorithms::FastDiagMss`], [`algorithms::DirectDebug`] and
//!   [`algorithms::FlexDiag`], which compute a (minimal) diagnosis: a set of constraints whose
//!   removal restores consistency;
//! - [`hitting_set::HittingSetEngine`], which enumerates all minimal diagnoses or conflicts by
//!   repeatedly calling one of the above through a [`labelers::Labeler`].
//!
//! # Example
//! ```rust
//! # use fastdiag_core::algorithms::QuickXplain;
//! # use fastdiag_core::oracle::ConsistencyOracle;
//! # use fastdiag_core::ConstraintSet;
//! # fn example(oracle: impl ConsistencyOracle, constraints: ConstraintSet) {
//! let mut quickxplain = QuickXplain::new(oracle);
//! let conflict = quickxplain
//!     .find_conflict_set(&constraints, &ConstraintSet::default())
//!     .expect("the oracle did not fail");
//!
//! if conflict.is_empty() {
//!     println!("The constraints are consistent");
//! } else {
//!     println!("Conflict: {conflict}");
//! }
//! # }
//! ```
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod test_oracle;

pub mod algorithms;
pub mod asserts;
pub mod hitting_set;
pub mod labelers;
pub mod oracle;
pub mod statistics;
pub mod termination;

pub use convert_case;

pub use crate::basic_types::ConstraintId;
pub use crate::basic_types::ConstraintSet;
pub use crate::basic_types::DiagnosisError;
pub use crate::basic_types::TestCaseId;
pub use crate::basic_types::TestCaseSet;
