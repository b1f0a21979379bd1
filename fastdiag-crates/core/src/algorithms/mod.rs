//! The divide-and-conquer algorithms which compute a single minimal conflict set or diagnosis.
//!
//! All of them are instances of one recursion (see `divide_and_conquer`), which splits the
//! candidate constraints in half and asks a [`ConsistencyOracle`](crate::oracle::ConsistencyOracle)
//! about the halves. They differ only in how the background set is threaded through the
//! recursion:
//! - [`QuickXplain`] finds a minimal conflict set;
//! - [`FastDiag`] finds a minimal diagnosis relative to the set of all constraints;
//! - [`FastDiagMss`] finds a minimal diagnosis as the complement of a maximal satisfiable subset;
//! - [`DirectDebug`] does the same with respect to a set of test cases;
//! - [`FlexDiag`] is FastDiag with a bounded recursion depth, trading minimality for fewer checks.
mod direct_debug;
mod divide_and_conquer;
mod fastdiag;
mod fastdiag_mss;
mod flexdiag;
mod quickxplain;

pub use direct_debug::DirectDebug;
pub use fastdiag::FastDiag;
pub use fastdiag_mss::FastDiagMss;
pub use flexdiag::FlexDiag;
pub use quickxplain::QuickXplain;
