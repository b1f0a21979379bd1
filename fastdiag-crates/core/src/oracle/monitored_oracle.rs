use std::time::Instant;

use log::trace;

use super::ConsistencyOracle;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::basic_types::TestCaseId;
use crate::basic_types::TestCaseSet;
use crate::create_statistics_struct;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// The statistics gathered by a [`MonitoredOracle`].
    OracleStatistics {
        /// The number of consistency checks without a test case
        num_consistency_checks: u64,
        /// The number of consistency checks involving a single test case
        num_test_case_checks: u64,
        /// The number of checks which answered "consistent"
        num_consistent: u64,
        /// The number of checks which answered "inconsistent"
        num_inconsistent: u64,
        /// The number of queries for the violated test cases of a set of constraints
        num_violation_queries: u64,
        /// The total number of test cases reported as violated by these queries
        num_violated_test_cases: u64,
        /// The time spent inside the wrapped oracle, in microseconds
        time_spent_in_oracle_us: u64,
});

/// Wraps a [`ConsistencyOracle`] and records [`OracleStatistics`] about every check that passes
/// through it.
///
/// The algorithms are unaware of the wrapper, so counting the checks made by a search only
/// requires handing it a `MonitoredOracle` instead of the oracle itself.
#[derive(Debug)]
pub struct MonitoredOracle<Oracle> {
    oracle: Oracle,
    statistics: OracleStatistics,
}

impl<Oracle: ConsistencyOracle> MonitoredOracle<Oracle> {
    pub fn new(oracle: Oracle) -> Self {
        Self {
            oracle,
            statistics: OracleStatistics::default(),
        }
    }

    pub fn statistics(&self) -> OracleStatistics {
        self.statistics
    }

    pub fn inner(&self) -> &Oracle {
        &self.oracle
    }

    pub fn into_inner(self) -> Oracle {
        self.oracle
    }

    pub fn log_statistics(&self) {
        self.statistics.log(StatisticLogger::new(["oracle"]));
    }

    fn record_time(&mut self, started_at: Instant) {
        self.statistics.time_spent_in_oracle_us += started_at.elapsed().as_micros() as u64;
    }

    fn record(&mut self, started_at: Instant, outcome: &Result<bool, DiagnosisError>) {
        self.record_time(started_at);

        match outcome {
            Ok(true) => self.statistics.num_consistent += 1,
            Ok(false) => self.statistics.num_inconsistent += 1,
            Err(error) => trace!("Consistency check failed: {error}"),
        }
    }
}

impl<Oracle: ConsistencyOracle> ConsistencyOracle for MonitoredOracle<Oracle> {
    fn is_consistent(&mut self, constraints: &ConstraintSet) -> Result<bool, DiagnosisError> {
        self.statistics.num_consistency_checks += 1;

        let started_at = Instant::now();
        let outcome = self.oracle.is_consistent(constraints);
        self.record(started_at, &outcome);

        trace!("is_consistent({constraints}) = {outcome:?}");
        outcome
    }

    fn is_consistent_with_test_case(
        &mut self,
        constraints: &ConstraintSet,
        test_case: TestCaseId,
    ) -> Result<bool, DiagnosisError> {
        self.statistics.num_test_case_checks += 1;

        let started_at = Instant::now();
        let outcome = self.oracle.is_consistent_with_test_case(constraints, test_case);
        self.record(started_at, &outcome);

        trace!("is_consistent({constraints}, {test_case}) = {outcome:?}");
        outcome
    }

    fn violated_test_cases(
        &mut self,
        constraints: &ConstraintSet,
        test_cases: &TestCaseSet,
        stop_at_first: bool,
    ) -> Result<TestCaseSet, DiagnosisError> {
        self.statistics.num_violation_queries += 1;

        let started_at = Instant::now();
        let outcome = self
            .oracle
            .violated_test_cases(constraints, test_cases, stop_at_first);
        self.record_time(started_at);

        match &outcome {
            Ok(violated) => self.statistics.num_violated_test_cases += violated.len() as u64,
            Err(error) => trace!("Test case query failed: {error}"),
        }

        trace!("violated_test_cases({constraints}, {test_cases}) = {outcome:?}");
        outcome
    }

    fn reset(&mut self) {
        self.oracle.reset()
    }

    fn dispose(&mut self) {
        self.oracle.dispose()
    }
}
