use fastdiag_core::containers::HashMap;
use fastdiag_core::containers::HashSet;
use fastdiag_core::containers::KeyedVec;
use fastdiag_core::containers::StorageKey;
use fastdiag_core::ConstraintId;
use fastdiag_core::ConstraintSet;
use fastdiag_core::TestCaseId;
use fastdiag_core::TestCaseSet;
use log::debug;

use crate::constraints::Clause;
use crate::Domain;
use crate::ModelError;
use crate::Variable;
use crate::VariableId;

/// A constraint of the knowledge base, together with the name it is reported under.
#[derive(Clone, Debug)]
pub struct NamedConstraint {
    pub name: String,
    pub clause: Clause,
}

/// A test case: the conjunction of its clauses describes one intended behaviour.
#[derive(Clone, Debug)]
pub struct TestCase {
    pub name: String,
    pub clauses: Vec<Clause>,
}

/// A finite-domain constraint model whose constraints are identified by [`ConstraintId`]s.
///
/// Every constraint is either part of the background (assumed to be correct) or part of the
/// consideration set (possibly faulty). Both kinds share one id space, in the order in which they
/// were added.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    variables: KeyedVec<VariableId, Variable>,
    variable_names: HashMap<String, VariableId>,
    constraints: KeyedVec<ConstraintId, NamedConstraint>,
    test_cases: KeyedVec<TestCaseId, TestCase>,
    names: HashSet<String>,
    background: ConstraintSet,
    consideration: ConstraintSet,
}

impl KnowledgeBase {
    /// Creates a new integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<VariableId, ModelError> {
        self.create_variable(Domain::bounded(lower_bound, upper_bound), None)
    }

    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> Result<VariableId, ModelError> {
        self.create_variable(
            Domain::bounded(lower_bound, upper_bound),
            Some(name.into()),
        )
    }

    /// Creates a new integer variable which can take exactly the given values. Duplicates are
    /// removed.
    pub fn new_sparse_integer(
        &mut self,
        values: impl Into<Vec<i32>>,
    ) -> Result<VariableId, ModelError> {
        self.create_variable(Domain::sparse(values), None)
    }

    pub fn new_named_sparse_integer(
        &mut self,
        values: impl Into<Vec<i32>>,
        name: impl Into<String>,
    ) -> Result<VariableId, ModelError> {
        self.create_variable(Domain::sparse(values), Some(name.into()))
    }

    fn create_variable(
        &mut self,
        domain: Domain,
        name: Option<String>,
    ) -> Result<VariableId, ModelError> {
        let display_name = name
            .clone()
            .unwrap_or_else(|| VariableId::create_from_index(self.variables.len()).to_string());

        if domain.is_empty() {
            return Err(ModelError::EmptyDomain(display_name));
        }
        if let Some(name) = &name {
            if self.variable_names.contains_key(name) {
                return Err(ModelError::DuplicateVariable(display_name));
            }
        }

        let variable = self.variables.push(Variable {
            name: name.clone(),
            domain,
        });
        if let Some(name) = name {
            let _ = self.variable_names.insert(name, variable);
        }

        debug!("Created variable {display_name}");
        Ok(variable)
    }

    /// Adds a possibly faulty constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        clause: Clause,
    ) -> Result<ConstraintId, ModelError> {
        let constraint = self.push_constraint(name.into(), clause)?;
        let _ = self.consideration.insert(constraint);
        Ok(constraint)
    }

    /// Adds a constraint which is assumed to be correct.
    pub fn add_background_constraint(
        &mut self,
        name: impl Into<String>,
        clause: Clause,
    ) -> Result<ConstraintId, ModelError> {
        let constraint = self.push_constraint(name.into(), clause)?;
        let _ = self.background.insert(constraint);
        Ok(constraint)
    }

    fn push_constraint(
        &mut self,
        name: String,
        clause: Clause,
    ) -> Result<ConstraintId, ModelError> {
        self.check_variables(std::slice::from_ref(&clause))?;
        self.register_name(&name)?;

        let constraint = self.constraints.push(NamedConstraint { name, clause });
        debug!("Added constraint {constraint}: {}", self.constraints[constraint].clause);
        Ok(constraint)
    }

    /// Adds a test case, which holds when all of `clauses` hold.
    pub fn add_test_case(
        &mut self,
        name: impl Into<String>,
        clauses: Vec<Clause>,
    ) -> Result<TestCaseId, ModelError> {
        if clauses.is_empty() {
            return Err(ModelError::EmptyTestCase);
        }

        let name = name.into();
        self.check_variables(&clauses)?;
        self.register_name(&name)?;

        let test_case = self.test_cases.push(TestCase { name, clauses });
        debug!("Added test case {test_case}");
        Ok(test_case)
    }

    fn check_variables(&self, clauses: &[Clause]) -> Result<(), ModelError> {
        match clauses
            .iter()
            .flat_map(Clause::variables)
            .find(|&variable| self.variables.get(variable).is_none())
        {
            Some(variable) => Err(ModelError::UnknownVariable(variable)),
            None => Ok(()),
        }
    }

    fn register_name(&mut self, name: &str) -> Result<(), ModelError> {
        if !self.names.insert(name.to_owned()) {
            return Err(ModelError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    pub fn variable(&self, variable: VariableId) -> &Variable {
        &self.variables[variable]
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.variables.keys()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.variable_names.get(name).copied()
    }

    pub fn constraint(&self, constraint: ConstraintId) -> &NamedConstraint {
        &self.constraints[constraint]
    }

    pub fn test_case(&self, test_case: TestCaseId) -> &TestCase {
        &self.test_cases[test_case]
    }

    pub(crate) fn get_constraint(&self, constraint: ConstraintId) -> Option<&NamedConstraint> {
        self.constraints.get(constraint)
    }

    pub(crate) fn get_test_case(&self, test_case: TestCaseId) -> Option<&TestCase> {
        self.test_cases.get(test_case)
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The constraints which are assumed to be correct, in the order in which they were added.
    pub fn background(&self) -> &ConstraintSet {
        &self.background
    }

    /// The constraints which may be faulty, in the order in which they were added.
    pub fn consideration(&self) -> &ConstraintSet {
        &self.consideration
    }

    /// All test cases, in the order in which they were added.
    pub fn all_test_cases(&self) -> TestCaseSet {
        self.test_cases.keys().collect()
    }

    /// Lists the names of `constraints`, e.g. `{c_1, c_2}`.
    pub fn describe(&self, constraints: &ConstraintSet) -> String {
        format!(
            "{{{}}}",
            constraints
                .iter()
                .filter_map(|constraint| self.constraints.get(constraint))
                .map(|constraint| constraint.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
