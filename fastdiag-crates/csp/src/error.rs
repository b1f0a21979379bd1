use thiserror::Error;

use crate::VariableId;

/// Errors which occur while building a [`KnowledgeBase`](crate::KnowledgeBase).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("the domain of variable '{0}' is empty")]
    EmptyDomain(String),
    #[error("there is already a variable called '{0}'")]
    DuplicateVariable(String),
    #[error("there is already a constraint or test case called '{0}'")]
    DuplicateName(String),
    #[error("the variable {0:?} does not belong to this knowledge base")]
    UnknownVariable(VariableId),
    #[error("a test case needs at least one clause")]
    EmptyTestCase,
}
