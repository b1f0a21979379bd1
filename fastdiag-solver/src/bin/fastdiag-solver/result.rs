use std::fmt::Display;

use fastdiag_solver::DiagnosisError;
use thiserror::Error;

use crate::parser::KnowledgeBaseParseError;

pub(crate) type FastDiagResult<T> = Result<T, FastDiagError>;

#[derive(Error, Debug)]
pub(crate) enum FastDiagError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("The knowledge base was invalid, more details: {0}")]
    InvalidKnowledgeBase(#[from] KnowledgeBaseParseError),
    #[error("The diagnosis failed, more details: {0}")]
    Diagnosis(#[from] DiagnosisError),
}

impl FastDiagError {
    pub(crate) fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{}", path))
    }
}
