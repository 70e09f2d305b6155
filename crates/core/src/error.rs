use hms_types::{DoctorId, PatientId, TypesError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum HmsError {
    #[error("Patient with ID {0} not found")]
    PatientNotFound(PatientId),
    #[error("Doctor with ID {0} not found")]
    DoctorNotFound(DoctorId),
    #[error("Patient {name} is already admitted")]
    AlreadyAdmitted { patient_id: PatientId, name: String },

    #[error("no {0} ids left")]
    IdsExhausted(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("script line {line}: {message}")]
    ScriptSyntax { line: usize, message: String },
    #[error("failed to read script: {0}")]
    ScriptRead(std::io::Error),
}

impl HmsError {
    /// Classify this error for callers that branch on outcome rather than on variant.
    pub fn outcome(&self) -> Outcome {
        match self {
            HmsError::PatientNotFound(_) | HmsError::DoctorNotFound(_) => Outcome::NotFound,
            HmsError::AlreadyAdmitted { .. } => Outcome::InvalidState,
            HmsError::IdsExhausted(_)
            | HmsError::InvalidInput(_)
            | HmsError::Types(_)
            | HmsError::ScriptSyntax { .. }
            | HmsError::ScriptRead(_) => Outcome::Rejected,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.outcome() == Outcome::NotFound
    }
}

pub type HmsResult<T> = std::result::Result<T, HmsError>;

/// Decision reached by a registry operation.
///
/// `Empty` and `Dangling` are not failures: a drain found nothing to do, or consumed an id
/// that no longer resolves to a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    NotFound,
    InvalidState,
    Empty,
    Dangling,
    Rejected,
}
