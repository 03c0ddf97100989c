use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Entity '{entity_id}' has no transactions on record")]
    EntityNotFound { entity_id: String },

    #[error("{context}: {found} transactions on record, {required} required")]
    InsufficientData {
        context: String,
        found: usize,
        required: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
