use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("duplicate source field '{0}' in manifest")]
    DuplicateSourceField(String),
    #[error("duplicate canonical field '{0}' in manifest")]
    DuplicateCanonicalField(String),
    #[error("invalid record id '{0}'")]
    InvalidRecordId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
