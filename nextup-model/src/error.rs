use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("unknown title kind: {0}")]
    UnknownTitleKind(String),

    #[error("unknown credit role: {0}")]
    UnknownCreditRole(String),

    #[error("unknown streaming service: {0}")]
    UnknownService(String),

    #[error("unknown ranking kind: {0}")]
    UnknownRankingKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
