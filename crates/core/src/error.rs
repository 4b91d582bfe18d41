use thiserror::Error;

use crate::Category;

/// Errors raised by the registry and the dispatch layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no {category} registered with id {id}")]
    NotFound { category: Category, id: String },

    #[error("{category} {id} is already registered")]
    AlreadyRegistered { category: Category, id: String },

    #[error("no active {0}")]
    NoActive(Category),

    #[error("control surface has not been started")]
    NotStarted,

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Failures reported while mutating the external model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("nothing is selected")]
    NoSelection,

    #[error("channel {0} is out of range")]
    ChannelOutOfRange(usize),

    #[error("operation requires a drum pad bank")]
    DrumPadsOnly,
}

pub type Result<T> = std::result::Result<T, Error>;
