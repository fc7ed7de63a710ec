pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Node ID already exist: {id}")]
    DuplicateId { id: String },

    #[error("No such element: {id}")]
    NotFound { id: String },

    #[error("{reason}")]
    Validation { reason: String },

    #[error("{cidr} is incorrect format. It has to be in x.x.x.x/y format.")]
    InvalidCidr { cidr: String },

    #[error("Interface {id} cannot leave its node")]
    OutOfBounds { id: String },

    #[error("Element {id} cannot be deleted on its own")]
    NotDeletable { id: String },

    #[error("{date} is not a valid date.")]
    InvalidDate { date: String },

    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    #[error("Invalid topology document: {message}")]
    InvalidDocument { message: String },

    #[error("Invalid editor config: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub(crate) fn document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}
