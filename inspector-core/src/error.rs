use records::RecordError;

/// Failure reported by an item constructor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct ConstructionError(pub String);

impl From<&str> for ConstructionError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for ConstructionError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ManagerError {
    #[error("no item types are registered")]
    NoItemTypes,
    #[error("unknown item key '{0}'")]
    UnknownKey(String),
    #[error("unknown item type '{0}'")]
    UnknownType(String),
    #[error("failed to create '{type_name}': {source}")]
    Construction {
        type_name: String,
        source: ConstructionError,
    },
    #[error("no item at row {0}")]
    NoSuchRow(usize),
    #[error(transparent)]
    Record(#[from] RecordError),
}
