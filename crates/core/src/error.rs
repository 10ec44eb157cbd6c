use crate::validation::DrillValidationError;

#[derive(Debug, thiserror::Error)]
pub enum DrillsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    InvalidDrill(#[from] DrillValidationError),
    #[error("invalid text: {0}")]
    InvalidText(#[from] drills_types::TextError),

    #[error("drill not found: {0}")]
    DrillNotFound(String),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("document already exists: {0}")]
    AlreadyExists(String),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write document: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read document: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
}

pub type DrillsResult<T> = std::result::Result<T, DrillsError>;
