use thiserror::Error;

#[derive(Error, Debug)]
pub enum RallyError {
    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Invalid car: {0}")]
    InvalidCar(String),

    #[error("Invalid rule set: {0}")]
    InvalidRuleSet(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RallyError>;
