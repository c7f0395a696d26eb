use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleRagError {
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("Duplicate chapter id: {0}")]
    DuplicateChapterId(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, RuleRagError>;
