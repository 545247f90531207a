use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroundEffectError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config document: {0}")]
    InvalidDocument(String),

    #[error("Invalid parameter '{key}' with value '{value}'")]
    InvalidParameter { key: String, value: String },
}
