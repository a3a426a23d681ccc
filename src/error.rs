use thiserror::Error;

pub type Result<T> = std::result::Result<T, QualityError>;

#[derive(Error, Debug)]
pub enum QualityError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing DB credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid DB credential {key}: {message}")]
    InvalidCredential { key: &'static str, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),

    #[error("Unable to decode input as {encoding}: {path}")]
    Encoding { encoding: &'static str, path: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup error: {0}")]
    Logging(String),
}
