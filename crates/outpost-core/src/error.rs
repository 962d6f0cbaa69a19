use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read outlets file {path}: {source}")]
    OutletsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse outlets YAML: {0}")]
    OutletsFileParse(#[from] serde_yaml::Error),

    #[error("failed to parse outlets CSV: {0}")]
    OutletsFileCsv(#[from] csv::Error),

    #[error("outlets validation failed: {0}")]
    Validation(String),
}
