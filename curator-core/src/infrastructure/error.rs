// curator-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(curator::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Input file not found at '{0}'")]
    #[diagnostic(code(curator::infra::input_missing))]
    InputNotFound(String),

    // --- CSV ---
    #[error("CSV Error in '{path}': {source}")]
    #[diagnostic(
        code(curator::infra::csv),
        help("Inputs must be comma-separated with a header row.")
    )]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(curator::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(curator::infra::config_invalid))]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Pipeline configuration not found: {0}")]
    #[diagnostic(code(curator::infra::config_missing))]
    ConfigNotFound(String),

    // --- SERIALIZATION ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(curator::infra::json))]
    Json(#[from] serde_json::Error),
}
