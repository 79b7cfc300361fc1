//! Error types for scenario loading, IRF loading and output writing

use thiserror::Error;

/// Problems found while validating a raw scenario declaration.
///
/// Shock-scoped variants carry the zero-based shock index and the declared
/// variable (or `"?"` when the variable itself is missing) so the offending
/// entry can be located in the scenario file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("shock #{index} ({var}): unknown shock type '{kind}' (expected step, pulse, gradual or path)")]
    UnknownShockKind {
        index: usize,
        var: String,
        kind: String,
    },

    #[error("shock #{index} ({var}): missing required field '{field}'")]
    MissingField {
        index: usize,
        var: String,
        field: &'static str,
    },

    #[error("shock #{index} ({var}): invalid size: {detail}")]
    InvalidSize {
        index: usize,
        var: String,
        detail: String,
    },

    #[error("shock #{index} ({var}): invalid field '{field}': {detail}")]
    InvalidField {
        index: usize,
        var: String,
        field: &'static str,
        detail: String,
    },

    #[error("malformed scenario declaration: {0}")]
    Malformed(String),
}

/// Errors raised while reading a scenario file from disk.
#[derive(Error, Debug)]
pub enum ScenarioLoadError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised while loading a long-format IRF table.
#[derive(Error, Debug)]
pub enum IrfLoadError {
    #[error("failed to read IRF file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse IRF csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("IRF csv schema mismatch: missing column(s) {missing:?}, need shock, target, h, resp")]
    Schema { missing: Vec<&'static str> },

    #[error("IRF csv line {line}: {detail}")]
    Parse { line: u64, detail: String },
}

/// Errors raised while persisting effect tables.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}
