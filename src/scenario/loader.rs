//! Load scenario files (YAML, or JSON by `.json` extension)

use std::fs;
use std::path::Path;

use log::info;

use crate::error::ScenarioLoadError;
use super::declaration::ScenarioDeclaration;
use super::types::ScenarioSpec;
use super::validate::validate_and_expand;

/// Format of a scenario document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
}

impl ScenarioFormat {
    /// Pick a format from the file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScenarioFormat::Json,
            _ => ScenarioFormat::Yaml,
        }
    }
}

/// Parse scenario text without validating it.
///
/// Syntax errors surface as `Yaml`/`Json`; a document that parses but has the
/// wrong shape is reported as a malformed declaration.
pub fn parse_declaration(text: &str, format: ScenarioFormat) -> Result<ScenarioDeclaration, ScenarioLoadError> {
    let decl = match format {
        ScenarioFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(text)?;
            ScenarioDeclaration::from_yaml_value(value).map_err(|e| malformed(e.to_string()))?
        }
        ScenarioFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(text)?;
            ScenarioDeclaration::from_json_value(value).map_err(|e| malformed(e.to_string()))?
        }
    };
    Ok(decl)
}

fn malformed(detail: String) -> ScenarioLoadError {
    crate::error::ValidationError::Malformed(detail).into()
}

/// Parse and validate scenario text
pub fn load_scenario_from_str(
    text: &str,
    format: ScenarioFormat,
    fallback_name: &str,
) -> Result<ScenarioSpec, ScenarioLoadError> {
    let decl = parse_declaration(text, format)?;
    Ok(validate_and_expand(&decl, fallback_name)?)
}

/// Load and validate a scenario file; the file stem names unnamed scenarios
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioSpec, ScenarioLoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let fallback_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scenario");

    let spec = load_scenario_from_str(&text, ScenarioFormat::from_path(path), fallback_name)?;
    info!(
        "Loaded scenario '{}' from {}: horizon={}, {} shock(s)",
        spec.name(),
        path.display(),
        spec.horizon(),
        spec.shocks().len()
    );
    Ok(spec)
}
