//! Scenario validation and expansion
//!
//! Turns a raw [`ScenarioDeclaration`] into a [`ScenarioSpec`] with every
//! impulse vector built. The first bad shock aborts the whole scenario.

use log::debug;

use crate::engine::MIX_SOURCE;
use crate::error::ValidationError;
use super::declaration::{parse_size, ScenarioDeclaration, ShockDeclaration, TargetDeclaration};
use super::impulse::ShockKind;
use super::types::{ScenarioSpec, TargetFilter, DEFAULT_HORIZON, MAX_HORIZON};

/// Validate a declaration and expand it into a normalized scenario.
///
/// `fallback_name` is used when `meta.name` is absent (the CLI passes the
/// scenario file stem).
pub fn validate_and_expand(
    decl: &ScenarioDeclaration,
    fallback_name: &str,
) -> Result<ScenarioSpec, ValidationError> {
    let meta = decl.meta.clone().unwrap_or_default();

    let horizon = match meta.horizon {
        Some(h) if h > 0 => bounded(h).ok_or_else(|| {
            ValidationError::Malformed(format!("horizon {} exceeds the maximum of {}", h, MAX_HORIZON))
        })?,
        _ => DEFAULT_HORIZON,
    };
    let name = meta.name.unwrap_or_else(|| fallback_name.to_string());
    let targets = decl
        .targets
        .as_ref()
        .map(target_filter)
        .unwrap_or_default();

    let mut spec = ScenarioSpec::new(name, horizon, targets);

    for (index, shock) in decl.shocks.iter().flatten().enumerate() {
        let (variable, kind, start_h, size) = validate_shock(index, shock)?;
        debug!(
            "shock #{} {}: {} start_h={} size={}",
            index,
            variable,
            kind.tag(),
            start_h,
            size
        );
        spec = spec.with_shock(variable, kind, start_h, size);
    }

    Ok(spec)
}

fn target_filter(decl: &TargetDeclaration) -> TargetFilter {
    TargetFilter {
        include: decl.include.iter().cloned().collect(),
        include_prefix: decl.include_prefix.iter().cloned().collect(),
        exclude: decl.exclude.iter().cloned().collect(),
    }
}

fn validate_shock(
    index: usize,
    shock: &ShockDeclaration,
) -> Result<(String, ShockKind, usize, f64), ValidationError> {
    let var_label = shock.var.clone().unwrap_or_else(|| "?".to_string());

    let variable = match shock.var.as_deref().map(str::trim) {
        Some(v) if v == MIX_SOURCE => {
            return Err(ValidationError::InvalidField {
                index,
                var: v.to_string(),
                field: "var",
                detail: format!("'{}' is reserved for the combined effect", MIX_SOURCE),
            })
        }
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            return Err(ValidationError::MissingField {
                index,
                var: var_label,
                field: "var",
            })
        }
    };

    let start_h = match shock.start_h {
        None => 0,
        Some(h) if h < 0 => {
            return Err(ValidationError::InvalidField {
                index,
                var: variable,
                field: "start_h",
                detail: format!("must be >= 0, got {}", h),
            })
        }
        Some(h) => bounded(h).ok_or_else(|| ValidationError::InvalidField {
            index,
            var: variable.clone(),
            field: "start_h",
            detail: format!("must be <= {}, got {}", MAX_HORIZON, h),
        })?,
    };

    let size = match &shock.size {
        None => 0.0,
        Some(value) => parse_size(value).map_err(|detail| ValidationError::InvalidSize {
            index,
            var: variable.clone(),
            detail,
        })?,
    };

    let tag = shock
        .kind
        .as_deref()
        .map(|k| k.trim().to_lowercase())
        .unwrap_or_else(|| "step".to_string());

    let kind = match tag.as_str() {
        "step" => ShockKind::Step,
        "pulse" => ShockKind::Pulse {
            duration: validate_duration(index, &variable, shock.duration)?,
        },
        "gradual" => ShockKind::Gradual {
            duration: validate_duration(index, &variable, shock.duration)?,
        },
        "path" => match &shock.path {
            Some(values) if !values.is_empty() => ShockKind::Path {
                values: values.clone(),
            },
            _ => {
                return Err(ValidationError::MissingField {
                    index,
                    var: variable,
                    field: "path",
                })
            }
        },
        _ => {
            return Err(ValidationError::UnknownShockKind {
                index,
                var: variable,
                kind: tag.clone(),
            })
        }
    };

    Ok((variable, kind, start_h, size))
}

fn validate_duration(index: usize, var: &str, duration: Option<i64>) -> Result<usize, ValidationError> {
    match duration {
        None => Ok(1),
        Some(d) if d >= 1 => bounded(d).ok_or_else(|| ValidationError::InvalidField {
            index,
            var: var.to_string(),
            field: "duration",
            detail: format!("must be <= {}, got {}", MAX_HORIZON, d),
        }),
        Some(d) => Err(ValidationError::InvalidField {
            index,
            var: var.to_string(),
            field: "duration",
            detail: format!("must be >= 1, got {}", d),
        }),
    }
}

/// Non-negative step count within [`MAX_HORIZON`]
fn bounded(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|v| *v <= MAX_HORIZON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(text: &str) -> Result<ScenarioSpec, ValidationError> {
        let value: serde_yaml::Value = serde_yaml::from_str(text).unwrap();
        let decl = ScenarioDeclaration::from_yaml_value(value).unwrap();
        validate_and_expand(&decl, "fallback")
    }

    #[test]
    fn test_horizon_defaults_when_missing_or_non_positive() {
        assert_eq!(parse("shocks: []").unwrap().horizon(), 8);
        assert_eq!(parse("meta: {horizon: 0}").unwrap().horizon(), 8);
        assert_eq!(parse("meta: {horizon: -3}").unwrap().horizon(), 8);
        assert_eq!(parse("meta: {horizon: 12}").unwrap().horizon(), 12);
    }

    #[test]
    fn test_name_falls_back() {
        assert_eq!(parse("meta: {horizon: 2}").unwrap().name(), "fallback");
        assert_eq!(parse("meta: {name: hike}").unwrap().name(), "hike");
    }

    #[test]
    fn test_expands_all_kinds() {
        let spec = parse(
            r#"
meta: {name: mixed, horizon: 4}
shocks:
  - {var: rate, type: STEP, size: "50%"}
  - {var: oil, type: pulse, start_h: 1, size: 0.2, duration: 2}
  - {var: fx, type: gradual, size: {kind: pct, value: "10%"}, duration: 3}
  - {var: credit, type: path, path: [0.1, -0.1]}
targets:
  include_prefix: ["asset."]
"#,
        )
        .unwrap();

        let shocks = spec.shocks();
        assert_eq!(shocks.len(), 4);
        assert_relative_eq!(shocks[0].size(), 0.5);
        assert_eq!(shocks[0].impulse().as_slice(), &[0.5; 5]);
        assert_eq!(shocks[1].impulse().as_slice(), &[0.0, 0.2, 0.2, 0.0, 0.0]);
        assert_relative_eq!(shocks[2].impulse().get(1), 0.05);
        assert_relative_eq!(shocks[2].impulse().get(4), 0.1);
        assert_eq!(shocks[3].impulse().as_slice(), &[0.1, -0.1, 0.0, 0.0, 0.0]);
        assert!(spec.targets().include_prefix.contains("asset."));
    }

    #[test]
    fn test_type_defaults_to_step() {
        let spec = parse("meta: {horizon: 2}\nshocks: [{var: rate, size: 1}]").unwrap();
        assert_eq!(spec.shocks()[0].kind(), &ShockKind::Step);
    }

    #[test]
    fn test_unknown_kind_names_shock() {
        let err = parse("shocks: [{var: rate, size: 1}, {var: oil, type: spike}]").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownShockKind {
                index: 1,
                var: "oil".to_string(),
                kind: "spike".to_string(),
            }
        );
    }

    #[test]
    fn test_path_requires_values() {
        let err = parse("shocks: [{var: oil, type: path}]").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { field: "path", .. }));

        let err = parse("shocks: [{var: oil, type: path, path: []}]").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { field: "path", .. }));
    }

    #[test]
    fn test_missing_var_rejected() {
        let err = parse("shocks: [{type: step, size: 1}]").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { field: "var", index: 0, .. }));
    }

    #[test]
    fn test_bad_size_rejected() {
        let err = parse("shocks: [{var: rate, size: huge}]").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSize { ref var, .. } if var == "rate"));
    }

    #[test]
    fn test_negative_start_and_duration_rejected() {
        let err = parse("shocks: [{var: rate, start_h: -1}]").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "start_h", .. }));

        let err = parse("shocks: [{var: rate, type: pulse, duration: 0}]").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "duration", .. }));
    }

    #[test]
    fn test_one_bad_shock_invalidates_scenario() {
        let result = parse(
            "shocks:\n  - {var: a, size: 0.1}\n  - {var: b, size: 0.2}\n  - {var: c, size: '??'}\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_step_counts_are_bounded() {
        let err = parse("meta: {horizon: 9223372036854775807}\nshocks: [{var: rate, size: 0.1}]").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));

        let err = parse("meta: {horizon: 4097}").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
        assert_eq!(parse("meta: {horizon: 4096}").unwrap().horizon(), MAX_HORIZON);

        let err = parse("shocks: [{var: rate, start_h: 1000000000000}]").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "start_h", .. }));

        let err = parse("shocks: [{var: rate, type: gradual, duration: 1000000000000}]").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "duration", .. }));
    }

    #[test]
    fn test_start_beyond_horizon_is_allowed() {
        let spec = parse("meta: {horizon: 2}\nshocks: [{var: rate, start_h: 10, size: 1}]").unwrap();
        assert_eq!(spec.shocks()[0].impulse().as_slice(), &[0.0; 3]);
    }

    #[test]
    fn test_mix_is_reserved() {
        let err = parse("shocks: [{var: rate, size: 1}, {var: mix, size: 1}]").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidField {
                index: 1,
                var: "mix".to_string(),
                field: "var",
                detail: "'mix' is reserved for the combined effect".to_string(),
            }
        );
    }

    #[test]
    fn test_integral_floats_and_numeric_strings() {
        let spec = parse(
            "meta: {horizon: 4.0}\nshocks: [{var: oil, type: pulse, start_h: '1', duration: 2.0, size: 1}]",
        )
        .unwrap();
        assert_eq!(spec.horizon(), 4);
        assert_eq!(spec.shocks()[0].impulse().as_slice(), &[0.0, 1.0, 1.0, 0.0, 0.0]);
    }
}
