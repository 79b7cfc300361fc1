//! Raw scenario declaration as written in YAML/JSON scenario files
//!
//! ```yaml
//! meta: { name: rate_hike, horizon: 8 }
//! shocks:
//!   - { var: policy_rate, type: step, start_h: 0, size: "50%" }
//!   - { var: oil, type: path, path: [0.1, 0.05] }
//! targets: { include_prefix: ["asset."] }
//! ```
//!
//! Everything is optional at this layer; the validator decides what is required.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioDeclaration {
    #[serde(default)]
    pub meta: Option<MetaDeclaration>,
    #[serde(default)]
    pub shocks: Option<Vec<ShockDeclaration>>,
    #[serde(default)]
    pub targets: Option<TargetDeclaration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaDeclaration {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "step_count")]
    pub horizon: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShockDeclaration {
    #[serde(default)]
    pub var: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "step_count")]
    pub start_h: Option<i64>,
    /// Number, "50%"-style string, or `{kind, value}` wrapper
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default, deserialize_with = "step_count")]
    pub duration: Option<i64>,
    #[serde(default, alias = "path_values")]
    pub path: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetDeclaration {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub include_prefix: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ScenarioDeclaration {
    /// Interpret an already-parsed YAML document
    pub fn from_yaml_value(value: Value) -> Result<Self, serde_yaml::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }

    /// Interpret an already-parsed JSON document
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepCount {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Integer step counts, also written as integral floats (`4.0`) or numeric strings (`"2"`)
fn step_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<StepCount>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(raw) => raw,
    };
    let value = match raw {
        StepCount::Int(v) => Some(v),
        StepCount::Float(f) => integral(f),
        StepCount::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
    };
    value
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom("expected an integer step count"))
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parse a declared shock size into a decimal fraction.
///
/// Accepted forms: a bare number (`0.5`), a numeric string (`"0.5"`), a
/// percentage string (`"50%"` -> 0.5), or a `{kind, value}` mapping whose
/// `value` follows the same rules. The error string describes what was wrong.
pub fn parse_size(value: &Value) -> Result<f64, String> {
    let size = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number {} is not representable as f64", n))?,
        Value::String(s) => parse_size_str(s)?,
        Value::Mapping(map) => {
            match map.get("kind") {
                Some(Value::String(_)) => {}
                Some(other) => return Err(format!("wrapper 'kind' must be a string, got {:?}", other)),
                None => return Err("wrapper is missing 'kind'".to_string()),
            }
            let inner = map
                .get("value")
                .ok_or_else(|| "wrapper is missing 'value'".to_string())?;
            parse_size(inner)?
        }
        other => return Err(format!("unsupported size value {:?}", other)),
    };

    if !size.is_finite() {
        return Err(format!("size must be finite, got {}", size));
    }
    Ok(size)
}

fn parse_size_str(raw: &str) -> Result<f64, String> {
    let text = raw.trim();
    if let Some(pct) = text.strip_suffix('%') {
        let pct: f64 = pct
            .trim()
            .parse()
            .map_err(|_| format!("cannot parse percentage '{}'", raw))?;
        Ok(pct / 100.0)
    } else {
        text.parse()
            .map_err(|_| format!("cannot parse size '{}'", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_size_forms() {
        assert_relative_eq!(parse_size(&yaml("0.25")).unwrap(), 0.25);
        assert_relative_eq!(parse_size(&yaml("-1")).unwrap(), -1.0);
        assert_relative_eq!(parse_size(&yaml("'0.3'")).unwrap(), 0.3);
        assert_relative_eq!(parse_size(&yaml("'50%'")).unwrap(), 0.5);
        assert_relative_eq!(parse_size(&yaml("' -12.5 % '")).unwrap(), -0.125);
        assert_relative_eq!(parse_size(&yaml("{kind: pct, value: '25%'}")).unwrap(), 0.25);
        assert_relative_eq!(parse_size(&yaml("{kind: abs, value: 0.01}")).unwrap(), 0.01);
    }

    #[test]
    fn test_size_rejects_garbage() {
        assert!(parse_size(&yaml("'lots'")).is_err());
        assert!(parse_size(&yaml("'%'")).is_err());
        assert!(parse_size(&yaml("true")).is_err());
        assert!(parse_size(&yaml("[1, 2]")).is_err());
        assert!(parse_size(&yaml("{value: 0.1}")).is_err());
        assert!(parse_size(&yaml("{kind: pct}")).is_err());
        assert!(parse_size(&yaml("'nan'")).is_err());
        assert!(parse_size(&yaml(".inf")).is_err());
    }

    #[test]
    fn test_declaration_from_yaml() {
        let decl = ScenarioDeclaration::from_yaml_value(yaml(
            "meta: {name: hike, horizon: 6}\nshocks:\n  - {var: rate, type: path, path_values: [0.1, 0.2]}\n",
        ))
        .unwrap();
        let meta = decl.meta.unwrap();
        assert_eq!(meta.name.as_deref(), Some("hike"));
        assert_eq!(meta.horizon, Some(6));
        let shocks = decl.shocks.unwrap();
        assert_eq!(shocks[0].path.as_deref(), Some(&[0.1, 0.2][..]));
        assert!(decl.targets.is_none());
    }

    #[test]
    fn test_declaration_from_json() {
        let value = serde_json::json!({
            "shocks": [{"var": "fx", "type": "pulse", "size": "10%", "duration": 2}],
            "targets": {"exclude": ["gdp"]}
        });
        let decl = ScenarioDeclaration::from_json_value(value).unwrap();
        let shocks = decl.shocks.unwrap();
        let shock = &shocks[0];
        assert_eq!(shock.kind.as_deref(), Some("pulse"));
        assert_relative_eq!(parse_size(shock.size.as_ref().unwrap()).unwrap(), 0.1);
        assert_eq!(decl.targets.unwrap().exclude, vec!["gdp".to_string()]);
    }

    #[test]
    fn test_empty_document_is_default() {
        let decl = ScenarioDeclaration::from_yaml_value(Value::Null).unwrap();
        assert!(decl.shocks.is_none());
    }

    #[test]
    fn test_step_counts_accept_integral_forms() {
        let decl = ScenarioDeclaration::from_yaml_value(yaml(
            "meta: {horizon: 6.0}\nshocks:\n  - {var: rate, start_h: '2', duration: ' 3 '}\n",
        ))
        .unwrap();
        assert_eq!(decl.meta.unwrap().horizon, Some(6));
        let shocks = decl.shocks.unwrap();
        assert_eq!(shocks[0].start_h, Some(2));
        assert_eq!(shocks[0].duration, Some(3));

        let value = serde_json::json!({"meta": {"horizon": 5.0}, "shocks": [{"var": "x", "start_h": null}]});
        let decl = ScenarioDeclaration::from_json_value(value).unwrap();
        assert_eq!(decl.meta.unwrap().horizon, Some(5));
        assert_eq!(decl.shocks.unwrap()[0].start_h, None);
    }

    #[test]
    fn test_step_counts_reject_fractions_and_words() {
        assert!(ScenarioDeclaration::from_yaml_value(yaml("meta: {horizon: 2.5}")).is_err());
        assert!(ScenarioDeclaration::from_yaml_value(yaml("shocks: [{var: a, start_h: soon}]")).is_err());
        assert!(ScenarioDeclaration::from_yaml_value(yaml("shocks: [{var: a, duration: [1]}]")).is_err());
    }
}
