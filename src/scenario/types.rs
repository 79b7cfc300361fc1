//! Normalized scenario structures
//!
//! Built once per scenario file by the validator and immutable afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::impulse::{build_impulse, ImpulseVector, ShockKind};

/// Horizon used when a scenario declares none, or a non-positive one
pub const DEFAULT_HORIZON: usize = 8;

/// Largest horizon, `start_h` or `duration` a scenario file may declare.
/// IRF samples past this step can never be reached and are dropped on load.
pub const MAX_HORIZON: usize = 4096;

/// Which targets take part in a run.
///
/// Resolution precedence lives in [`crate::engine::resolve_targets`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetFilter {
    #[serde(default)]
    pub include: BTreeSet<String>,
    #[serde(default)]
    pub include_prefix: BTreeSet<String>,
    #[serde(default)]
    pub exclude: BTreeSet<String>,
}

impl TargetFilter {
    /// Filter that keeps only the named targets
    pub fn include<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Filter that keeps targets starting with any of the prefixes
    pub fn include_prefix<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_prefix: prefixes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Filter that keeps everything except the named targets
    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// One validated shock with its impulse already materialized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShockSpec {
    variable: String,
    kind: ShockKind,
    start_h: usize,
    size: f64,
    impulse: ImpulseVector,
}

impl ShockSpec {
    fn new(variable: String, kind: ShockKind, start_h: usize, size: f64, horizon: usize) -> Self {
        let impulse = build_impulse(&kind, start_h, size, horizon);
        Self {
            variable,
            kind,
            start_h,
            size,
            impulse,
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn kind(&self) -> &ShockKind {
        &self.kind
    }

    pub fn start_h(&self) -> usize {
        self.start_h
    }

    /// Shock size as a decimal fraction
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn impulse(&self) -> &ImpulseVector {
        &self.impulse
    }
}

/// A fully expanded scenario ready for the convolution engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSpec {
    name: String,
    horizon: usize,
    shocks: Vec<ShockSpec>,
    targets: TargetFilter,
}

impl ScenarioSpec {
    /// Start a scenario with no shocks. A zero horizon falls back to [`DEFAULT_HORIZON`].
    pub fn new(name: impl Into<String>, horizon: usize, targets: TargetFilter) -> Self {
        Self {
            name: name.into(),
            horizon: if horizon == 0 { DEFAULT_HORIZON } else { horizon },
            shocks: Vec::new(),
            targets,
        }
    }

    /// Add a shock; its impulse vector is built against this scenario's horizon
    pub fn with_shock(
        mut self,
        variable: impl Into<String>,
        kind: ShockKind,
        start_h: usize,
        size: f64,
    ) -> Self {
        let shock = ShockSpec::new(variable.into(), kind, start_h, size, self.horizon);
        self.shocks.push(shock);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn shocks(&self) -> &[ShockSpec] {
        &self.shocks
    }

    pub fn targets(&self) -> &TargetFilter {
        &self.targets
    }
}
