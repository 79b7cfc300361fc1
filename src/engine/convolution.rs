//! IRF application by truncated causal convolution
//!
//! For every resolved target and every shock the engine convolves the shock's
//! impulse vector with the (shock, target) response, truncated at the scenario
//! horizon:
//!
//! ```text
//! effect_s[h] = sum_{k=0..=h} impulse_s[k] * R[h-k]      h = 0..=horizon
//! effect_mix[h] = sum_s effect_s[h]
//! ```
//!
//! Targets are independent of each other, so they can be fanned out across a
//! rayon pool. Results are collected in target order, which keeps the output
//! identical to a sequential run.

use std::fmt;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Serialize, Serializer};

use crate::irf::IrfSurface;
use crate::scenario::ScenarioSpec;
use super::targets::resolve_targets;

/// Source label for the combined effect of all shocks
pub const MIX_SOURCE: &str = "mix";

/// Which shock an effect row belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectSource {
    /// Superposition of every shock in the scenario
    Mix,
    /// Contribution of a single shock variable
    Shock(String),
}

impl EffectSource {
    pub fn as_str(&self) -> &str {
        match self {
            EffectSource::Mix => MIX_SOURCE,
            EffectSource::Shock(var) => var,
        }
    }

    pub fn is_mix(&self) -> bool {
        matches!(self, EffectSource::Mix)
    }
}

impl fmt::Display for EffectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EffectSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Effect of the scenario on one target at one horizon step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectRow {
    pub target: String,
    pub h: usize,
    pub effect: f64,
    pub source: EffectSource,
}

/// Engine settings
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fan targets out across the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// All effect rows produced by one scenario run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectSet {
    pub scenario: String,
    pub horizon: usize,
    pub rows: Vec<EffectRow>,
}

impl EffectSet {
    pub fn rows(&self) -> &[EffectRow] {
        &self.rows
    }

    /// No target was resolved; renderers should show a "no material effect" state
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Targets in output order
    pub fn targets(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if out.last() != Some(&row.target.as_str()) {
                out.push(&row.target);
            }
        }
        out
    }

    /// Effect path for a (target, source) pair, ordered by h
    pub fn path(&self, target: &str, source: &str) -> Option<Vec<f64>> {
        let path: Vec<f64> = self
            .rows
            .iter()
            .filter(|r| r.target == target && r.source.as_str() == source)
            .map(|r| r.effect)
            .collect();
        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }
}

/// Truncated causal convolution of `impulse` with `response`.
///
/// Samples missing from either input read as zero; the output always has
/// `horizon + 1` samples.
pub fn convolve(impulse: &[f64], response: &[f64], horizon: usize) -> Vec<f64> {
    let len = horizon + 1;
    let mut out = vec![0.0; len];
    for (h, slot) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for k in 0..=h {
            let x = impulse.get(k).copied().unwrap_or(0.0);
            let r = response.get(h - k).copied().unwrap_or(0.0);
            acc += x * r;
        }
        *slot = acc;
    }
    out
}

/// Applies scenarios to an IRF surface
#[derive(Debug, Clone, Default)]
pub struct ConvolutionEngine {
    config: EngineConfig,
}

impl ConvolutionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Resolve targets from the surface universe and compute every effect row
    pub fn apply(&self, scenario: &ScenarioSpec, surface: &IrfSurface) -> EffectSet {
        let targets = resolve_targets(surface.targets(), scenario.targets());
        if targets.is_empty() {
            warn!("Scenario '{}': no targets resolved, effect set is empty", scenario.name());
        }
        for shock in scenario.shocks() {
            if !surface.has_shock(shock.variable()) {
                debug!(
                    "Scenario '{}': shock '{}' has no IRF coverage, contributes zero",
                    scenario.name(),
                    shock.variable()
                );
            }
        }

        let rows = self.apply_to_targets(scenario, surface, &targets);
        info!(
            "Scenario '{}': {} target(s), {} shock(s), {} effect row(s)",
            scenario.name(),
            targets.len(),
            scenario.shocks().len(),
            rows.len()
        );

        EffectSet {
            scenario: scenario.name().to_string(),
            horizon: scenario.horizon(),
            rows,
        }
    }

    /// Compute effect rows for an explicit target list
    pub fn apply_to_targets(
        &self,
        scenario: &ScenarioSpec,
        surface: &IrfSurface,
        targets: &[String],
    ) -> Vec<EffectRow> {
        let per_target: Vec<Vec<EffectRow>> = if self.config.parallel {
            targets
                .par_iter()
                .map(|t| target_rows(scenario, surface, t))
                .collect()
        } else {
            targets
                .iter()
                .map(|t| target_rows(scenario, surface, t))
                .collect()
        };
        per_target.into_iter().flatten().collect()
    }
}

/// Rows for one target: the mix path first, then one path per shock variable
/// in declaration order. Shocks repeated on the same variable are summed into
/// that variable's path.
fn target_rows(scenario: &ScenarioSpec, surface: &IrfSurface, target: &str) -> Vec<EffectRow> {
    let horizon = scenario.horizon();
    let mut mix = vec![0.0; horizon + 1];
    let mut by_source: Vec<(&str, Vec<f64>)> = Vec::new();

    for shock in scenario.shocks() {
        let response = surface.response(shock.variable(), target, horizon);
        let effect = convolve(shock.impulse().as_slice(), &response, horizon);

        for (m, e) in mix.iter_mut().zip(&effect) {
            *m += e;
        }

        match by_source.iter_mut().find(|(var, _)| *var == shock.variable()) {
            Some((_, acc)) => {
                for (a, e) in acc.iter_mut().zip(&effect) {
                    *a += e;
                }
            }
            None => by_source.push((shock.variable(), effect)),
        }
    }

    let mut rows = Vec::with_capacity((by_source.len() + 1) * (horizon + 1));
    push_path(&mut rows, target, EffectSource::Mix, &mix);
    for (var, path) in &by_source {
        push_path(&mut rows, target, EffectSource::Shock(var.to_string()), path);
    }
    rows
}

fn push_path(rows: &mut Vec<EffectRow>, target: &str, source: EffectSource, path: &[f64]) {
    for (h, effect) in path.iter().enumerate() {
        rows.push(EffectRow {
            target: target.to_string(),
            h,
            effect: *effect,
            source: source.clone(),
        });
    }
}
