//! Scenario runner for efficient batch simulations
//!
//! Loads the IRF surface once, then runs many scenarios against it without
//! re-reading the CSV.

use std::path::Path;

use rayon::prelude::*;

use crate::error::IrfLoadError;
use crate::irf::{load_irf_csv, IrfSurface};
use crate::scenario::ScenarioSpec;
use super::convolution::{ConvolutionEngine, EffectSet, EngineConfig};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("out_causal/irf_svar.csv"))?;
///
/// for spec in &scenarios {
///     let effects = runner.run(spec);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    surface: IrfSurface,
    engine: ConvolutionEngine,
}

impl ScenarioRunner {
    /// Create runner over an already-built surface with default engine settings
    pub fn new(surface: IrfSurface) -> Self {
        Self::with_config(surface, EngineConfig::default())
    }

    pub fn with_config(surface: IrfSurface, config: EngineConfig) -> Self {
        Self {
            surface,
            engine: ConvolutionEngine::new(config),
        }
    }

    /// Create runner by loading the surface from a long-format IRF CSV
    pub fn from_csv_path(path: &Path) -> Result<Self, IrfLoadError> {
        Ok(Self::new(load_irf_csv(path)?))
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &ScenarioSpec) -> EffectSet {
        self.engine.apply(scenario, &self.surface)
    }

    /// Run several scenarios against the same surface, results in input order
    pub fn run_batch(&self, scenarios: &[ScenarioSpec]) -> Vec<EffectSet> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    /// Surface shared by every run
    pub fn surface(&self) -> &IrfSurface {
        &self.surface
    }
}
