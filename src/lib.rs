//! Shock Scenario - deterministic propagation of macro shocks through IRF surfaces
//!
//! This library provides:
//! - Scenario declarations (step, pulse, gradual and path shocks) with validation
//! - Impulse-response surface loading from long-format CSV
//! - Truncated convolution of shocks with responses, per shock and combined
//! - Target filtering, ranked snapshots and per-domain section views
//! - CSV output of effect tables

pub mod error;
pub mod scenario;
pub mod irf;
pub mod engine;
pub mod report;

// Re-export commonly used types
pub use error::{IrfLoadError, ScenarioLoadError, ValidationError, WriteError};
pub use scenario::{ScenarioSpec, ShockKind, ShockSpec, TargetFilter};
pub use irf::IrfSurface;
pub use engine::{ConvolutionEngine, EffectRow, EffectSet, EffectSource, EngineConfig, ScenarioRunner};
pub use report::{ReportConfig, ScenarioReport, Section};
