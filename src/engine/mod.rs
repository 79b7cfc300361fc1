//! Convolution engine, target resolution and batch runner

mod convolution;
mod targets;
mod runner;

pub use convolution::{
    convolve, ConvolutionEngine, EffectRow, EffectSet, EffectSource, EngineConfig, MIX_SOURCE,
};
pub use targets::resolve_targets;
pub use runner::ScenarioRunner;
