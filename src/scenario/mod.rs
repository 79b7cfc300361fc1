//! Scenario declarations, validation and impulse construction

mod declaration;
mod impulse;
mod types;
mod validate;
pub mod loader;

pub use declaration::{
    parse_size, MetaDeclaration, ScenarioDeclaration, ShockDeclaration, TargetDeclaration,
};
pub use impulse::{build_impulse, ImpulseVector, ShockKind};
pub use types::{ScenarioSpec, ShockSpec, TargetFilter, DEFAULT_HORIZON, MAX_HORIZON};
pub use validate::validate_and_expand;
pub use loader::{load_scenario, load_scenario_from_str, parse_declaration, ScenarioFormat};
