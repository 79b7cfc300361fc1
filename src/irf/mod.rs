//! Impulse-response surface and its loader

mod surface;
pub mod loader;

pub use surface::IrfSurface;
pub use loader::{
    load_irf_csv, load_irf_from_reader, resolve_irf_path, DEFAULT_FALLBACK_IRF_PATH,
    DEFAULT_IRF_PATH,
};
