//! CSV-based IRF loader
//!
//! Reads the long-format `shock,target,h,resp` table written by the causal
//! model stage. Column order is free and extra columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::IrfLoadError;
use crate::scenario::MAX_HORIZON;
use super::surface::IrfSurface;

/// Default IRF file written by the SVAR stage
pub const DEFAULT_IRF_PATH: &str = "out_causal/irf_svar.csv";

/// Reduced-form VAR IRF used when the SVAR file is absent
pub const DEFAULT_FALLBACK_IRF_PATH: &str = "out_causal/irf_var.csv";

const REQUIRED_COLUMNS: [&str; 4] = ["shock", "target", "h", "resp"];

/// Pick `primary` if it exists, otherwise `fallback`
pub fn resolve_irf_path(primary: &Path, fallback: &Path) -> PathBuf {
    if primary.exists() {
        primary.to_path_buf()
    } else {
        warn!(
            "IRF file {} not found, falling back to {}",
            primary.display(),
            fallback.display()
        );
        fallback.to_path_buf()
    }
}

/// Load an IRF surface from a CSV file
pub fn load_irf_csv<P: AsRef<Path>>(path: P) -> Result<IrfSurface, IrfLoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let surface = load_irf_from_reader(file)?;
    info!(
        "Loaded IRF surface from {}: {} shock(s), {} target(s), {} pair(s)",
        path.display(),
        surface.shocks().len(),
        surface.targets().len(),
        surface.len()
    );
    Ok(surface)
}

/// Load an IRF surface from any reader (e.g., string buffer, network stream)
pub fn load_irf_from_reader<R: Read>(reader: R) -> Result<IrfSurface, IrfLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|&c| position(c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(IrfLoadError::Schema { missing });
    }
    // All four were found above.
    let idx: Vec<usize> = REQUIRED_COLUMNS.iter().filter_map(|&c| position(c)).collect();
    let (shock_idx, target_idx, h_idx, resp_idx) = (idx[0], idx[1], idx[2], idx[3]);

    let mut surface = IrfSurface::new();
    let mut skipped = 0usize;
    let mut beyond = 0usize;

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |i: usize| record.get(i).unwrap_or("").trim();

        let shock = field(shock_idx);
        let target = field(target_idx);
        if shock.is_empty() || target.is_empty() {
            return Err(IrfLoadError::Parse {
                line,
                detail: "empty shock or target".to_string(),
            });
        }

        let h = parse_step(field(h_idx)).ok_or_else(|| IrfLoadError::Parse {
            line,
            detail: format!("invalid h '{}'", field(h_idx)),
        })?;

        let raw_resp = field(resp_idx);
        if raw_resp.is_empty() {
            debug!("line {}: empty resp for ({}, {}), skipped", line, shock, target);
            skipped += 1;
            continue;
        }
        let resp: f64 = raw_resp.parse().map_err(|_| IrfLoadError::Parse {
            line,
            detail: format!("invalid resp '{}'", raw_resp),
        })?;
        if !resp.is_finite() {
            debug!("line {}: non-finite resp for ({}, {}), skipped", line, shock, target);
            skipped += 1;
            continue;
        }

        match h {
            Some(h) => {
                if !surface.insert(shock, target, h, resp) {
                    beyond += 1;
                }
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} IRF row(s) with negative h or missing response", skipped);
    }
    if beyond > 0 {
        warn!("Skipped {} IRF row(s) with h past the maximum horizon {}", beyond, MAX_HORIZON);
    }

    Ok(surface)
}

/// Parse a horizon index. Integral floats ("3.0") are accepted; a negative
/// step parses as `Some(None)` so the row can be skipped.
fn parse_step(raw: &str) -> Option<Option<usize>> {
    let value: i64 = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f: f64 = raw.parse().ok()?;
            if !f.is_finite() || f.fract() != 0.0 {
                return None;
            }
            f as i64
        }
    };
    Some(usize::try_from(value).ok())
}
