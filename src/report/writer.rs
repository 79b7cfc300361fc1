//! CSV output for effect tables
//!
//! Layout of an output directory:
//! - `effects_full.csv`: every effect row (`target,h,effect,source`)
//! - `summary_h{N}.csv`: ranked mix snapshot at horizon N
//! - `{section}_h{N}.csv`: one per non-empty section

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::engine::EffectRow;
use crate::error::WriteError;
use super::sections::SectionView;
use super::summary::TargetEffect;

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), WriteError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the full effect table
pub fn write_effects_csv<W: Write>(writer: W, rows: &[EffectRow]) -> Result<(), WriteError> {
    if rows.is_empty() {
        return write_header(writer, &["target", "h", "effect", "source"]);
    }
    write_rows(writer, rows)
}

/// Write a ranked `{target, effect}` table
pub fn write_target_effects_csv<W: Write>(writer: W, effects: &[TargetEffect]) -> Result<(), WriteError> {
    if effects.is_empty() {
        return write_header(writer, &["target", "effect"]);
    }
    write_rows(writer, effects)
}

// serde-driven headers only appear with the first record
fn write_header<W: Write>(writer: W, columns: &[&str]) -> Result<(), WriteError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns)?;
    csv_writer.flush()?;
    Ok(())
}

/// Write the standard output set into `outdir`, creating it if needed.
///
/// Returns the paths written, in write order.
pub fn write_scenario_outputs(
    outdir: &Path,
    rows: &[EffectRow],
    summary: &[TargetEffect],
    sections: &[SectionView],
    horizon_pick: usize,
) -> Result<Vec<PathBuf>, WriteError> {
    fs::create_dir_all(outdir)?;
    let mut written = Vec::new();

    let path = outdir.join("effects_full.csv");
    write_effects_csv(fs::File::create(&path)?, rows)?;
    written.push(path);

    let path = outdir.join(format!("summary_h{}.csv", horizon_pick));
    write_target_effects_csv(fs::File::create(&path)?, summary)?;
    written.push(path);

    for view in sections.iter().filter(|v| !v.is_empty()) {
        let path = outdir.join(format!("{}_h{}.csv", view.section.file_stem(), horizon_pick));
        write_target_effects_csv(fs::File::create(&path)?, &view.entries)?;
        written.push(path);
    }

    info!("Wrote {} file(s) to {}", written.len(), outdir.display());
    Ok(written)
}
