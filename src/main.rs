//! Shock Scenario CLI
//!
//! Applies a scenario file to an IRF surface and writes the effect tables

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use shock_scenario::{
    irf::{load_irf_csv, resolve_irf_path, DEFAULT_FALLBACK_IRF_PATH, DEFAULT_IRF_PATH},
    report::{write_scenario_outputs, DEFAULT_SECTION_CAP, DEFAULT_SUMMARY_HORIZON},
    scenario::load_scenario,
    EngineConfig, ReportConfig, ScenarioReport, ScenarioRunner,
};

#[derive(Debug, Parser)]
#[command(name = "shock_scenario", version, about = "Propagate scenario shocks through an IRF surface")]
struct Args {
    /// Scenario file (YAML, or JSON with a .json extension)
    #[arg(long)]
    scenario: PathBuf,

    /// Long-format IRF csv (shock,target,h,resp)
    #[arg(long, default_value = DEFAULT_IRF_PATH)]
    irf: PathBuf,

    /// IRF csv used when --irf does not exist
    #[arg(long, default_value = DEFAULT_FALLBACK_IRF_PATH)]
    fallback_irf: PathBuf,

    /// Output directory
    #[arg(long, default_value = "out_scenario")]
    outdir: PathBuf,

    /// Horizon step for the ranked snapshot and section tables
    #[arg(long, default_value_t = DEFAULT_SUMMARY_HORIZON)]
    summary_h: usize,

    /// Maximum entries per section table
    #[arg(long, default_value_t = DEFAULT_SECTION_CAP)]
    section_cap: usize,

    /// Number of top effects printed to the console
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Compute targets on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print a JSON run summary instead of the console table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    irf_path: String,
    outdir: String,
    files: Vec<String>,
    effect_rows: usize,
    execution_time_ms: u64,
    report: &'a ScenarioReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let scenario = load_scenario(&args.scenario)
        .with_context(|| format!("invalid scenario {}", args.scenario.display()))?;

    let irf_path = resolve_irf_path(&args.irf, &args.fallback_irf);
    let surface = load_irf_csv(&irf_path)
        .with_context(|| format!("failed to load IRF surface {}", irf_path.display()))?;

    let runner = ScenarioRunner::with_config(
        surface,
        EngineConfig {
            parallel: !args.sequential,
        },
    );
    let effects = runner.run(&scenario);

    let report_config = ReportConfig {
        summary_horizon: args.summary_h,
        section_cap: args.section_cap,
        top_n: None,
    };
    let report = ScenarioReport::build(&effects, &report_config);

    let files = write_scenario_outputs(
        &args.outdir,
        effects.rows(),
        &report.summary,
        &report.sections,
        args.summary_h,
    )
    .with_context(|| format!("failed to write outputs to {}", args.outdir.display()))?;

    info!("Scenario '{}' done in {:?}", scenario.name(), start.elapsed());

    if args.json {
        let summary = RunSummary {
            irf_path: irf_path.display().to_string(),
            outdir: args.outdir.display().to_string(),
            files: files.iter().map(|p| p.display().to_string()).collect(),
            effect_rows: effects.rows().len(),
            execution_time_ms: start.elapsed().as_millis() as u64,
            report: &report,
        };
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!("Scenario: {}", scenario.name());
    println!("  Horizon: {}", scenario.horizon());
    println!("  Shocks:  {}", scenario.shocks().len());
    for shock in scenario.shocks() {
        println!(
            "    {:<20} {:<8} start_h={:<3} size={:.4}",
            shock.variable(),
            shock.kind().tag(),
            shock.start_h(),
            shock.size()
        );
    }
    println!("  IRF:     {}", irf_path.display());
    println!();

    if report.is_empty() {
        println!("No material effect at h={}", args.summary_h);
    } else {
        println!("Top effects @h={}:", args.summary_h);
        println!("{:<32} {:>12}", "Target", "Effect");
        println!("{}", "-".repeat(45));
        for entry in report.summary.iter().take(args.top) {
            println!("{:<32} {:>12.6}", entry.target, entry.effect);
        }
        if report.summary.len() > args.top {
            println!("... ({} more targets)", report.summary.len() - args.top);
        }
    }

    println!("\nSections:");
    for view in &report.sections {
        println!("  {:<12} {:>3} target(s)", view.section.name(), view.entries.len());
    }

    println!("\nOutput written to {} ({} files)", args.outdir.display(), files.len());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
