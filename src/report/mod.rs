//! Structured views over effect rows: ranked snapshot, sections, CSV output
//!
//! Rendering to markdown/HTML is left to downstream tools; this module only
//! produces rows.

mod summary;
mod sections;
pub mod writer;

pub use summary::{summarize_effects, top_effects, TargetEffect};
pub use sections::{route_section, sectionize, Section, SectionView, DEFAULT_SECTION_CAP};
pub use writer::{write_effects_csv, write_scenario_outputs, write_target_effects_csv};

use serde::Serialize;

use crate::engine::EffectSet;

/// Default horizon for the snapshot and section views
pub const DEFAULT_SUMMARY_HORIZON: usize = 4;

/// Configuration for building a scenario report
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Horizon step for the snapshot and section views
    pub summary_horizon: usize,

    /// Maximum entries per section
    pub section_cap: usize,

    /// Optional truncation of the ranked snapshot
    pub top_n: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_horizon: DEFAULT_SUMMARY_HORIZON,
            section_cap: DEFAULT_SECTION_CAP,
            top_n: None,
        }
    }
}

/// Snapshot and section views for one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub horizon: usize,
    pub summary_horizon: usize,
    pub summary: Vec<TargetEffect>,
    pub sections: Vec<SectionView>,
}

impl ScenarioReport {
    pub fn build(effects: &EffectSet, config: &ReportConfig) -> Self {
        let mut summary = summarize_effects(effects.rows(), config.summary_horizon);
        if let Some(n) = config.top_n {
            summary.truncate(n);
        }
        let sections = sectionize(effects.rows(), config.summary_horizon, config.section_cap);

        Self {
            scenario: effects.scenario.clone(),
            horizon: effects.horizon,
            summary_horizon: config.summary_horizon,
            summary,
            sections,
        }
    }

    /// Nothing moved at the summary horizon
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    pub fn section(&self, section: Section) -> Option<&SectionView> {
        self.sections.iter().find(|v| v.section == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EffectRow, EffectSource};

    #[test]
    fn test_report_from_effect_set() {
        let effects = EffectSet {
            scenario: "hike".to_string(),
            horizon: 4,
            rows: vec![
                EffectRow {
                    target: "gdp".to_string(),
                    h: 4,
                    effect: -0.15,
                    source: EffectSource::Mix,
                },
                EffectRow {
                    target: "asset.kospi".to_string(),
                    h: 4,
                    effect: -0.3,
                    source: EffectSource::Mix,
                },
            ],
        };
        let config = ReportConfig {
            top_n: Some(1),
            ..Default::default()
        };
        let report = ScenarioReport::build(&effects, &config);

        assert_eq!(report.summary.len(), 1);
        assert_eq!(report.summary[0].target, "asset.kospi");
        assert_eq!(report.section(Section::Economy).unwrap().entries.len(), 1);
        assert_eq!(report.section(Section::Investment).unwrap().entries[0].effect, -0.3);
        assert!(report.section(Section::Debt).unwrap().is_empty());
    }

    #[test]
    fn test_empty_effect_set_report() {
        let effects = EffectSet {
            scenario: "none".to_string(),
            horizon: 8,
            rows: Vec::new(),
        };
        let report = ScenarioReport::build(&effects, &ReportConfig::default());
        assert!(report.is_empty());
        assert_eq!(report.sections.len(), 8);
        assert!(report.sections.iter().all(SectionView::is_empty));
    }
}
