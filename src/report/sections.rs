//! Routing of target names into reporting domains
//!
//! A target name is lowercased and checked against each section's keywords in
//! priority order; a keyword matches when the name starts with it or contains
//! it. The first matching section wins and unmatched names fall into Assets.
//!
//! | Priority | Section     | Keywords |
//! |----------|-------------|----------|
//! | 1        | Economy     | macro., gdp, cpi, ppi, trade, fx, population |
//! | 2        | Corporate   | firm., employment, wage, sales, capex, industry |
//! | 3        | Finance     | policy_rate, m2, credit, spread, loan_to_deposit, bank_loan, npl |
//! | 4        | Investment  | asset., etf, reits, bond, gold |
//! | 5        | Real Estate | real_estate., housing, rent, construction, permit |
//! | 6        | Debt        | debt, dsr, dti, leverage, npl |
//! | 7        | Growth      | potential, tfp, productivity, growth, income, consumption, saving, participation |
//! | 8        | Assets      | asset., fx., commodity., bond., equity. |
//!
//! Because Economy and Investment come first, names like `fx.usdkrw` or
//! `asset.kospi` never reach the Assets rule.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::engine::EffectRow;
use super::summary::{rank_by_magnitude, TargetEffect};

/// Maximum entries per section in presentation views
pub const DEFAULT_SECTION_CAP: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Economy,
    Corporate,
    Finance,
    Investment,
    RealEstate,
    Debt,
    Growth,
    Assets,
}

/// Keyword rules in routing priority order
const SECTION_RULES: [(Section, &[&str]); 8] = [
    (Section::Economy, &["macro.", "gdp", "cpi", "ppi", "trade", "fx", "population"]),
    (Section::Corporate, &["firm.", "employment", "wage", "sales", "capex", "industry"]),
    (
        Section::Finance,
        &["policy_rate", "m2", "credit", "spread", "loan_to_deposit", "bank_loan", "npl"],
    ),
    (Section::Investment, &["asset.", "etf", "reits", "bond", "gold"]),
    (
        Section::RealEstate,
        &["real_estate.", "housing", "rent", "construction", "permit"],
    ),
    (Section::Debt, &["debt", "dsr", "dti", "leverage", "npl"]),
    (
        Section::Growth,
        &[
            "potential",
            "tfp",
            "productivity",
            "growth",
            "income",
            "consumption",
            "saving",
            "participation",
        ],
    ),
    (Section::Assets, &["asset.", "fx.", "commodity.", "bond.", "equity."]),
];

impl Section {
    /// Order sections appear in reports
    pub const PRESENTATION_ORDER: [Section; 8] = [
        Section::Economy,
        Section::Corporate,
        Section::Finance,
        Section::RealEstate,
        Section::Debt,
        Section::Growth,
        Section::Investment,
        Section::Assets,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Economy => "Economy",
            Section::Corporate => "Corporate",
            Section::Finance => "Finance",
            Section::Investment => "Investment",
            Section::RealEstate => "Real Estate",
            Section::Debt => "Debt",
            Section::Growth => "Growth",
            Section::Assets => "Assets",
        }
    }

    /// File-name friendly form, e.g. `real_estate`
    pub fn file_stem(&self) -> String {
        self.name().to_lowercase().replace(' ', "_")
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        SECTION_RULES
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, k)| *k)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Route a target name to its section
pub fn route_section(name: &str) -> Section {
    let lower = name.to_lowercase();
    SECTION_RULES
        .iter()
        .find(|(_, keys)| keys.iter().any(|k| lower.starts_with(k) || lower.contains(k)))
        .map(|(section, _)| *section)
        .unwrap_or(Section::Assets)
}

/// Ranked, capped effects for one section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub entries: Vec<TargetEffect>,
}

impl SectionView {
    /// Nothing in this section moved; render as "no material effect"
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group the `horizon_pick` mix effects by section.
///
/// Every section is returned, in presentation order, even when empty. Each
/// section is sorted by absolute effect and capped to `cap` entries.
pub fn sectionize(rows: &[EffectRow], horizon_pick: usize, cap: usize) -> Vec<SectionView> {
    let mut views: Vec<SectionView> = Section::PRESENTATION_ORDER
        .iter()
        .map(|&section| SectionView {
            section,
            entries: Vec::new(),
        })
        .collect();

    for row in rows.iter().filter(|r| r.h == horizon_pick && r.source.is_mix()) {
        let section = route_section(&row.target);
        if let Some(view) = views.iter_mut().find(|v| v.section == section) {
            view.entries.push(TargetEffect {
                target: row.target.clone(),
                effect: row.effect,
            });
        }
    }

    for view in &mut views {
        rank_by_magnitude(&mut view.entries);
        view.entries.truncate(cap);
    }

    views
}
