//! Cross-sectional snapshot of mix effects at one horizon

use serde::Serialize;

use crate::engine::EffectRow;

/// A target and its combined effect at the chosen horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetEffect {
    pub target: String,
    pub effect: f64,
}

/// Mix effects at `horizon_pick`, ranked by absolute size (largest first).
///
/// Ties keep row order. A horizon beyond the scenario's yields an empty list.
pub fn summarize_effects(rows: &[EffectRow], horizon_pick: usize) -> Vec<TargetEffect> {
    let mut picked: Vec<TargetEffect> = rows
        .iter()
        .filter(|r| r.h == horizon_pick && r.source.is_mix())
        .map(|r| TargetEffect {
            target: r.target.clone(),
            effect: r.effect,
        })
        .collect();
    rank_by_magnitude(&mut picked);
    picked
}

/// Same as [`summarize_effects`], truncated to the `n` largest
pub fn top_effects(rows: &[EffectRow], horizon_pick: usize, n: usize) -> Vec<TargetEffect> {
    let mut ranked = summarize_effects(rows, horizon_pick);
    ranked.truncate(n);
    ranked
}

pub(crate) fn rank_by_magnitude(effects: &mut [TargetEffect]) {
    effects.sort_by(|a, b| b.effect.abs().total_cmp(&a.effect.abs()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EffectSource;

    fn row(target: &str, h: usize, effect: f64, source: EffectSource) -> EffectRow {
        EffectRow {
            target: target.to_string(),
            h,
            effect,
            source,
        }
    }

    fn sample_rows() -> Vec<EffectRow> {
        vec![
            row("gdp", 4, -0.15, EffectSource::Mix),
            row("cpi", 4, 0.02, EffectSource::Mix),
            row("asset.kospi", 4, 0.4, EffectSource::Mix),
            row("asset.kospi", 4, 9.0, EffectSource::Shock("rate".to_string())),
            row("fx.usdkrw", 3, 5.0, EffectSource::Mix),
            row("wage", 4, 0.15, EffectSource::Mix),
        ]
    }

    #[test]
    fn test_ranked_by_absolute_effect() {
        let summary = summarize_effects(&sample_rows(), 4);
        let names: Vec<&str> = summary.iter().map(|e| e.target.as_str()).collect();
        // gdp and wage tie on |effect|; row order is kept
        assert_eq!(names, vec!["asset.kospi", "gdp", "wage", "cpi"]);
        assert_eq!(summary[1].effect, -0.15);
    }

    #[test]
    fn test_top_n_and_out_of_range_horizon() {
        assert_eq!(top_effects(&sample_rows(), 4, 2).len(), 2);
        assert!(summarize_effects(&sample_rows(), 9).is_empty());
    }
}
