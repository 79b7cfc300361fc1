//! Target resolution against the IRF universe

use log::debug;

use crate::scenario::TargetFilter;

/// Resolve the participating targets from the universe and a filter.
///
/// Exactly one branch applies, first match wins:
/// 1. non-empty `include`: names present in both (unknown names dropped)
/// 2. non-empty `include_prefix`: names starting with any prefix
/// 3. otherwise: every name not in `exclude`
///
/// `exclude` only takes part in the last branch. The result keeps universe order.
pub fn resolve_targets<'a, I>(universe: I, filter: &TargetFilter) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let universe: Vec<&str> = universe.into_iter().collect();

    if !filter.include.is_empty() {
        for name in &filter.include {
            if !universe.contains(&name.as_str()) {
                debug!("include target '{}' has no IRF coverage, dropped", name);
            }
        }
        universe
            .iter()
            .filter(|t| filter.include.contains(**t))
            .map(|t| t.to_string())
            .collect()
    } else if !filter.include_prefix.is_empty() {
        universe
            .iter()
            .filter(|t| filter.include_prefix.iter().any(|p| t.starts_with(p.as_str())))
            .map(|t| t.to_string())
            .collect()
    } else {
        universe
            .iter()
            .filter(|t| !filter.exclude.contains(**t))
            .map(|t| t.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIVERSE: [&str; 5] = ["asset.kospi", "asset.reits", "gdp", "cpi", "fx.usdkrw"];

    #[test]
    fn test_include_wins_over_exclude() {
        let mut filter = TargetFilter::include(["a"]);
        filter.exclude.insert("a".to_string());
        assert_eq!(resolve_targets(["a", "b", "c"], &filter), vec!["a"]);
    }

    #[test]
    fn test_include_drops_unknown_names() {
        let filter = TargetFilter::include(["gdp", "unemployment"]);
        assert_eq!(resolve_targets(UNIVERSE, &filter), vec!["gdp"]);
    }

    #[test]
    fn test_prefix_ignores_exclude() {
        let mut filter = TargetFilter::include_prefix(["asset.", "fx."]);
        filter.exclude.insert("asset.reits".to_string());
        assert_eq!(
            resolve_targets(UNIVERSE, &filter),
            vec!["asset.kospi", "asset.reits", "fx.usdkrw"]
        );
    }

    #[test]
    fn test_exclude_only() {
        let filter = TargetFilter::exclude(["gdp", "cpi"]);
        assert_eq!(
            resolve_targets(UNIVERSE, &filter),
            vec!["asset.kospi", "asset.reits", "fx.usdkrw"]
        );
    }

    #[test]
    fn test_empty_filter_keeps_universe() {
        assert_eq!(resolve_targets(UNIVERSE, &TargetFilter::default()).len(), 5);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let filter = TargetFilter::include_prefix(["debt."]);
        assert!(resolve_targets(UNIVERSE, &filter).is_empty());
    }
}
