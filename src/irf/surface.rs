//! Read-only impulse-response surface keyed by (shock, target)

use std::collections::{BTreeSet, HashMap};

use crate::scenario::MAX_HORIZON;

/// Dense response vectors indexed by shock variable, then target variable.
///
/// Built once per run from long-format samples and never mutated by the engine.
/// A missing (shock, target) pair means the model has no coverage for it and is
/// read as an all-zero response. Samples past [`MAX_HORIZON`] are never stored.
#[derive(Debug, Clone, Default)]
pub struct IrfSurface {
    responses: HashMap<String, HashMap<String, Vec<f64>>>,
    targets: BTreeSet<String>,
}

impl IrfSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single response sample, zero-filling any gap before `h`.
    ///
    /// A repeated `h` keeps the last value. Returns `false` (and stores nothing)
    /// when `h` lies past [`MAX_HORIZON`].
    pub fn insert(&mut self, shock: &str, target: &str, h: usize, resp: f64) -> bool {
        if h > MAX_HORIZON {
            return false;
        }
        let vec = self
            .responses
            .entry(shock.to_string())
            .or_default()
            .entry(target.to_string())
            .or_default();
        if vec.len() <= h {
            vec.resize(h + 1, 0.0);
        }
        vec[h] = resp;
        self.targets.insert(target.to_string());
        true
    }

    /// Replace the whole response vector for a pair
    pub fn insert_response(&mut self, shock: &str, target: &str, mut response: Vec<f64>) {
        response.truncate(MAX_HORIZON + 1);
        self.responses
            .entry(shock.to_string())
            .or_default()
            .insert(target.to_string(), response);
        self.targets.insert(target.to_string());
    }

    /// Raw response vector for a pair, `None` when the model does not cover it
    pub fn lookup(&self, shock: &str, target: &str) -> Option<&[f64]> {
        self.responses
            .get(shock)
            .and_then(|by_target| by_target.get(target))
            .map(Vec::as_slice)
    }

    /// Response vector truncated / zero-extended to exactly `horizon + 1` samples
    pub fn response(&self, shock: &str, target: &str, horizon: usize) -> Vec<f64> {
        let mut out = vec![0.0; horizon + 1];
        if let Some(resp) = self.lookup(shock, target) {
            for (o, r) in out.iter_mut().zip(resp) {
                *o = *r;
            }
        }
        out
    }

    /// Whether any response to `shock` exists
    pub fn has_shock(&self, shock: &str) -> bool {
        self.responses.contains_key(shock)
    }

    /// All shock variables, sorted
    pub fn shocks(&self) -> Vec<&str> {
        let mut shocks: Vec<&str> = self.responses.keys().map(String::as_str).collect();
        shocks.sort_unstable();
        shocks
    }

    /// Target universe, sorted and deduplicated
    pub fn targets(&self) -> Vec<&str> {
        self.targets.iter().map(String::as_str).collect()
    }

    /// Number of (shock, target) pairs
    pub fn len(&self) -> usize {
        self.responses.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
