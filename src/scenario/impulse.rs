//! Impulse vector construction for the four shock profiles
//!
//! An impulse vector is indexed by horizon step (index 0 = shock period) and
//! always spans `horizon + 1` samples. Windows that run past the horizon are
//! truncated, never wrapped or compressed.

use serde::Serialize;

/// Shape of a declared shock
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShockKind {
    /// Held at `size` from onset through the horizon
    Step,
    /// Held at `size` for `duration` samples, zero afterwards
    Pulse { duration: usize },
    /// Linear ramp from 0 to `size` over `duration` samples, then held
    Gradual { duration: usize },
    /// Explicit per-step values starting at onset
    Path { values: Vec<f64> },
}

impl ShockKind {
    /// Lowercase tag as used in scenario files
    pub fn tag(&self) -> &'static str {
        match self {
            ShockKind::Step => "step",
            ShockKind::Pulse { .. } => "pulse",
            ShockKind::Gradual { .. } => "gradual",
            ShockKind::Path { .. } => "path",
        }
    }
}

/// Dense, horizon-bounded impulse sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImpulseVector(Vec<f64>);

impl ImpulseVector {
    /// Horizon covered by this vector (length - 1)
    pub fn horizon(&self) -> usize {
        self.0.len() - 1
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value at horizon step `h`, zero outside the vector
    pub fn get(&self, h: usize) -> f64 {
        self.0.get(h).copied().unwrap_or(0.0)
    }
}

/// Build the impulse vector for one shock.
///
/// # Arguments
/// * `kind` - shock profile (carries duration / path values)
/// * `start_h` - onset step; an onset past the horizon gives an all-zero vector
/// * `size` - shock size as a decimal fraction
/// * `horizon` - last step index; the result has `horizon + 1` samples
pub fn build_impulse(kind: &ShockKind, start_h: usize, size: f64, horizon: usize) -> ImpulseVector {
    let len = horizon + 1;
    let mut values = vec![0.0; len];

    match kind {
        ShockKind::Step => {
            for v in values.iter_mut().skip(start_h) {
                *v = size;
            }
        }
        ShockKind::Pulse { duration } => {
            let end = start_h.saturating_add(*duration).min(len);
            for v in values.iter_mut().take(end).skip(start_h) {
                *v = size;
            }
        }
        ShockKind::Gradual { duration } => {
            // Last in-window sample reaches `size` exactly, then holds.
            let ramp = (*duration).max(1);
            for (i, v) in values.iter_mut().skip(start_h).enumerate() {
                *v = if i + 1 >= ramp {
                    size
                } else {
                    size * i as f64 / (ramp - 1) as f64
                };
            }
        }
        ShockKind::Path { values: path } => {
            for (v, p) in values.iter_mut().skip(start_h).zip(path) {
                *v = *p;
            }
        }
    }

    ImpulseVector(values)
}
