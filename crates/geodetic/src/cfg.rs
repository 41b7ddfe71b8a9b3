//! Fixed constants and small tolerance configs.
//!
//! Policy
//! - The sphere radius is fixed; there is no ellipsoidal model.
//! - Hull tolerances live here so tests and callers agree on them.

/// Mean Earth radius in kilometers used by every surface-distance formula.
pub const EARTH_RADIUS: f64 = 6371.0;

/// Two mesh points closer than this (planar units) are merged before hull construction.
pub(crate) const HULL_DEDUP_EPS: f64 = 1e-12;

/// Hull construction tolerances.
#[derive(Clone, Copy, Debug)]
pub struct HullCfg {
    pub dedup_eps: f64,
}

impl Default for HullCfg {
    fn default() -> Self {
        Self {
            dedup_eps: HULL_DEDUP_EPS,
        }
    }
}
