/// Filter parameter state
///
/// This struct stores the three slider values the filters draw from.
/// All three persist for the whole session: switching to a filter that
/// ignores one of them leaves its value untouched, so it is still there
/// when a filter that reads it comes back.

use serde::{Deserialize, Serialize};

use crate::filter::ParamKey;

/// The adjustable values fed into the active filter
///
/// No bounds are enforced here; the sliders constrain what the user can
/// enter, and each filter operation clamps what it actually consumes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Filter strength (0.0 to 1.0 on the slider)
    /// - 0.0 = no visible effect
    /// - 1.0 = full effect
    pub intensity: f32,

    /// Effect radius in pixels (0.0 to 200.0 on the slider)
    /// - Blur spread, crystal facet size, vignette clear zone
    pub radius: f32,

    /// Sampling scale (1.0 to 20.0 on the slider)
    /// - Pixellate cell size
    pub scale: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            radius: 100.0,
            scale: 5.0,
        }
    }
}

impl FilterParams {
    /// Create new default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value stored under a parameter key
    pub fn get(&self, key: ParamKey) -> f32 {
        match key {
            ParamKey::Intensity => self.intensity,
            ParamKey::Radius => self.radius,
            ParamKey::Scale => self.scale,
        }
    }

    /// Update exactly one value, leaving the other two alone
    pub fn set(&mut self, key: ParamKey, value: f32) {
        match key {
            ParamKey::Intensity => self.intensity = value,
            ParamKey::Radius => self.radius = value,
            ParamKey::Scale => self.scale = value,
        }
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Reset all values to their defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
