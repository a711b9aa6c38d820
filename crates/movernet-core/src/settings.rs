//! Runtime-mutable settings for the mover system.
//!
//! The host owns one [`MoverSettings`] and may change it at any time
//! between simulation steps. Wattage changes must be pushed into the
//! network registry (its `set_wattage_config`) so already-built networks
//! pick them up retroactively.
//!
//! JSON loading is feature-gated behind `settings-io`.

use serde::{Deserialize, Serialize};

use crate::watts::Watts;

/// Pathing cost increment used when the explicit override is disabled.
pub const DEFAULT_PATHING_INCREMENT: i32 = 20;

/// Wattage constants consumed by the network registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WattageConfig {
    /// Draw of a hub with no conveyor tiles attached.
    pub hub_base: Watts,
    /// Additional draw per non-hub network member.
    pub per_tile: Watts,
}

impl Default for WattageConfig {
    fn default() -> Self {
        Self {
            hub_base: Watts::from_num(100),
            per_tile: Watts::from_num(10),
        }
    }
}

/// All runtime tuning for movers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverSettings {
    /// Movement cost of a powered mover tile. Lower is faster; the
    /// surrounding terrain cost is ignored while on a powered mover.
    pub movespeed_path_cost: i32,
    /// When true, `pathing_path_cost` replaces the default search-bias
    /// increment of [`DEFAULT_PATHING_INCREMENT`].
    pub use_explicit_pathing_cost: bool,
    /// Explicit search-bias increment. May be negative.
    pub pathing_path_cost: i32,
    /// When true, movers discount movement in every direction instead
    /// of only along their facing.
    pub omni_mover: bool,
    /// Hub/tile wattage constants.
    pub wattage: WattageConfig,
}

impl Default for MoverSettings {
    fn default() -> Self {
        Self {
            movespeed_path_cost: 26,
            use_explicit_pathing_cost: false,
            pathing_path_cost: DEFAULT_PATHING_INCREMENT,
            omni_mover: false,
            wattage: WattageConfig::default(),
        }
    }
}

impl MoverSettings {
    /// The cost increment applied for or against a mover's facing.
    ///
    /// Movement-speed adjustment always uses the default increment; the
    /// explicit override only affects search bias.
    pub fn cost_increment(&self, for_move_speed: bool) -> i32 {
        if !for_move_speed && self.use_explicit_pathing_cost {
            self.pathing_path_cost
        } else {
            DEFAULT_PATHING_INCREMENT
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loading (settings-io)
// ---------------------------------------------------------------------------

/// Errors that can occur while loading settings from a data file.
#[cfg(feature = "settings-io")]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(feature = "settings-io")]
impl MoverSettings {
    /// Load settings from a JSON string. Missing fields fall back to
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_tuning() {
        let s = MoverSettings::default();
        assert_eq!(s.movespeed_path_cost, 26);
        assert!(!s.use_explicit_pathing_cost);
        assert_eq!(s.pathing_path_cost, 20);
        assert!(!s.omni_mover);
        assert_eq!(s.wattage.hub_base, Watts::from_num(100));
        assert_eq!(s.wattage.per_tile, Watts::from_num(10));
    }

    #[test]
    fn increment_ignores_explicit_override_for_move_speed() {
        let s = MoverSettings {
            use_explicit_pathing_cost: true,
            pathing_path_cost: -15,
            ..MoverSettings::default()
        };
        assert_eq!(s.cost_increment(true), DEFAULT_PATHING_INCREMENT);
        assert_eq!(s.cost_increment(false), -15);
    }

    #[test]
    fn increment_default_when_override_disabled() {
        let s = MoverSettings::default();
        assert_eq!(s.cost_increment(false), DEFAULT_PATHING_INCREMENT);
    }

    #[cfg(feature = "settings-io")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let s = MoverSettings::from_json(r#"{ "movespeed_path_cost": 10 }"#).unwrap();
        assert_eq!(s.movespeed_path_cost, 10);
        assert_eq!(s.pathing_path_cost, 20);
    }

    #[cfg(feature = "settings-io")]
    #[test]
    fn malformed_json_is_an_error() {
        assert!(MoverSettings::from_json("not json").is_err());
    }
}
