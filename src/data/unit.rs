//! Serde model of the mod `Units.json` format and its mapping onto
//! [UnitStats]. Only the fields the force formula needs are modeled;
//! everything else in a unit entry is ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::force::{compute_base_force, Domain, ForceError, ForceResult, UnitStats};
use crate::uniques::{parse_uniques, Modifier};

/// Substrings of `unitType` that mark a unit as naval.
const NAVAL_INDICATORS: &[&str] = &["water", "submarine", "carrier", "ship"];

/// Substrings of `unitType` that mark a unit as air.
const AIR_INDICATORS: &[&str] = &["air", "fighter", "bomber", "missile"];

/// One unit entry as it appears in `Units.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub name: String,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub movement: Option<f64>,
    #[serde(default)]
    pub strength: Option<f64>,
    #[serde(default)]
    pub ranged_strength: Option<f64>,
    #[serde(default)]
    pub uniques: Vec<String>,
    #[serde(default)]
    pub promotions: Vec<String>,
}

impl UnitRecord {
    /// Movement defaults to 2 when the entry omits it, matching the mod
    /// format's implicit default.
    pub fn movement(&self) -> f64 {
        self.movement.unwrap_or(2.0)
    }

    /// Broad category from `unitType`, falling back to the uniques when a
    /// naval unit is only identifiable by "Can only attack [water]".
    pub fn domain(&self) -> Domain {
        let unit_type = self
            .unit_type
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        if NAVAL_INDICATORS.iter().any(|k| unit_type.contains(k)) {
            return Domain::Water;
        }
        if AIR_INDICATORS.iter().any(|k| unit_type.contains(k)) {
            return Domain::Air;
        }
        let mentions_water_only = self.uniques.iter().any(|unique| {
            let lowered = unique.to_lowercase();
            lowered.contains("can only attack [water]") || lowered.contains("can only attack water")
        });
        if mentions_water_only {
            Domain::Water
        } else {
            Domain::Land
        }
    }

    pub fn to_stats(&self) -> UnitStats {
        UnitStats {
            strength: self.strength.unwrap_or(0.0),
            ranged_strength: self.ranged_strength.unwrap_or(0.0),
            movement: self.movement(),
            domain: self.domain(),
        }
    }

    /// Uniques plus promotion names: both feed the best-effort parser.
    pub fn ability_strings(&self) -> Vec<String> {
        self.uniques
            .iter()
            .chain(self.promotions.iter())
            .cloned()
            .collect()
    }

    /// Some base-game nukes carry the bonus in their name rather than a
    /// parseable unique.
    pub fn is_nuclear_by_name(&self) -> bool {
        let name = self.name.to_lowercase();
        name.contains("atomic") || name.contains("nuclear")
    }

    /// Parse this record's abilities and compute its Base Unit Force.
    pub fn rate(&self) -> Result<ForceResult, ForceError> {
        let mut modifiers = parse_uniques(&self.ability_strings());
        if self.is_nuclear_by_name() && !modifiers.contains(&Modifier::NuclearWeapon) {
            modifiers.push(Modifier::NuclearWeapon);
        }
        compute_base_force(&self.to_stats(), &modifiers)
    }
}

/// Load a `Units.json` fixture: a top-level array of unit entries.
pub fn load_units_file(
    path: impl AsRef<Path>,
) -> Result<Vec<UnitRecord>, Box<dyn std::error::Error + Send + Sync>> {
    let raw = fs::read_to_string(path)?;
    let units: Vec<UnitRecord> = serde_json::from_str(&raw)?;
    Ok(units)
}
