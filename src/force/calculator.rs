//! Base Unit Force arithmetic, pinned to the published force-rating formula.
//!
//! The calculator is a pure function over [UnitStats] plus parsed
//! [Modifier] records. It knows nothing about unique string formats; the
//! parser knows nothing about this formula. Rounding points are fixed by
//! the reference table the ratings are compared against: truncate once
//! after the strength power, and once at the very end.

use std::fmt;

use serde::Serialize;

use crate::uniques::Modifier;

/// Exponent for the melee strength branch.
pub const MELEE_EXPONENT: f64 = 1.5;
/// Exponent for the ranged strength branch.
pub const RANGED_EXPONENT: f64 = 1.45;
/// Exponent of the movement multiplier.
pub const MOVEMENT_EXPONENT: f64 = 0.3;
/// Movement at which no movement bonus applies (1^0.3 == 1).
pub const BASELINE_MOVEMENT: f64 = 1.0;
/// Flat force added for a nuclear weapon.
pub const NUKE_FLAT_BONUS: f64 = 4000.0;

/// Weight of `% Strength vs cities` percents.
pub const CITY_BONUS_WEIGHT: f64 = 0.5;
/// Weight of `% Strength when attacking` percents.
pub const ATTACK_BONUS_WEIGHT: f64 = 0.5;
/// Weight of `% Strength when defending` percents.
pub const DEFEND_BONUS_WEIGHT: f64 = 0.5;
/// Weight of terrain-conditional percents.
pub const TERRAIN_BONUS_WEIGHT: f64 = 0.5;
/// Weight of generic `vs [X]` percents.
pub const VS_UNITS_BONUS_WEIGHT: f64 = 0.25;
/// Multiplier bonus per extra attack per turn.
pub const EXTRA_ATTACK_BONUS: f64 = 0.2;

const RANGED_NAVAL_MULTIPLIER: f64 = 0.5;
const SELF_DESTRUCT_MULTIPLIER: f64 = 0.5;
const PARADROP_MULTIPLIER: f64 = 1.25;
const SET_UP_MULTIPLIER: f64 = 0.8;

/// Broad unit category from the mod's `unitType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Domain {
    #[default]
    Land,
    Water,
    Air,
}

/// Base statistics of one unit definition. Immutable input, one evaluation
/// per construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitStats {
    /// Melee/combat strength.
    pub strength: f64,
    /// Ranged strength; 0 means the unit is melee.
    pub ranged_strength: f64,
    /// Movement points.
    pub movement: f64,
    pub domain: Domain,
}

impl UnitStats {
    pub fn melee(strength: f64, movement: f64) -> Self {
        Self {
            strength,
            ranged_strength: 0.0,
            movement,
            domain: Domain::Land,
        }
    }

    pub fn ranged(strength: f64, ranged_strength: f64, movement: f64) -> Self {
        Self {
            strength,
            ranged_strength,
            movement,
            domain: Domain::Land,
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Ranged units take the ranged blending branch; zero ranged strength
    /// means the melee branch, always.
    pub fn is_ranged(&self) -> bool {
        self.ranged_strength > 0.0
    }
}

/// Structurally invalid calculator input. Distinct from a low or zero
/// score: the evaluation produced no number at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ForceError {
    InvalidInput(String),
}

impl fmt::Display for ForceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid unit stats: {message}"),
        }
    }
}

impl std::error::Error for ForceError {}

/// Intermediate sub-totals of one evaluation, for debugging and for the
/// comparison harness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForceBreakdown {
    /// Truncated strength power (melee or ranged branch).
    pub base: f64,
    /// Base after the movement multiplier.
    pub after_movement: f64,
    /// Flat bonuses added before any percentage multiplier.
    pub flat_bonus: f64,
    /// Product of all percentage and flag multipliers.
    pub multiplier: f64,
    /// Value before terminal truncation.
    pub raw: f64,
}

/// Final Base Unit Force plus the sub-totals that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForceResult {
    pub force: f64,
    pub breakdown: ForceBreakdown,
}

/// Summed modifier effects, one slot per kind. Same-kind percents sum here
/// and are applied as a single multiplier each — never compounded
/// sequentially, since the reference table was generated with the
/// sum-then-multiply convention.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ModifierTotals {
    city_percent: f64,
    attack_percent: f64,
    defend_percent: f64,
    terrain_percent: f64,
    vs_units_percent: f64,
    extra_attacks: u32,
    paradrop: bool,
    must_set_up: bool,
    self_destructs: bool,
    nuclear_weapon: bool,
}

impl ModifierTotals {
    fn accumulate(modifiers: &[Modifier]) -> Self {
        let mut totals = Self::default();
        for modifier in modifiers {
            match *modifier {
                Modifier::StrengthVsCities(percent) => totals.city_percent += percent,
                Modifier::StrengthWhenAttacking(percent) => totals.attack_percent += percent,
                Modifier::StrengthWhenDefending(percent) => totals.defend_percent += percent,
                Modifier::StrengthOnTerrain(percent) => totals.terrain_percent += percent,
                Modifier::StrengthVsUnits(percent) => totals.vs_units_percent += percent,
                Modifier::ExtraAttacks(count) => totals.extra_attacks += count,
                Modifier::Paradrop => totals.paradrop = true,
                Modifier::MustSetUp => totals.must_set_up = true,
                Modifier::SelfDestructs => totals.self_destructs = true,
                Modifier::NuclearWeapon => totals.nuclear_weapon = true,
            }
        }
        totals
    }
}

fn validate(stats: &UnitStats) -> Result<(), ForceError> {
    let checks = [
        ("strength", stats.strength),
        ("ranged strength", stats.ranged_strength),
        ("movement", stats.movement),
    ];
    for (label, value) in checks {
        if !value.is_finite() {
            return Err(ForceError::InvalidInput(format!(
                "{label} must be finite, got {value}"
            )));
        }
        if value < 0.0 {
            return Err(ForceError::InvalidInput(format!(
                "{label} must be non-negative, got {value}"
            )));
        }
    }
    Ok(())
}

/// Compute the Base Unit Force for one unit.
///
/// Order of operations is fixed: strength power (branch by ranged),
/// truncate, movement multiplier, flat bonuses, then one combined
/// multiplier built from the summed percents and ability flags, then
/// terminal truncation clamped non-negative.
pub fn compute_base_force(
    stats: &UnitStats,
    modifiers: &[Modifier],
) -> Result<ForceResult, ForceError> {
    validate(stats)?;

    let totals = ModifierTotals::accumulate(modifiers);
    let ranged = stats.is_ranged();

    let base = if ranged {
        stats.ranged_strength.powf(RANGED_EXPONENT)
    } else {
        stats.strength.powf(MELEE_EXPONENT)
    }
    .trunc();

    let after_movement = base * stats.movement.powf(MOVEMENT_EXPONENT);

    let flat_bonus = if totals.nuclear_weapon { NUKE_FLAT_BONUS } else { 0.0 };

    let mut multiplier = 1.0;
    multiplier *= 1.0 + CITY_BONUS_WEIGHT * totals.city_percent / 100.0;
    multiplier *= 1.0 + ATTACK_BONUS_WEIGHT * totals.attack_percent / 100.0;
    multiplier *= 1.0 + DEFEND_BONUS_WEIGHT * totals.defend_percent / 100.0;
    multiplier *= 1.0 + TERRAIN_BONUS_WEIGHT * totals.terrain_percent / 100.0;
    multiplier *= 1.0 + VS_UNITS_BONUS_WEIGHT * totals.vs_units_percent / 100.0;
    if ranged && stats.domain == Domain::Water {
        multiplier *= RANGED_NAVAL_MULTIPLIER;
    }
    if totals.self_destructs {
        multiplier *= SELF_DESTRUCT_MULTIPLIER;
    }
    if totals.paradrop {
        multiplier *= PARADROP_MULTIPLIER;
    }
    if totals.must_set_up {
        multiplier *= SET_UP_MULTIPLIER;
    }
    if totals.extra_attacks > 0 {
        multiplier *= 1.0 + EXTRA_ATTACK_BONUS * totals.extra_attacks as f64;
    }

    let raw = (after_movement + flat_bonus) * multiplier;
    let force = raw.max(0.0).trunc();

    Ok(ForceResult {
        force,
        breakdown: ForceBreakdown {
            base,
            after_movement,
            flat_bonus,
            multiplier,
            raw,
        },
    })
}
