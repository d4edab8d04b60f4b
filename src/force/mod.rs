pub mod calculator;
pub mod comparison;

pub use calculator::{
    compute_base_force, Domain, ForceBreakdown, ForceError, ForceResult, UnitStats,
    ATTACK_BONUS_WEIGHT, BASELINE_MOVEMENT, CITY_BONUS_WEIGHT, DEFEND_BONUS_WEIGHT,
    EXTRA_ATTACK_BONUS, MELEE_EXPONENT, MOVEMENT_EXPONENT, NUKE_FLAT_BONUS, RANGED_EXPONENT,
    TERRAIN_BONUS_WEIGHT, VS_UNITS_BONUS_WEIGHT,
};
pub use comparison::{find_force_bounds, ForceBounds, STANDARD_UNITS};
