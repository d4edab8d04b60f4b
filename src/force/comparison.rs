//! Placement of a computed force among the standard G&K units.
//!
//! The table comes from the published force-rating documentation and is
//! sorted ascending by force. [find_force_bounds] brackets an arbitrary
//! score between the next-lowest and next-highest standard unit.

use std::fmt;

/// Standard unit ratings, ascending. Ties (e.g. Archer/Slinger at 19) keep
/// their documented order.
pub static STANDARD_UNITS: &[(&str, f64)] = &[
    ("Scout", 13.0),
    ("Archer", 19.0),
    ("Slinger", 19.0),
    ("Dromon", 23.0),
    ("Warrior", 27.0),
    ("Maori Warrior", 27.0),
    ("Brute", 27.0),
    ("Bowman", 29.0),
    ("Jaguar", 36.0),
    ("Catapult", 39.0),
    ("Composite Bowman", 39.0),
    ("Galleass", 41.0),
    ("Chariot Archer", 42.0),
    ("War Elephant", 44.0),
    ("War Chariot", 45.0),
    ("Horse Archer", 45.0),
    ("Trireme", 46.0),
    ("Spearman", 49.0),
    ("Ballista", 55.0),
    ("Persian Immortal", 56.0),
    ("Horseman", 62.0),
    ("Hoplite", 63.0),
    ("Swordsman", 64.0),
    ("Chu-Ko-Nu", 66.0),
    ("Quinquereme", 69.0),
    ("African Forest Elephant", 72.0),
    ("Battering Ram", 80.0),
    ("Cataphract", 80.0),
    ("Crossbowman", 81.0),
    ("Longbowman", 81.0),
    ("Companion Cavalry", 84.0),
    ("Legion", 86.0),
    ("Mohawk Warrior", 86.0),
    ("Pikeman", 87.0),
    ("Landsknecht", 87.0),
    ("Trebuchet", 88.0),
    ("Keshik", 89.0),
    ("Frigate", 100.0),
    ("Hwach'a", 110.0),
    ("Longswordsman", 118.0),
    ("Camel Archer", 124.0),
    ("Samurai", 126.0),
    ("Berserker", 133.0),
    ("Knight", 134.0),
    ("Conquistador", 134.0),
    ("Mandekalu Cavalry", 134.0),
    ("Caravel", 134.0),
    ("Ship of the Line", 139.0),
    ("Musketman", 144.0),
    ("Cannon", 151.0),
    ("Minuteman", 154.0),
    ("Janissary", 162.0),
    ("Gatling Gun", 169.0),
    ("Musketeer", 182.0),
    ("Tercio", 182.0),
    ("Naresuan's Elephant", 194.0),
    ("Lancer", 204.0),
    ("Hakkapeliitta", 204.0),
    ("Sipahi", 218.0),
    ("Privateer", 222.0),
    ("Rifleman", 243.0),
    ("Carolean", 243.0),
    ("Sea Beggar", 244.0),
    ("Artillery", 245.0),
    ("Battleship", 269.0),
    ("Great War Bomber", 290.0),
    ("Cavalry", 300.0),
    ("Hussar", 320.0),
    ("Triplane", 325.0),
    ("Turtle Ship", 327.0),
    ("Cossack", 337.0),
    ("Norwegian Ski Infantry", 345.0),
    ("Guided Missile", 378.0),
    ("Carrier", 408.0),
    ("Submarine", 420.0),
    ("Bomber", 425.0),
    ("Great War Infantry", 434.0),
    ("Machine Gun", 465.0),
    ("Fighter", 470.0),
    ("Foreign Legion", 477.0),
    ("Ironclad", 486.0),
    ("Zero", 508.0),
    ("Anti-Tank Gun", 542.0),
    ("B17", 551.0),
    ("Marine", 645.0),
    ("Landship", 703.0),
    ("Infantry", 720.0),
    ("Nuclear Submarine", 735.0),
    ("Stealth Bomber", 771.0),
    ("Paratrooper", 806.0),
    ("Anti-Aircraft Gun", 819.0),
    ("Destroyer", 870.0),
    ("Missile Cruiser", 888.0),
    ("Rocket Artillery", 930.0),
    ("Tank", 948.0),
    ("Jet Fighter", 988.0),
    ("Helicopter Gunship", 992.0),
    ("Mechanized Infantry", 1186.0),
    ("Panzer", 1223.0),
    ("Mobile SAM", 1376.0),
    ("Modern Armor", 1620.0),
    ("Giant Death Robot", 2977.0),
    ("Atomic Bomb", 4714.0),
    ("Nuclear Missile", 7906.0),
];

/// Where a force value falls relative to the standard unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceBounds {
    LowerThanAll,
    Between {
        lower: &'static str,
        higher: &'static str,
    },
    HigherThanAll,
}

impl fmt::Display for ForceBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowerThanAll => write!(f, "Lower than any G&K unit"),
            Self::Between { lower, higher } => write!(f, "Between {lower} and {higher}"),
            Self::HigherThanAll => write!(f, "Higher than any G&K unit"),
        }
    }
}

/// Bracket `force` between standard units. A force exactly equal to a
/// standard unit's rating reports that unit as the lower bound and its
/// successor as the upper, so the output keeps the "Between X and Y" form.
pub fn find_force_bounds(force: f64) -> ForceBounds {
    let first = STANDARD_UNITS[0].1;
    let last = STANDARD_UNITS[STANDARD_UNITS.len() - 1].1;
    if force < first {
        return ForceBounds::LowerThanAll;
    }
    if force > last {
        return ForceBounds::HigherThanAll;
    }

    // Count of entries with rating <= force.
    let at_or_below = STANDARD_UNITS.partition_point(|&(_, rating)| rating <= force);

    let (lower_idx, higher_idx) = if at_or_below == STANDARD_UNITS.len() {
        (STANDARD_UNITS.len() - 2, STANDARD_UNITS.len() - 1)
    } else {
        (at_or_below.saturating_sub(1), at_or_below)
    };

    ForceBounds::Between {
        lower: STANDARD_UNITS[lower_idx].0,
        higher: STANDARD_UNITS[higher_idx].0,
    }
}
