//! End-to-end rating checks over the bundled fixture, exercising the
//! public API the way the batch and compare commands do.

use forcecalc::data::{compare_against_reference, load_units_file, parse_expected_forces};
use forcecalc::force::{
    compute_base_force, find_force_bounds, Domain, ForceBounds, ForceError, UnitStats,
};
use forcecalc::uniques::{parse_unique, parse_uniques, Modifier};

const UNITS_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/units.json");
const REFERENCE_FIXTURE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/reference.md");

fn fixture_units() -> Vec<forcecalc::data::UnitRecord> {
    load_units_file(UNITS_FIXTURE).expect("fixture should load")
}

fn force_of(units: &[forcecalc::data::UnitRecord], name: &str) -> f64 {
    units
        .iter()
        .find(|unit| unit.name == name)
        .unwrap_or_else(|| panic!("{name} missing from fixture"))
        .rate()
        .unwrap_or_else(|err| panic!("{name} should rate: {err}"))
        .force
}

#[test]
fn fixture_units_match_documented_ratings() {
    let units = fixture_units();
    assert_eq!(force_of(&units, "Warrior"), 27.0);
    assert_eq!(force_of(&units, "Scout"), 13.0);
    assert_eq!(force_of(&units, "Archer"), 19.0);
    // Must set up (x0.8) and -25% vs units (x0.9375) on trunc(14^1.45) = 45.
    assert_eq!(force_of(&units, "Catapult"), 41.0);
    // Ranged naval halving on trunc(28^1.45) = 125 at movement 5.
    assert_eq!(force_of(&units, "Frigate"), 101.0);
}

#[test]
fn nuke_combines_flat_bonus_and_self_destruct() {
    let units = fixture_units();
    let bomb = units.iter().find(|u| u.name == "Atomic Bomb").unwrap();
    let result = bomb.rate().unwrap();
    assert_eq!(result.breakdown.flat_bonus, 4000.0);
    assert!((result.breakdown.multiplier - 0.5).abs() < 1e-12);
    // (trunc(150^1.45) + 4000) / 2, truncated.
    assert!(result.force >= 2714.0 && result.force <= 2715.0);
}

#[test]
fn invalid_fixture_unit_fails_without_poisoning_the_rest() {
    let units = fixture_units();
    let broken = units.iter().find(|u| u.name == "Broken Prototype").unwrap();
    assert!(matches!(broken.rate(), Err(ForceError::InvalidInput(_))));
    // Every other unit still rates.
    for unit in units.iter().filter(|u| u.name != "Broken Prototype") {
        unit.rate()
            .unwrap_or_else(|err| panic!("{} should rate: {err}", unit.name));
    }
}

#[test]
fn comparison_harness_matches_reference_fixture() {
    let units = fixture_units();
    let markdown = std::fs::read_to_string(REFERENCE_FIXTURE).unwrap();

    let expected = parse_expected_forces(&markdown);
    assert_eq!(expected.len(), 6);

    let rows = compare_against_reference(&units, &markdown);
    for row in &rows {
        match row.name.as_str() {
            "Phantom Unit" => assert_eq!(row.computed, None),
            _ => assert_eq!(
                row.delta(),
                Some(0.0),
                "{} expected {} got {:?}",
                row.name,
                row.expected,
                row.computed
            ),
        }
    }
}

#[test]
fn rated_fixture_units_fall_where_the_standard_table_says() {
    let units = fixture_units();
    assert_eq!(
        find_force_bounds(force_of(&units, "Archer")),
        ForceBounds::Between {
            lower: "Slinger",
            higher: "Dromon"
        }
    );
    assert_eq!(
        find_force_bounds(force_of(&units, "Frigate")),
        ForceBounds::Between {
            lower: "Frigate",
            higher: "Hwach'a"
        }
    );
}

#[test]
fn positive_flat_bonus_is_monotone_over_any_unique_set() {
    let stats = UnitStats::ranged(10.0, 12.0, 3.0).with_domain(Domain::Water);
    let uniques = vec![
        "[+25]% Strength <vs cities>".to_string(),
        "Must set up to ranged attack".to_string(),
        "gibberish the parser ignores".to_string(),
    ];
    let mut modifiers = parse_uniques(&uniques);
    let without = compute_base_force(&stats, &modifiers).unwrap().force;
    modifiers.push(Modifier::NuclearWeapon);
    let with = compute_base_force(&stats, &modifiers).unwrap().force;
    assert!(with >= without);
}

#[test]
fn parse_then_compute_is_stable_across_repeated_runs() {
    let uniques = vec![
        "[+33]% Strength <when attacking>".to_string(),
        "May attack twice".to_string(),
    ];
    let stats = UnitStats::melee(20.0, 2.0);
    let first = compute_base_force(&stats, &parse_uniques(&uniques)).unwrap();
    let second = compute_base_force(&stats, &parse_uniques(&uniques)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn single_unique_parse_agrees_with_list_parse() {
    let raw = "[+50]% Strength <vs cities>";
    assert_eq!(
        parse_uniques(&[raw.to_string()]),
        parse_unique(raw).into_iter().collect::<Vec<_>>()
    );
}
