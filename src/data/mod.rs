pub mod reference;
pub mod unit;

pub use reference::{compare_against_reference, parse_expected_forces, ComparisonRow, REFERENCE_COMMIT};
pub use unit::{load_units_file, UnitRecord};
