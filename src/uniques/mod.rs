pub mod parser;

pub use parser::{parse_unique, parse_uniques, Modifier, Pattern, PATTERNS};
