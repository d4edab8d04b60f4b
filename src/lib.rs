//! Base Unit Force rating calculator for Unciv-style mod units.
//!
//! Two pure cores: [`uniques`] turns free-form ability strings into
//! normalized [`uniques::Modifier`] records, and [`force`] folds a unit's
//! base statistics plus those records into the published Base Unit Force
//! number. [`data`] holds the mod fixture model and the pinned reference
//! table; [`cli`] is a thin shell over the two cores.

pub mod cli;
pub mod data;
pub mod force;
pub mod uniques;
