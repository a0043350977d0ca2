//! Classification engine
//!
//! The core of the crate: resolving the applicable override set for a
//! sex/age combination, merging it over the default table, and matching a
//! continuous index to a discrete band.
//!
//! Merging always happens into a fresh copy of the default table, so
//! successive calculations with different sex/age never contaminate each
//! other and the pipeline is reentrant without locks.

use crate::reference::{self, BandOverride, BRACKET_AGE_FLOOR};
use crate::types::{Band, BandRange, ClassificationTable, Sex};

/// Select the band overrides applicable to a sex/age combination.
///
/// - Unknown sex: no overrides.
/// - Known sex, age below [`BRACKET_AGE_FLOOR`]: the sex-level fallback set.
/// - Known sex otherwise: the bands of the bracket containing `age`, or no
///   overrides when no bracket matches.
///
/// Where two bracket rows share a boundary age (55-64 and 64-999 both
/// contain 64 in the source tables), the later row wins.
pub fn resolve_overrides(sex: Sex, age: u32) -> &'static [BandOverride] {
    let Some(set) = reference::overrides_for(sex) else {
        return &[];
    };

    if age < BRACKET_AGE_FLOOR {
        return set.fallback;
    }

    set.brackets
        .iter()
        .rev()
        .find(|bracket| age >= bracket.min_age && age <= bracket.max_age)
        .map(|bracket| bracket.bands)
        .unwrap_or(&[])
}

/// Build the effective classification table for a sex/age combination.
///
/// Starts from a copy of [`reference::DEFAULT_TABLE`] and replaces every
/// overridden band; bands absent from the override keep their defaults.
/// The shared default table is never mutated.
pub fn effective_table(sex: Sex, age: u32) -> ClassificationTable {
    let mut table = reference::DEFAULT_TABLE.clone();
    for ov in resolve_overrides(sex, age) {
        table.set_range(ov.band, BandRange::new(ov.low, ov.high));
    }
    table
}

/// Match an index against a table, scanning bands in ascending order.
///
/// Band 0 matches any index below its upper bound, band 7 any index at or
/// above its lower bound, and the inner bands use half-open intervals
/// (inclusive low, exclusive high). Given the contiguity invariant exactly
/// one band matches any finite index; `None` is returned only for NaN.
pub fn classify(table: &ClassificationTable, index: f64) -> Option<Band> {
    table.bands().find_map(|(band, range)| {
        let matched = match band {
            Band::VerySeverelyUnderweight => index < range.high,
            Band::ObeseClassIII => index >= range.low,
            _ => index >= range.low && index < range.high,
        };
        matched.then_some(band)
    })
}
