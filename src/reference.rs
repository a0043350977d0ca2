//! Reference classification data
//!
//! Process-constant BMI tables: the default eight-band table plus the
//! sex/age-specific override sets. The numeric boundaries are carried
//! verbatim from the source medical tables (fddb.info / Wikipedia BMI
//! reference data) and must not be "normalized":
//! - the male bracket set splits 16-16 and 17-24 while the female set
//!   starts with a single 16-24 bracket;
//! - adjacent brackets share age 64 (55-64 and 64-999); the later row
//!   takes precedence.
//!
//! Everything here is immutable for the life of the process. Merging
//! happens on copies only (see [`crate::classifier`]).

use crate::types::{Band, BandRange, ClassificationTable, Sex};

/// Youngest age covered by the age brackets. Below this, the sex-level
/// fallback override applies.
pub const BRACKET_AGE_FLOOR: u32 = 16;

/// Default classification table, applicable when sex is unknown.
pub static DEFAULT_TABLE: ClassificationTable = ClassificationTable::new([
    BandRange::new(f64::NEG_INFINITY, 16.0),
    BandRange::new(16.0, 17.0),
    BandRange::new(17.0, 18.5),
    BandRange::new(18.5, 25.0),
    BandRange::new(25.0, 30.0),
    BandRange::new(30.0, 35.0),
    BandRange::new(35.0, 40.0),
    BandRange::new(40.0, f64::INFINITY),
]);

/// Replacement range for a single band within an override set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandOverride {
    pub band: Band,
    pub low: f64,
    pub high: f64,
}

/// Closed age interval with the band replacements that apply inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeBracket {
    pub min_age: u32,
    pub max_age: u32,
    pub bands: &'static [BandOverride],
}

/// Override data for one sex: a fallback set for subjects below the
/// bracket floor, plus the age brackets themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexOverrides {
    pub fallback: &'static [BandOverride],
    pub brackets: &'static [AgeBracket],
}

const fn ov(band: Band, low: f64, high: f64) -> BandOverride {
    BandOverride { band, low, high }
}

const fn bracket(min_age: u32, max_age: u32, bands: &'static [BandOverride]) -> AgeBracket {
    AgeBracket {
        min_age,
        max_age,
        bands,
    }
}

pub static MALE_OVERRIDES: SexOverrides = SexOverrides {
    fallback: &[
        ov(Band::Underweight, 17.0, 20.0),
        ov(Band::Healthy, 20.0, 25.0),
    ],
    brackets: &[
        bracket(
            16,
            16,
            &[
                ov(Band::Underweight, 17.0, 18.0),
                ov(Band::Healthy, 18.0, 24.0),
                ov(Band::Overweight, 24.0, 28.0),
                ov(Band::ObeseClassI, 28.0, 35.0),
            ],
        ),
        bracket(
            17,
            24,
            &[
                ov(Band::Underweight, 17.0, 20.0),
                ov(Band::Healthy, 20.0, 25.0),
            ],
        ),
        bracket(
            25,
            34,
            &[
                ov(Band::Underweight, 17.0, 21.0),
                ov(Band::Healthy, 21.0, 26.0),
                ov(Band::Overweight, 26.0, 30.0),
            ],
        ),
        bracket(
            35,
            44,
            &[
                ov(Band::Underweight, 17.0, 22.0),
                ov(Band::Healthy, 22.0, 28.0),
                ov(Band::Overweight, 28.0, 31.0),
                ov(Band::ObeseClassI, 31.0, 35.0),
            ],
        ),
        bracket(
            45,
            54,
            &[
                ov(Band::Underweight, 17.0, 23.0),
                ov(Band::Healthy, 23.0, 29.0),
                ov(Band::Overweight, 29.0, 33.0),
                ov(Band::ObeseClassI, 33.0, 35.0),
            ],
        ),
        bracket(
            55,
            64,
            &[
                ov(Band::Underweight, 17.0, 24.0),
                ov(Band::Healthy, 24.0, 30.0),
                ov(Band::Overweight, 30.0, 34.0),
                ov(Band::ObeseClassI, 34.0, 35.0),
            ],
        ),
        bracket(
            64,
            999,
            &[
                ov(Band::Underweight, 17.0, 25.0),
                ov(Band::Healthy, 25.0, 30.0),
                ov(Band::Overweight, 30.0, 35.0),
                ov(Band::ObeseClassI, 35.0, 37.0),
                ov(Band::ObeseClassII, 37.0, 40.0),
            ],
        ),
    ],
};

pub static FEMALE_OVERRIDES: SexOverrides = SexOverrides {
    fallback: &[
        ov(Band::Underweight, 17.0, 19.0),
        ov(Band::Healthy, 19.0, 24.0),
        ov(Band::Overweight, 24.0, 30.0),
    ],
    brackets: &[
        bracket(
            16,
            24,
            &[
                ov(Band::Underweight, 17.0, 18.0),
                ov(Band::Healthy, 18.0, 24.0),
                ov(Band::Overweight, 24.0, 28.0),
                ov(Band::ObeseClassI, 28.0, 35.0),
            ],
        ),
        bracket(
            25,
            34,
            &[
                ov(Band::Underweight, 17.0, 19.0),
                ov(Band::Healthy, 19.0, 25.0),
                ov(Band::Overweight, 25.0, 30.0),
            ],
        ),
        bracket(
            35,
            44,
            &[
                ov(Band::Underweight, 17.0, 20.0),
                ov(Band::Healthy, 20.0, 26.0),
                ov(Band::Overweight, 26.0, 31.0),
                ov(Band::ObeseClassI, 31.0, 35.0),
            ],
        ),
        bracket(
            45,
            54,
            &[
                ov(Band::Underweight, 17.0, 21.0),
                ov(Band::Healthy, 21.0, 27.0),
                ov(Band::Overweight, 27.0, 32.0),
                ov(Band::ObeseClassI, 32.0, 35.0),
            ],
        ),
        bracket(
            55,
            64,
            &[
                ov(Band::Underweight, 17.0, 22.0),
                ov(Band::Healthy, 22.0, 28.0),
                ov(Band::Overweight, 28.0, 33.0),
                ov(Band::ObeseClassI, 33.0, 35.0),
            ],
        ),
        bracket(
            64,
            999,
            &[
                ov(Band::Underweight, 17.0, 23.0),
                ov(Band::Healthy, 23.0, 29.0),
                ov(Band::Overweight, 29.0, 34.0),
                ov(Band::ObeseClassI, 34.0, 37.0),
                ov(Band::ObeseClassII, 37.0, 40.0),
            ],
        ),
    ],
};

/// Override set for the given sex, or `None` when sex is unknown.
pub fn overrides_for(sex: Sex) -> Option<&'static SexOverrides> {
    match sex {
        Sex::Male => Some(&MALE_OVERRIDES),
        Sex::Female => Some(&FEMALE_OVERRIDES),
        Sex::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_contiguous() {
        for pair in Band::ALL.windows(2) {
            let below = DEFAULT_TABLE.range(pair[0]);
            let above = DEFAULT_TABLE.range(pair[1]);
            assert_eq!(below.high, above.low, "{} / {}", pair[0], pair[1]);
        }
        assert_eq!(
            DEFAULT_TABLE.range(Band::VerySeverelyUnderweight).low,
            f64::NEG_INFINITY
        );
        assert_eq!(DEFAULT_TABLE.range(Band::ObeseClassIII).high, f64::INFINITY);
    }

    #[test]
    fn test_overrides_touch_bands_2_to_6_only() {
        for set in [&MALE_OVERRIDES, &FEMALE_OVERRIDES] {
            let all_bands = set
                .brackets
                .iter()
                .flat_map(|b| b.bands.iter())
                .chain(set.fallback.iter());
            for ov in all_bands {
                assert!(
                    (2..=6).contains(&ov.band.index()),
                    "band {} must never be overridden",
                    ov.band.index()
                );
            }
        }
    }

    #[test]
    fn test_bracket_boundaries_are_verbatim() {
        // Asymmetry from the source tables: male splits 16-16 / 17-24,
        // female starts at 16-24.
        let male: Vec<(u32, u32)> = MALE_OVERRIDES
            .brackets
            .iter()
            .map(|b| (b.min_age, b.max_age))
            .collect();
        let female: Vec<(u32, u32)> = FEMALE_OVERRIDES
            .brackets
            .iter()
            .map(|b| (b.min_age, b.max_age))
            .collect();

        assert_eq!(
            male,
            vec![
                (16, 16),
                (17, 24),
                (25, 34),
                (35, 44),
                (45, 54),
                (55, 64),
                (64, 999)
            ]
        );
        assert_eq!(
            female,
            vec![
                (16, 24),
                (25, 34),
                (35, 44),
                (45, 54),
                (55, 64),
                (64, 999)
            ]
        );
    }

    #[test]
    fn test_overrides_for_unknown_is_none() {
        assert!(overrides_for(Sex::Unknown).is_none());
        assert!(overrides_for(Sex::Male).is_some());
        assert!(overrides_for(Sex::Female).is_some());
    }
}
