//! Core types for the BMI classification engine
//!
//! This module defines the data structures that flow through each stage of
//! the pipeline: classification bands, band ranges, the effective table,
//! and the final assessment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight ordered BMI classification buckets.
///
/// Bands are totally ordered from most underweight (0) to most obese (7).
/// Each band carries a fixed human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "Very severely underweight")]
    VerySeverelyUnderweight,
    #[serde(rename = "Severely underweight")]
    SeverelyUnderweight,
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese Class I")]
    ObeseClassI,
    #[serde(rename = "Obese Class II")]
    ObeseClassII,
    #[serde(rename = "Obese Class III")]
    ObeseClassIII,
}

impl Band {
    /// All bands in ascending order.
    pub const ALL: [Band; 8] = [
        Band::VerySeverelyUnderweight,
        Band::SeverelyUnderweight,
        Band::Underweight,
        Band::Healthy,
        Band::Overweight,
        Band::ObeseClassI,
        Band::ObeseClassII,
        Band::ObeseClassIII,
    ];

    /// Position of this band in the table (0-7).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Band at the given table position, if it exists.
    pub const fn from_index(index: usize) -> Option<Band> {
        match index {
            0 => Some(Band::VerySeverelyUnderweight),
            1 => Some(Band::SeverelyUnderweight),
            2 => Some(Band::Underweight),
            3 => Some(Band::Healthy),
            4 => Some(Band::Overweight),
            5 => Some(Band::ObeseClassI),
            6 => Some(Band::ObeseClassII),
            7 => Some(Band::ObeseClassIII),
            _ => None,
        }
    }

    /// Human-readable label for this band.
    pub const fn label(self) -> &'static str {
        match self {
            Band::VerySeverelyUnderweight => "Very severely underweight",
            Band::SeverelyUnderweight => "Severely underweight",
            Band::Underweight => "Underweight",
            Band::Healthy => "Healthy",
            Band::Overweight => "Overweight",
            Band::ObeseClassI => "Obese Class I",
            Band::ObeseClassII => "Obese Class II",
            Band::ObeseClassIII => "Obese Class III",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical sex used to select override tables.
///
/// Conversions are total: any unrecognized token degrades to `Unknown`
/// rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }

    /// Normalize a permissive JSON token (string, number, or boolean).
    ///
    /// Accepted male tokens: `"m"`, `"male"`, `0`, `false`.
    /// Accepted female tokens: `"f"`, `"w"`, `"female"`, `1`, `true`.
    /// Anything else, including `null`, maps to `Unknown`.
    pub fn from_value(value: &serde_json::Value) -> Sex {
        match value {
            serde_json::Value::String(s) => Sex::from(s.as_str()),
            serde_json::Value::Bool(b) => Sex::from(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Sex::from(i),
                None => Sex::Unknown,
            },
            _ => Sex::Unknown,
        }
    }
}

impl From<&str> for Sex {
    fn from(token: &str) -> Sex {
        // Exact token matching; "M" or " m " are not recognized forms
        // and degrade to Unknown like any other token.
        match token {
            "m" | "male" | "0" => Sex::Male,
            "f" | "w" | "female" | "1" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

impl From<bool> for Sex {
    fn from(token: bool) -> Sex {
        if token {
            Sex::Female
        } else {
            Sex::Male
        }
    }
}

impl From<i64> for Sex {
    fn from(token: i64) -> Sex {
        match token {
            0 => Sex::Male,
            1 => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

impl From<i32> for Sex {
    fn from(token: i32) -> Sex {
        Sex::from(token as i64)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement system for height and mass inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    /// Height in centimeters, mass in kilograms.
    #[default]
    #[serde(rename = "centimeters/kilograms")]
    Metric,
    /// Height in inches, mass in pounds.
    #[serde(rename = "inches/pounds")]
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "centimeters/kilograms",
            Units::Imperial => "inches/pounds",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric range covered by one band.
///
/// Ranges are half-open (inclusive low, exclusive high). The open ends of
/// the outermost bands are encoded as `f64::NEG_INFINITY` / `f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandRange {
    pub low: f64,
    pub high: f64,
}

impl BandRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// A complete mapping from band to range.
///
/// Invariant: bands are contiguous, `ranges[i].high == ranges[i + 1].low`
/// for every adjacent pair. Merged override tables preserve this because
/// the reference override data itself is contiguous with the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationTable([BandRange; 8]);

impl ClassificationTable {
    pub const fn new(ranges: [BandRange; 8]) -> Self {
        Self(ranges)
    }

    /// Range assigned to the given band.
    pub fn range(&self, band: Band) -> BandRange {
        self.0[band.index()]
    }

    pub(crate) fn set_range(&mut self, band: Band, range: BandRange) {
        self.0[band.index()] = range;
    }

    /// Iterate bands with their ranges in ascending order.
    pub fn bands(&self) -> impl Iterator<Item = (Band, BandRange)> + '_ {
        Band::ALL.iter().map(move |&band| (band, self.range(band)))
    }
}

/// One display row of a range table: band label plus formatted range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEntry {
    pub label: &'static str,
    pub range: String,
}

/// Display-ready range table, keyed by label in band order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeTable(Vec<RangeEntry>);

impl RangeTable {
    pub(crate) fn new(entries: Vec<RangeEntry>) -> Self {
        Self(entries)
    }

    /// Entries in ascending band order.
    pub fn entries(&self) -> &[RangeEntry] {
        &self.0
    }

    /// Range string for the given label, if present.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.range.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a single calculation.
///
/// Produced fresh by [`Subject::calc`](crate::subject::Subject::calc);
/// nothing is cached across calls. `category` is `None` only when the
/// index is not a finite number, in which case no band matches and the
/// message is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// BMI rounded to one decimal place.
    pub index: f64,
    /// Label of the matched band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// Matched band (same information as `message`, kept out of the JSON).
    #[serde(skip)]
    pub category: Option<Band>,
    pub sex: Sex,
    pub age: u32,
    pub height: f64,
    pub mass: f64,
    pub measurement: Units,
    /// Effective range table, populated on request only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<RangeTable>,
}
