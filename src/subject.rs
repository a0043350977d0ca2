//! Subject builder and calculation entry points
//!
//! A [`Subject`] is the caller-owned input record: height, mass, units,
//! sex, and age. Setters only store fields; the full pipeline (override
//! resolution, table merge, band match) runs once per explicit [`calc`]
//! call and returns an independent [`Assessment`].
//!
//! [`calc`]: Subject::calc

use serde::Deserialize;

use crate::classifier;
use crate::error::BmiError;
use crate::format;
use crate::types::{Assessment, Band, ClassificationTable, RangeTable, Sex, Units};

/// Construct a subject from height and mass in metric units.
///
/// Shorthand for [`Subject::new`]. The classic call shape takes an
/// optional third `usePounds` argument; here that is the
/// [`use_pounds`](Subject::use_pounds) builder step:
///
/// ```
/// use bmi_engine::bmi;
///
/// let result = bmi(180.0, 80.0).calc();
/// assert_eq!(result.index, 24.7);
/// assert_eq!(result.message, Some("Healthy"));
///
/// // bmi(69.3, 172, usePounds = true)
/// let result = bmi(69.3, 172.0).use_pounds(true).calc();
/// assert_eq!(result.index, 25.2);
/// ```
pub fn bmi(height: f64, mass: f64) -> Subject {
    Subject::new(height, mass)
}

/// Input record for one BMI calculation.
///
/// Inputs are taken at face value: height and mass are not validated for
/// medical plausibility, and a zero height simply produces a non-finite
/// index with no matching band.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    height: f64,
    mass: f64,
    units: Units,
    sex: Sex,
    age: u32,
}

/// Permissive JSON shape accepted by the batch ingestion path.
///
/// `sex` may be a string, number, or boolean token; anything unrecognized
/// degrades to unknown.
#[derive(Debug, Deserialize)]
struct SubjectRecord {
    height: f64,
    mass: f64,
    #[serde(default)]
    pounds: bool,
    #[serde(default)]
    sex: Option<serde_json::Value>,
    #[serde(default)]
    age: u32,
}

impl From<SubjectRecord> for Subject {
    fn from(record: SubjectRecord) -> Self {
        let sex = record
            .sex
            .as_ref()
            .map(Sex::from_value)
            .unwrap_or_default();
        Subject {
            height: record.height,
            mass: record.mass,
            units: if record.pounds {
                Units::Imperial
            } else {
                Units::Metric
            },
            sex,
            age: record.age,
        }
    }
}

impl Subject {
    /// Create a subject with metric units, unknown sex, and age 0.
    pub fn new(height: f64, mass: f64) -> Self {
        Self {
            height,
            mass,
            units: Units::Metric,
            sex: Sex::Unknown,
            age: 0,
        }
    }

    pub fn set_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn set_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn set_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Set the sex from any recognized token (`"m"`, `"w"`, `0`, `true`, ...).
    pub fn set_sex(mut self, sex: impl Into<Sex>) -> Self {
        self.sex = sex.into();
        self
    }

    /// Switch between metric (default) and inches/pounds input.
    pub fn use_pounds(mut self, pounds: bool) -> Self {
        self.units = if pounds {
            Units::Imperial
        } else {
            Units::Metric
        };
        self
    }

    /// Compute the BMI index alone, rounded to one decimal place.
    ///
    /// Metric: `mass / (height / 100)^2`. Imperial:
    /// `mass / height / height * 703`. Rounding uses [`f64::round`], which
    /// rounds halves away from zero.
    pub fn index(&self) -> f64 {
        let raw = match self.units {
            Units::Metric => self.mass / (self.height / 100.0).powi(2),
            Units::Imperial => self.mass / self.height / self.height * 703.0,
        };
        round1(raw)
    }

    /// Classification table after merging the sex/age overrides.
    pub fn effective_table(&self) -> ClassificationTable {
        classifier::effective_table(self.sex, self.age)
    }

    /// Display range table for this subject's effective table.
    pub fn range_table(&self) -> RangeTable {
        format::range_table(&self.effective_table())
    }

    /// Run the full pipeline and return a fresh assessment.
    pub fn calc(&self) -> Assessment {
        self.assess(false)
    }

    /// Like [`calc`](Subject::calc), with the range table attached.
    pub fn calc_with_table(&self) -> Assessment {
        self.assess(true)
    }

    fn assess(&self, with_table: bool) -> Assessment {
        let index = self.index();
        let table = self.effective_table();
        let category = classifier::classify(&table, index);

        Assessment {
            index,
            message: category.map(Band::label),
            category,
            sex: self.sex,
            age: self.age,
            height: self.height,
            mass: self.mass,
            measurement: self.units,
            table: with_table.then(|| format::range_table(&table)),
        }
    }

    /// Parse a single subject record from JSON.
    pub fn from_json(json: &str) -> Result<Self, BmiError> {
        let record: SubjectRecord = serde_json::from_str(json)?;
        Ok(record.into())
    }

    /// Parse newline-delimited subject records, one JSON object per line.
    /// Blank lines are skipped; the first malformed line aborts with its
    /// line number.
    pub fn parse_ndjson(input: &str) -> Result<Vec<Self>, BmiError> {
        let mut subjects = Vec::new();
        for (number, line) in input.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let subject = Self::from_json(trimmed).map_err(|e| {
                BmiError::InvalidRecord(format!("line {}: {}", number + 1, e))
            })?;
            subjects.push(subject);
        }
        Ok(subjects)
    }

    /// Parse a JSON array of subject records.
    pub fn parse_array(input: &str) -> Result<Vec<Self>, BmiError> {
        let records: Vec<SubjectRecord> = serde_json::from_str(input)?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metric_index_matches_formula() {
        for (height, mass) in [(180.0, 80.0), (176.0, 78.0), (155.5, 51.2), (201.0, 110.0)] {
            let expected = round1(mass / (height / 100.0_f64).powi(2));
            assert_eq!(bmi(height, mass).index(), expected);
        }
        assert_eq!(bmi(180.0, 80.0).index(), 24.7);
    }

    #[test]
    fn test_imperial_index_matches_formula() {
        let subject = bmi(69.3, 172.0).use_pounds(true);
        let expected = round1(172.0 / 69.3 / 69.3 * 703.0);
        assert_eq!(subject.index(), expected);
        assert_eq!(subject.index(), 25.2);
    }

    #[test]
    fn test_pounds_flag_without_unit_conversion() {
        // Literal fixture: metric magnitudes pushed through the imperial
        // formula; the inputs are not converted.
        let result = bmi(180.0, 80.0).use_pounds(true).calc();
        assert_eq!(result.index, 1.7);
        assert_eq!(result.measurement, Units::Imperial);
    }

    #[test]
    fn test_default_subject_is_healthy() {
        let result = bmi(180.0, 80.0).calc();
        assert_eq!(result.index, 24.7);
        assert_eq!(result.message, Some("Healthy"));
        assert_eq!(result.category, Some(Band::Healthy));
        assert_eq!(result.sex, Sex::Unknown);
        assert_eq!(result.age, 0);
        assert_eq!(result.measurement, Units::Metric);
        assert!(result.table.is_none());
    }

    #[test]
    fn test_older_male_stays_healthy() {
        let result = bmi(180.0, 80.0).set_sex("m").set_age(55).calc();
        assert_eq!(result.message, Some("Healthy"));
        assert_eq!(result.sex, Sex::Male);
    }

    #[test]
    fn test_sixteen_year_old_male_is_overweight() {
        // 24.7 falls into the 24-28 override of the single-point 16-16 row.
        let result = bmi(180.0, 80.0).set_sex("m").set_age(16).calc();
        assert_eq!(result.message, Some("Overweight"));
    }

    #[test]
    fn test_young_male_fallback_overrides() {
        let result = bmi(180.0, 90.0).set_sex("m").calc();
        assert_eq!(result.index, 27.8);
        assert_eq!(result.message, Some("Overweight"));
    }

    #[test]
    fn test_numeric_and_boolean_sex_tokens() {
        assert_eq!(bmi(180.0, 80.0).set_sex(0).calc().sex, Sex::Male);
        assert_eq!(bmi(180.0, 80.0).set_sex(true).calc().sex, Sex::Female);
        assert_eq!(bmi(180.0, 80.0).set_sex("x").calc().sex, Sex::Unknown);
    }

    #[test]
    fn test_degenerate_inputs_flow_through() {
        // Inputs are not validated; the numeric semantics of f64 apply.
        let result = bmi(0.0, 80.0).calc();
        assert!(result.index.is_infinite());
        assert_eq!(result.category, Some(Band::ObeseClassIII));

        let result = bmi(0.0, 0.0).calc();
        assert!(result.index.is_nan());
        assert_eq!(result.category, None);
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_range_table_for_default_subject() {
        let table = bmi(180.0, 80.0).range_table();
        assert_eq!(table.len(), 8);
        assert_eq!(table.entries()[5].label, "Obese Class I");
        assert_eq!(table.get("Healthy"), Some("18.5-25"));
    }

    #[test]
    fn test_calc_with_table_attaches_the_range_table() {
        let result = bmi(180.0, 80.0).set_sex("w").set_age(30).calc_with_table();
        let table = result.table.expect("table requested");
        assert_eq!(table.get("Healthy"), Some("19-25"));
    }

    #[test]
    fn test_assessment_json_shape() {
        let json = serde_json::to_value(bmi(180.0, 80.0).calc()).unwrap();
        assert_eq!(json["index"], 24.7);
        assert_eq!(json["message"], "Healthy");
        assert_eq!(json["sex"], "unknown");
        assert_eq!(json["measurement"], "centimeters/kilograms");
        assert!(json.get("table").is_none());
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_from_json_duck_typed_sex() {
        let subject =
            Subject::from_json(r#"{"height": 180, "mass": 80, "sex": 0, "age": 55}"#).unwrap();
        assert_eq!(subject.calc().message, Some("Healthy"));

        let subject =
            Subject::from_json(r#"{"height": 180, "mass": 80, "sex": true}"#).unwrap();
        assert_eq!(subject.calc().sex, Sex::Female);

        let subject = Subject::from_json(r#"{"height": 180, "mass": 80}"#).unwrap();
        assert_eq!(subject.calc().sex, Sex::Unknown);
    }

    #[test]
    fn test_from_json_missing_mass_fails() {
        let err = Subject::from_json(r#"{"height": 180}"#).unwrap_err();
        assert!(matches!(err, BmiError::Json(_)));
    }

    #[test]
    fn test_parse_ndjson() {
        let input = "\
{\"height\": 180, \"mass\": 80}

{\"height\": 180, \"mass\": 90, \"sex\": \"m\"}
";
        let subjects = Subject::parse_ndjson(input).unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].calc().message, Some("Healthy"));
        assert_eq!(subjects[1].calc().message, Some("Overweight"));
    }

    #[test]
    fn test_parse_ndjson_reports_line_number() {
        let input = "{\"height\": 180, \"mass\": 80}\nnot json\n";
        let err = Subject::parse_ndjson(input).unwrap_err();
        match err {
            BmiError::InvalidRecord(message) => assert!(message.starts_with("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_array() {
        let subjects = Subject::parse_array(
            r#"[{"height": 180, "mass": 80}, {"height": 180, "mass": 80, "pounds": true}]"#,
        )
        .unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[1].calc().index, 1.7);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 24.75 is exactly representable, so the half is a true half.
        assert_eq!(round1(24.75), 24.8);
        assert_eq!(round1(24.74), 24.7);
        assert_eq!(round1(-24.75), -24.8);
    }
}
