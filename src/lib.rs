//! BMI Engine - pure BMI computation with sex/age-aware classification
//!
//! Computes a Body-Mass-Index from height and mass and classifies it
//! against medically derived reference tables through a deterministic
//! pipeline: index computation → override resolution → table merge →
//! band match.
//!
//! The reference data is process-constant and never mutated; every
//! calculation merges overrides into a fresh copy of the default table,
//! so concurrent calculations need no synchronization.
//!
//! ```
//! use bmi_engine::bmi;
//!
//! let result = bmi(176.0, 78.0).set_sex("m").set_age(56).calc();
//! assert_eq!(result.index, 25.2);
//! assert_eq!(result.message, Some("Healthy"));
//! ```

pub mod classifier;
pub mod error;
pub mod format;
pub mod reference;
pub mod subject;
pub mod types;

pub use error::BmiError;
pub use subject::{bmi, Subject};
pub use types::{Assessment, Band, BandRange, ClassificationTable, RangeTable, Sex, Units};

/// Engine version reported by the CLI.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
