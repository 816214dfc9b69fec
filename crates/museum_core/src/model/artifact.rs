//! Artifact domain model.
//!
//! # Responsibility
//! - Define the single persisted museum-object record.
//! - Provide presentation helpers derived from stored attributes.
//! - Parse raw operator input into typed attribute values.
//!
//! # Invariants
//! - An `Artifact` is immutable after construction; replacement is done by
//!   building a new value.
//! - `id` is caller supplied and never rewritten by this module.
//! - No range checks are applied to `quantity` or `unit_weight`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied artifact identifier, stored as the table primary key.
pub type ArtifactId = String;

/// ISO calendar format accepted from operators and used in storage.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first rendering used by listings.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Mutable attributes of an artifact, i.e. everything except `id`.
///
/// Add and edit flows both collect exactly this set of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFields {
    pub name: String,
    pub category: String,
    pub origin: String,
    pub found_date: NaiveDate,
    pub condition: String,
    pub quantity: i32,
    /// Kilograms per unit.
    pub unit_weight: f64,
}

/// Canonical persisted museum artifact record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    id: ArtifactId,
    name: String,
    category: String,
    origin: String,
    found_date: NaiveDate,
    condition: String,
    quantity: i32,
    unit_weight: f64,
}

impl Artifact {
    /// Builds a record from its identifier and mutable attributes.
    pub fn new(id: impl Into<ArtifactId>, fields: ArtifactFields) -> Self {
        let ArtifactFields {
            name,
            category,
            origin,
            found_date,
            condition,
            quantity,
            unit_weight,
        } = fields;

        Self {
            id: id.into(),
            name,
            category,
            origin,
            found_date,
            condition,
            quantity,
            unit_weight,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn found_date(&self) -> NaiveDate {
        self.found_date
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_weight(&self) -> f64 {
        self.unit_weight
    }

    /// Returns a copy of the mutable attributes.
    pub fn fields(&self) -> ArtifactFields {
        ArtifactFields {
            name: self.name.clone(),
            category: self.category.clone(),
            origin: self.origin.clone(),
            found_date: self.found_date,
            condition: self.condition.clone(),
            quantity: self.quantity,
            unit_weight: self.unit_weight,
        }
    }

    /// Aggregate weight in kilograms: `quantity * unit_weight`.
    pub fn total_weight(&self) -> f64 {
        f64::from(self.quantity) * self.unit_weight
    }

    pub fn formatted_name(&self) -> String {
        self.name.to_uppercase()
    }

    pub fn formatted_category(&self) -> String {
        self.category.to_lowercase()
    }

    /// Renders `found_date` as `dd/MM/yyyy`.
    pub fn formatted_date(&self) -> String {
        self.found_date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Combined name/category label shown at the start of a listing line.
    pub fn name_category_label(&self) -> String {
        format!(
            "Name: {}, Category: {}",
            self.formatted_name(),
            self.formatted_category()
        )
    }

    /// One-line summary printed by inventory listings.
    ///
    /// Weight keeps its shortest exact rendering with at least one decimal
    /// place, e.g. `7.5` or `6.0`.
    pub fn listing_line(&self) -> String {
        format!(
            "{}, Total Weight: {:?} kg, Found: {}",
            self.name_category_label(),
            self.total_weight(),
            self.formatted_date()
        )
    }
}

/// Failure to parse one operator-entered attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactParseError {
    /// Date text is not a valid ISO `yyyy-MM-dd` calendar date.
    InvalidDate(String),
    /// Quantity text is not a 32-bit integer.
    InvalidQuantity(String),
    /// Unit weight text is not a finite decimal number.
    InvalidUnitWeight(String),
}

impl Display for ArtifactParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected yyyy-MM-dd")
            }
            Self::InvalidQuantity(value) => {
                write!(f, "invalid quantity `{value}`; expected a whole number")
            }
            Self::InvalidUnitWeight(value) => {
                write!(f, "invalid unit weight `{value}`; expected a number")
            }
        }
    }
}

impl Error for ArtifactParseError {}

/// Parses an ISO `yyyy-MM-dd` date, ignoring surrounding whitespace.
pub fn parse_found_date(value: &str) -> Result<NaiveDate, ArtifactParseError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|_| ArtifactParseError::InvalidDate(trimmed.to_string()))
}

pub fn parse_quantity(value: &str) -> Result<i32, ArtifactParseError> {
    let trimmed = value.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| ArtifactParseError::InvalidQuantity(trimmed.to_string()))
}

/// Parses a unit weight in kilograms.
///
/// `NaN` and infinities are rejected since they cannot round-trip through
/// the `REAL` column meaningfully.
pub fn parse_unit_weight(value: &str) -> Result<f64, ArtifactParseError> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(weight) if weight.is_finite() => Ok(weight),
        _ => Err(ArtifactParseError::InvalidUnitWeight(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_found_date, parse_quantity, parse_unit_weight, ArtifactParseError};
    use chrono::NaiveDate;

    #[test]
    fn parse_found_date_trims_and_accepts_iso() {
        assert_eq!(
            parse_found_date(" 2024-03-07\n").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
        );
    }

    #[test]
    fn parse_found_date_rejects_day_first_and_impossible_dates() {
        assert_eq!(
            parse_found_date("07/03/2024").unwrap_err(),
            ArtifactParseError::InvalidDate("07/03/2024".to_string())
        );
        assert!(parse_found_date("2023-02-29").is_err());
    }

    #[test]
    fn parse_quantity_accepts_negative_but_not_decimal() {
        assert_eq!(parse_quantity("-2").unwrap(), -2);
        assert!(matches!(
            parse_quantity("2.5"),
            Err(ArtifactParseError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn parse_unit_weight_rejects_non_finite() {
        assert_eq!(parse_unit_weight("2.5").unwrap(), 2.5);
        assert!(parse_unit_weight("NaN").is_err());
        assert!(parse_unit_weight("inf").is_err());
        assert!(parse_unit_weight("heavy").is_err());
    }
}
