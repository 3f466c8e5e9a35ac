//! Per-region weekly records.

use super::epiweek::EpiWeek;
use crate::error::{DenoiseError, Result};
use crate::smoothing::FieldKind;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Weekly columns processed for each region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Cases,
    TempMin,
    TempMed,
    TempMax,
    PrecipMin,
    PrecipMed,
    PrecipMax,
    PrecipTot,
}

impl Field {
    /// Every field, in column order.
    pub const ALL: [Field; 8] = [
        Field::Cases,
        Field::TempMin,
        Field::TempMed,
        Field::TempMax,
        Field::PrecipMin,
        Field::PrecipMed,
        Field::PrecipMax,
        Field::PrecipTot,
    ];

    /// Column name in the regional tables.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Cases => "casos",
            Field::TempMin => "temp_min",
            Field::TempMed => "temp_med",
            Field::TempMax => "temp_max",
            Field::PrecipMin => "precip_min",
            Field::PrecipMed => "precip_med",
            Field::PrecipMax => "precip_max",
            Field::PrecipTot => "precip_tot",
        }
    }

    /// Whether raw values below zero are invalid readings: case counts and
    /// precipitation. Temperatures can legitimately be negative.
    pub fn is_non_negative(&self) -> bool {
        !matches!(self, Field::TempMin | Field::TempMed | Field::TempMax)
    }

    /// How the smoothed field is finalised: case counts are integers,
    /// climate measurements are continuous.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Cases => FieldKind::Count,
            _ => FieldKind::Continuous,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = DenoiseError;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| DenoiseError::InvalidParameter(format!("unknown field: {s:?}")))
    }
}

/// Weekly series of one region, all fields aligned on the same weeks.
///
/// # Example
/// ```
/// use epidenoise::region::{EpiWeek, Field, RegionSeries};
///
/// let weeks: Vec<EpiWeek> = (1..=4).map(|w| EpiWeek::new(2023, w).unwrap()).collect();
/// let region = RegionSeries::new("north", weeks)
///     .unwrap()
///     .with_field(Field::Cases, vec![3.0, 5.0, 4.0, 8.0])
///     .unwrap();
///
/// assert_eq!(region.len(), 4);
/// assert!(region.with_field(Field::TempMed, vec![20.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSeries {
    region: String,
    epiweeks: Vec<EpiWeek>,
    fields: BTreeMap<Field, Vec<f64>>,
}

impl RegionSeries {
    /// Start a record with its week index and no fields.
    ///
    /// # Errors
    /// `EmptyData` if there are no weeks, `InvalidParameter` if the weeks are
    /// not strictly increasing.
    pub fn new(region: impl Into<String>, epiweeks: Vec<EpiWeek>) -> Result<Self> {
        if epiweeks.is_empty() {
            return Err(DenoiseError::EmptyData);
        }
        if epiweeks.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DenoiseError::InvalidParameter(
                "epidemiological weeks must be strictly increasing".into(),
            ));
        }
        Ok(Self {
            region: region.into(),
            epiweeks,
            fields: BTreeMap::new(),
        })
    }

    /// Attach (or replace) a field.
    ///
    /// # Errors
    /// `DimensionMismatch` when `values` does not have one entry per week.
    pub fn with_field(mut self, field: Field, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.epiweeks.len() {
            return Err(DenoiseError::DimensionMismatch {
                expected: self.epiweeks.len(),
                got: values.len(),
            });
        }
        self.fields.insert(field, values);
        Ok(self)
    }

    /// Region identifier.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Week index.
    pub fn epiweeks(&self) -> &[EpiWeek] {
        &self.epiweeks
    }

    /// Number of weeks.
    pub fn len(&self) -> usize {
        self.epiweeks.len()
    }

    /// Always false for a constructed record.
    pub fn is_empty(&self) -> bool {
        self.epiweeks.is_empty()
    }

    /// Values of one field, if present.
    pub fn field(&self, field: Field) -> Option<&[f64]> {
        self.fields.get(&field).map(Vec::as_slice)
    }

    /// Present fields with their values, in column order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &[f64])> {
        self.fields.iter().map(|(f, v)| (*f, v.as_slice()))
    }

    /// Calendar date of each week.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        self.epiweeks.iter().map(EpiWeek::to_date).collect()
    }
}
