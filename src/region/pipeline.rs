//! Regional batch processing: clean, denoise, smooth and finalise every
//! field of every region.

use super::cleaning::{clean_series, CleaningConfig};
use super::epiweek::EpiWeek;
use super::record::{Field, RegionSeries};
use crate::denoise::SvdDenoiser;
use crate::error::{DenoiseError, Result};
use crate::parallel::slice_maybe_parallel;
use crate::smoothing::{post_process, Smoother, SmoothingConfig};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

/// Default Hankel embedding window: one year of weekly data.
pub const DEFAULT_SVD_WINDOW: usize = 52;

/// Configuration of the regional pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Hankel embedding window for the SVD denoiser.
    pub svd_window: usize,
    /// Savitzky–Golay and resampling parameters.
    pub smoothing: SmoothingConfig,
    /// Cleaning shared by every field. Fields that cannot be negative
    /// (cases and precipitation) additionally clamp negatives to zero.
    pub cleaning: CleaningConfig,
    /// Per-field cleaning replacing the shared rules entirely.
    pub field_cleaning: BTreeMap<Field, CleaningConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            svd_window: DEFAULT_SVD_WINDOW,
            smoothing: SmoothingConfig::default(),
            cleaning: CleaningConfig::default(),
            field_cleaning: BTreeMap::new(),
        }
    }
}

impl PipelineConfig {
    /// Set the Hankel embedding window.
    pub fn with_svd_window(mut self, window: usize) -> Self {
        self.svd_window = window;
        self
    }

    /// Set the smoothing parameters.
    pub fn with_smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the cleaning shared by every field.
    pub fn with_cleaning(mut self, cleaning: CleaningConfig) -> Self {
        self.cleaning = cleaning;
        self
    }

    /// Use `cleaning` for `field` instead of the shared rules.
    pub fn with_field_cleaning(mut self, field: Field, cleaning: CleaningConfig) -> Self {
        self.field_cleaning.insert(field, cleaning);
        self
    }

    /// Cleaning rules applied to `field`.
    pub fn cleaning_for(&self, field: Field) -> CleaningConfig {
        match self.field_cleaning.get(&field) {
            Some(rules) => rules.clone(),
            None => {
                let mut rules = self.cleaning.clone();
                rules.positive |= field.is_non_negative();
                rules
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.cleaning.validate()?;
        self.field_cleaning
            .values()
            .try_for_each(CleaningConfig::validate)
    }
}

/// Processed output of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRegion {
    /// Region identifier.
    pub region: String,
    /// Week index, as in the input record.
    pub epiweeks: Vec<EpiWeek>,
    /// Smoothed and finalised values per field.
    pub fields: BTreeMap<Field, Vec<f64>>,
    /// SVD truncation rank selected for each field.
    pub ranks: BTreeMap<Field, usize>,
}

impl ProcessedRegion {
    /// Values of one field, if it was processed.
    pub fn field(&self, field: Field) -> Option<&[f64]> {
        self.fields.get(&field).map(Vec::as_slice)
    }

    /// Rank used for one field.
    pub fn rank(&self, field: Field) -> Option<usize> {
        self.ranks.get(&field).copied()
    }
}

/// Runs the full denoising and smoothing chain over regional records.
///
/// # Example
/// ```
/// use epidenoise::region::{EpiWeek, Field, PipelineConfig, RegionPipeline, RegionSeries};
///
/// let weeks: Vec<EpiWeek> = (1..=40).map(|w| EpiWeek::new(2022, w).unwrap()).collect();
/// let cases: Vec<f64> = (0..40).map(|i| 50.0 + 30.0 * (i as f64 / 6.0).sin()).collect();
/// let region = RegionSeries::new("3550308", weeks)
///     .unwrap()
///     .with_field(Field::Cases, cases)
///     .unwrap();
///
/// let pipeline = RegionPipeline::new(PipelineConfig::default().with_svd_window(20)).unwrap();
/// let out = pipeline.process(&region).unwrap();
/// assert_eq!(out.field(Field::Cases).unwrap().len(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct RegionPipeline {
    config: PipelineConfig,
    denoiser: SvdDenoiser,
    smoother: Smoother,
}

impl RegionPipeline {
    /// Build a pipeline, validating everything that does not depend on the data.
    ///
    /// # Errors
    /// `InvalidParameter` for malformed cleaning ranges, `InvalidWindow` for a
    /// zero SVD window.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        if config.svd_window == 0 {
            return Err(DenoiseError::InvalidWindow { window: 0, len: 0 });
        }
        let smoother = Smoother::new(config.smoothing)?;
        let denoiser = SvdDenoiser::new(config.svd_window);
        Ok(Self {
            config,
            denoiser,
            smoother,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one series: clean, denoise with automatic rank, smooth, and
    /// finalise according to the field kind. Returns the values and the rank.
    pub fn process_field(&self, field: Field, values: &[f64]) -> Result<(Vec<f64>, usize)> {
        let cleaned = clean_series(values, &self.config.cleaning_for(field))?;
        let denoised = self.denoiser.denoise(&cleaned)?;
        let smoothed = self.smoother.smooth(&denoised.denoised)?;

        debug!(field = %field, rank = denoised.rank, "field processed");

        Ok((post_process(&smoothed, field.kind()), denoised.rank))
    }

    /// Process every field of a region. The first failing field fails the region.
    pub fn process(&self, region: &RegionSeries) -> Result<ProcessedRegion> {
        let mut fields = BTreeMap::new();
        let mut ranks = BTreeMap::new();

        for (field, values) in region.fields() {
            let (processed, rank) = self.process_field(field, values)?;
            fields.insert(field, processed);
            ranks.insert(field, rank);
        }

        Ok(ProcessedRegion {
            region: region.region().to_string(),
            epiweeks: region.epiweeks().to_vec(),
            fields,
            ranks,
        })
    }

    /// Process many regions, in parallel with the `parallel` feature.
    ///
    /// Returns one result per input region, in input order; a failing region
    /// does not affect the others.
    pub fn process_regions(&self, regions: &[RegionSeries]) -> Vec<Result<ProcessedRegion>> {
        let results: Vec<Result<ProcessedRegion>> = slice_maybe_parallel!(regions)
            .map(|region| {
                let result = self.process(region);
                match &result {
                    Ok(out) => info!(
                        region = region.region(),
                        weeks = region.len(),
                        fields = out.fields.len(),
                        "region processed"
                    ),
                    Err(e) => warn!(region = region.region(), error = %e, "region failed"),
                }
                result
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(regions = regions.len(), failed, "batch complete");
        results
    }
}
