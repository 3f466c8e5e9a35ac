//! Regional weekly records and batch processing.
//!
//! A [`RegionSeries`] holds the weekly case and climate columns of one
//! region. [`RegionPipeline`] cleans each column, denoises it with the SVD
//! denoiser, smooths it and finalises it according to its [`FieldKind`]
//! (case counts become non-negative integers).
//!
//! [`FieldKind`]: crate::smoothing::FieldKind
//!
//! # Example
//!
//! ```
//! use epidenoise::region::{EpiWeek, Field, PipelineConfig, RegionPipeline, RegionSeries};
//!
//! let weeks: Vec<EpiWeek> = (1..=52)
//!     .chain(1..=52)
//!     .enumerate()
//!     .map(|(i, w)| EpiWeek::new(2021 + (i / 52) as i32, w).unwrap())
//!     .collect();
//! let precip: Vec<f64> = (0..104).map(|i| 5.0 + ((i * 17) % 7) as f64).collect();
//!
//! let region = RegionSeries::new("north", weeks)
//!     .unwrap()
//!     .with_field(Field::PrecipTot, precip)
//!     .unwrap();
//!
//! let pipeline = RegionPipeline::new(PipelineConfig::default()).unwrap();
//! let results = pipeline.process_regions(&[region]);
//! assert!(results[0].is_ok());
//! ```

mod cleaning;
mod epiweek;
mod pipeline;
mod record;

pub use cleaning::{clean_series, CleaningConfig};
pub use epiweek::EpiWeek;
pub use pipeline::{PipelineConfig, ProcessedRegion, RegionPipeline, DEFAULT_SVD_WINDOW};
pub use record::{Field, RegionSeries};
