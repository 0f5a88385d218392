//! Batch degradation of labeled image datasets.
//!
//! Walks a flat directory of images, applies every registered
//! [`image_degradations::EffectSpec`] to every image, mirrors the annotation
//! files next to each effect's output, and renders before/after comparison
//! figures for one sampled frame.
//!
//! # Module Organization
//!
//! ```text
//! dataset_processing/
//! ├── error.rs     → fatal failure taxonomy (decode / encode / empty / fs)
//! ├── io.rs        → single-image decode and encode
//! ├── readers.rs   → image-directory enumeration
//! ├── labels.rs    → verbatim annotation mirroring
//! ├── pipeline.rs  → the dataset walk and its configuration
//! └── viz/         → comparison-figure rendering
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use dataset_processing::{DatasetProcessor, PipelineConfig};
//! use image_degradations::builtin_effects;
//!
//! let processor = DatasetProcessor::new(PipelineConfig::default());
//! processor.run(
//!     "data/raw/images".as_ref(),
//!     "data/raw/labels".as_ref(),
//!     "data/processed".as_ref(),
//!     &builtin_effects()?,
//! )?;
//! ```

pub mod error;
pub mod io;
pub mod labels;
pub mod pipeline;
pub mod readers;
pub mod viz;

pub use error::PipelineError;
pub use io::{load_image, save_image};
pub use labels::{mirror_labels, LABEL_SUFFIXES};
pub use pipeline::{process_image, DatasetProcessor, PipelineConfig};
pub use readers::{ImageDirSource, IMAGE_SUFFIXES};
pub use viz::ComparisonRenderer;
