//! The dataset walk: one pass over every (effect, image) pair.
//!
//! `DatasetProcessor` enumerates the input images once, fans each effect out
//! into its own `<name>/{images,labels}` subtree, and feeds a single sampled
//! frame through every effect for the comparison figures rendered at the end.
//!
//! Any decode, encode, or filesystem failure aborts the whole run
//! immediately; there is no per-effect isolation or rollback. Reruns
//! overwrite per file, so a failed run can simply be repeated.

use crate::error::PipelineError;
use crate::io::{load_image, save_image};
use crate::labels::mirror_labels;
use crate::readers::ImageDirSource;
use crate::viz::ComparisonRenderer;
use anyhow::{ensure, Context, Result};
use image::RgbImage;
use image_degradations::EffectSpec;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a dataset run.
///
/// Example:
/// ```ignore
/// let config = PipelineConfig::builder()
///     .seed(42)
///     .viz_dir("visualizations")
///     .panel_size(300)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory receiving the comparison figures.
    pub viz_dir: PathBuf,
    /// Square panel edge used by the comparison renderer, in pixels.
    pub panel_size: u32,
    /// Seed for the sample-image choice. `None` draws from OS entropy;
    /// setting it makes the sampled frame reproducible across runs.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            viz_dir: PathBuf::from("visualizations"),
            panel_size: 300,
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for [`PipelineConfig`] with method chaining.
#[derive(Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the comparison-figure output directory.
    pub fn viz_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.viz_dir = dir.into();
        self
    }

    /// Set the renderer panel size in pixels.
    pub fn panel_size(mut self, panel_size: u32) -> Self {
        self.config.panel_size = panel_size;
        self
    }

    /// Set the seed for reproducible sample selection.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

// ============================================================================
// ImageProcessor
// ============================================================================

/// Decodes `image_path`, applies the spec's stages in order, and writes the
/// result to `output_path` (format inferred from the extension, existing
/// files overwritten).
pub fn process_image(image_path: &Path, output_path: &Path, spec: &EffectSpec) -> Result<()> {
    let image = load_image(image_path)?;
    let degraded = spec.apply(image)?;
    save_image(&degraded, output_path)?;
    log::debug!("Wrote {}", output_path.display());
    Ok(())
}

// ============================================================================
// DatasetProcessor
// ============================================================================

/// Drives one full degradation run over a labeled image dataset.
pub struct DatasetProcessor {
    config: PipelineConfig,
}

impl DatasetProcessor {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Runs every effect over every input image.
    ///
    /// For each spec in `effects`, in slice order, this produces
    /// `output_base_dir/<name>/images` (one degraded copy per input image)
    /// and `output_base_dir/<name>/labels` (annotations mirrored verbatim),
    /// then renders the comparison figures for one randomly sampled frame.
    pub fn run(
        &self,
        input_image_dir: &Path,
        input_label_dir: &Path,
        output_base_dir: &Path,
        effects: &[EffectSpec],
    ) -> Result<()> {
        let mut names = HashSet::new();
        for spec in effects {
            ensure!(
                names.insert(spec.name()),
                "Duplicate effect name `{}` in the same run",
                spec.name()
            );
        }

        let mut image_files: Vec<PathBuf> = ImageDirSource::images(input_image_dir)
            .stream()?
            .collect::<Result<_>>()?;
        if image_files.is_empty() {
            return Err(PipelineError::EmptyDataset {
                dir: input_image_dir.to_path_buf(),
            }
            .into());
        }
        // Directory enumeration order is platform-dependent; sorting keeps
        // seeded sample selection reproducible.
        image_files.sort();

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let sample_path = image_files
            .choose(&mut rng)
            .expect("file list verified non-empty");
        let original = load_image(sample_path)?;
        log::info!(
            "Processing {} images; sampled {} for comparison figures",
            image_files.len(),
            sample_path.display()
        );

        let mut comparisons: Vec<(RgbImage, String)> = Vec::with_capacity(effects.len());
        for spec in effects {
            let effect_dir = output_base_dir.join(spec.name());
            let image_dir = effect_dir.join("images");
            let label_dir = effect_dir.join("labels");
            fs::create_dir_all(&image_dir)
                .map_err(|e| PipelineError::filesystem("create directory", &image_dir, e))?;

            log::info!("Applying `{}` to {} images", spec.name(), image_files.len());
            for input_path in &image_files {
                let file_name = input_path
                    .file_name()
                    .expect("enumerated paths always carry file names");
                process_image(input_path, &image_dir.join(file_name), spec)?;
            }

            mirror_labels(input_label_dir, &label_dir)?;

            // The retained original feeds every effect from a fresh clone.
            let processed = spec
                .apply(original.clone())
                .with_context(|| format!("Failed to process sample with `{}`", spec.name()))?;
            comparisons.push((processed, spec.name().to_string()));
        }

        ComparisonRenderer::new(&self.config.viz_dir)
            .with_panel_size(self.config.panel_size)
            .render(&original, &comparisons)
    }
}
