use dataset_processing::{DatasetProcessor, PipelineConfig};
use image_degradations::builtin_effects;

// Default dataset locations.
const INPUT_IMAGE_DIR: &str = "data/raw/images";
const INPUT_LABEL_DIR: &str = "data/raw/labels";
const OUTPUT_BASE_DIR: &str = "data/processed";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let effects = builtin_effects()?;
    log::info!(
        "Degrading {} with {} effect pipelines",
        INPUT_IMAGE_DIR,
        effects.len()
    );

    let processor = DatasetProcessor::new(PipelineConfig::default());
    processor.run(
        INPUT_IMAGE_DIR.as_ref(),
        INPUT_LABEL_DIR.as_ref(),
        OUTPUT_BASE_DIR.as_ref(),
        &effects,
    )
}
