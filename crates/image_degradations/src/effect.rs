use anyhow::{ensure, Context, Result};
use image::RgbImage;

/// A single image-degradation capability.
///
/// An `Effect` consumes its input buffer and returns a freshly built one, so
/// the same source image can feed several effect chains without aliasing:
/// callers that need to keep the input clone it before applying.
///
/// Implementations must be `Send + Sync` so specs can be shared freely.
pub trait Effect: Send + Sync {
    /// Applies the degradation to the input image.
    fn apply(&self, image: RgbImage) -> Result<RgbImage>;
}

// ============================================================================
// EffectSpec
// ============================================================================

/// A named, ordered list of [`Effect`] stages applied as one composed
/// pipeline, left to right.
///
/// Specs are built at startup and registered by name; the stage list is
/// guaranteed non-empty by construction.
///
/// # Example
/// ```ignore
/// let spec = EffectSpec::new(
///     "Pixelation",
///     vec![Box::new(Pixelation::new(8)?) as Box<dyn Effect>],
/// )?;
/// let degraded = spec.apply(image)?;
/// ```
pub struct EffectSpec {
    name: String,
    stages: Vec<Box<dyn Effect>>,
}

impl EffectSpec {
    /// Creates a new named effect pipeline.
    pub fn new(name: impl Into<String>, stages: Vec<Box<dyn Effect>>) -> Result<Self> {
        let name = name.into();
        ensure!(!name.is_empty(), "Effect spec name cannot be empty");
        ensure!(
            !stages.is_empty(),
            "Effect spec `{}` must contain at least one stage",
            name
        );
        Ok(Self { name, stages })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Runs every stage in order, threading each output into the next input.
    pub fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        log::trace!(
            "Applying effect `{}` ({} stages) to {}x{} frame",
            self.name,
            self.stages.len(),
            image.width(),
            image.height()
        );
        let mut image = image;
        for (index, stage) in self.stages.iter().enumerate() {
            image = stage.apply(image).with_context(|| {
                format!("Effect `{}` failed at stage {}", self.name, index)
            })?;
        }
        Ok(image)
    }
}

impl std::fmt::Debug for EffectSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectSpec")
            .field("name", &self.name)
            .field("stages", &self.stages.len())
            .finish()
    }
}
