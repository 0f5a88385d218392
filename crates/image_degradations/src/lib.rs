//! Synthetic image-degradation effects.
//!
//! Every effect is a pure transform from one owned [`image::RgbImage`] to a
//! new one, exposed through the [`Effect`] trait so pipelines can compose
//! them dynamically. [`EffectSpec`] bundles an ordered stage list under a
//! run-unique name.
//!
//! # Module Organization
//!
//! ```text
//! image_degradations/
//! ├── effect.rs       → Effect trait + EffectSpec composition
//! ├── noise.rs        → Gaussian / shot / impulse sensor noise
//! ├── blur.rs         → defocus, frosted glass, motion, zoom
//! ├── weather.rs      → snow, frost, fog overlays
//! ├── photometric.rs  → brightness, contrast
//! ├── geometric.rs    → elastic warp, pixelation
//! └── compression.rs  → JPEG re-encode artefacts
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use image_degradations::{builtin_effects, EffectSpec};
//!
//! for spec in builtin_effects()? {
//!     let degraded = spec.apply(image.clone())?;
//! }
//! ```

pub mod blur;
pub mod compression;
pub mod effect;
pub mod geometric;
pub mod noise;
pub mod photometric;
pub mod weather;

pub use blur::{DefocusBlur, FrostedGlassBlur, MotionBlur, ZoomBlur};
pub use compression::JpegCompression;
pub use effect::{Effect, EffectSpec};
pub use geometric::{ElasticTransform, Pixelation};
pub use noise::{GaussianNoise, ImpulseNoise, ShotNoise};
pub use photometric::{Brightness, Contrast};
pub use weather::{Fog, Frost, Snow};

use anyhow::Result;

fn spec(name: &str, stage: impl Effect + 'static) -> Result<EffectSpec> {
    let stages: Vec<Box<dyn Effect>> = vec![Box::new(stage)];
    EffectSpec::new(name, stages)
}

/// The builtin effect lookup table, in presentation order.
///
/// Each entry is a single-stage pipeline with parameters tuned to produce a
/// clearly visible but survivable degradation on typical photographs; callers
/// wanting other strengths or multi-stage chains build their own
/// [`EffectSpec`]s instead.
pub fn builtin_effects() -> Result<Vec<EffectSpec>> {
    Ok(vec![
        spec("Gaussian", GaussianNoise::new(12.0)?)?,
        spec("Shot", ShotNoise::new(3.0)?)?,
        spec("Impulse", ImpulseNoise::new(0.03)?)?,
        spec("Defocus", DefocusBlur::new(3)?)?,
        spec("Frosted Glass", FrostedGlassBlur::new(2, 0.8)?)?,
        spec("Motion", MotionBlur::new(9, 15.0)?)?,
        spec("Zoom", ZoomBlur::new(8, 1.08)?)?,
        spec("Snow", Snow::new(0.02)?)?,
        spec("Frost", Frost::new(0.25)?)?,
        spec("Fog", Fog::new(0.5, 16)?)?,
        spec("Brightness", Brightness::new(45)?)?,
        spec("Contrast", Contrast::new(-35.0)?)?,
        spec("Elastic", ElasticTransform::new(6.0, 24)?)?,
        spec("Pixelation", Pixelation::new(6)?)?,
        spec("JPEG", JpegCompression::new(12)?)?,
    ])
}
