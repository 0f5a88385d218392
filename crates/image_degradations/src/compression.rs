use crate::effect::Effect;
use anyhow::{ensure, Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

// ============================================================================
// JpegCompression
// ============================================================================

/// JPEG artefacts: encodes the frame to JPEG at the given quality in memory
/// and decodes it straight back, keeping only the compression damage.
#[derive(Debug, Clone)]
pub struct JpegCompression {
    quality: u8,
}

impl JpegCompression {
    pub fn new(quality: u8) -> Result<Self> {
        ensure!(
            (1..=100).contains(&quality),
            "JPEG quality must be in [1, 100] range (got {})",
            quality
        );
        Ok(Self { quality })
    }
}

impl Effect for JpegCompression {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, self.quality)
            .encode_image(&image)
            .context("Failed to encode frame as JPEG")?;

        let decoded = image::load_from_memory(&encoded)
            .context("Failed to decode the re-compressed JPEG frame")?;
        Ok(decoded.to_rgb8())
    }
}
