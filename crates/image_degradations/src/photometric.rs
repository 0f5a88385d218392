use crate::effect::Effect;
use anyhow::{ensure, Result};
use image::{imageops, RgbImage};

// ============================================================================
// Brightness
// ============================================================================

/// Shifts every channel by `delta` (positive brightens, negative darkens),
/// saturating at the 8-bit bounds.
#[derive(Debug, Clone)]
pub struct Brightness {
    delta: i32,
}

impl Brightness {
    pub fn new(delta: i32) -> Result<Self> {
        ensure!(
            (-255..=255).contains(&delta),
            "Brightness delta must be in [-255, 255] range (got {})",
            delta
        );
        Ok(Self { delta })
    }
}

impl Effect for Brightness {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        Ok(imageops::brighten(&image, self.delta))
    }
}

// ============================================================================
// Contrast
// ============================================================================

/// Adjusts contrast around mid-grey; `percent` above 0 stretches, below 0
/// flattens towards grey.
#[derive(Debug, Clone)]
pub struct Contrast {
    percent: f32,
}

impl Contrast {
    pub fn new(percent: f32) -> Result<Self> {
        ensure!(
            percent.is_finite() && percent > -100.0,
            "Contrast percentage must be finite and above -100 (got {})",
            percent
        );
        Ok(Self { percent })
    }
}

impl Effect for Contrast {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        Ok(imageops::contrast(&image, self.percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_brightness_shifts_and_saturates() -> Result<()> {
        let img = RgbImage::from_pixel(4, 4, Rgb([100, 200, 250]));
        let brighten = Brightness::new(40)?;

        let out = brighten.apply(img)?;
        let pixel = out.get_pixel(0, 0);
        assert_eq!(pixel.0, [140, 240, 255]);
        Ok(())
    }

    #[test]
    fn test_negative_brightness_darkens() -> Result<()> {
        let img = RgbImage::from_pixel(4, 4, Rgb([100, 20, 0]));
        let darken = Brightness::new(-40)?;

        let out = darken.apply(img)?;
        assert_eq!(out.get_pixel(0, 0).0, [60, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_contrast_flattens_towards_grey() -> Result<()> {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([30, 30, 30]));
        img.put_pixel(1, 0, Rgb([220, 220, 220]));
        let flatten = Contrast::new(-60.0)?;

        let out = flatten.apply(img)?;
        let dark = out.get_pixel(0, 0)[0];
        let bright = out.get_pixel(1, 0)[0];
        assert!(dark > 30, "Dark pixel should move towards grey");
        assert!(bright < 220, "Bright pixel should move towards grey");
        Ok(())
    }

    #[test]
    fn test_contrast_is_deterministic() -> Result<()> {
        let img = RgbImage::from_pixel(8, 8, Rgb([64, 128, 192]));
        let adjust = Contrast::new(25.0)?;

        let a = adjust.apply(img.clone())?;
        let b = adjust.apply(img)?;
        assert_eq!(a.as_raw(), b.as_raw());
        Ok(())
    }

    #[test]
    fn test_parameter_validation() {
        assert!(Brightness::new(300).is_err());
        assert!(Contrast::new(f32::NAN).is_err());
    }
}
