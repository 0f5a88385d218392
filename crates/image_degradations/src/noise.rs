use crate::effect::Effect;
use anyhow::{ensure, Result};
use image::{Rgb, RgbImage};
use rand::Rng;

/// Draws one standard-normal sample with the Box–Muller transform.
///
/// Generates pairs; the second half of each pair is stashed in `spare` and
/// returned on the next call.
fn standard_normal<R: Rng>(rng: &mut R, spare: &mut Option<f32>) -> f32 {
    if let Some(z) = spare.take() {
        return z;
    }
    let u1: f32 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.random();
    let radius = (-2.0 * u1.ln()).sqrt();
    let theta = std::f32::consts::TAU * u2;
    *spare = Some(radius * theta.sin());
    radius * theta.cos()
}

// ============================================================================
// GaussianNoise
// ============================================================================

/// Additive zero-mean Gaussian sensor noise with standard deviation `sigma`
/// (in 8-bit intensity units), sampled independently per channel.
///
/// # Example
/// ```ignore
/// let noise = GaussianNoise::new(12.0)?;
/// let noisy = noise.apply(image)?;
/// ```
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    sigma: f32,
}

impl GaussianNoise {
    pub fn new(sigma: f32) -> Result<Self> {
        ensure!(
            sigma >= 0.0 && sigma.is_finite(),
            "Noise standard deviation must be finite and non-negative (got {})",
            sigma
        );
        Ok(Self { sigma })
    }
}

impl Effect for GaussianNoise {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let mut rng = rand::rng();
        let mut spare = None;

        let mut raw = image.into_raw();
        for value in raw.iter_mut() {
            let z = standard_normal(&mut rng, &mut spare);
            *value = (*value as f32 + z * self.sigma).round().clamp(0.0, 255.0) as u8;
        }

        Ok(RgbImage::from_raw(width, height, raw).expect("raw buffer length unchanged"))
    }
}

// ============================================================================
// ShotNoise
// ============================================================================

/// Signal-dependent (photon) noise: variance grows with pixel intensity, so
/// bright regions fleck more than shadows. `scale` controls the overall
/// strength; 0 leaves the image untouched.
#[derive(Debug, Clone)]
pub struct ShotNoise {
    scale: f32,
}

impl ShotNoise {
    pub fn new(scale: f32) -> Result<Self> {
        ensure!(
            scale >= 0.0 && scale.is_finite(),
            "Shot-noise scale must be finite and non-negative (got {})",
            scale
        );
        Ok(Self { scale })
    }
}

impl Effect for ShotNoise {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let mut rng = rand::rng();
        let mut spare = None;

        let mut raw = image.into_raw();
        for value in raw.iter_mut() {
            let z = standard_normal(&mut rng, &mut spare);
            // Poisson approximated as a normal whose sigma tracks sqrt(signal).
            let sigma = (*value as f32 * self.scale).sqrt();
            *value = (*value as f32 + z * sigma).round().clamp(0.0, 255.0) as u8;
        }

        Ok(RgbImage::from_raw(width, height, raw).expect("raw buffer length unchanged"))
    }
}

// ============================================================================
// ImpulseNoise
// ============================================================================

/// Salt-and-pepper noise: each pixel is independently replaced with pure
/// black or pure white with probability `p`.
#[derive(Debug, Clone)]
pub struct ImpulseNoise {
    p: f64,
}

impl ImpulseNoise {
    pub fn new(p: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&p),
            "Impulse probability must be in [0.0, 1.0] range (got {})",
            p
        );
        Ok(Self { p })
    }
}

impl Effect for ImpulseNoise {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let mut rng = rand::rng();
        let mut image = image;
        for pixel in image.pixels_mut() {
            if rng.random_bool(self.p) {
                *pixel = if rng.random_bool(0.5) {
                    Rgb([255, 255, 255])
                } else {
                    Rgb([0, 0, 0])
                };
            }
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gradient_image(width: u32, height: u32) -> RgbImage {
        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width) as u8;
                let g = (y * 255 / height) as u8;
                img.put_pixel(x, y, Rgb([r, g, 128]));
            }
        }
        img
    }

    #[test]
    fn test_gaussian_noise_zero_sigma_is_identity() -> Result<()> {
        let img = test_gradient_image(16, 16);
        let noise = GaussianNoise::new(0.0)?;

        let out = noise.apply(img.clone())?;
        assert_eq!(out.as_raw(), img.as_raw());
        Ok(())
    }

    #[test]
    fn test_gaussian_noise_perturbs_pixels() -> Result<()> {
        let img = test_gradient_image(32, 32);
        let noise = GaussianNoise::new(25.0)?;

        let out = noise.apply(img.clone())?;
        assert_eq!(out.dimensions(), img.dimensions());

        let changed = out
            .as_raw()
            .iter()
            .zip(img.as_raw())
            .filter(|(a, b)| a != b)
            .count();
        // With sigma 25 nearly every subpixel moves; half is a very safe floor.
        assert!(changed > out.as_raw().len() / 2);
        Ok(())
    }

    #[test]
    fn test_gaussian_noise_rejects_negative_sigma() {
        assert!(GaussianNoise::new(-1.0).is_err());
    }

    #[test]
    fn test_shot_noise_spares_black_pixels() -> Result<()> {
        // Zero signal has zero variance, so a black image survives untouched.
        let img = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        let noise = ShotNoise::new(4.0)?;

        let out = noise.apply(img.clone())?;
        assert_eq!(out.as_raw(), img.as_raw());
        Ok(())
    }

    #[test]
    fn test_impulse_noise_full_probability() -> Result<()> {
        let img = test_gradient_image(16, 16);
        let noise = ImpulseNoise::new(1.0)?;

        let out = noise.apply(img)?;
        assert!(out
            .pixels()
            .all(|p| p.0 == [0, 0, 0] || p.0 == [255, 255, 255]));
        Ok(())
    }

    #[test]
    fn test_impulse_noise_zero_probability() -> Result<()> {
        let img = test_gradient_image(16, 16);
        let noise = ImpulseNoise::new(0.0)?;

        let out = noise.apply(img.clone())?;
        assert_eq!(out.as_raw(), img.as_raw());
        Ok(())
    }

    #[test]
    fn test_impulse_noise_rejects_out_of_range_probability() {
        assert!(ImpulseNoise::new(1.5).is_err());
        assert!(ImpulseNoise::new(-0.1).is_err());
    }
}
