use crate::effect::Effect;
use anyhow::{ensure, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use rand::Rng;

fn blend(base: u8, overlay: u8, alpha: f32) -> u8 {
    (base as f32 * (1.0 - alpha) + overlay as f32 * alpha)
        .round()
        .clamp(0.0, 255.0) as u8
}

// ============================================================================
// Snow
// ============================================================================

/// Falling-snow overlay: bright flecks scattered over the frame at the given
/// density (flakes per pixel), softened with a light blur so they read as
/// snow rather than dead pixels.
#[derive(Debug, Clone)]
pub struct Snow {
    density: f64,
}

impl Snow {
    pub fn new(density: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&density),
            "Snow density must be in [0.0, 1.0] range (got {})",
            density
        );
        Ok(Self { density })
    }
}

impl Effect for Snow {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let mut rng = rand::rng();
        let mut image = image;

        let flakes = (width as f64 * height as f64 * self.density).round() as u64;
        for _ in 0..flakes {
            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            let tone = rng.random_range(225..=255u16) as u8;
            image.put_pixel(x, y, Rgb([tone, tone, tone]));
            // Most flakes get a second pixel so they survive the blur pass.
            if x + 1 < width && rng.random_bool(0.7) {
                image.put_pixel(x + 1, y, Rgb([tone, tone, tone]));
            }
        }

        Ok(gaussian_blur_f32(&image, 0.6))
    }
}

// ============================================================================
// Frost
// ============================================================================

/// Frost crystals creeping over the lens: short white streaks in random
/// directions, blended translucently over the frame.
#[derive(Debug, Clone)]
pub struct Frost {
    coverage: f64,
}

impl Frost {
    pub fn new(coverage: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&coverage),
            "Frost coverage must be in [0.0, 1.0] range (got {})",
            coverage
        );
        Ok(Self { coverage })
    }
}

impl Effect for Frost {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let mut rng = rand::rng();
        let mut image = image;

        // Each streak covers ~6 pixels, so scale the count down accordingly.
        let streaks = (width as f64 * height as f64 * self.coverage / 6.0).round() as u64;
        for _ in 0..streaks {
            let mut x = rng.random_range(0..width) as f32;
            let mut y = rng.random_range(0..height) as f32;
            let theta = rng.random_range(0.0..std::f32::consts::TAU);
            let (step_x, step_y) = (theta.cos(), theta.sin());
            let length = rng.random_range(3..=8);
            let alpha = rng.random_range(0.35..0.75);

            for _ in 0..length {
                let px = x.round() as i64;
                let py = y.round() as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    break;
                }
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                *pixel = Rgb([
                    blend(pixel[0], 250, alpha),
                    blend(pixel[1], 252, alpha),
                    blend(pixel[2], 255, alpha),
                ]);
                x += step_x;
                y += step_y;
            }
        }

        Ok(image)
    }
}

// ============================================================================
// Fog
// ============================================================================

/// Atmospheric fog: a low-frequency haze field, upsampled smoothly and
/// blended towards white. `intensity` caps the per-pixel haze strength and
/// `granularity` sets the coarse-field cell size in pixels.
#[derive(Debug, Clone)]
pub struct Fog {
    intensity: f32,
    granularity: u32,
}

impl Fog {
    pub fn new(intensity: f32, granularity: u32) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&intensity),
            "Fog intensity must be in [0.0, 1.0] range (got {})",
            intensity
        );
        ensure!(granularity >= 1, "Fog granularity must be at least 1");
        Ok(Self {
            intensity,
            granularity,
        })
    }
}

impl Effect for Fog {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let mut rng = rand::rng();

        let coarse_w = (width / self.granularity).max(2);
        let coarse_h = (height / self.granularity).max(2);
        let mut coarse = GrayImage::new(coarse_w, coarse_h);
        for pixel in coarse.pixels_mut() {
            *pixel = Luma([rng.random_range(96..=255u16) as u8]);
        }

        // Bilinear upsampling turns the random cells into a smooth haze field.
        let field = imageops::resize(&coarse, width, height, FilterType::Triangle);

        let mut image = image;
        for (pixel, haze) in image.pixels_mut().zip(field.pixels()) {
            let alpha = self.intensity * haze[0] as f32 / 255.0;
            *pixel = Rgb([
                blend(pixel[0], 255, alpha),
                blend(pixel[1], 255, alpha),
                blend(pixel[2], 255, alpha),
            ]);
        }
        Ok(image)
    }
}
