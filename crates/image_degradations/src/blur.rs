use crate::effect::Effect;
use anyhow::{ensure, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use rand::Rng;

/// Averages the pixels at `offsets` around every coordinate, clamping at the
/// image border. Shared by the disc and line kernels below.
fn mean_over_offsets(image: &RgbImage, offsets: &[(i32, i32)]) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    let count = offsets.len() as u32;

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0u32; 3];
            for &(dx, dy) in offsets {
                let nx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
                let ny = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
                let pixel = image.get_pixel(nx, ny);
                sum[0] += pixel[0] as u32;
                sum[1] += pixel[1] as u32;
                sum[2] += pixel[2] as u32;
            }
            out.put_pixel(
                x,
                y,
                Rgb([
                    (sum[0] / count) as u8,
                    (sum[1] / count) as u8,
                    (sum[2] / count) as u8,
                ]),
            );
        }
    }
    out
}

// ============================================================================
// DefocusBlur
// ============================================================================

/// Out-of-focus lens blur: a uniform disc kernel of the given radius.
#[derive(Debug, Clone)]
pub struct DefocusBlur {
    radius: u32,
}

impl DefocusBlur {
    pub fn new(radius: u32) -> Result<Self> {
        ensure!(radius >= 1, "Defocus radius must be at least 1");
        Ok(Self { radius })
    }

    fn disc_offsets(&self) -> Vec<(i32, i32)> {
        let r = self.radius as i32;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    offsets.push((dx, dy));
                }
            }
        }
        offsets
    }
}

impl Effect for DefocusBlur {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        Ok(mean_over_offsets(&image, &self.disc_offsets()))
    }
}

// ============================================================================
// FrostedGlassBlur
// ============================================================================

/// Frosted-glass diffusion: every output pixel is pulled from a random
/// neighbour within `radius`, then a light Gaussian pass smooths the result.
#[derive(Debug, Clone)]
pub struct FrostedGlassBlur {
    radius: u32,
    sigma: f32,
}

impl FrostedGlassBlur {
    pub fn new(radius: u32, sigma: f32) -> Result<Self> {
        ensure!(radius >= 1, "Frosted-glass radius must be at least 1");
        ensure!(
            sigma > 0.0 && sigma.is_finite(),
            "Frosted-glass sigma must be finite and positive (got {})",
            sigma
        );
        Ok(Self { radius, sigma })
    }
}

impl Effect for FrostedGlassBlur {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let r = self.radius as i32;
        let mut rng = rand::rng();

        let mut scattered = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let dx = rng.random_range(-r..=r);
                let dy = rng.random_range(-r..=r);
                let sx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
                let sy = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
                scattered.put_pixel(x, y, *image.get_pixel(sx, sy));
            }
        }

        Ok(gaussian_blur_f32(&scattered, self.sigma))
    }
}

// ============================================================================
// MotionBlur
// ============================================================================

/// Linear camera-shake blur: averages `length` samples along a line at
/// `angle_degrees` through each pixel.
#[derive(Debug, Clone)]
pub struct MotionBlur {
    length: u32,
    angle_degrees: f32,
}

impl MotionBlur {
    pub fn new(length: u32, angle_degrees: f32) -> Result<Self> {
        ensure!(length >= 2, "Motion-blur length must be at least 2");
        ensure!(
            angle_degrees.is_finite(),
            "Motion-blur angle must be finite (got {})",
            angle_degrees
        );
        Ok(Self {
            length,
            angle_degrees,
        })
    }

    fn line_offsets(&self) -> Vec<(i32, i32)> {
        let theta = self.angle_degrees.to_radians();
        let (dir_x, dir_y) = (theta.cos(), theta.sin());
        let half = (self.length - 1) as f32 / 2.0;

        let mut offsets: Vec<(i32, i32)> = (0..self.length)
            .map(|t| {
                let s = t as f32 - half;
                ((s * dir_x).round() as i32, (s * dir_y).round() as i32)
            })
            .collect();
        offsets.dedup();
        offsets
    }
}

impl Effect for MotionBlur {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        Ok(mean_over_offsets(&image, &self.line_offsets()))
    }
}

// ============================================================================
// ZoomBlur
// ============================================================================

/// Radial zoom blur: averages the frame with progressively scaled,
/// centre-cropped copies of itself up to `max_zoom`.
#[derive(Debug, Clone)]
pub struct ZoomBlur {
    steps: u32,
    max_zoom: f32,
}

impl ZoomBlur {
    pub fn new(steps: u32, max_zoom: f32) -> Result<Self> {
        ensure!(steps >= 2, "Zoom-blur step count must be at least 2");
        ensure!(
            max_zoom > 1.0 && max_zoom.is_finite(),
            "Zoom-blur factor must be finite and above 1.0 (got {})",
            max_zoom
        );
        Ok(Self { steps, max_zoom })
    }
}

impl Effect for ZoomBlur {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let pixel_count = (width * height) as usize;
        let mut accum = vec![[0f32; 3]; pixel_count];

        for step in 0..self.steps {
            let zoom = 1.0 + (self.max_zoom - 1.0) * step as f32 / (self.steps - 1) as f32;
            let zw = ((width as f32 * zoom).round() as u32).max(width);
            let zh = ((height as f32 * zoom).round() as u32).max(height);

            let scaled = imageops::resize(&image, zw, zh, FilterType::Triangle);
            let cropped =
                imageops::crop_imm(&scaled, (zw - width) / 2, (zh - height) / 2, width, height)
                    .to_image();

            for (cell, pixel) in accum.iter_mut().zip(cropped.pixels()) {
                cell[0] += pixel[0] as f32;
                cell[1] += pixel[1] as f32;
                cell[2] += pixel[2] as f32;
            }
        }

        let steps = self.steps as f32;
        let mut out = RgbImage::new(width, height);
        for (cell, pixel) in accum.iter().zip(out.pixels_mut()) {
            *pixel = Rgb([
                (cell[0] / steps).round().clamp(0.0, 255.0) as u8,
                (cell[1] / steps).round().clamp(0.0, 255.0) as u8,
                (cell[2] / steps).round().clamp(0.0, 255.0) as u8,
            ]);
        }
        Ok(out)
    }
}
