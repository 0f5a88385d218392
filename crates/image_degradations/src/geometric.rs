use crate::effect::Effect;
use anyhow::{ensure, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{warp_with, Interpolation};
use rand::Rng;

/// Bilinear lookup into a coarse `grid_w` x `grid_h` scalar field at
/// fractional node coordinates.
fn bilinear(grid: &[f32], grid_w: usize, grid_h: usize, fx: f32, fy: f32) -> f32 {
    let fx = fx.clamp(0.0, (grid_w - 1) as f32);
    let fy = fy.clamp(0.0, (grid_h - 1) as f32);
    let x0 = fx.floor() as usize;
    let y0 = fy.floor() as usize;
    let x1 = (x0 + 1).min(grid_w - 1);
    let y1 = (y0 + 1).min(grid_h - 1);
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let top = grid[y0 * grid_w + x0] * (1.0 - tx) + grid[y0 * grid_w + x1] * tx;
    let bottom = grid[y1 * grid_w + x0] * (1.0 - tx) + grid[y1 * grid_w + x1] * tx;
    top * (1.0 - ty) + bottom * ty
}

// ============================================================================
// ElasticTransform
// ============================================================================

/// Elastic (rubber-sheet) distortion: a coarse random displacement field,
/// smoothly interpolated across the frame, warps every pixel by at most
/// `alpha` pixels. `cell` is the field's node spacing.
#[derive(Debug, Clone)]
pub struct ElasticTransform {
    alpha: f32,
    cell: u32,
}

impl ElasticTransform {
    pub fn new(alpha: f32, cell: u32) -> Result<Self> {
        ensure!(
            alpha > 0.0 && alpha.is_finite(),
            "Elastic displacement must be finite and positive (got {})",
            alpha
        );
        ensure!(cell >= 2, "Elastic cell size must be at least 2");
        Ok(Self { alpha, cell })
    }
}

impl Effect for ElasticTransform {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let mut rng = rand::rng();

        let cell = self.cell as f32;
        let grid_w = (width as f32 / cell).ceil() as usize + 1;
        let grid_h = (height as f32 / cell).ceil() as usize + 1;
        let nodes = grid_w * grid_h;

        let offsets_x: Vec<f32> = (0..nodes)
            .map(|_| rng.random_range(-self.alpha..=self.alpha))
            .collect();
        let offsets_y: Vec<f32> = (0..nodes)
            .map(|_| rng.random_range(-self.alpha..=self.alpha))
            .collect();

        let warped = warp_with(
            &image,
            |x, y| {
                let fx = x / cell;
                let fy = y / cell;
                (
                    x + bilinear(&offsets_x, grid_w, grid_h, fx, fy),
                    y + bilinear(&offsets_y, grid_w, grid_h, fx, fy),
                )
            },
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
        );
        Ok(warped)
    }
}

// ============================================================================
// Pixelation
// ============================================================================

/// Mosaic pixelation: nearest-neighbour downscale by `block`, then
/// nearest-neighbour upscale back to the original size.
#[derive(Debug, Clone)]
pub struct Pixelation {
    block: u32,
}

impl Pixelation {
    pub fn new(block: u32) -> Result<Self> {
        ensure!(block >= 2, "Pixelation block size must be at least 2");
        Ok(Self { block })
    }
}

impl Effect for Pixelation {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let small_w = (width / self.block).max(1);
        let small_h = (height / self.block).max(1);

        let small = imageops::resize(&image, small_w, small_h, FilterType::Nearest);
        Ok(imageops::resize(&small, width, height, FilterType::Nearest))
    }
}
