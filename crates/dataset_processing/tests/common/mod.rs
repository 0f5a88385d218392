use anyhow::Result;
use image::{Rgb, RgbImage};
use image_degradations::{Effect, EffectSpec};
use std::path::Path;

/// Pass-through effect: lets the pipeline run end-to-end with
/// pixel-predictable output.
pub struct Identity;

impl Effect for Identity {
    fn apply(&self, image: RgbImage) -> Result<RgbImage> {
        Ok(image)
    }
}

/// Single-stage identity spec under the given name.
pub fn identity_spec(name: &str) -> EffectSpec {
    let stages: Vec<Box<dyn Effect>> = vec![Box::new(Identity)];
    EffectSpec::new(name, stages).expect("identity spec is always valid")
}

/// Writes a small deterministic test image; the format follows the path
/// extension.
pub fn write_image(path: &Path, width: u32, height: u32, tint: u8) -> Result<()> {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 29 % 256) as u8, (y * 31 % 256) as u8, tint]);
    }
    img.save(path)?;
    Ok(())
}

/// Sorted relative paths of every file below `root`, for tree comparisons.
pub fn tree_listing(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .expect("walk stays under root")
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    files.sort();
    files
}
