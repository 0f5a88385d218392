//! Comparison-figure rendering.
//!
//! Produces one side-by-side figure per effect plus a combined grid, so a
//! reviewer can eyeball every degradation against the same sample frame.
//! All drawing is raster-native: panels are composed with `image`, borders
//! with `imageproc`, and titles with the built-in bitmap font.

mod font;

use crate::error::PipelineError;
use crate::io::save_image;
use anyhow::Result;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::fs;
use std::path::PathBuf;

/// Border colour of every original-image panel (gold).
const ORIGINAL_BORDER: Rgb<u8> = Rgb([255, 215, 0]);
/// Border colour of every processed-image panel (steel blue).
const PROCESSED_BORDER: Rgb<u8> = Rgb([70, 130, 180]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TITLE_COLOR: Rgb<u8> = Rgb([40, 40, 40]);

const BORDER_WIDTH: u32 = 3;
const GRID_COLUMNS: u32 = 4;
const PANEL_PADDING: u32 = 16;
const TITLE_SCALE: u32 = 2;

/// Renders before/after comparison figures for one sample image.
///
/// # Example
/// ```ignore
/// let renderer = ComparisonRenderer::new("visualizations");
/// renderer.render(&original, &[(degraded, "Fog".to_string())])?;
/// ```
pub struct ComparisonRenderer {
    output_dir: PathBuf,
    panel_size: u32,
}

impl ComparisonRenderer {
    /// Creates a renderer targeting `output_dir` with the default 300-px
    /// panel size.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            panel_size: 300,
        }
    }

    /// Sets the square panel edge, in pixels, that images are scaled to fit.
    pub fn with_panel_size(mut self, panel_size: u32) -> Self {
        self.panel_size = panel_size.max(32);
        self
    }

    /// Renders one `<name>.png` per processed entry and the combined
    /// `comparison.png` grid. Output is deterministic for identical inputs.
    pub fn render(&self, original: &RgbImage, processed: &[(RgbImage, String)]) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| PipelineError::filesystem("create directory", &self.output_dir, e))?;

        for (image, name) in processed {
            let figure = self.side_by_side(original, image, name);
            save_image(&figure, &self.output_dir.join(format!("{name}.png")))?;
        }

        let grid = self.grid(original, processed);
        save_image(&grid, &self.output_dir.join("comparison.png"))?;

        log::info!(
            "Rendered {} comparison figures into {}",
            processed.len() + 1,
            self.output_dir.display()
        );
        Ok(())
    }

    fn panel_width(&self) -> u32 {
        self.panel_size + 2 * PANEL_PADDING
    }

    fn panel_height(&self) -> u32 {
        self.panel_size + 2 * PANEL_PADDING + self.title_band()
    }

    fn title_band(&self) -> u32 {
        font::text_height(TITLE_SCALE) + 10
    }

    /// Composes one titled, bordered panel around a scaled-to-fit copy of
    /// `image`.
    fn panel(&self, image: &RgbImage, title: &str, border: Rgb<u8>) -> RgbImage {
        let mut canvas =
            RgbImage::from_pixel(self.panel_width(), self.panel_height(), BACKGROUND);

        // Title, centred over the panel.
        let title_x = (self.panel_width() as i64 - font::text_width(title, TITLE_SCALE) as i64) / 2;
        font::draw_text(
            &mut canvas,
            title,
            title_x,
            (PANEL_PADDING / 2) as i64,
            TITLE_SCALE,
            TITLE_COLOR,
        );

        // Image, scaled to fit the panel square and centred inside it.
        let (src_w, src_h) = image.dimensions();
        let fit = (self.panel_size as f32 / src_w as f32)
            .min(self.panel_size as f32 / src_h as f32);
        let fit_w = ((src_w as f32 * fit).round() as u32).max(1);
        let fit_h = ((src_h as f32 * fit).round() as u32).max(1);
        let scaled = imageops::resize(image, fit_w, fit_h, FilterType::Triangle);

        let offset_x = PANEL_PADDING + (self.panel_size - fit_w) / 2;
        let offset_y = PANEL_PADDING + self.title_band() + (self.panel_size - fit_h) / 2;
        imageops::replace(&mut canvas, &scaled, offset_x as i64, offset_y as i64);

        for inset in 1..=BORDER_WIDTH {
            let rect = Rect::at(
                offset_x as i32 - inset as i32,
                offset_y as i32 - inset as i32,
            )
            .of_size(fit_w + 2 * inset, fit_h + 2 * inset);
            draw_hollow_rect_mut(&mut canvas, rect, border);
        }

        canvas
    }

    /// Original on the left, processed on the right.
    fn side_by_side(&self, original: &RgbImage, processed: &RgbImage, name: &str) -> RgbImage {
        let left = self.panel(original, "Original", ORIGINAL_BORDER);
        let right = self.panel(processed, name, PROCESSED_BORDER);

        let mut figure = RgbImage::from_pixel(
            2 * self.panel_width(),
            self.panel_height(),
            BACKGROUND,
        );
        imageops::replace(&mut figure, &left, 0, 0);
        imageops::replace(&mut figure, &right, self.panel_width() as i64, 0);
        figure
    }

    /// Row-major grid: the original in cell (0, 0), every processed image
    /// after it, four cells per row.
    fn grid(&self, original: &RgbImage, processed: &[(RgbImage, String)]) -> RgbImage {
        let cells = processed.len() as u32 + 1;
        let rows = cells.div_ceil(GRID_COLUMNS);

        let mut figure = RgbImage::from_pixel(
            GRID_COLUMNS * self.panel_width(),
            rows * self.panel_height(),
            BACKGROUND,
        );

        let mut place = |panel: &RgbImage, index: u32| {
            let row = index / GRID_COLUMNS;
            let col = index % GRID_COLUMNS;
            imageops::replace(
                &mut figure,
                panel,
                (col * self.panel_width()) as i64,
                (row * self.panel_height()) as i64,
            );
        };

        place(&self.panel(original, "Original", ORIGINAL_BORDER), 0);
        for (index, (image, name)) in processed.iter().enumerate() {
            place(&self.panel(image, name, PROCESSED_BORDER), index as u32 + 1);
        }
        figure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(width: u32, height: u32, tint: u8) -> RgbImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, tint]);
        }
        img
    }

    #[test]
    fn test_render_writes_one_file_per_effect_plus_grid() -> Result<()> {
        let dir = tempdir()?;
        let renderer = ComparisonRenderer::new(dir.path()).with_panel_size(64);

        let original = sample(40, 30, 0);
        let processed = vec![
            (sample(40, 30, 80), "Fog".to_string()),
            (sample(40, 30, 160), "Snow".to_string()),
        ];
        renderer.render(&original, &processed)?;

        for name in ["Fog.png", "Snow.png", "comparison.png"] {
            let meta = fs::metadata(dir.path().join(name))?;
            assert!(meta.len() > 0, "{name} should be non-empty");
        }
        Ok(())
    }

    #[test]
    fn test_grid_row_count_follows_cell_count() -> Result<()> {
        let dir = tempdir()?;
        let renderer = ComparisonRenderer::new(dir.path()).with_panel_size(64);

        // 5 processed + 1 original = 6 cells -> 2 rows of 4.
        let processed: Vec<_> = (0..5)
            .map(|i| (sample(20, 20, i * 40), format!("E{i}")))
            .collect();
        renderer.render(&sample(20, 20, 0), &processed)?;

        let grid = image::open(dir.path().join("comparison.png"))?.to_rgb8();
        let expected_w = 4 * (64 + 2 * PANEL_PADDING);
        assert_eq!(grid.width(), expected_w);
        assert_eq!(grid.height() % 2, 0);
        assert_eq!(
            grid.height(),
            2 * (64 + 2 * PANEL_PADDING + font::text_height(TITLE_SCALE) + 10)
        );
        Ok(())
    }

    #[test]
    fn test_render_is_deterministic() -> Result<()> {
        let dir_a = tempdir()?;
        let dir_b = tempdir()?;
        let original = sample(24, 24, 10);
        let processed = vec![(sample(24, 24, 200), "Blur".to_string())];

        ComparisonRenderer::new(dir_a.path())
            .with_panel_size(48)
            .render(&original, &processed)?;
        ComparisonRenderer::new(dir_b.path())
            .with_panel_size(48)
            .render(&original, &processed)?;

        let a = fs::read(dir_a.path().join("comparison.png"))?;
        let b = fs::read(dir_b.path().join("comparison.png"))?;
        assert_eq!(a, b);
        Ok(())
    }
}
