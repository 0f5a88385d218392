use crate::error::PipelineError;
use anyhow::Result;
use image::{ImageReader, RgbImage};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Loads an image from disk and normalizes it to 8-bit RGB.
///
/// The whole file is read through a buffered reader before decoding so the
/// format can be sniffed from the bytes rather than trusted from the
/// extension. Unreadable and corrupt inputs both surface as
/// [`PipelineError::Decode`].
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let decode_io = |e: std::io::Error| PipelineError::Decode {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(e),
    };

    let file = File::open(path).map_err(decode_io)?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).map_err(decode_io)?;

    let image = ImageReader::new(Cursor::new(buffer))
        .with_guessed_format()
        .map_err(decode_io)?
        .decode()
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(image.to_rgb8())
}

/// Writes an image to disk, inferring the format from the output path's
/// extension. Existing files are silently overwritten.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| PipelineError::Encode {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
