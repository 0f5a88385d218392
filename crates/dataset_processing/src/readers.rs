use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Image filename suffixes the pipeline recognizes. Matching is exact and
/// case-sensitive: `photo.JPG` is not part of a dataset, by contract.
pub const IMAGE_SUFFIXES: [&str; 3] = [".jpg", ".png", ".jpeg"];

/// Streams image file paths from a directory (with optional recursion).
///
/// The source yields paths rather than decoded pixels so callers decide when
/// to pay the decode cost.
///
/// # Example
/// ```ignore
/// let source = ImageDirSource::images("./data/raw/images");
/// for path in source.stream()? {
///     let image = load_image(&path?)?;
/// }
/// ```
pub struct ImageDirSource {
    dir_path: PathBuf,
    suffixes: Vec<String>,
    recurse: bool,
}

impl ImageDirSource {
    /// Creates a source over `dir_path` matching the given filename suffixes
    /// (e.g. `[".jpg", ".png"]`, case-sensitive).
    pub fn new(dir_path: impl Into<PathBuf>, suffixes: &[&str], recurse: bool) -> Self {
        Self {
            dir_path: dir_path.into(),
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
            recurse,
        }
    }

    /// Non-recursive source over the standard image suffix set.
    pub fn images(dir_path: impl Into<PathBuf>) -> Self {
        Self::new(dir_path, &IMAGE_SUFFIXES, false)
    }

    /// Returns an iterator over matching file paths.
    pub fn stream(&self) -> Result<Box<dyn Iterator<Item = Result<PathBuf>> + Send>> {
        let dir_metadata = fs::metadata(&self.dir_path)
            .with_context(|| format!("Failed to access directory: {}", self.dir_path.display()))?;
        if !dir_metadata.is_dir() {
            bail!("Path is not a directory: {}", self.dir_path.display());
        }

        let path_iter: Box<dyn Iterator<Item = Result<PathBuf>> + Send> = if self.recurse {
            Box::new(WalkDir::new(&self.dir_path).into_iter().map(|entry| {
                entry
                    .map(|e| e.path().to_path_buf())
                    .map_err(|e| anyhow!("Failed to read directory entry: {}", e))
            }))
        } else {
            let entries = fs::read_dir(&self.dir_path).with_context(|| {
                format!("Failed to read directory: {}", self.dir_path.display())
            })?;
            Box::new(entries.map(|entry| {
                entry
                    .map(|e| e.path())
                    .map_err(|e| anyhow!("Failed to read directory entry: {}", e))
            }))
        };

        let suffixes = self.suffixes.clone();
        let iter = path_iter.filter_map(move |path_result| match path_result {
            Ok(path) => {
                let name_matches = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| suffixes.iter().any(|s| n.ends_with(s)));
                if name_matches && path.is_file() {
                    Some(Ok(path))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e)),
        });
        Ok(Box::new(iter))
    }
}
