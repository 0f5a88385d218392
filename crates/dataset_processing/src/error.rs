use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy of the processing pipeline.
///
/// Every variant is fatal: the run aborts on the first error, leaving any
/// partially written effect directories in place (reruns overwrite per file,
/// so a repeated run converges to the same tree).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input image could not be read or decoded.
    #[error("Failed to decode image {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output image could not be encoded or written.
    #[error("Failed to encode image {}: {}", .path.display(), .source)]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The input directory holds no recognized image files.
    #[error("No image files found in {}", .dir.display())]
    EmptyDataset { dir: PathBuf },

    /// A directory creation, copy, or similar filesystem operation failed.
    #[error("Filesystem operation `{}` failed for {}: {}", .op, .path.display(), .source)]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn filesystem(op: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}
