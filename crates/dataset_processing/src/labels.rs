use crate::error::PipelineError;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Annotation filename suffixes that get mirrored alongside processed
/// images. Matching is exact and case-sensitive; anything else is skipped
/// silently. Labels are opaque: never parsed, never rewritten.
pub const LABEL_SUFFIXES: [&str; 3] = [".txt", ".xml", ".json"];

/// Copies every recognized label file from `input_label_dir` (one directory
/// level, no recursion) into `output_label_dir`, creating the destination if
/// needed and overwriting same-named files. Returns the number of files
/// copied.
pub fn mirror_labels(input_label_dir: &Path, output_label_dir: &Path) -> Result<usize> {
    fs::create_dir_all(output_label_dir)
        .map_err(|e| PipelineError::filesystem("create directory", output_label_dir, e))?;

    let entries = fs::read_dir(input_label_dir)
        .map_err(|e| PipelineError::filesystem("read directory", input_label_dir, e))?;

    let mut copied = 0;
    for entry in entries {
        let entry =
            entry.map_err(|e| PipelineError::filesystem("read directory", input_label_dir, e))?;
        let path = entry.path();

        let recognized = entry
            .file_name()
            .to_str()
            .map_or(false, |n| LABEL_SUFFIXES.iter().any(|s| n.ends_with(s)));
        if !recognized || !path.is_file() {
            continue;
        }

        let destination = output_label_dir.join(entry.file_name());
        fs::copy(&path, &destination)
            .map_err(|e| PipelineError::filesystem("copy", &path, e))?;
        copied += 1;
    }

    log::debug!(
        "Mirrored {} label files into {}",
        copied,
        output_label_dir.display()
    );
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mirrors_recognized_suffixes_byte_for_byte() -> Result<()> {
        let input = tempdir()?;
        let output = tempdir()?;
        let out_dir = output.path().join("labels");

        fs::write(input.path().join("a.txt"), b"0 0.5 0.5 0.1 0.1")?;
        fs::write(input.path().join("b.xml"), b"<annotation/>")?;
        fs::write(input.path().join("c.json"), b"{}")?;
        fs::write(input.path().join("notes.md"), b"skip me")?;
        fs::write(input.path().join("upper.TXT"), b"case-sensitive: skip")?;

        let copied = mirror_labels(input.path(), &out_dir)?;
        assert_eq!(copied, 3);

        assert_eq!(fs::read(out_dir.join("a.txt"))?, b"0 0.5 0.5 0.1 0.1");
        assert_eq!(fs::read(out_dir.join("b.xml"))?, b"<annotation/>");
        assert_eq!(fs::read(out_dir.join("c.json"))?, b"{}");
        assert!(!out_dir.join("notes.md").exists());
        assert!(!out_dir.join("upper.TXT").exists());
        Ok(())
    }

    #[test]
    fn test_repeated_mirror_overwrites() -> Result<()> {
        let input = tempdir()?;
        let output = tempdir()?;
        let out_dir = output.path().join("labels");

        fs::write(input.path().join("a.txt"), b"first")?;
        mirror_labels(input.path(), &out_dir)?;

        fs::write(input.path().join("a.txt"), b"second")?;
        mirror_labels(input.path(), &out_dir)?;

        assert_eq!(fs::read(out_dir.join("a.txt"))?, b"second");
        Ok(())
    }

    #[test]
    fn test_missing_input_directory_is_a_filesystem_error() {
        let output = tempdir().unwrap();
        let err = mirror_labels(Path::new("no-such-dir"), output.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Filesystem { .. })
        ));
    }

    #[test]
    fn test_empty_input_directory_copies_nothing() -> Result<()> {
        let input = tempdir()?;
        let output = tempdir()?;

        let copied = mirror_labels(input.path(), output.path())?;
        assert_eq!(copied, 0);
        Ok(())
    }
}
