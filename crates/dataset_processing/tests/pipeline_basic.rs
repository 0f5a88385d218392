//! End-to-end tests for the dataset walk: output-tree shape, label
//! mirroring, and the failure taxonomy.

mod common;
use common::{identity_spec, tree_listing, write_image};

use anyhow::Result;
use dataset_processing::{load_image, DatasetProcessor, PipelineConfig, PipelineError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_end_to_end_identity_run() -> Result<()> {
    let root = tempdir()?;
    let image_dir = root.path().join("images");
    let label_dir = root.path().join("labels");
    let output_dir = root.path().join("processed");
    let viz_dir = root.path().join("viz");
    fs::create_dir_all(&image_dir)?;
    fs::create_dir_all(&label_dir)?;

    write_image(&image_dir.join("a.jpg"), 20, 14, 60)?;
    write_image(&image_dir.join("b.png"), 16, 16, 120)?;
    fs::write(label_dir.join("a.txt"), b"0 0.5 0.5 0.2 0.2")?;
    fs::write(label_dir.join("b.txt"), b"1 0.4 0.4 0.1 0.1")?;

    let config = PipelineConfig::builder().seed(1).viz_dir(&viz_dir).panel_size(64).build();
    DatasetProcessor::new(config).run(
        &image_dir,
        &label_dir,
        &output_dir,
        &[identity_spec("Gray")],
    )?;

    // Output tree per effect: images/ + labels/.
    assert_eq!(
        tree_listing(&output_dir.join("Gray")),
        vec![
            "images/a.jpg".to_string(),
            "images/b.png".to_string(),
            "labels/a.txt".to_string(),
            "labels/b.txt".to_string(),
        ]
    );

    // The PNG survives an identity chain pixel-for-pixel.
    let source = load_image(&image_dir.join("b.png"))?;
    let copied = load_image(&output_dir.join("Gray/images/b.png"))?;
    assert_eq!(source.as_raw(), copied.as_raw());

    // The JPEG is re-encoded (lossy), but stays decodable at the same size.
    let jpeg = load_image(&output_dir.join("Gray/images/a.jpg"))?;
    assert_eq!(jpeg.dimensions(), (20, 14));

    // Labels are byte-identical.
    assert_eq!(
        fs::read(output_dir.join("Gray/labels/a.txt"))?,
        fs::read(label_dir.join("a.txt"))?
    );

    // Both figure kinds exist and are non-empty.
    assert!(fs::metadata(viz_dir.join("Gray.png"))?.len() > 0);
    assert!(fs::metadata(viz_dir.join("comparison.png"))?.len() > 0);
    Ok(())
}

#[test]
fn test_every_effect_gets_every_recognized_image() -> Result<()> {
    let root = tempdir()?;
    let image_dir = root.path().join("images");
    let label_dir = root.path().join("labels");
    let output_dir = root.path().join("processed");
    fs::create_dir_all(&image_dir)?;
    fs::create_dir_all(&label_dir)?;

    write_image(&image_dir.join("a.jpg"), 10, 10, 0)?;
    write_image(&image_dir.join("b.jpeg"), 10, 10, 50)?;
    write_image(&image_dir.join("c.png"), 10, 10, 100)?;
    fs::write(image_dir.join("readme.txt"), b"not an image")?;

    let config = PipelineConfig::builder()
        .seed(3)
        .viz_dir(root.path().join("viz"))
        .panel_size(48)
        .build();
    DatasetProcessor::new(config).run(
        &image_dir,
        &label_dir,
        &output_dir,
        &[identity_spec("First"), identity_spec("Second")],
    )?;

    for effect in ["First", "Second"] {
        let entries = fs::read_dir(output_dir.join(effect).join("images"))?.count();
        assert_eq!(entries, 3, "`{effect}` should copy all recognized images");
    }
    Ok(())
}

#[test]
fn test_empty_image_directory_is_a_defined_error() -> Result<()> {
    let root = tempdir()?;
    let image_dir = root.path().join("images");
    let label_dir = root.path().join("labels");
    fs::create_dir_all(&image_dir)?;
    fs::create_dir_all(&label_dir)?;
    fs::write(image_dir.join("only.txt"), b"no images here")?;

    let err = DatasetProcessor::new(PipelineConfig::default())
        .run(
            &image_dir,
            &label_dir,
            &root.path().join("processed"),
            &[identity_spec("Gray")],
        )
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::EmptyDataset { .. })
    ));
    Ok(())
}

#[test]
fn test_corrupt_image_aborts_with_decode_error() -> Result<()> {
    let root = tempdir()?;
    let image_dir = root.path().join("images");
    let label_dir = root.path().join("labels");
    fs::create_dir_all(&image_dir)?;
    fs::create_dir_all(&label_dir)?;

    write_image(&image_dir.join("a.png"), 8, 8, 10)?;
    fs::write(image_dir.join("b.png"), b"truncated garbage")?;

    let err = DatasetProcessor::new(PipelineConfig::builder().seed(0).build())
        .run(
            &image_dir,
            &label_dir,
            &root.path().join("processed"),
            &[identity_spec("Gray")],
        )
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::Decode { .. })
    ));
    Ok(())
}

#[test]
fn test_duplicate_effect_names_are_rejected() -> Result<()> {
    let root = tempdir()?;
    let image_dir = root.path().join("images");
    fs::create_dir_all(&image_dir)?;
    write_image(&image_dir.join("a.png"), 8, 8, 10)?;

    let err = DatasetProcessor::new(PipelineConfig::default())
        .run(
            &image_dir,
            &root.path().join("labels"),
            &root.path().join("processed"),
            &[identity_spec("Same"), identity_spec("Same")],
        )
        .unwrap_err();

    assert!(err.to_string().contains("Duplicate effect name"));
    Ok(())
}
