use pdf_regroup::*;

#[test]
fn test_default_options_are_valid() {
    let options = RegroupOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.grid_rows, 2);
    assert_eq!(options.grid_cols, 3);
    assert_eq!(options.batch_capacity, 6);
    assert_eq!(options.orientation, Orientation::Landscape);

    let (width, height) = options.sheet_size_pt();
    assert!(width > height);
}

#[test]
fn test_validation_grid() {
    let mut options = RegroupOptions::default();

    options.grid_rows = 0;
    match options.validate() {
        Err(RegroupError::Config(msg)) => assert!(msg.contains("row")),
        _ => panic!("Expected Config error"),
    }

    options.grid_rows = 2;
    options.grid_cols = 0;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_batch_capacity() {
    let mut options = RegroupOptions::default();

    // Invalid: empty batches
    options.batch_capacity = 0;
    assert!(options.validate().is_err());

    // Invalid: more slots than cells
    options.batch_capacity = 9;
    assert!(options.validate().is_err());

    // Invalid: partial row
    options.batch_capacity = 4;
    match options.validate() {
        Err(RegroupError::Config(msg)) => assert!(msg.contains("multiple")),
        _ => panic!("Expected Config error"),
    }

    // Valid: one full row
    options.batch_capacity = 3;
    assert!(options.validate().is_ok());

    // Valid: larger grid
    options.grid_rows = 3;
    options.grid_cols = 4;
    options.batch_capacity = 12;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_margin() {
    let mut options = RegroupOptions::default();

    options.margin_mm = -1.0;
    assert!(options.validate().is_err());

    options.margin_mm = f32::NAN;
    assert!(options.validate().is_err());

    // A4 short edge is 210mm
    options.margin_mm = 110.0;
    assert!(options.validate().is_err());

    options.margin_mm = 0.0;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_raster_scale() {
    let mut options = RegroupOptions::default();
    options.raster_scale = 0.0;
    assert!(options.validate().is_err());

    options.raster_scale = 0.5;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_marker_pattern() {
    let mut options = RegroupOptions::default();

    // Not a regex
    options.marker_pattern = "TEZA(".to_string();
    assert!(matches!(options.validate(), Err(RegroupError::Config(_))));

    // No capture group for the id
    options.marker_pattern = r"TEZA\s*\d+".to_string();
    assert!(options.validate().is_err());

    options.marker_pattern = r"EXAM\s*#?(\d+)".to_string();
    assert!(options.validate().is_ok());
    assert_eq!(options.marker().unwrap().find_group("exam #14"), Some(14));
}

#[test]
fn test_paper_orientation() {
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );

    let custom = PaperSize::Custom {
        width_mm: 400.0,
        height_mm: 300.0,
    };
    assert_eq!(
        custom.dimensions_with_orientation(Orientation::Portrait),
        (300.0, 400.0)
    );
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = RegroupOptions {
        paper_size: PaperSize::A3,
        orientation: Orientation::Portrait,
        margin_mm: 5.0,
        grid_rows: 3,
        grid_cols: 2,
        batch_capacity: 4,
        marker_pattern: r"LUCRARE\s*(\d+)".to_string(),
        raster_scale: 3.0,
        add_titles: false,
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = RegroupOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "grid_rows": 3, "batch_capacity": 9 }"#).unwrap();

    let loaded = RegroupOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.grid_rows, 3);
    assert_eq!(loaded.batch_capacity, 9);
    assert_eq!(loaded.grid_cols, 3);
    assert_eq!(loaded.marker_pattern, RegroupOptions::default().marker_pattern);
    assert!(loaded.validate().is_ok());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_malformed_options() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "grid_rows = 3").unwrap();

    let result = RegroupOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(RegroupError::Config(_))));
}
