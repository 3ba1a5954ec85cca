use image::RgbImage;
use pdf_regroup::*;

/// Source whose pages only carry text; rasterizing is never expected
struct TextOnlySource(Vec<String>);

impl TextOnlySource {
    fn new<S: AsRef<str>>(texts: &[S]) -> Self {
        Self(texts.iter().map(|t| t.as_ref().to_string()).collect())
    }
}

impl PageSource for TextOnlySource {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn extract_text(&self, page: usize) -> Result<String> {
        Ok(self.0[page].clone())
    }

    fn rasterize(&self, page: usize, _scale: f32) -> Result<RgbImage> {
        panic!("statistics must not rasterize page {}", page)
    }
}

#[test]
fn test_stats_no_pages() {
    let result = calculate_statistics(&TextOnlySource(Vec::new()), &RegroupOptions::default());
    match result {
        Err(RegroupError::NoPages) => {}
        _ => panic!("Expected NoPages error"),
    }
}

#[test]
fn test_stats_mixed_groups() {
    let source = TextOnlySource::new(&[
        "cover sheet",
        "TEZA 4",
        "TEZA 2",
        "page 2",
        "TEZA 7",
        "page 2",
        "page 3",
        "page 4",
        "teza 1",
    ]);

    let stats = calculate_statistics(&source, &RegroupOptions::default()).unwrap();

    assert_eq!(stats.source_pages, 9);
    assert_eq!(stats.dropped_pages, 1);
    assert_eq!(stats.grouped_pages, 8);
    assert_eq!(stats.groups, 4);
    assert_eq!(stats.single_groups, 2);
    assert_eq!(stats.pair_groups, 1);
    assert_eq!(stats.extended_groups, 1);
    assert_eq!(stats.extended_ids, vec![7]);
    // Fourth page of group 7
    assert_eq!(stats.unplaced_pages, 1);
    assert_eq!(stats.primary_batches, 1);
    assert_eq!(stats.supplemental_batches, 1);
    // Front + back, third pages + blank
    assert_eq!(stats.output_sheets, 4);
    assert_eq!(stats.blank_sheets, 1);
}

#[test]
fn test_stats_many_batches() {
    let texts: Vec<String> = (1..=13).map(|id| format!("TEZA {}", id)).collect();
    let stats =
        calculate_statistics(&TextOnlySource::new(&texts), &RegroupOptions::default()).unwrap();

    assert_eq!(stats.groups, 13);
    assert_eq!(stats.primary_batches, 3);
    assert_eq!(stats.supplemental_batches, 0);
    assert_eq!(stats.output_sheets, 6);
    assert_eq!(stats.blank_sheets, 3);
}

#[test]
fn test_stats_smaller_batches() {
    let source = TextOnlySource::new(&["TEZA 1", "TEZA 2", "TEZA 3", "TEZA 4"]);
    let options = RegroupOptions {
        batch_capacity: 3,
        ..Default::default()
    };

    let stats = calculate_statistics(&source, &options).unwrap();
    assert_eq!(stats.primary_batches, 2);
    assert_eq!(stats.output_sheets, 4);
}

#[test]
fn test_stats_no_markers() {
    let source = TextOnlySource::new(&["cover", "blank"]);
    let stats = calculate_statistics(&source, &RegroupOptions::default()).unwrap();

    assert_eq!(stats.groups, 0);
    assert_eq!(stats.dropped_pages, 2);
    assert_eq!(stats.output_sheets, 0);
}

#[test]
fn test_stats_match_output_plan() {
    let source = TextOnlySource::new(&["TEZA 3", "p2", "p3", "TEZA 1", "TEZA 2", "p2"]);
    let options = RegroupOptions::default();

    let expected = calculate_statistics(&source, &options).unwrap();

    let index = classify(&source, &options.marker().unwrap()).unwrap();
    let plan = plan_output(&index, &options);
    assert_eq!(plan.sheets.len(), expected.output_sheets);
    assert_eq!(plan.blank_count(), expected.blank_sheets);

    let mut writer = PdfSheetWriter::new();
    for _ in 0..plan.sheets.len() {
        writer.new_page(100.0, 100.0).unwrap();
        writer.finish_sheet().unwrap();
    }
    assert_eq!(writer.finish().get_pages().len(), expected.output_sheets);
}

#[test]
fn test_stats_group_zero_and_unusable_marker() {
    let source = TextOnlySource::new(&[
        "TEZA 1",
        "TEZA 0",
        "page 2",
        "TEZA 99999999999999999999",
        "page 2",
        "TEZA 2",
    ]);

    let stats = calculate_statistics(&source, &RegroupOptions::default()).unwrap();

    assert_eq!(stats.groups, 3);
    assert_eq!(stats.single_groups, 2);
    assert_eq!(stats.pair_groups, 1);
    assert_eq!(stats.extended_groups, 0);
    assert_eq!(stats.dropped_pages, 2);
    assert_eq!(stats.grouped_pages, 4);
    assert_eq!(stats.supplemental_batches, 0);
}
