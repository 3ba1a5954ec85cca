//! Page classification: detect group boundaries from in-page markers
//!
//! Pages are scanned in source order. A page whose text matches the marker
//! pattern opens (or resumes) the group named by the marker; pages without a
//! marker continue the active group. Pages before the first marker belong to
//! no group and are dropped, as are pages after a marker whose id cannot be
//! read, up to the next usable marker.

use crate::groups::GroupIndex;
use crate::source::PageSource;
use crate::types::*;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// Compiled boundary marker, matched case-insensitively.
///
/// The first capture group holds the decimal group id.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    regex: Regex,
}

impl MarkerPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RegroupError::Config(format!("Invalid marker pattern: {}", e)))?;

        if regex.captures_len() < 2 {
            return Err(RegroupError::Config(format!(
                "Marker pattern '{}' needs a capture group for the group number",
                pattern
            )));
        }

        Ok(Self { regex })
    }

    /// First marker in `text`, if any.
    pub fn scan(&self, text: &str) -> Option<Marker> {
        let captures = self.regex.captures(text)?;
        let digits = captures.get(1)?.as_str();
        Some(match digits.parse::<GroupId>() {
            Ok(id) => Marker::Group(id),
            Err(_) => Marker::Unusable(digits.to_string()),
        })
    }

    /// Group id named by the first marker in `text`.
    ///
    /// `None` when there is no marker or its id does not fit a `GroupId`.
    pub fn find_group(&self, text: &str) -> Option<GroupId> {
        match self.scan(text)? {
            Marker::Group(id) => Some(id),
            Marker::Unusable(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// A marker found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Opens or resumes this group
    Group(GroupId),
    /// Matched the pattern, but the digits are not a valid group id
    Unusable(String),
}

/// Fold state carried across the page sequence
#[derive(Debug, Default)]
struct ClassifierState {
    active: Option<GroupId>,
    groups: BTreeMap<GroupId, Vec<usize>>,
    dropped: Vec<usize>,
}

impl ClassifierState {
    fn step(mut self, page: usize, marker: Option<Marker>) -> Self {
        match marker {
            Some(Marker::Group(id)) => self.active = Some(id),
            Some(Marker::Unusable(digits)) => {
                log::warn!(
                    "Page {} has marker with unusable group number '{}', dropping pages until the next marker",
                    page + 1,
                    digits
                );
                self.active = None;
            }
            None => {}
        }

        match self.active {
            Some(id) => self.groups.entry(id).or_default().push(page),
            None => self.dropped.push(page),
        }
        self
    }

    fn finish(self) -> GroupIndex {
        GroupIndex::with_dropped_pages(self.groups, self.dropped)
    }
}

/// Classify every page of `source` into groups.
///
/// Fails only when text extraction fails for a page.
pub fn classify<S>(source: &S, marker: &MarkerPattern) -> Result<GroupIndex>
where
    S: PageSource + ?Sized,
{
    let state = (0..source.page_count()).try_fold(ClassifierState::default(), |state, page| {
        let text = source.extract_text(page)?;
        Ok::<_, RegroupError>(state.step(page, marker.scan(&text)))
    })?;

    let index = state.finish();
    if !index.dropped_pages().is_empty() {
        log::warn!(
            "{} page(s) outside any group are dropped",
            index.dropped_pages().len()
        );
    }
    Ok(index)
}

/// Group pages from already-detected markers, one entry per source page.
pub fn group_markers<I>(markers: I) -> GroupIndex
where
    I: IntoIterator<Item = Option<Marker>>,
{
    markers
        .into_iter()
        .enumerate()
        .fold(ClassifierState::default(), |state, (page, marker)| {
            state.step(page, marker)
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MARKER_PATTERN;

    fn marker() -> MarkerPattern {
        MarkerPattern::new(DEFAULT_MARKER_PATTERN).unwrap()
    }

    fn group_ids(ids: Vec<Option<GroupId>>) -> GroupIndex {
        group_markers(ids.into_iter().map(|id| id.map(Marker::Group)))
    }

    #[test]
    fn test_marker_case_and_spacing() {
        let marker = marker();
        assert_eq!(marker.find_group("teza  12"), Some(12));
        assert_eq!(marker.find_group("TEZA12"), Some(12));
        assert_eq!(marker.find_group("Exam\nTeza\t7\nName:"), Some(7));
        assert_eq!(marker.find_group("TEZA"), None);
        assert_eq!(marker.find_group("no marker here"), None);
    }

    #[test]
    fn test_marker_zero_and_overflow() {
        let marker = marker();
        assert_eq!(marker.find_group("TEZA 0"), Some(0));
        assert_eq!(marker.scan("TEZA 0"), Some(Marker::Group(0)));
        assert_eq!(marker.find_group("TEZA 99999999999999999999"), None);
        assert_eq!(
            marker.scan("TEZA 99999999999999999999"),
            Some(Marker::Unusable("99999999999999999999".to_string()))
        );
        assert_eq!(marker.scan("no marker"), None);
    }

    #[test]
    fn test_group_zero_is_a_group() {
        let index = group_ids(vec![Some(1), Some(0), None]);
        assert_eq!(index.pages(1), Some(&[0][..]));
        assert_eq!(index.pages(0), Some(&[1, 2][..]));
        assert_eq!(index.sorted_ids(), vec![0, 1]);
        assert!(index.dropped_pages().is_empty());
    }

    #[test]
    fn test_unusable_marker_ends_active_group() {
        let index = group_markers(vec![
            Some(Marker::Group(1)),
            None,
            Some(Marker::Unusable("99999999999999999999".to_string())),
            None,
            Some(Marker::Group(2)),
            None,
        ]);
        assert_eq!(index.pages(1), Some(&[0, 1][..]));
        assert_eq!(index.pages(2), Some(&[4, 5][..]));
        assert_eq!(index.dropped_pages(), &[2, 3]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_pattern_requires_capture_group() {
        assert!(MarkerPattern::new(r"TEZA\s*\d+").is_err());
        assert!(MarkerPattern::new(r"TEZA(").is_err());
        assert!(MarkerPattern::new(r"EXAM\s*(\d+)").is_ok());
    }

    #[test]
    fn test_no_markers_gives_empty_index() {
        let index = group_ids(vec![None, None, None]);
        assert!(index.is_empty());
        assert_eq!(index.dropped_pages(), &[0, 1, 2]);
    }

    #[test]
    fn test_continuation_pages() {
        let index = group_ids(vec![None, Some(3), None, None, Some(1), None]);
        assert_eq!(index.pages(3), Some(&[1, 2, 3][..]));
        assert_eq!(index.pages(1), Some(&[4, 5][..]));
        assert_eq!(index.dropped_pages(), &[0]);
    }

    #[test]
    fn test_reappearing_marker_extends_group() {
        let index = group_ids(vec![Some(4), None, Some(5), Some(4), None]);
        assert_eq!(index.pages(4), Some(&[0, 1, 3, 4][..]));
        assert_eq!(index.pages(5), Some(&[2][..]));
        assert_eq!(index.grouped_page_count(), 5);
    }
}
