//! Deterministic page file names.

use once_cell::sync::Lazy;
use regex::Regex;

static PAGE_FILE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^page_\d{3,}\.png$").unwrap());

/// File name for the page at 0-based `index`: `page_001.png`, `page_002.png`, ...
///
/// Names sort in page order up to 999 pages. Past that the number widens to
/// four digits and lexicographic order no longer matches page order.
pub fn page_file_name(index: usize) -> String {
    format!("page_{:03}.png", index + 1)
}

/// Whether `name` looks like a file produced by [`page_file_name`].
pub fn is_page_file_name(name: &str) -> bool {
    PAGE_FILE_PATTERN.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_pages() {
        assert_eq!(page_file_name(0), "page_001.png");
        assert_eq!(page_file_name(1), "page_002.png");
        assert_eq!(page_file_name(998), "page_999.png");
    }

    #[test]
    fn test_names_sort_in_page_order_and_are_unique() {
        let names: Vec<String> = (0..999).map(page_file_name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, names);
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());
    }

    #[test]
    fn test_sort_order_breaks_past_999() {
        let mut names = vec![page_file_name(999), page_file_name(100)];
        names.sort();
        assert_eq!(names, vec!["page_1000.png", "page_101.png"]);
    }

    #[test]
    fn test_is_page_file_name() {
        assert!(is_page_file_name("page_001.png"));
        assert!(is_page_file_name("page_1000.png"));
        assert!(!is_page_file_name("page_1.png"));
        assert!(!is_page_file_name("cover.png"));
        assert!(!is_page_file_name(".page_001.png.tmp"));
    }
}
