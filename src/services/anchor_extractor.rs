use std::sync::LazyLock;

use regex::Regex;

/// `- **label**` with the shortest label that does not cross a line break
static RECOMMENDATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \*\*(.*?)\*\*").expect("recommendation pattern is valid"));

/// Return the trimmed text after the first `start` anchor.
///
/// When `end` is given and occurs after `start`, the result stops right before
/// it; otherwise it runs to the end of `text`. `None` means `start` is absent.
pub fn between(text: &str, start: &str, end: Option<&str>) -> Option<String> {
    let offset = text.find(start)? + start.len();
    let rest = &text[offset..];

    let region = match end.and_then(|anchor| rest.find(anchor)) {
        Some(stop) => &rest[..stop],
        None => rest,
    };

    Some(region.trim().to_string())
}

/// Collect every `- **label**` label in `text`, left to right.
///
/// The scan covers the whole input, including anything before the report
/// anchors.
pub fn find_all_lines(text: &str) -> Vec<String> {
    RECOMMENDATION_LINE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Same as [`find_all_lines`] but restricted to the region after `start` and
/// before `end`. Nothing is returned when `start` is missing.
pub fn find_lines_between(text: &str, start: &str, end: Option<&str>) -> Vec<String> {
    let offset = match text.find(start) {
        Some(pos) => pos + start.len(),
        None => return Vec::new(),
    };
    let rest = &text[offset..];

    let region = match end.and_then(|anchor| rest.find(anchor)) {
        Some(stop) => &rest[..stop],
        None => rest,
    };

    find_all_lines(region)
}
