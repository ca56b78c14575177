use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

// `[12]`-style citation markers.
static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("valid citation regex"));

// Any residual bracketed annotation, e.g. `[edit]` or `[citation needed]`.
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("valid bracket regex"));

/// Flatten extracted text into a single clean line.
///
/// Control characters become spaces, whitespace runs collapse, double quotes
/// turn into single quotes and every `[...]` annotation is removed. The
/// result is a fixed point: normalizing it again changes nothing.
pub fn normalize(text: &str) -> String {
    let flattened: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = collapse_whitespace(&flattened);
    let quoted = collapsed.replace('"', "'");
    let without_citations = CITATION.replace_all(&quoted, "");
    let without_brackets = BRACKETED.replace_all(&without_citations, "");
    // removals can leave doubled or trailing spaces behind
    collapse_whitespace(&without_brackets)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}
