use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::extractor::errors::ExtractionError;

static WIKIPEDIA_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.mw-content-ltr.mw-parser-output").expect("valid container selector")
});

/// Elements whose text never renders.
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// Text of the paragraphs sitting directly under the article container.
///
/// Paragraphs nested inside infoboxes, tables or other wrappers are skipped.
pub fn wikipedia_text(html: &str) -> Result<String, ExtractionError> {
    let document = Html::parse_document(html);
    let container = document
        .select(&WIKIPEDIA_CONTAINER)
        .next()
        .ok_or(ExtractionError::MissingContainer)?;

    let paragraphs: Vec<String> = container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "p")
        .map(|p| p.text().collect::<String>())
        .collect();

    Ok(paragraphs.join(" "))
}

/// Every visible text node of the document, concatenated as written.
///
/// Whitespace-only nodes are kept so inline markup never splits a word;
/// normalization collapses the runs afterwards.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Some(piece) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE.contains(&el.name()))
        });
        if !hidden {
            text.push_str(piece);
        }
    }

    text
}
