use std::fs;
use std::sync::Arc;

use crate::extractor::transcript::MockTranscriptSource;
use crate::extractor::{
    ContentExtractor, ExtractionError, TranscriptError, TranscriptSegment, TranscriptSource,
};

fn extractor_with(transcripts: impl TranscriptSource + 'static) -> ContentExtractor {
    ContentExtractor::new(Arc::new(transcripts), vec!["en".to_string()])
}

fn no_transcripts() -> MockTranscriptSource {
    let mut mock = MockTranscriptSource::new();
    mock.expect_fetch_transcript().never();
    mock
}

#[tokio::test]
async fn test_extract_wikipedia_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/wikipedia.html")
        .expect("Failed to read test fixture");

    let extractor = extractor_with(no_transcripts());
    let text = extractor
        .extract(&html, "https://en.wikipedia.org/wiki/Ferris_the_crab")
        .await
        .unwrap();

    assert_eq!(
        text.as_str(),
        "Ferris is the unofficial mascot of the Rust programming language. \
         Rustaceans use the crab in 'talks', stickers and documentation. \
         The crab was drawn by Karen Rustad Tölva in 2015 and released into the public domain."
    );
    assert!(!text.as_str().contains("Infobox"));
    assert!(!text.as_str().contains("Thumbnail"));
    assert!(!text.as_str().contains("Main menu"));
}

#[tokio::test]
async fn test_extract_wikipedia_skips_nested_paragraphs() {
    let html = r#"<div class="mw-content-ltr mw-parser-output"><p>Hello</p><div><p>Hidden</p></div></div>"#;

    let extractor = extractor_with(no_transcripts());
    let text = extractor
        .extract(html, "https://fr.wikipedia.org/wiki/Test")
        .await
        .unwrap();

    assert_eq!(text.as_str(), "Hello");
}

#[tokio::test]
async fn test_extract_wikipedia_without_container() {
    let extractor = extractor_with(no_transcripts());
    let result = extractor
        .extract(
            "<html><body><p>Redirect page</p></body></html>",
            "https://en.wikipedia.org/wiki/Special:Random",
        )
        .await;

    assert!(matches!(result, Err(ExtractionError::MissingContainer)));
}

#[tokio::test]
async fn test_extract_youtube_transcript() {
    let mut transcripts = MockTranscriptSource::new();
    transcripts
        .expect_fetch_transcript()
        .withf(|video_id, languages| video_id == "ABC123" && languages == ["en".to_string()])
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                TranscriptSegment::new("Hi", 0.0, 1.0),
                TranscriptSegment::new("there", 1.0, 1.0),
            ])
        });

    let extractor = extractor_with(transcripts);
    let text = extractor
        .extract("<html></html>", "https://www.youtube.com/watch?v=ABC123")
        .await
        .unwrap();

    assert_eq!(text.as_str(), "Hi there");
}

#[tokio::test]
async fn test_extract_youtube_uses_language_preference() {
    let mut transcripts = MockTranscriptSource::new();
    transcripts
        .expect_fetch_transcript()
        .withf(|_, languages| languages == ["fr".to_string(), "en".to_string()])
        .returning(|_, _| Ok(vec![TranscriptSegment::new("Bonjour\n[Musique]", 0.0, 2.0)]));

    let extractor = ContentExtractor::new(
        Arc::new(transcripts),
        vec!["fr".to_string(), "en".to_string()],
    );
    let text = extractor
        .extract("", "https://www.youtube.com/watch?v=xyz&t=3s")
        .await
        .unwrap();

    assert_eq!(text.as_str(), "Bonjour");
}

#[tokio::test]
async fn test_extract_youtube_without_transcript() {
    let mut transcripts = MockTranscriptSource::new();
    transcripts
        .expect_fetch_transcript()
        .withf(|video_id, _| video_id == "ABC123")
        .returning(|_, _| Err(TranscriptError::NotFound));

    let extractor = extractor_with(transcripts);
    let result = extractor
        .extract("<html></html>", "https://www.youtube.com/watch?v=ABC123")
        .await;

    match result {
        Err(ExtractionError::NoTranscript { video_id }) => assert_eq!(video_id, "ABC123"),
        other => panic!("Expected NoTranscript, got {other:?}"),
    }
}

#[tokio::test]
async fn test_extract_youtube_empty_transcript_is_not_found() {
    let mut transcripts = MockTranscriptSource::new();
    transcripts
        .expect_fetch_transcript()
        .returning(|_, _| Ok(Vec::new()));

    let extractor = extractor_with(transcripts);
    let result = extractor
        .extract("", "https://www.youtube.com/watch?v=ABC123")
        .await;

    assert!(matches!(result, Err(ExtractionError::NoTranscript { .. })));
}

#[tokio::test]
async fn test_extract_youtube_without_video_id() {
    let extractor = extractor_with(no_transcripts());
    let result = extractor
        .extract("", "https://www.youtube.com/@rustlang")
        .await;

    assert!(matches!(result, Err(ExtractionError::MissingVideoId(_))));
}

#[tokio::test]
async fn test_extract_youtube_service_failure() {
    let mut transcripts = MockTranscriptSource::new();
    transcripts
        .expect_fetch_transcript()
        .returning(|_, _| Err(TranscriptError::Timeout));

    let extractor = extractor_with(transcripts);
    let result = extractor
        .extract("", "https://www.youtube.com/watch?v=ABC123")
        .await;

    assert!(matches!(
        result,
        Err(ExtractionError::Transcript(TranscriptError::Timeout))
    ));
}

#[tokio::test]
async fn test_extract_generic_page() {
    let html = r#"<!DOCTYPE html><html><head><title>Release notes</title>
        <script>track("view")</script></head>
        <body><h1>Version 2.0</h1>
        <p>This release   adds "streaming" support.[3]</p>
        <footer>Contact [at] example</footer></body></html>"#;

    let extractor = extractor_with(no_transcripts());
    let text = extractor
        .extract(html, "https://example.com/changelog")
        .await
        .unwrap();

    assert_eq!(
        text.as_str(),
        "Release notes Version 2.0 This release adds 'streaming' support. Contact example"
    );
}

#[tokio::test]
async fn test_extract_generic_empty_page() {
    let extractor = extractor_with(no_transcripts());
    let result = extractor
        .extract("<html><body><script>x()</script></body></html>", "https://example.com/")
        .await;

    assert!(matches!(result, Err(ExtractionError::Empty)));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::normalize;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(text in "\\PC*") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(!once.contains('\n') && !once.contains('\t'));
            prop_assert!(!once.contains("  "));
        }

        #[test]
        fn test_normalize_leaves_no_bracket_pairs(text in "[a-z \\[\\]0-9\"\n\t]*") {
            let once = normalize(&text);
            if let Some(open) = once.find('[') {
                prop_assert!(!once[open..].contains(']'));
            }
            prop_assert!(!once.contains('"'));
        }

        #[test]
        fn test_generic_extract_never_panics(html in ".*") {
            let extractor = extractor_with(no_transcripts());
            let rt = tokio::runtime::Runtime::new().unwrap();
            let _ = rt.block_on(extractor.extract(&html, "https://example.com"));
        }
    }
}
