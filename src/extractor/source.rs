use serde::Serialize;

/// Which extraction strategy applies to a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Wikipedia,
    YouTube,
    Generic,
}

/// First match wins: Wikipedia, then YouTube, otherwise generic.
pub fn classify(url: &str) -> SourceKind {
    if url.contains("wikipedia") {
        SourceKind::Wikipedia
    } else if url.contains("youtube") {
        SourceKind::YouTube
    } else {
        SourceKind::Generic
    }
}

/// Video identifier: everything after `v=` up to the next query separator.
pub fn video_id(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("v=")?;
    let id = rest.split(['&', '#']).next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}
