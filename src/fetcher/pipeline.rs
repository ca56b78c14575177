use std::sync::LazyLock;

use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use url::Url;

use crate::fetcher::{errors::FetchError, types::PageResponse};

static CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;/>]+)"#).expect("valid charset regex")
});

/// How far into the body to look for a `<meta charset>` declaration.
const SNIFF_WINDOW: usize = 4096;

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    content_type: String,
    body_bytes: Bytes,
) -> Result<PageResponse, FetchError> {
    let encoding = detect_encoding(&content_type, &body_bytes);
    let body_utf8 = decode(&body_bytes, encoding)?;

    Ok(PageResponse {
        url_final,
        status,
        content_type,
        body_utf8,
        encoding,
        fetched_at: Utc::now(),
    })
}

/// Header charset first, then a `<meta>` declaration, then a statistical guess.
pub fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = charset_label(content_type) {
        return encoding;
    }

    let head = &body_bytes[..body_bytes.len().min(SNIFF_WINDOW)];
    if let Some(encoding) = charset_label(&String::from_utf8_lossy(head)) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, head.len() == body_bytes.len());
    detector.guess(None, true)
}

fn charset_label(haystack: &str) -> Option<&'static Encoding> {
    let captures = CHARSET_REGEX.captures(haystack)?;
    let label = captures.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn decode(body_bytes: &[u8], encoding: &'static Encoding) -> Result<String, FetchError> {
    let (decoded, used, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "body is not valid {}",
            used.name()
        )));
    }
    Ok(decoded.into_owned())
}
