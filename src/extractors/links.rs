use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::text::text_from_rich_runs;
use crate::notion::PropertyValue;

static EMBEDDED_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://[^\s,]+").unwrap());
static URL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());

const TRAILING_PUNCTUATION: &[char] = &[')', ',', '.', ';'];

/// Whether a string starts with an http(s) scheme
pub fn looks_like_url(candidate: &str) -> bool {
    URL_PREFIX.is_match(candidate)
}

/// Link stored in a column: the url value, else the first URL found in its text
pub fn url_from_field(field: Option<&PropertyValue>) -> String {
    let Some(field) = field else {
        return String::new();
    };

    if let PropertyValue::Url { url: Some(url) } = field {
        if !url.is_empty() {
            return url.trim().to_string();
        }
    }

    let text = text_from_rich_runs(field.rich_runs());
    EMBEDDED_URL
        .find(&text)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string())
        .unwrap_or_default()
}

/// One way of finding image URLs in a column
pub trait ImageSource {
    fn name(&self) -> &'static str;
    fn extract(&self, field: &PropertyValue) -> Vec<String>;
}

/// URLs written into the text, separated by whitespace or commas
pub struct TextTokens;

/// The column's url value
pub struct DirectUrl;

/// Uploaded files and external file links
pub struct Attachments;

impl ImageSource for TextTokens {
    fn name(&self) -> &'static str {
        "text_tokens"
    }

    fn extract(&self, field: &PropertyValue) -> Vec<String> {
        text_from_rich_runs(field.rich_runs())
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(str::trim)
            .filter(|token| looks_like_url(token))
            .map(str::to_string)
            .collect()
    }
}

impl ImageSource for DirectUrl {
    fn name(&self) -> &'static str {
        "direct_url"
    }

    fn extract(&self, field: &PropertyValue) -> Vec<String> {
        match field {
            PropertyValue::Url { url: Some(url) } if looks_like_url(url) => vec![url.clone()],
            _ => Vec::new(),
        }
    }
}

impl ImageSource for Attachments {
    fn name(&self) -> &'static str {
        "attachments"
    }

    fn extract(&self, field: &PropertyValue) -> Vec<String> {
        match field {
            PropertyValue::Files { files } => files
                .iter()
                .filter_map(|f| f.url())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Image sources in the order they are consulted
pub fn image_sources() -> Vec<Box<dyn ImageSource>> {
    vec![Box::new(TextTokens), Box::new(DirectUrl), Box::new(Attachments)]
}

/// Image URLs of a column, from the first source that yields any
pub fn image_urls_from_field(field: Option<&PropertyValue>) -> Vec<String> {
    let Some(field) = field else {
        return Vec::new();
    };

    for source in image_sources() {
        let urls = source.extract(field);
        if !urls.is_empty() {
            debug!("Found {} image(s) via {}", urls.len(), source.name());
            return urls;
        }
    }

    Vec::new()
}
