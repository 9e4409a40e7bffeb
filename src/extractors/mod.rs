//! Pure functions pulling typed values out of Notion properties.
//!
//! Every extractor accepts a missing property and returns an empty value
//! rather than an error.

mod links;
mod selection;
mod text;

pub use links::{
    image_sources, image_urls_from_field, looks_like_url, url_from_field, Attachments, DirectUrl,
    ImageSource, TextTokens,
};
pub use selection::names_from_selection;
pub use text::{code_text, text_from_rich_runs, title_text};
