use crate::config::FieldNames;
use crate::extractors::{
    code_text, image_urls_from_field, names_from_selection, title_text, url_from_field,
};
use crate::model::{Product, ProductLinks};
use crate::notion::{normalize_label, Page};

/// Column labels normalized for case-insensitive lookup
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnKeys {
    name: String,
    category: String,
    code: String,
    shopee: String,
    tiktok: String,
    images: String,
}

impl From<&FieldNames> for ColumnKeys {
    fn from(fields: &FieldNames) -> Self {
        Self {
            name: normalize_label(&fields.name),
            category: normalize_label(&fields.category),
            code: normalize_label(&fields.code),
            shopee: normalize_label(&fields.shopee),
            tiktok: normalize_label(&fields.tiktok),
            images: normalize_label(&fields.images),
        }
    }
}

/// Turns database rows into products
///
/// Mapping never fails: a missing or malformed column yields the empty
/// value for that attribute.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    keys: ColumnKeys,
    fallback_category: String,
}

impl RecordMapper {
    /// Build a mapper for one fetch; `fallback_category` must not be empty
    pub fn new(fields: &FieldNames, fallback_category: impl Into<String>) -> Self {
        let mut fallback_category = fallback_category.into();
        if fallback_category.trim().is_empty() {
            fallback_category = "Other".to_string();
        }
        Self {
            keys: ColumnKeys::from(fields),
            fallback_category,
        }
    }

    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    pub fn map(&self, page: &Page) -> Product {
        let props = &page.properties;

        let mut categories = names_from_selection(props.find_normalized(&self.keys.category));
        if categories.is_empty() {
            categories.push(self.fallback_category.clone());
        }

        Product {
            id: page.id.clone(),
            name: title_text(props.find_normalized(&self.keys.name)),
            categories,
            code: code_text(props.find_normalized(&self.keys.code)),
            links: ProductLinks {
                shopee: url_from_field(props.find_normalized(&self.keys.shopee)),
                tiktok: url_from_field(props.find_normalized(&self.keys.tiktok)),
            },
            images: image_urls_from_field(props.find_normalized(&self.keys.images)),
            last_edited: page.last_edited_time.clone(),
        }
    }

    pub fn map_all(&self, pages: &[Page]) -> Vec<Product> {
        pages.iter().map(|page| self.map(page)).collect()
    }
}
