use serde::{Deserialize, Serialize};

/// A catalog entry normalized from one database row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Never empty; products without a category carry the fallback label
    pub categories: Vec<String>,
    pub code: String,
    pub links: ProductLinks,
    pub images: Vec<String>,
    pub last_edited: String,
}

/// Marketplace links, empty when the row has none
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductLinks {
    pub shopee: String,
    pub tiktok: String,
}

/// A category together with the number of products in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFacet {
    pub name: String,
    pub count: usize,
}

/// Result items together with their count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Search parameters for listing products
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductQuery {
    /// Free text matched against name and code
    #[serde(default)]
    pub q: Option<String>,
    /// Category name; empty or the "All" label disables the filter
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn new(q: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            category: Some(category.into()),
        }
    }

    /// Build a query from decoded query-string pairs; the first value of a
    /// repeated key wins and unknown keys are ignored
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "q" => &mut query.q,
                "category" => &mut query.category,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Trimmed, lower-cased search text
    pub fn normalized_text(&self) -> String {
        self.q.as_deref().unwrap_or("").trim().to_lowercase()
    }

    /// Trimmed category filter
    pub fn normalized_category(&self) -> &str {
        self.category.as_deref().unwrap_or("").trim()
    }
}
