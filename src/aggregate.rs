use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{CategoryFacet, Product, ProductQuery};

/// Count products per category, sorted by category name
///
/// A product with several categories counts once toward each of them.
pub fn list_categories(products: &[Product], fallback_category: &str) -> Vec<CategoryFacet> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for product in products {
        if product.categories.is_empty() {
            *counts.entry(fallback_category).or_insert(0) += 1;
            continue;
        }
        for category in &product.categories {
            *counts.entry(category.as_str()).or_insert(0) += 1;
        }
    }

    let mut facets: Vec<CategoryFacet> = counts
        .into_iter()
        .map(|(name, count)| CategoryFacet {
            name: name.to_string(),
            count,
        })
        .collect();
    facets.sort_by(|a, b| collate(&a.name, &b.name));
    facets
}

/// Products matching both the category filter and the search text, in input order
pub fn filter_products(products: &[Product], query: &ProductQuery, all_label: &str) -> Vec<Product> {
    let text = query.normalized_text();
    let category = query.normalized_category();

    products
        .iter()
        .filter(|p| matches_category(p, category, all_label) && matches_text(p, &text))
        .cloned()
        .collect()
}

fn matches_category(product: &Product, category: &str, all_label: &str) -> bool {
    category.is_empty() || category == all_label || product.categories.iter().any(|c| c == category)
}

fn matches_text(product: &Product, lowered: &str) -> bool {
    lowered.is_empty()
        || product.name.to_lowercase().contains(lowered)
        || product.code.to_lowercase().contains(lowered)
}

/// Locale-style string ordering
///
/// Strings are compared ignoring accents and case first, then by accents,
/// then with lower case ahead of upper case. Within the primary comparison
/// whitespace sorts first, then punctuation and symbols, then digits, then
/// letters. Punctuation and symbols share one class, ordered by code point.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| b.cmp(a))
}

fn base_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        // stroked d has no decomposition
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
        .collect()
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn accent_key(s: &str) -> String {
    s.nfd().collect::<String>().to_lowercase()
}
