use crate::notion::{PropertyValue, RichText};

/// Join the plain text of rich-text runs with single spaces
pub fn text_from_rich_runs(runs: &[RichText]) -> String {
    runs.iter()
        .map(|run| run.plain_text.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Text of a title column: the first title run, else the rich-text content
pub fn title_text(field: Option<&PropertyValue>) -> String {
    let Some(field) = field else {
        return String::new();
    };

    if let PropertyValue::Title { title } = field {
        if let Some(text) = title
            .first()
            .and_then(|run| run.plain_text.as_deref())
            .filter(|text| !text.is_empty())
        {
            return text.to_string();
        }
    }

    text_from_rich_runs(field.rich_runs())
}

/// Product code: a number rendered in decimal, else the rich-text content
pub fn code_text(field: Option<&PropertyValue>) -> String {
    let code = match field {
        Some(PropertyValue::Number { number: Some(n) }) => format_number(*n),
        Some(other) => text_from_rich_runs(other.rich_runs()),
        None => String::new(),
    };
    code.trim().to_string()
}

fn format_number(n: f64) -> String {
    // -0.0 would otherwise print as "-0"
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}
