use super::text::text_from_rich_runs;
use crate::notion::{PropertyValue, SelectOption};

/// Names chosen in a select-like column
///
/// Multi-select yields every non-empty name in order, single-select yields
/// its name. Any other column falls back to its rich-text content as one
/// name; delimited text is not split.
pub fn names_from_selection(field: Option<&PropertyValue>) -> Vec<String> {
    let Some(field) = field else {
        return Vec::new();
    };

    match field {
        PropertyValue::MultiSelect { multi_select } => multi_select
            .iter()
            .filter_map(|option| option.name.as_deref())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        PropertyValue::Select {
            select: Some(SelectOption { name: Some(name) }),
        } if !name.is_empty() => vec![name.clone()],
        other => {
            let text = text_from_rich_runs(other.rich_runs());
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text]
            }
        }
    }
}
