use std::collections::HashMap;

use super::TemplateContent;

/// Replace every `{{key}}` in title and content with its value from `data`.
///
/// Replacement is literal: no escaping, nesting or conditionals. Placeholders
/// without a matching key are left in place.
pub fn populate_template(
    template: &TemplateContent,
    data: &HashMap<String, String>,
) -> TemplateContent {
    if data.is_empty() {
        return template.clone();
    }

    // Sorted so that output does not depend on map iteration order when one
    // value itself contains another placeholder.
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();

    TemplateContent {
        title: substitute_string(&template.title, &keys, data),
        content: substitute_string(&template.content, &keys, data),
    }
}

fn substitute_string(template: &str, keys: &[&String], data: &HashMap<String, String>) -> String {
    let mut result = template.to_string();

    for key in keys {
        let pattern = format!("{{{{{}}}}}", key);
        if let Some(value) = data.get(*key) {
            result = result.replace(&pattern, value);
        }
    }

    result
}
