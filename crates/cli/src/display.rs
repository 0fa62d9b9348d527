// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;
use ts_core::Entity;

use crate::accessor::Removed;
use crate::error::Result;

/// Maximum line width for wrapped text content (excluding 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Fields printed as indented blocks after the metadata lines.
const BLOCK_FIELDS: &[&str] = &["description", "content"];

/// Wrap text at word boundaries if it's a single line.
///
/// - If content contains newlines: return as-is (preserve user formatting)
/// - If content is single line >width: wrap at word boundaries
/// - If content is single line <=width: return as-is
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.len() <= width {
        return content.to_string();
    }

    let mut result = String::new();
    let mut current_line = String::new();

    for word in content.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(&current_line);
    }

    result
}

/// `created_at` → `Created at`.
fn field_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(map) => match map.get("name").or(map.get("id")) {
            Some(inner) => format_value(inner),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Format a single entity line for list output
pub fn format_entity_line(entity: &Entity) -> String {
    if entity.is_closed() {
        format!("- {} (closed)", entity)
    } else {
        format!("- {}", entity)
    }
}

/// Format entity details for get output
pub fn format_entity_details(entity: &Entity) -> Result<String> {
    let mut output = vec![entity.to_string()];
    let value = entity.to_value()?;
    let Value::Object(fields) = value else {
        return Ok(output.join("\n"));
    };

    for (key, field) in &fields {
        if key == "kind" || key == "name" || BLOCK_FIELDS.contains(&key.as_str()) || is_blank(field) {
            continue;
        }
        output.push(format!("{}: {}", field_label(key), format_value(field)));
    }

    for key in BLOCK_FIELDS {
        if let Some(Value::String(text)) = fields.get(*key) {
            if text.is_empty() {
                continue;
            }
            output.push(String::new());
            output.push(format!("{}:", field_label(key)));
            for line in wrap_text(text, WRAP_WIDTH).lines() {
                output.push(format!("    {}", line));
            }
        }
    }

    Ok(output.join("\n"))
}

pub fn format_removed(removed: &Removed) -> String {
    format!("{} {}", removed.verb(), removed.entity())
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
