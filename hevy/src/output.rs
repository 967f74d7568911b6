//! Output formatting: plain text (human-readable) and JSON.

use serde_json::{Map, Value};
use std::fmt::Write;

/// Array keys that carry the resources of a paginated envelope.
const ENVELOPE_KEYS: [&str; 4] = [
    "workouts",
    "events",
    "routine_folders",
    "exercise_templates",
];

/// Columns shown per resource in plain tables; other fields are omitted.
const WORKOUT_COLUMNS: [&str; 4] = ["id", "title", "start_time", "end_time"];
const FOLDER_COLUMNS: [&str; 3] = ["id", "index", "title"];
const TEMPLATE_COLUMNS: [&str; 5] = ["id", "title", "type", "primary_muscle_group", "equipment"];
const EVENT_COLUMNS: [&str; 3] = ["type", "id", "deleted_at"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tables for envelopes, key-value for single resources
    #[default]
    Plain,
    /// JSON (pretty-printed)
    Json,
}

/// Render `value` in the requested format.
pub fn render(value: &Value, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Plain => Ok(format_plain(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value),
    }
}

/// Format value as plain text. Paginated envelopes become a table with a page footer.
pub fn format_plain(value: &Value) -> String {
    if let Value::Object(map) = value {
        if let Some((key, items)) = envelope_items(map) {
            return format_envelope(map, key, items);
        }
    }
    let mut out = String::new();
    format_tree(value, &mut out, 0);
    out
}

fn envelope_items<'a>(map: &'a Map<String, Value>) -> Option<(&'static str, &'a [Value])> {
    ENVELOPE_KEYS.iter().find_map(|key| {
        map.get(*key)
            .and_then(Value::as_array)
            .map(|arr| (*key, arr.as_slice()))
    })
}

fn format_envelope(map: &Map<String, Value>, key: &str, items: &[Value]) -> String {
    let mut out = String::new();
    if items.is_empty() {
        let _ = writeln!(out, "No {}.", key.replace('_', " "));
    } else {
        let columns: &[&str] = match key {
            "workouts" => &WORKOUT_COLUMNS,
            "routine_folders" => &FOLDER_COLUMNS,
            "exercise_templates" => &TEMPLATE_COLUMNS,
            _ => &EVENT_COLUMNS,
        };
        write_table(&mut out, columns, items);
    }
    if let (Some(page), Some(count)) = (map.get("page"), map.get("page_count")) {
        let _ = writeln!(out, "page {} of {}", page, count);
    }
    out
}

fn write_table(out: &mut String, columns: &[&str], rows: &[Value]) {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| {
                    let v = row.get(*c).or_else(|| event_field(row, c));
                    v.and_then(scalar).unwrap_or_else(|| "-".to_string())
                })
                .collect()
        })
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    let header = header.join("  ");
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", "-".repeat(header.trim_end().len()));
    for row in cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
}

/// Workout events nest the workout under `workout`; fall back to its fields.
fn event_field<'a>(row: &'a Value, column: &str) -> Option<&'a Value> {
    row.get("workout").and_then(|w| w.get(column))
}

fn format_tree(v: &Value, out: &mut String, indent: usize) {
    let pad = "  ".repeat(indent);
    match v {
        Value::Array(arr) => {
            if arr.is_empty() {
                let _ = writeln!(out, "{}<empty>", pad);
                return;
            }
            for (i, item) in arr.iter().enumerate() {
                if item.is_object() || item.is_array() {
                    let _ = writeln!(out, "{}[{}]", pad, i + 1);
                    format_tree(item, out, indent + 1);
                } else {
                    let _ = writeln!(out, "{}- {}", pad, scalar(item).unwrap_or_default());
                }
            }
        }
        Value::Object(map) => {
            for (k, val) in map {
                match scalar(val) {
                    Some(s) => {
                        let _ = writeln!(out, "{}{}: {}", pad, k, s);
                    }
                    None => {
                        let _ = writeln!(out, "{}{}:", pad, k);
                        format_tree(val, out, indent + 1);
                    }
                }
            }
        }
        other => {
            let _ = writeln!(out, "{}{}", pad, scalar(other).unwrap_or_default());
        }
    }
}

fn scalar(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_renders_table_and_footer() {
        let v = json!({
            "page": 1,
            "page_count": 3,
            "workouts": [
                {"id": "w1", "title": "Push", "start_time": "2025-07-23T00:00:00Z", "end_time": "2025-07-23T01:00:00Z", "exercises": []},
                {"id": "w2", "title": "Pull", "start_time": "2025-07-24T00:00:00Z"}
            ]
        });
        let out = format_plain(&v);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("id"));
        assert!(lines[0].contains("start_time"));
        assert!(lines[2].contains("Push"));
        assert!(lines[3].contains("Pull"));
        assert!(lines[3].ends_with('-'));
        assert_eq!(lines.last(), Some(&"page 1 of 3"));
        assert!(!out.contains("exercises"));
    }

    #[test]
    fn empty_envelope_says_so() {
        let v = json!({"page": 1, "page_count": 0, "routine_folders": []});
        let out = format_plain(&v);
        assert!(out.starts_with("No routine folders."));
        assert!(out.contains("page 1 of 0"));
    }

    #[test]
    fn events_read_nested_workout_fields() {
        let v = json!({
            "page": 1,
            "page_count": 1,
            "events": [
                {"type": "updated", "workout": {"id": "w1", "title": "Legs"}},
                {"type": "deleted", "id": "w2", "deleted_at": "2025-07-23T00:00:00Z"}
            ]
        });
        let out = format_plain(&v);
        assert!(out.contains("updated  w1"));
        assert!(out.contains("deleted  w2"));
    }

    #[test]
    fn single_resource_is_key_value() {
        let v = json!({"id": 7, "title": "Legs", "secondary_muscle_groups": ["glutes"]});
        let out = format_plain(&v);
        assert!(out.contains("id: 7"));
        assert!(out.contains("title: Legs"));
        assert!(out.contains("secondary_muscle_groups:\n  - glutes"));
    }

    #[test]
    fn scalars_render_bare() {
        assert_eq!(format_plain(&json!(42)), "42\n");
        assert_eq!(format_plain(&Value::Null), "null\n");
    }

    #[test]
    fn json_format_is_parseable() {
        let v = json!({"x": 1, "y": [2, 3]});
        let s = render(&v, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(parsed, v);
    }
}
