//! Ad hoc helpers for poking at raw source files.
//!
//! These exist for schema discovery - figuring out what keys a new dump
//! carries and what lives under them - and share nothing with the load path.

use serde_json::Value;
use std::collections::HashSet;

/// Marker substituted for embedded newlines in [`values`] output, so each
/// value stays on one output line
pub const NEWLINE_MARKER: &str = " // // ";

/// Distinct top-level keys across all records, in first-seen order
pub fn distinct_keys<I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = Value>,
{
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for record in records {
        if let Value::Object(obj) = record {
            for key in obj.keys() {
                if seen.insert(key.clone()) {
                    keys.push(key.clone());
                }
            }
        }
    }
    keys
}

/// Lazily yield the distinct string renderings of `key`'s value, first-seen
/// order. Records without the key are skipped.
pub fn unique_values<'a, I>(key: &'a str, records: I) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = Value> + 'a,
{
    let mut seen = HashSet::new();
    records.into_iter().filter_map(move |record| {
        let rendered = render(record.get(key)?);
        seen.insert(rendered.clone()).then_some(rendered)
    })
}

/// Lazily yield every record's value for `key`, newlines flattened to
/// [`NEWLINE_MARKER`]. Records without the key are skipped.
pub fn values<'a, I>(key: &'a str, records: I) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = Value> + 'a,
{
    records
        .into_iter()
        .filter_map(move |record| Some(render(record.get(key)?).replace('\n', NEWLINE_MARKER)))
}

/// Strings render bare; everything else renders as its JSON text
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unique_values_dedupe_in_first_seen_order() {
        let records = vec![
            json!({"cuisine": "thai"}),
            json!({"cuisine": "thai"}),
            json!({"cuisine": "greek"}),
        ];

        let unique: Vec<String> = unique_values("cuisine", records).collect();
        assert_eq!(unique, ["thai", "greek"]);
    }

    #[test]
    fn unique_values_skip_records_without_the_key() {
        let records = vec![json!({"cuisine": "thai"}), json!({"course": "dessert"})];

        let unique: Vec<String> = unique_values("cuisine", records).collect();
        assert_eq!(unique, ["thai"]);
    }

    #[test]
    fn distinct_keys_preserve_first_seen_order() {
        let records = vec![
            json!({"title": "a", "url": "b"}),
            json!({"url": "c", "photo_url": "d"}),
        ];

        assert_eq!(distinct_keys(records), ["title", "url", "photo_url"]);
    }

    #[test]
    fn distinct_keys_ignore_non_object_records() {
        let records = vec![json!([1, 2]), json!({"title": "a"})];
        assert_eq!(distinct_keys(records), ["title"]);
    }

    #[test]
    fn values_flatten_embedded_newlines() {
        let records = vec![json!({"instructions": "step one\nstep two"})];

        let dumped: Vec<String> = values("instructions", records).collect();
        assert_eq!(dumped, ["step one // // step two"]);
    }

    #[test]
    fn non_string_values_render_as_json() {
        let records = vec![json!({"time": 35}), json!({"time": null})];

        let dumped: Vec<String> = values("time", records).collect();
        assert_eq!(dumped, ["35", "null"]);
    }
}
