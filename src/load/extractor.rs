//! Per-record projection onto the canonical schema

use crate::load::error::RecordError;
use crate::load::types::SourceSpec;
use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Value};

/// One record's worth of extracted data, ready to insert
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    /// Values for the columns the source declares, in declaration order
    pub columns: Vec<SqlValue>,

    pub ingredients: Vec<String>,

    /// Instruction steps in presentation order
    pub instructions: Vec<String>,
}

/// Project a raw record onto `spec`'s canonical attributes.
///
/// Fails as a unit: a missing key, a non-scalar attribute value, or an
/// ingredient/instruction list that is not an array of strings rejects the
/// whole record, and nothing for it reaches the database.
pub fn extract(spec: &SourceSpec, record: &Value) -> Result<RecipeDraft, RecordError> {
    let obj = record.as_object().ok_or(RecordError::NotAnObject)?;

    let mut columns = Vec::with_capacity(spec.fields.len());
    for (_, key) in spec.fields {
        let value = obj.get(*key).ok_or(RecordError::MissingField(key))?;
        columns.push(scalar(value, key)?);
    }

    Ok(RecipeDraft {
        columns,
        ingredients: string_seq(obj, spec.ingredients)?,
        instructions: string_seq(obj, spec.instructions)?,
    })
}

/// Map a JSON scalar onto the SQLite value that will be stored. Nulls pass
/// through; the schema keeps time and photourl nullable for exactly this.
fn scalar(value: &Value, key: &'static str) -> Result<SqlValue, RecordError> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Real(f))
            } else {
                Err(RecordError::UnsupportedType { key })
            }
        }
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(RecordError::UnsupportedType { key }),
    }
}

fn string_seq(obj: &Map<String, Value>, key: &'static str) -> Result<Vec<String>, RecordError> {
    let items = obj
        .get(key)
        .ok_or(RecordError::MissingField(key))?
        .as_array()
        .ok_or(RecordError::NotAStringArray { key })?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or(RecordError::NotAStringArray { key })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::types::{SourceSpec, SOURCES};
    use serde_json::json;

    fn spec(name: &str) -> &'static SourceSpec {
        SOURCES.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn extracts_a_full_record() {
        let record = json!({
            "title": "Pad Thai",
            "total_time_minutes": 35,
            "url": "https://example.com/pad-thai",
            "photo_url": "https://example.com/pad-thai.jpg",
            "ingredients": ["200g rice noodles", "2 eggs", "3 tbsp fish sauce"],
            "instructions": ["Soak the noodles", "Fry everything"]
        });

        let draft = extract(spec("allrecipes"), &record).unwrap();

        assert_eq!(
            draft.columns,
            vec![
                SqlValue::Text("Pad Thai".to_string()),
                SqlValue::Integer(35),
                SqlValue::Text("https://example.com/pad-thai".to_string()),
                SqlValue::Text("https://example.com/pad-thai.jpg".to_string()),
            ]
        );
        assert_eq!(draft.ingredients.len(), 3);
        assert_eq!(
            draft.instructions,
            vec!["Soak the noodles", "Fry everything"]
        );
    }

    #[test]
    fn missing_required_key_fails() {
        let record = json!({
            "total_time_minutes": 35,
            "url": "https://example.com",
            "photo_url": null,
            "ingredients": [],
            "instructions": []
        });

        let err = extract(spec("allrecipes"), &record).unwrap_err();
        assert!(matches!(err, RecordError::MissingField("title")));
    }

    #[test]
    fn null_values_pass_through() {
        let record = json!({
            "title": "Toast",
            "total_time_minutes": null,
            "url": "https://example.com/toast",
            "photo_url": null,
            "ingredients": ["bread"],
            "instructions": ["toast it"]
        });

        let draft = extract(spec("allrecipes"), &record).unwrap();
        assert_eq!(draft.columns[1], SqlValue::Null);
        assert_eq!(draft.columns[3], SqlValue::Null);
    }

    #[test]
    fn epicurious_requires_only_title_and_url() {
        let record = json!({
            "hed": "Greek Salad",
            "url": "https://example.com/greek-salad",
            "ingredients": ["feta", "olives"],
            "prepSteps": ["Chop", "Toss"]
        });

        let draft = extract(spec("epicurious"), &record).unwrap();
        assert_eq!(draft.columns.len(), 2);
        assert_eq!(draft.instructions, vec!["Chop", "Toss"]);
    }

    #[test]
    fn nested_value_for_attribute_fails() {
        let record = json!({
            "title": {"text": "Pad Thai"},
            "total_time_minutes": 35,
            "url": "u",
            "photo_url": "p",
            "ingredients": [],
            "instructions": []
        });

        let err = extract(spec("allrecipes"), &record).unwrap_err();
        assert!(matches!(err, RecordError::UnsupportedType { key: "title" }));
    }

    #[test]
    fn non_string_ingredient_fails() {
        let record = json!({
            "hed": "Bad",
            "url": "u",
            "ingredients": ["fine", 42],
            "prepSteps": []
        });

        let err = extract(spec("epicurious"), &record).unwrap_err();
        assert!(matches!(
            err,
            RecordError::NotAStringArray { key: "ingredients" }
        ));
    }

    #[test]
    fn non_object_record_fails() {
        let err = extract(spec("allrecipes"), &json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, RecordError::NotAnObject));
    }
}
