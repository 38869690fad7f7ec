//! Declared field values

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// A parameter-level field value before resolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Bool(bool),
    /// `{text, file}` composite; the file contents replace `$FILE` in `text`
    File(FileText),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileText {
    pub text: Option<String>,
    pub file: Option<String>,
}

impl FieldValue {
    /// Convert a raw JSON value when it is a primitive; structured values
    /// are not eligible for text resolution.
    pub fn from_primitive(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::Bool(flag) => Some(Self::Bool(*flag)),
            _ => None,
        }
    }

    /// Empty text counts as not given
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl TryFrom<Value> for FieldValue {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if let Some(primitive) = Self::from_primitive(&value) {
            return Ok(primitive);
        }

        match value {
            Value::Object(map) => {
                let text = string_member(&map, "text")?;
                let file = string_member(&map, "file")?;

                if text.is_none() && file.is_none() {
                    return Err("field object must have a `text` or `file` member".to_string());
                }

                Ok(Self::File(FileText { text, file }))
            }
            other => Err(format!("unsupported field value: {other}")),
        }
    }
}

fn string_member(map: &Map<String, Value>, name: &str) -> Result<Option<String>, String> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(format!("`{name}` must be a string, got {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_primitives() {
        let text: FieldValue = serde_json::from_str(r#""Prod""#).unwrap();
        assert_eq!(text, FieldValue::from("Prod"));

        let number: FieldValue = serde_json::from_str("12345").unwrap();
        assert_eq!(number, FieldValue::Number(12345.into()));

        let flag: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, FieldValue::Bool(true));
    }

    #[test]
    fn test_deserialize_file_text() {
        let value: FieldValue =
            serde_json::from_str(r#"{"file":"resources/sample.out","text":"Sample [$FILE]"}"#)
                .unwrap();
        assert_eq!(
            value,
            FieldValue::File(FileText {
                text: Some("Sample [$FILE]".to_string()),
                file: Some("resources/sample.out".to_string()),
            })
        );
    }

    #[test]
    fn test_reject_unsupported_shapes() {
        assert!(serde_json::from_str::<FieldValue>(r#"["a","b"]"#).is_err());
        assert!(serde_json::from_str::<FieldValue>("null").is_err());
        assert!(serde_json::from_str::<FieldValue>("{}").is_err());
        assert!(serde_json::from_str::<FieldValue>(r#"{"file":3}"#).is_err());
    }
}
