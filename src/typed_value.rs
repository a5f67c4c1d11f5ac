use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::Value;

/// Failure of [`TypedValue::try_value`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// The JSON payload is not valid JSON text.
    #[error("JSON parsing failed. ({0})")]
    InvalidJson(String),
}

/// The tag of a [`TypedValue`], selecting which payload field holds the value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueTag {
    /// The value is in [`TypedValue::bool_value`].
    Boolean,
    /// The value is in [`TypedValue::double_value`].
    Number,
    /// The value is in [`TypedValue::string_value`].
    String,
    /// The value is JSON text in [`TypedValue::string_value`].
    #[serde(rename = "JSON")]
    Json,
    /// A tag this version of the SDK doesn't know.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A variable value as it travels on the wire: a tag plus one payload field per
/// kind of value. Only the field selected by [`TypedValue::tag`] is meaningful.
///
/// # Examples
///
/// ```rust
/// use devcycle::{TypedValue, Value};
///
/// let typed: TypedValue = serde_json::from_str(r#"{"type": "Number", "doubleValue": 2.5}"#).unwrap();
/// assert_eq!(typed.value(), Some(Value::Number(2.5)));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedValue {
    /// Selects the authoritative payload field.
    #[serde(rename = "type", default)]
    pub tag: ValueTag,
    /// Payload of [`ValueTag::Boolean`] values.
    #[serde(default)]
    pub bool_value: bool,
    /// Payload of [`ValueTag::Number`] values.
    #[serde(default)]
    pub double_value: f64,
    /// Payload of [`ValueTag::String`] and [`ValueTag::Json`] values.
    #[serde(default)]
    pub string_value: String,
}

impl TypedValue {
    /// Creates a [`ValueTag::Boolean`] value.
    pub fn boolean(value: bool) -> Self {
        Self {
            tag: ValueTag::Boolean,
            bool_value: value,
            ..Self::default()
        }
    }

    /// Creates a [`ValueTag::Number`] value.
    pub fn number(value: f64) -> Self {
        Self {
            tag: ValueTag::Number,
            double_value: value,
            ..Self::default()
        }
    }

    /// Creates a [`ValueTag::String`] value.
    pub fn string(value: &str) -> Self {
        Self {
            tag: ValueTag::String,
            string_value: value.to_owned(),
            ..Self::default()
        }
    }

    /// Creates a [`ValueTag::Json`] value from serialized JSON text.
    pub fn json(text: &str) -> Self {
        Self {
            tag: ValueTag::Json,
            string_value: text.to_owned(),
            ..Self::default()
        }
    }

    /// Extracts the native value selected by the tag.
    ///
    /// Returns [`None`] for unknown tags and for JSON payloads that fail to parse.
    /// Use [`TypedValue::try_value`] to tell these two cases apart.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::TypedValue;
    ///
    /// assert_eq!(TypedValue::boolean(true).value().unwrap().as_bool(), Some(true));
    /// assert!(TypedValue::json("not json").value().is_none());
    /// ```
    pub fn value(&self) -> Option<Value> {
        self.try_value().unwrap_or_default()
    }

    /// The same as [`TypedValue::value`] but reports JSON payloads that fail to parse.
    ///
    /// # Errors
    ///
    /// Fails with [`ValueError::InvalidJson`] when the tag is [`ValueTag::Json`] and the
    /// payload is not valid JSON text.
    pub fn try_value(&self) -> Result<Option<Value>, ValueError> {
        match self.tag {
            ValueTag::Boolean => Ok(Some(Value::Bool(self.bool_value))),
            ValueTag::Number => Ok(Some(Value::Number(self.double_value))),
            ValueTag::String => Ok(Some(Value::String(self.string_value.clone()))),
            ValueTag::Json => match serde_json::from_str(&self.string_value) {
                Ok(parsed) => Ok(Some(Value::Json(parsed))),
                Err(err) => Err(ValueError::InvalidJson(err.to_string())),
            },
            ValueTag::Unknown => Ok(None),
        }
    }
}
