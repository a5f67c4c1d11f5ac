use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::model::enums::VariableType;

/// Represents the evaluated value of a variable.
///
/// # Examples
///
/// ```rust
/// use devcycle::Value;
///
/// let bool_val = Value::Bool(true);
/// let num_val = Value::Number(42.0);
/// ```
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A Boolean variable's value.
    Bool(bool),
    /// A Number variable's value.
    Number(f64),
    /// A String variable's value.
    String(String),
    /// A JSON variable's value.
    Json(serde_json::Value),
}

impl Value {
    /// Reads the value as `bool`. Returns [`None`] if it's not a [`Value::Bool`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::Value;
    ///
    /// let value = Value::Bool(true);
    /// assert!(value.as_bool().unwrap());
    /// ```
    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(val) = self {
            return Some(*val);
        }
        None
    }

    /// Reads the value as `f64`. Returns [`None`] if it's not a [`Value::Number`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::Value;
    ///
    /// let value = Value::Number(3.14);
    /// assert_eq!(value.as_f64().unwrap(), 3.14);
    /// ```
    pub fn as_f64(&self) -> Option<f64> {
        if let Value::Number(val) = self {
            return Some(*val);
        }
        None
    }

    /// Reads the value as `&str`. Returns [`None`] if it's not a [`Value::String`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::Value;
    ///
    /// let value = Value::String("foo".to_owned());
    /// assert_eq!(value.as_str().unwrap(), "foo");
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(val) = self {
            return Some(val.as_str());
        }
        None
    }

    /// Reads the value as a [`serde_json::Value`]. Returns [`None`] if it's not a [`Value::Json`].
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        if let Value::Json(val) = self {
            return Some(val);
        }
        None
    }

    /// The [`VariableType`] matching this value.
    pub fn variable_type(&self) -> VariableType {
        match self {
            Value::Bool(_) => VariableType::Boolean,
            Value::Number(_) => VariableType::Number,
            Value::String(_) => VariableType::String,
            Value::Json(_) => VariableType::Json,
        }
    }

    /// Creates a [`Value`] from a decoded [`serde_json::Value`].
    ///
    /// Scalars map to their own variants, objects and arrays to [`Value::Json`].
    /// Returns [`None`] for `null` and for numbers that don't fit an `f64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::Value;
    ///
    /// let json_str = serde_json::Value::String("foo".to_owned());
    /// assert_eq!(Value::String("foo".to_owned()), Value::from_json_val(&json_str).unwrap())
    /// ```
    pub fn from_json_val(json_val: &serde_json::Value) -> Option<Value> {
        match json_val {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(val) => Some(Value::Bool(*val)),
            serde_json::Value::String(val) => Some(Value::String(val.clone())),
            serde_json::Value::Number(val) => val.as_f64().map(Value::Number),
            other => Some(Value::Json(other.clone())),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(val) => write!(f, "{val}"),
            Value::Number(val) => write!(f, "{val}"),
            Value::String(val) => f.write_str(val),
            Value::Json(val) => write!(f, "{val}"),
        }
    }
}

from_val_to_enum!(Value Bool bool);
from_val_to_enum!(Value Number f64);
from_val_to_enum!(Value String String);
from_val_to_enum!(Value Json serde_json::Value);
from_val_to_enum_into!(Value String &str);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::model::enums::VariableType;
    use crate::value::Value;

    #[test]
    fn from_json_val() {
        assert_eq!(Value::from_json_val(&json!(true)), Some(Value::Bool(true)));
        assert_eq!(Value::from_json_val(&json!(5)), Some(Value::Number(5.0)));
        assert_eq!(Value::from_json_val(&json!("a")), Some(Value::String("a".to_owned())));
        assert_eq!(
            Value::from_json_val(&json!({"a": [1, 2]})),
            Some(Value::Json(json!({"a": [1, 2]})))
        );
        assert_eq!(Value::from_json_val(&json!(null)), None);
    }

    #[test]
    fn deserialize_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[true, 1.5, "str", {"k": "v"}]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Bool(true),
                Value::Number(1.5),
                Value::String("str".to_owned()),
                Value::Json(json!({"k": "v"})),
            ]
        );
    }

    #[test]
    fn variable_type() {
        assert_eq!(Value::from(false).variable_type(), VariableType::Boolean);
        assert_eq!(Value::from(1.0).variable_type(), VariableType::Number);
        assert_eq!(Value::from("s").variable_type(), VariableType::String);
        assert_eq!(Value::from(json!({})).variable_type(), VariableType::Json);
    }
}
