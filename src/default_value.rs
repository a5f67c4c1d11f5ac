use serde_json::Map;
use std::collections::HashMap;
use std::mem::discriminant;

use crate::errors::{ClientError, ErrorKind};
use crate::model::enums::VariableType;
use crate::value::Value;

/// A default value passed to the variable evaluation methods of the [`crate::Client`].
///
/// Every accepted input kind has its own variant, so two defaults that are
/// numerically equal can still differ in type (`3_i32` is not `3.0_f64`).
/// Use [`DefaultValue::normalize`] to bring numbers to the `f64` representation
/// used by the DevCycle API.
///
/// # Examples
///
/// ```rust
/// use devcycle::DefaultValue;
///
/// let value = DefaultValue::from(3_u8).normalize();
/// assert_eq!(value, DefaultValue::F64(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DefaultValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
    Bool(bool),
    /// A JSON object.
    Json(Map<String, serde_json::Value>),
    /// No default value.
    Absent,
}

impl DefaultValue {
    /// Converts every integer and `f32` variant to [`DefaultValue::F64`].
    /// Any other variant is returned unchanged.
    pub fn normalize(self) -> Self {
        widen_to_f64!(self, DefaultValue {
            I8 I16 I32 I64 Isize U8 U16 U32 U64 Usize F32
        })
    }

    /// Infers the [`VariableType`] of a normalized default value.
    ///
    /// Returns `Ok(None)` for [`DefaultValue::Absent`] when `allow_absent` is set,
    /// meaning the caller puts no constraint on the type.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidDefaultValue`] when the value is not an `f64`,
    /// string, bool or JSON object (for example a number that wasn't normalized), or
    /// when it's absent and `allow_absent` is not set. The message names `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::{DefaultValue, ErrorKind, VariableType};
    ///
    /// let value = DefaultValue::from(3).normalize();
    /// assert_eq!(value.infer_type("key", false).unwrap(), Some(VariableType::Number));
    ///
    /// let err = DefaultValue::Absent.infer_type("key", false).unwrap_err();
    /// assert!(err.is(ErrorKind::InvalidDefaultValue));
    /// ```
    pub fn infer_type(
        &self,
        key: &str,
        allow_absent: bool,
    ) -> Result<Option<VariableType>, ClientError> {
        match self {
            DefaultValue::F64(_) => Ok(Some(VariableType::Number)),
            DefaultValue::String(_) => Ok(Some(VariableType::String)),
            DefaultValue::Bool(_) => Ok(Some(VariableType::Boolean)),
            DefaultValue::Json(_) => Ok(Some(VariableType::Json)),
            DefaultValue::Absent if allow_absent => Ok(None),
            _ => Err(ClientError::new(
                ErrorKind::InvalidDefaultValue,
                format!("The default value for variable '{key}' is not of type Boolean, Number, String, or JSON."),
            )),
        }
    }

    /// Returns `true` when both values are of the same variant. Payloads are not compared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::DefaultValue;
    ///
    /// assert!(DefaultValue::from("a").same_type(&DefaultValue::from("b")));
    /// assert!(!DefaultValue::from(3_i64).same_type(&DefaultValue::from(3.0)));
    /// ```
    pub fn same_type(&self, other: &DefaultValue) -> bool {
        discriminant(self) == discriminant(other)
    }

    /// Creates a [`DefaultValue`] with the variant a decoded API value would have.
    ///
    /// All numbers become [`DefaultValue::F64`] and `null` becomes [`DefaultValue::Absent`].
    /// Returns [`None`] for arrays and for numbers that don't fit an `f64`.
    pub fn from_json_val(json_val: &serde_json::Value) -> Option<DefaultValue> {
        match json_val {
            serde_json::Value::Null => Some(DefaultValue::Absent),
            serde_json::Value::Bool(val) => Some(DefaultValue::Bool(*val)),
            serde_json::Value::Number(val) => val.as_f64().map(DefaultValue::F64),
            serde_json::Value::String(val) => Some(DefaultValue::String(val.clone())),
            serde_json::Value::Object(val) => Some(DefaultValue::Json(val.clone())),
            serde_json::Value::Array(_) => None,
        }
    }

    /// Converts the default to a [`Value`], normalizing numbers first.
    /// Returns [`None`] for [`DefaultValue::Absent`].
    pub fn into_value(self) -> Option<Value> {
        match self.normalize() {
            DefaultValue::F64(val) => Some(Value::Number(val)),
            DefaultValue::String(val) => Some(Value::String(val)),
            DefaultValue::Bool(val) => Some(Value::Bool(val)),
            DefaultValue::Json(val) => Some(Value::Json(serde_json::Value::Object(val))),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            DefaultValue::I8(_) => "i8",
            DefaultValue::I16(_) => "i16",
            DefaultValue::I32(_) => "i32",
            DefaultValue::I64(_) => "i64",
            DefaultValue::Isize(_) => "isize",
            DefaultValue::U8(_) => "u8",
            DefaultValue::U16(_) => "u16",
            DefaultValue::U32(_) => "u32",
            DefaultValue::U64(_) => "u64",
            DefaultValue::Usize(_) => "usize",
            DefaultValue::F32(_) => "f32",
            DefaultValue::F64(_) => "f64",
            DefaultValue::String(_) => "String",
            DefaultValue::Bool(_) => "bool",
            DefaultValue::Json(_) => "JSON object",
            DefaultValue::Absent => "absent",
        }
    }
}

impl From<HashMap<String, serde_json::Value>> for DefaultValue {
    fn from(value: HashMap<String, serde_json::Value>) -> Self {
        Self::Json(value.into_iter().collect())
    }
}

impl<T: Into<DefaultValue>> From<Option<T>> for DefaultValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(val) => val.into(),
            None => Self::Absent,
        }
    }
}

from_val_to_enum!(DefaultValue I8 i8);
from_val_to_enum!(DefaultValue I16 i16);
from_val_to_enum!(DefaultValue I32 i32);
from_val_to_enum!(DefaultValue I64 i64);
from_val_to_enum!(DefaultValue Isize isize);
from_val_to_enum!(DefaultValue U8 u8);
from_val_to_enum!(DefaultValue U16 u16);
from_val_to_enum!(DefaultValue U32 u32);
from_val_to_enum!(DefaultValue U64 u64);
from_val_to_enum!(DefaultValue Usize usize);
from_val_to_enum!(DefaultValue F32 f32);
from_val_to_enum!(DefaultValue F64 f64);
from_val_to_enum!(DefaultValue String String);
from_val_to_enum!(DefaultValue Bool bool);
from_val_to_enum!(DefaultValue Json Map<String, serde_json::Value>);
from_val_to_enum_into!(DefaultValue String &str);

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};
    use std::collections::HashMap;

    use crate::default_value::DefaultValue;
    use crate::errors::ErrorKind;
    use crate::model::enums::VariableType;
    use crate::value::Value;

    fn object(value: serde_json::Value) -> Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn normalize_numbers() {
        let inputs = vec![
            DefaultValue::from(-8_i8),
            DefaultValue::from(-16_i16),
            DefaultValue::from(-32_i32),
            DefaultValue::from(-64_i64),
            DefaultValue::from(-1_isize),
            DefaultValue::from(8_u8),
            DefaultValue::from(16_u16),
            DefaultValue::from(32_u32),
            DefaultValue::from(64_u64),
            DefaultValue::from(1_usize),
            DefaultValue::from(0.5_f32),
        ];
        let expected = [-8.0, -16.0, -32.0, -64.0, -1.0, 8.0, 16.0, 32.0, 64.0, 1.0, 0.5];
        for (input, exp) in inputs.into_iter().zip(expected) {
            assert_eq!(input.normalize(), DefaultValue::F64(exp));
        }
    }

    #[test]
    fn normalize_extremes() {
        assert_eq!(
            DefaultValue::from(i64::MIN).normalize(),
            DefaultValue::F64(i64::MIN as f64)
        );
        assert_eq!(
            DefaultValue::from(u32::MAX).normalize(),
            DefaultValue::F64(4_294_967_295.0)
        );
        assert_eq!(
            DefaultValue::from(f32::MAX).normalize(),
            DefaultValue::F64(f32::MAX as f64)
        );
    }

    #[test]
    fn normalize_passes_through() {
        let inputs = vec![
            DefaultValue::from(1.25),
            DefaultValue::from("str"),
            DefaultValue::from(true),
            DefaultValue::from(object(json!({"a": 1}))),
            DefaultValue::Absent,
        ];
        for input in inputs {
            assert_eq!(input.clone().normalize(), input);
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = vec![
            DefaultValue::from(7_u16),
            DefaultValue::from(-3_i32),
            DefaultValue::from(2.5_f32),
            DefaultValue::from(9.75),
            DefaultValue::from("x"),
        ];
        for input in inputs {
            let once = input.normalize();
            assert_eq!(once.clone().normalize(), once);
        }
    }

    #[test]
    fn infer_type() {
        assert_eq!(
            DefaultValue::from(3).normalize().infer_type("k", false).unwrap(),
            Some(VariableType::Number)
        );
        assert_eq!(
            DefaultValue::from("hi").infer_type("k", false).unwrap(),
            Some(VariableType::String)
        );
        assert_eq!(
            DefaultValue::from(true).infer_type("k", false).unwrap(),
            Some(VariableType::Boolean)
        );
        assert_eq!(
            DefaultValue::from(object(json!({"a": 1})))
                .infer_type("k", false)
                .unwrap(),
            Some(VariableType::Json)
        );
    }

    #[test]
    fn infer_type_absent() {
        assert_eq!(DefaultValue::Absent.infer_type("k", true).unwrap(), None);

        let err = DefaultValue::Absent.infer_type("myKey", false).unwrap_err();
        assert!(err.is(ErrorKind::InvalidDefaultValue));
        assert!(err.message.contains("myKey"));
    }

    #[test]
    fn infer_type_rejects_unnormalized() {
        let err = DefaultValue::from(3_i32).infer_type("num", false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDefaultValue);

        let err = DefaultValue::from(1.5_f32).infer_type("num", true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDefaultValue);
    }

    #[test]
    fn same_type() {
        assert!(DefaultValue::from(3.0).same_type(&DefaultValue::from(3.0)));
        assert!(!DefaultValue::from(3).same_type(&DefaultValue::from(3.0)));
        assert!(DefaultValue::from("a").same_type(&DefaultValue::from("b")));
        assert!(!DefaultValue::from(3.0_f32).same_type(&DefaultValue::from(3.0_f64)));
        assert!(!DefaultValue::from(1_u8).same_type(&DefaultValue::from(1_i8)));
        assert!(DefaultValue::from(object(json!({"a": 1})))
            .same_type(&DefaultValue::from(object(json!({})))));
        assert!(DefaultValue::Absent.same_type(&DefaultValue::Absent));
    }

    #[test]
    fn from_json_val() {
        assert_eq!(
            DefaultValue::from_json_val(&json!(1)),
            Some(DefaultValue::F64(1.0))
        );
        assert_eq!(
            DefaultValue::from_json_val(&json!(null)),
            Some(DefaultValue::Absent)
        );
        assert_eq!(
            DefaultValue::from_json_val(&json!({"k": [1]})),
            Some(DefaultValue::Json(object(json!({"k": [1]}))))
        );
        assert_eq!(DefaultValue::from_json_val(&json!([1, 2])), None);
    }

    #[test]
    fn conversions() {
        assert_eq!(DefaultValue::from(None::<bool>), DefaultValue::Absent);
        assert_eq!(DefaultValue::from(Some("s")), DefaultValue::String("s".to_owned()));

        let map = HashMap::from([("a".to_owned(), json!(true))]);
        assert_eq!(
            DefaultValue::from(map),
            DefaultValue::Json(object(json!({"a": true})))
        );
    }

    #[test]
    fn into_value() {
        assert_eq!(DefaultValue::from(4_u64).into_value(), Some(Value::Number(4.0)));
        assert_eq!(
            DefaultValue::from(object(json!({"a": 1}))).into_value(),
            Some(Value::Json(json!({"a": 1})))
        );
        assert_eq!(DefaultValue::Absent.into_value(), None);
    }
}
