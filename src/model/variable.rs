use serde::{Deserialize, Serialize};

use crate::model::enums::{DefaultReason, EvaluationReason, VariableType};
use crate::value::Value;

/// Describes why a variable or feature evaluated to its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReason {
    /// The reason of the evaluation.
    pub reason: EvaluationReason,
    /// Human readable details of the reason.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
    /// Id of the targeting rule that matched.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_id: Option<String>,
}

impl EvalReason {
    pub(crate) fn defaulted(reason: DefaultReason) -> Self {
        Self {
            reason: EvaluationReason::Default,
            details: Some(reason.to_string()),
            target_id: None,
        }
    }
}

/// A variable as evaluated by the DevCycle API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOnlyVariable {
    /// Id of the variable.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Key of the variable.
    pub key: String,
    /// Type of the variable.
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    /// The evaluated value.
    pub value: Value,
    /// Why the variable evaluated to [`ReadOnlyVariable::value`].
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub eval: Option<EvalReason>,
}

/// The result of a variable evaluation through [`crate::Client::variable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Key of the variable.
    pub key: String,
    /// Type of the variable, inferred from the default value.
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    /// The evaluated value, or [`Variable::default_value`] when [`Variable::is_defaulted`] is set.
    pub value: Value,
    /// The default value passed to the evaluation, with numbers normalized to `f64`.
    pub default_value: Value,
    /// Indicates whether the default value is used as the result of the evaluation.
    pub is_defaulted: bool,
    /// Why the variable evaluated to [`Variable::value`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval: Option<EvalReason>,
}

impl Variable {
    pub(crate) fn defaulted(
        key: &str,
        variable_type: VariableType,
        default_value: Value,
        reason: DefaultReason,
    ) -> Self {
        Self {
            key: key.to_owned(),
            variable_type,
            value: default_value.clone(),
            default_value,
            is_defaulted: true,
            eval: Some(EvalReason::defaulted(reason)),
        }
    }
}

/// The response body of the single variable endpoint. Only the parts the SDK relies on.
#[derive(Debug, Deserialize)]
pub(crate) struct VariableResponse {
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub eval: Option<EvalReason>,
}
