use serde::{Deserialize, Serialize};

use crate::model::variable::EvalReason;

/// A feature as evaluated by the DevCycle API for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Id of the feature.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Key of the feature.
    pub key: String,
    /// Type of the feature (`release`, `experiment`, `permission` or `ops`).
    #[serde(rename = "type", default)]
    pub feature_type: String,
    /// Id of the variation the user was bucketed into.
    #[serde(rename = "_variation", default)]
    pub variation: String,
    /// Key of the variation the user was bucketed into.
    #[serde(default)]
    pub variation_key: String,
    /// Name of the variation the user was bucketed into.
    #[serde(default)]
    pub variation_name: String,
    /// Legacy evaluation reason.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub eval_reason: Option<String>,
    /// Why the user was bucketed into the variation.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub eval: Option<EvalReason>,
}
