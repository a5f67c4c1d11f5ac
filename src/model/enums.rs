use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The coarse type of a variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    /// The on/off type.
    Boolean,
    /// The decimal number type.
    Number,
    /// The text type.
    String,
    /// The JSON object type.
    #[serde(rename = "JSON")]
    Json,
}

impl VariableType {
    /// The label of the type as used by the DevCycle API.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Boolean => "Boolean",
            VariableType::Number => "Number",
            VariableType::String => "String",
            VariableType::Json => "JSON",
        }
    }
}

impl Display for VariableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reason of an evaluation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationReason {
    /// The user matched a targeting rule.
    TargetingMatch,
    /// The user was bucketed by a rollout split.
    Split,
    /// The default value was served.
    Default,
    /// The feature is disabled.
    Disabled,
    /// The evaluation failed.
    Error,
    /// A reason unknown to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// Describes why a default value was served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefaultReason {
    /// No configuration was available.
    MissingConfig,
    /// The variable is not part of the configuration.
    MissingVariable,
    /// The feature is not part of the configuration.
    MissingFeature,
    /// The variation is not part of the configuration.
    MissingVariation,
    /// The variation doesn't set the variable.
    MissingVariableForVariation,
    /// The user is not part of the rollout.
    UserNotInRollout,
    /// The user didn't match any targeting rule.
    UserNotTargeted,
    /// The served value doesn't have the type of the default value.
    InvalidVariableType,
    /// Any other reason, including failed requests.
    Unknown,
}

impl Display for DefaultReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultReason::MissingConfig => f.write_str("Missing Config"),
            DefaultReason::MissingVariable => f.write_str("Missing Variable"),
            DefaultReason::MissingFeature => f.write_str("Missing Feature"),
            DefaultReason::MissingVariation => f.write_str("Missing Variation"),
            DefaultReason::MissingVariableForVariation => {
                f.write_str("Missing Variable for Variation")
            }
            DefaultReason::UserNotInRollout => f.write_str("User Not in Rollout"),
            DefaultReason::UserNotTargeted => f.write_str("User Not Targeted"),
            DefaultReason::InvalidVariableType => f.write_str("Invalid Variable Type"),
            DefaultReason::Unknown => f.write_str("Unknown"),
        }
    }
}
