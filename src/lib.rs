//! DevCycle server SDK for Rust, evaluating variables through the DevCycle Bucketing API.

#![warn(missing_docs)]

#[macro_use]
mod macros;
mod builder;
mod client;
mod constants;
mod default_value;
mod errors;
mod fetch;
mod hooks;
mod model;
mod typed_value;
mod value;

pub use builder::ClientBuilder;
pub use client::Client;
pub use constants::PKG_VERSION;
pub use default_value::DefaultValue;
pub use errors::{ClientError, ErrorKind};
pub use hooks::{BoxError, EvalHook, HookContext, HookError, HookResult};

pub use model::enums::{DefaultReason, EvaluationReason, VariableType};
pub use model::event::Event;
pub use model::feature::Feature;
pub use model::user::{PlatformData, PopulatedUser, User};
pub use model::variable::{EvalReason, ReadOnlyVariable, Variable};

pub use typed_value::{TypedValue, ValueError, ValueTag};
pub use value::Value;
