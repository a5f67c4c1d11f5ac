use std::error::Error;
use std::sync::Arc;

use log::error;
use thiserror::Error;

use crate::model::user::User;
use crate::model::variable::Variable;
use crate::value::Value;

/// The error type hook callbacks report failures with.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// The result of a hook callback.
pub type HookResult = Result<(), BoxError>;

type BeforeFn = dyn Fn(&HookContext) -> HookResult + Send + Sync;
type VariableFn = dyn Fn(&HookContext, &Variable) -> HookResult + Send + Sync;
type ErrorFn = dyn Fn(&HookContext, &HookError) -> HookResult + Send + Sync;

/// The information passed to the callbacks of an [`EvalHook`].
#[derive(Debug, Clone, PartialEq)]
pub struct HookContext {
    /// The user the variable is evaluated for.
    pub user: User,
    /// Key of the evaluated variable.
    pub key: String,
    /// The default value of the evaluation, with numbers normalized to `f64`.
    pub default_value: Value,
    /// The evaluated variable. Set once the evaluation finished, so only `after`,
    /// `error` and `on_finally` callbacks may see it.
    pub variable_details: Option<Variable>,
}

/// Failure of a `before` or `after` callback, passed to the `error` callbacks.
#[derive(Error, Debug)]
pub enum HookError {
    /// A `before` callback failed; the variable was not evaluated.
    #[error("before hook {index} failed: {source}")]
    Before {
        /// Position of the hook in registration order.
        index: usize,
        /// The error reported by the callback.
        source: BoxError,
    },
    /// An `after` callback failed.
    #[error("after hook {index} failed: {source}")]
    After {
        /// Position of the hook in registration order.
        index: usize,
        /// The error reported by the callback.
        source: BoxError,
    },
}

/// Callbacks run around each [`crate::Client::variable`] evaluation.
///
/// `before` callbacks run in registration order, the others in reverse order.
/// A failing `before` callback skips the evaluation and the rest of the `before`
/// callbacks; the default value is served. A failing `before` or `after` callback
/// triggers the `error` callbacks. `on_finally` callbacks always run last. Hook
/// failures are logged and never returned to the caller of the evaluation.
///
/// # Examples
///
/// ```rust
/// use devcycle::{Client, EvalHook};
///
/// let hook = EvalHook::new()
///     .before(|ctx| {
///         println!("evaluating {}", ctx.key);
///         Ok(())
///     })
///     .on_finally(|ctx, variable| {
///         println!("{} = {}", ctx.key, variable.value);
///         Ok(())
///     });
///
/// let builder = Client::builder("dvc_server_key").hook(hook);
/// ```
#[derive(Default)]
pub struct EvalHook {
    before: Option<Box<BeforeFn>>,
    after: Option<Box<VariableFn>>,
    on_finally: Option<Box<VariableFn>>,
    error: Option<Box<ErrorFn>>,
}

impl EvalHook {
    /// Creates an [`EvalHook`] without callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called before the variable is evaluated.
    pub fn before<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext) -> HookResult + Send + Sync + 'static,
    {
        self.before = Some(Box::new(f));
        self
    }

    /// Called with the evaluated variable when every `before` callback succeeded.
    pub fn after<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext, &Variable) -> HookResult + Send + Sync + 'static,
    {
        self.after = Some(Box::new(f));
        self
    }

    /// Called with the served variable after every evaluation.
    pub fn on_finally<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext, &Variable) -> HookResult + Send + Sync + 'static,
    {
        self.on_finally = Some(Box::new(f));
        self
    }

    /// Called when a `before` or `after` callback fails.
    pub fn error<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext, &HookError) -> HookResult + Send + Sync + 'static,
    {
        self.error = Some(Box::new(f));
        self
    }
}

pub(crate) fn run_before(hooks: &[Arc<EvalHook>], ctx: &HookContext) -> Result<(), HookError> {
    for (index, hook) in hooks.iter().enumerate() {
        if let Some(before) = &hook.before {
            if let Err(source) = before(ctx) {
                let err = HookError::Before { index, source };
                error!("{err}");
                return Err(err);
            }
        }
    }
    Ok(())
}

pub(crate) fn run_after(
    hooks: &[Arc<EvalHook>],
    ctx: &HookContext,
    variable: &Variable,
) -> Result<(), HookError> {
    for (index, hook) in hooks.iter().enumerate().rev() {
        if let Some(after) = &hook.after {
            if let Err(source) = after(ctx, variable) {
                let err = HookError::After { index, source };
                error!("{err}");
                return Err(err);
            }
        }
    }
    Ok(())
}

pub(crate) fn run_on_finally(hooks: &[Arc<EvalHook>], ctx: &HookContext, variable: &Variable) {
    for (index, hook) in hooks.iter().enumerate().rev() {
        if let Some(on_finally) = &hook.on_finally {
            if let Err(err) = on_finally(ctx, variable) {
                error!("on_finally hook {index} failed: {err}");
            }
        }
    }
}

pub(crate) fn run_error(hooks: &[Arc<EvalHook>], ctx: &HookContext, eval_error: &HookError) {
    for (index, hook) in hooks.iter().enumerate().rev() {
        if let Some(on_error) = &hook.error {
            if let Err(err) = on_error(ctx, eval_error) {
                error!("error hook {index} failed: {err}");
            }
        }
    }
}
