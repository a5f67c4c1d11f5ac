use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::{error, warn};

use crate::builder::{ClientBuilder, Options};
use crate::constants::{FEATURES_PATH, TRACK_PATH, VARIABLES_PATH};
use crate::default_value::DefaultValue;
use crate::errors::{ClientError, ErrorKind};
use crate::fetch::api::ApiClient;
use crate::hooks::{run_after, run_before, run_error, run_on_finally, EvalHook, HookContext};
use crate::model::enums::{DefaultReason, VariableType};
use crate::model::event::{Event, TrackBody};
use crate::model::feature::Feature;
use crate::model::user::User;
use crate::model::variable::{ReadOnlyVariable, Variable, VariableResponse};
use crate::value::Value;

/// The main component for evaluating variables through the DevCycle Bucketing API.
///
/// # Examples
///
/// ```no_run
/// use devcycle::{Client, User};
///
/// #[tokio::main]
/// async fn main() {
///     let client = Client::new("dvc_server_key").unwrap();
///
///     let user = User::new("user-id");
///     let enabled = client.variable_value(&user, "new-checkout", false).await.unwrap();
/// }
/// ```
pub struct Client {
    options: Options,
    api: ApiClient,
    hooks: RwLock<Vec<Arc<EvalHook>>>,
}

impl Client {
    pub(crate) fn with_options(options: Options) -> Result<Self, ClientError> {
        let api = ApiClient::new(
            options.bucketing_api_uri(),
            options.sdk_key(),
            options.request_timeout(),
            options.enable_edge_db(),
        )?;
        let hooks = RwLock::new(options.hooks().to_vec());
        Ok(Self {
            options,
            api,
            hooks,
        })
    }

    /// Creates a new [`ClientBuilder`] used to build a [`Client`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devcycle::Client;
    ///
    /// let client = Client::builder("dvc_server_key")
    ///     .enable_edge_db(true)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder(sdk_key: &str) -> ClientBuilder {
        ClientBuilder::new(sdk_key)
    }

    /// Creates a new [`Client`] with default options.
    ///
    /// # Errors
    ///
    /// This method fails if the given SDK key is empty or is not a server SDK key.
    pub fn new(sdk_key: &str) -> Result<Self, ClientError> {
        ClientBuilder::new(sdk_key).build()
    }

    /// Evaluates the variable identified by `key` for `user`.
    ///
    /// The type of the variable is inferred from `default`. Integer and `f32` defaults are
    /// treated as Numbers. When the API has no value for the user, returns a value of a
    /// different type, or can't be reached, the returned [`Variable`] holds the default and
    /// has [`Variable::is_defaulted`] set.
    ///
    /// # Errors
    ///
    /// This method fails if `key` is empty or `default` is absent. Failures of the
    /// registered [`EvalHook`]s are logged and serve the default instead.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devcycle::{Client, User};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("dvc_server_key").unwrap();
    ///
    ///     let user = User::new("user-id");
    ///     let variable = client.variable(&user, "max-items", 10).await.unwrap();
    ///     println!("{} (defaulted: {})", variable.value, variable.is_defaulted);
    /// }
    /// ```
    pub async fn variable<D: Into<DefaultValue>>(
        &self,
        user: &User,
        key: &str,
        default: D,
    ) -> Result<Variable, ClientError> {
        if key.is_empty() {
            let err = ClientError::new(
                ErrorKind::InvalidVariableKey,
                "Variable key cannot be empty.".to_owned(),
            );
            error!(event_id = err.kind.code(); "{}", err);
            return Err(err);
        }

        let default = default.into().normalize();
        let variable_type = default.infer_type(key, false).inspect_err(|err| {
            error!(event_id = err.kind.code(); "{}", err);
        })?;
        let (Some(variable_type), Some(default_value)) =
            (variable_type, default.clone().into_value())
        else {
            return Err(ClientError::new(
                ErrorKind::InvalidDefaultValue,
                format!("The default value for variable '{key}' is missing."),
            ));
        };

        let mut context = HookContext {
            user: user.clone(),
            key: key.to_owned(),
            default_value: default_value.clone(),
            variable_details: None,
        };
        let hooks = self.hooks();
        let variable = match run_before(&hooks, &context) {
            Ok(()) => {
                let variable = self
                    .evaluate(user, key, variable_type, &default, default_value)
                    .await;
                context.variable_details = Some(variable.clone());
                if let Err(err) = run_after(&hooks, &context, &variable) {
                    run_error(&hooks, &context, &err);
                }
                variable
            }
            Err(err) => {
                run_error(&hooks, &context, &err);
                let variable =
                    Variable::defaulted(key, variable_type, default_value, DefaultReason::Unknown);
                context.variable_details = Some(variable.clone());
                variable
            }
        };
        run_on_finally(&hooks, &context, &variable);
        Ok(variable)
    }

    async fn evaluate(
        &self,
        user: &User,
        key: &str,
        variable_type: VariableType,
        default: &DefaultValue,
        default_value: Value,
    ) -> Variable {
        let segments = [VARIABLES_PATH[0], VARIABLES_PATH[1], key];
        let body = user.populate(self.options.platform_data());
        match self.api.post::<_, VariableResponse>(&segments, &body).await {
            Ok(Some(response)) => {
                resolve_variable(key, variable_type, default, default_value, response)
            }
            Ok(None) => {
                warn!("Returning the default value for variable '{key}'.");
                Variable::defaulted(key, variable_type, default_value, DefaultReason::Unknown)
            }
            Err(err) => {
                warn!(event_id = err.kind.code(); "Returning the default value for variable '{key}'. {err}");
                Variable::defaulted(key, variable_type, default_value, DefaultReason::Unknown)
            }
        }
    }

    /// Registers an [`EvalHook`] run around each subsequent variable evaluation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devcycle::{Client, EvalHook};
    ///
    /// let client = Client::new("dvc_server_key").unwrap();
    /// client.add_hook(EvalHook::new().before(|ctx| {
    ///     println!("evaluating {} for {}", ctx.key, ctx.user.user_id);
    ///     Ok(())
    /// }));
    /// ```
    pub fn add_hook(&self, hook: EvalHook) {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(hook));
    }

    /// Removes every registered [`EvalHook`].
    pub fn clear_hooks(&self) {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn hooks(&self) -> Vec<Arc<EvalHook>> {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The same as [`Client::variable`] but returns only the value of the variable.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devcycle::{Client, User};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("dvc_server_key").unwrap();
    ///
    ///     let user = User::new("user-id");
    ///     let greeting = client.variable_value(&user, "greeting", "hello").await.unwrap();
    /// }
    /// ```
    pub async fn variable_value<D: Into<DefaultValue>>(
        &self,
        user: &User,
        key: &str,
        default: D,
    ) -> Result<Value, ClientError> {
        Ok(self.variable(user, key, default).await?.value)
    }

    /// Evaluates all variables for `user`.
    ///
    /// Returns an empty [`HashMap`] when the API reports a server error.
    ///
    /// # Errors
    ///
    /// This method fails when the request can't be sent, the SDK key is rejected,
    /// or the response can't be decoded.
    pub async fn all_variables(
        &self,
        user: &User,
    ) -> Result<HashMap<String, ReadOnlyVariable>, ClientError> {
        let body = user.populate(self.options.platform_data());
        let result = self.api.post(&VARIABLES_PATH, &body).await?;
        Ok(result.unwrap_or_default())
    }

    /// Evaluates all features for `user`.
    ///
    /// Returns an empty [`HashMap`] when the API reports a server error.
    ///
    /// # Errors
    ///
    /// The same as [`Client::all_variables`].
    pub async fn all_features(&self, user: &User) -> Result<HashMap<String, Feature>, ClientError> {
        let body = user.populate(self.options.platform_data());
        let result = self.api.post(&FEATURES_PATH, &body).await?;
        Ok(result.unwrap_or_default())
    }

    /// Sends a custom event for `user`.
    ///
    /// Returns `false` when the API reports a server error and the event was not accepted.
    /// When custom event logging is disabled, nothing is sent and `true` is returned.
    ///
    /// # Errors
    ///
    /// This method fails if the type of the event is empty, or when the request fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devcycle::{Client, Event, User};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("dvc_server_key").unwrap();
    ///
    ///     let user = User::new("user-id");
    ///     let sent = client.track(&user, Event::new("checkout").value(42.0)).await.unwrap();
    /// }
    /// ```
    pub async fn track(&self, user: &User, event: Event) -> Result<bool, ClientError> {
        if self.options.disable_custom_event_logging() {
            return Ok(true);
        }
        if event.event_type.is_empty() {
            let err = ClientError::new(
                ErrorKind::MissingEventType,
                "Event type is required to track a custom event.".to_owned(),
            );
            error!(event_id = err.kind.code(); "{}", err);
            return Err(err);
        }
        let body = TrackBody {
            user: user.populate(self.options.platform_data()),
            events: vec![event.dated()],
        };
        let result = self.api.send(&TRACK_PATH, &body).await?;
        Ok(result.is_some())
    }
}

fn resolve_variable(
    key: &str,
    variable_type: VariableType,
    default: &DefaultValue,
    default_value: Value,
    response: VariableResponse,
) -> Variable {
    let served = DefaultValue::from_json_val(&response.value);
    match (served, Value::from_json_val(&response.value)) {
        (Some(served), Some(value)) if served.same_type(default) => Variable {
            key: key.to_owned(),
            variable_type,
            value,
            default_value,
            is_defaulted: false,
            eval: response.eval,
        },
        (_, None) => Variable::defaulted(
            key,
            variable_type,
            default_value,
            DefaultReason::MissingVariable,
        ),
        (_, Some(value)) => {
            warn!(
                "Type mismatch for variable '{key}'. Expected type {}, got {}.",
                default.type_name(),
                value.variable_type()
            );
            Variable::defaulted(
                key,
                variable_type,
                default_value,
                DefaultReason::InvalidVariableType,
            )
        }
    }
}
