use std::sync::Arc;
use std::time::Duration;

use crate::constants::{DEFAULT_BUCKETING_API_URI, SDK_KEY_PREFIXES};
use crate::errors::{ClientError, ErrorKind};
use crate::hooks::EvalHook;
use crate::model::user::PlatformData;
use crate::Client;

pub(crate) struct Options {
    sdk_key: String,
    bucketing_api_uri: String,
    request_timeout: Duration,
    enable_edge_db: bool,
    disable_custom_event_logging: bool,
    platform_data: PlatformData,
    hooks: Vec<Arc<EvalHook>>,
}

impl Options {
    pub(crate) fn sdk_key(&self) -> &str {
        &self.sdk_key
    }

    pub(crate) fn bucketing_api_uri(&self) -> &str {
        &self.bucketing_api_uri
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub(crate) fn enable_edge_db(&self) -> bool {
        self.enable_edge_db
    }

    pub(crate) fn disable_custom_event_logging(&self) -> bool {
        self.disable_custom_event_logging
    }

    pub(crate) fn platform_data(&self) -> &PlatformData {
        &self.platform_data
    }

    pub(crate) fn hooks(&self) -> &[Arc<EvalHook>] {
        &self.hooks
    }
}

/// Builder to create a DevCycle [`Client`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use devcycle::Client;
///
/// let client = Client::builder("dvc_server_key")
///     .request_timeout(Duration::from_secs(10))
///     .enable_edge_db(true)
///     .build()
///     .unwrap();
/// ```
pub struct ClientBuilder {
    sdk_key: String,
    bucketing_api_uri: Option<String>,
    request_timeout: Option<Duration>,
    enable_edge_db: bool,
    disable_custom_event_logging: bool,
    platform_data: Option<PlatformData>,
    hooks: Vec<Arc<EvalHook>>,
}

impl ClientBuilder {
    const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    pub(crate) fn new(sdk_key: &str) -> Self {
        Self {
            sdk_key: sdk_key.to_owned(),
            bucketing_api_uri: None,
            request_timeout: None,
            enable_edge_db: false,
            disable_custom_event_logging: false,
            platform_data: None,
            hooks: Vec::new(),
        }
    }

    /// Sets the base URI of the DevCycle Bucketing API.
    /// Default value is `https://bucketing-api.devcycle.com`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use devcycle::Client;
    ///
    /// let builder = Client::builder("dvc_server_key")
    ///     .bucketing_api_uri("https://bucketing-proxy.example.com");
    /// ```
    pub fn bucketing_api_uri(mut self, uri: &str) -> Self {
        self.bucketing_api_uri = Some(uri.to_owned());
        self
    }

    /// Sets the HTTP request timeout.
    /// Default and minimum value is `5` seconds, shorter timeouts are raised to it.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Indicates whether the API should use EdgeDB to enrich users with stored data.
    /// Default value is `false`.
    pub fn enable_edge_db(mut self, enable: bool) -> Self {
        self.enable_edge_db = enable;
        self
    }

    /// Turns [`Client::track`] into a no-op. Default value is `false`.
    pub fn disable_custom_event_logging(mut self, disable: bool) -> Self {
        self.disable_custom_event_logging = disable;
        self
    }

    /// Overrides the [`PlatformData`] sent along with each user.
    pub fn platform_data(mut self, platform_data: PlatformData) -> Self {
        self.platform_data = Some(platform_data);
        self
    }

    /// Registers an [`EvalHook`] run around each variable evaluation.
    /// Hooks run in the order of registration, see [`EvalHook`] for details.
    pub fn hook(mut self, hook: EvalHook) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Creates a [`Client`] from the configuration made on the builder.
    ///
    /// # Errors
    ///
    /// This method fails if the given SDK key is empty or is not a server SDK key,
    /// or when the HTTP client can't be initialized.
    pub fn build(self) -> Result<Client, ClientError> {
        if self.sdk_key.is_empty() {
            return Err(ClientError::new(
                ErrorKind::InvalidSdkKey,
                "SDK Key cannot be empty".to_owned(),
            ));
        }
        if !SDK_KEY_PREFIXES
            .iter()
            .any(|prefix| self.sdk_key.starts_with(prefix))
        {
            return Err(ClientError::new(
                ErrorKind::InvalidSdkKey,
                format!(
                    "SDK Key '{}' is invalid, it must be a server SDK key starting with 'server' or 'dvc_server'.",
                    self.sdk_key
                ),
            ));
        }
        Client::with_options(self.build_options())
    }

    pub(crate) fn build_options(self) -> Options {
        Options {
            sdk_key: self.sdk_key,
            bucketing_api_uri: self
                .bucketing_api_uri
                .unwrap_or(DEFAULT_BUCKETING_API_URI.to_owned()),
            request_timeout: self
                .request_timeout
                .unwrap_or(Self::MIN_REQUEST_TIMEOUT)
                .max(Self::MIN_REQUEST_TIMEOUT),
            enable_edge_db: self.enable_edge_db,
            disable_custom_event_logging: self.disable_custom_event_logging,
            platform_data: self.platform_data.unwrap_or_default(),
            hooks: self.hooks,
        }
    }
}
