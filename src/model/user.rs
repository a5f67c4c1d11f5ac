use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::constants::PKG_VERSION;

/// Describes the user a variable or feature is evaluated for.
///
/// # Examples:
///
/// ```rust
/// use devcycle::User;
///
/// let user = User::new("user-id")
///     .email("john@example.com")
///     .country("CA")
///     .custom("plan", "enterprise")
///     .private_custom("seats", 42);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique id of the user.
    #[serde(rename = "user_id")]
    pub user_id: String,
    /// Email address of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Name of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ISO 639-1 language code of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// ISO 3166 alpha-2 country code of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Version of the application the user runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    /// Build number of the application the user runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_build: Option<f64>,
    /// Device model of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    /// Custom attributes used for targeting and logged with events.
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub custom_data: HashMap<String, serde_json::Value>,
    /// Custom attributes used for targeting but never logged.
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub private_custom_data: HashMap<String, serde_json::Value>,
}

impl User {
    /// Initializes a new [`User`].
    ///
    /// # Examples:
    ///
    /// ```rust
    /// use devcycle::User;
    ///
    /// let user = User::new("user-id");
    /// ```
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_owned(),
            ..Self::default()
        }
    }

    /// Email address of the user.
    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_owned());
        self
    }

    /// Name of the user.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Language of the user.
    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_owned());
        self
    }

    /// Country of the user.
    pub fn country(mut self, country: &str) -> Self {
        self.country = Some(country.to_owned());
        self
    }

    /// Version of the application the user runs.
    pub fn app_version(mut self, app_version: &str) -> Self {
        self.app_version = Some(app_version.to_owned());
        self
    }

    /// Build number of the application the user runs.
    pub fn app_build(mut self, app_build: f64) -> Self {
        self.app_build = Some(app_build);
        self
    }

    /// Device model of the user.
    pub fn device_model(mut self, device_model: &str) -> Self {
        self.device_model = Some(device_model.to_owned());
        self
    }

    /// Custom attribute of the user for targeting rule definitions (e.g. user role, subscription type, etc.)
    ///
    /// # Examples:
    ///
    /// ```rust
    /// use devcycle::User;
    ///
    /// let user = User::new("user-id")
    ///     .custom("rating", 4.5)
    ///     .custom("roles", vec!["admin", "editor"]);
    /// ```
    pub fn custom<T: Into<serde_json::Value>>(mut self, key: &str, value: T) -> Self {
        self.custom_data.insert(key.to_owned(), value.into());
        self
    }

    /// The same as [`User::custom`] but the attribute is not sent with events.
    pub fn private_custom<T: Into<serde_json::Value>>(mut self, key: &str, value: T) -> Self {
        self.private_custom_data
            .insert(key.to_owned(), value.into());
        self
    }

    pub(crate) fn populate(&self, platform_data: &PlatformData) -> PopulatedUser {
        let now = Utc::now();
        PopulatedUser {
            user: self.clone(),
            platform_data: platform_data.clone(),
            created_date: now,
            last_seen_date: now,
        }
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(str) => write!(f, "{str}"),
            Err(_) => f.write_str("<invalid user>"),
        }
    }
}

/// Describes the environment the SDK runs in. Sent along with every user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformData {
    /// Type of the SDK, `server` for this SDK.
    pub sdk_type: String,
    /// Version of the SDK.
    pub sdk_version: String,
    /// Version of the platform. Defaults to the minimum Rust version the SDK
    /// supports (`rust-version` of the crate), not the toolchain it was built with.
    pub platform_version: String,
    /// Device model of the host.
    pub device_model: String,
    /// Name of the platform.
    pub platform: String,
    /// Name of the host.
    pub hostname: String,
}

impl Default for PlatformData {
    fn default() -> Self {
        Self {
            sdk_type: "server".to_owned(),
            sdk_version: PKG_VERSION.to_owned(),
            platform_version: env!("CARGO_PKG_RUST_VERSION").to_owned(),
            device_model: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            platform: "Rust".to_owned(),
            hostname: gethostname::gethostname().to_string_lossy().into_owned(),
        }
    }
}

/// A [`User`] merged with the [`PlatformData`] of the SDK, as sent to the DevCycle API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedUser {
    #[serde(flatten)]
    pub(crate) user: User,
    #[serde(flatten)]
    pub(crate) platform_data: PlatformData,
    pub(crate) created_date: DateTime<Utc>,
    pub(crate) last_seen_date: DateTime<Utc>,
}
