use chrono::Utc;
use serde::Serialize;

use crate::model::user::PopulatedUser;

/// A custom event sent through [`crate::Client::track`].
///
/// # Examples:
///
/// ```rust
/// use devcycle::Event;
///
/// let event = Event::new("checkout")
///     .target("cart")
///     .value(99.5)
///     .meta_data(serde_json::json!({"items": 3}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Custom event type.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Subject of the event, contextual to the event type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Unix epoch time in milliseconds the event occurred according to the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<f64>,
    /// Value for numerical events, contextual to the event type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Extra JSON metadata, contextual to the event type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Value>,
}

impl Event {
    /// Initializes a new [`Event`] of the given type.
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_owned(),
            ..Self::default()
        }
    }

    /// Subject of the event.
    pub fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_owned());
        self
    }

    /// Unix epoch time in milliseconds the event occurred.
    pub fn date(mut self, date: f64) -> Self {
        self.date = Some(date);
        self
    }

    /// Value of the event.
    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Extra metadata of the event.
    pub fn meta_data(mut self, meta_data: serde_json::Value) -> Self {
        self.meta_data = Some(meta_data);
        self
    }

    pub(crate) fn dated(mut self) -> Self {
        if self.date.is_none() {
            self.date = Some(Utc::now().timestamp_millis() as f64);
        }
        self
    }
}

#[derive(Serialize)]
pub(crate) struct TrackBody {
    pub user: PopulatedUser,
    pub events: Vec<Event>,
}
