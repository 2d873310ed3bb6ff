use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Processing state of an alert as reported by Alertmanager
///
/// States this crate does not know about (Alertmanager also reports
/// `suppressed`) are kept verbatim in [`AlertState::Other`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum AlertState {
    #[default]
    Unprocessed,
    Active,
    Expired,
    Other(String),
}

impl AlertState {
    /// Wire form of the state
    pub fn as_str(&self) -> &str {
        match self {
            AlertState::Unprocessed => "unprocessed",
            AlertState::Active => "active",
            AlertState::Expired => "expired",
            AlertState::Other(state) => state,
        }
    }
}

impl From<String> for AlertState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "unprocessed" => AlertState::Unprocessed,
            "active" => AlertState::Active,
            "expired" => AlertState::Expired,
            _ => AlertState::Other(state),
        }
    }
}

impl From<AlertState> for String {
    fn from(state: AlertState) -> Self {
        match state {
            AlertState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for AlertState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a silence
///
/// Unknown states are kept verbatim in [`SilenceState::Other`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SilenceState {
    #[default]
    Pending,
    Active,
    Expired,
    Other(String),
}

impl SilenceState {
    /// Wire form of the state
    pub fn as_str(&self) -> &str {
        match self {
            SilenceState::Pending => "pending",
            SilenceState::Active => "active",
            SilenceState::Expired => "expired",
            SilenceState::Other(state) => state,
        }
    }
}

impl From<String> for SilenceState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "pending" => SilenceState::Pending,
            "active" => SilenceState::Active,
            "expired" => SilenceState::Expired,
            _ => SilenceState::Other(state),
        }
    }
}

impl From<SilenceState> for String {
    fn from(state: SilenceState) -> Self {
        match state {
            SilenceState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for SilenceState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification receiver an alert was routed to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receiver {
    #[serde(default)]
    pub name: String,
}

/// Status block of an alert
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatus {
    #[serde(default)]
    pub state: AlertState,

    /// Fingerprints of the alerts inhibiting this one
    #[serde(default)]
    pub inhibited_by: Vec<String>,

    /// IDs of the silences muting this alert
    #[serde(default)]
    pub silenced_by: Vec<String>,
}

/// Alert as returned by `GET /api/v2/alerts`
///
/// The `fingerprint` is assigned by Alertmanager and identifies the alert;
/// use it for comparison and deduplication. Fields omitted from the payload
/// keep their default (empty strings and containers, `unprocessed` state),
/// so containers can always be iterated. Timestamps are required.
///
/// # Example
///
/// ```rust
/// use alertmanager_stream::{Alert, AlertState};
///
/// let alert: Alert = serde_json::from_str(r#"{
///     "fingerprint": "abc",
///     "status": {"state": "active"},
///     "startsAt": "2023-01-01T00:00:00Z",
///     "endsAt": "2023-01-01T01:00:00Z",
///     "updatedAt": "2023-01-01T00:30:00Z",
///     "generatorURL": "http://prometheus/graph",
///     "labels": {"alertname": "HighCPUUsage"}
/// }"#).unwrap();
///
/// assert_eq!(alert.status.state, AlertState::Active);
/// assert_eq!(alert.alertname(), Some("HighCPUUsage"));
/// assert!(alert.annotations.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(default)]
    pub fingerprint: String,

    #[serde(default)]
    pub receivers: Vec<Receiver>,

    #[serde(default)]
    pub status: AlertStatus,

    pub starts_at: DateTime<Utc>,

    pub ends_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Link back to the rule that generated the alert
    #[serde(default, rename = "generatorURL")]
    pub generator_url: String,

    #[serde(default)]
    pub annotations: HashMap<String, String>,

    /// Labels identify the alert for routing and grouping
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl Alert {
    /// Get the alertname label
    pub fn alertname(&self) -> Option<&str> {
        self.labels.get("alertname").map(|s| s.as_str())
    }

    /// Whether at least one silence mutes this alert
    pub fn is_silenced(&self) -> bool {
        !self.status.silenced_by.is_empty()
    }

    /// Whether at least one other alert inhibits this alert
    pub fn is_inhibited(&self) -> bool {
        !self.status.inhibited_by.is_empty()
    }
}

/// One label matching rule of a silence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Matcher {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub value: String,

    /// `false` for negative matchers (`!=`, `!~`)
    #[serde(default)]
    pub is_equal: bool,

    /// `value` is a regular expression
    #[serde(default)]
    pub is_regex: bool,
}

/// Status block of a silence
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SilenceStatus {
    #[serde(default)]
    pub state: SilenceState,
}

/// Silence as returned by `GET /api/v2/silences`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Silence {
    /// Absent on creation payloads, always present on reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub status: SilenceStatus,

    #[serde(default)]
    pub matchers: Vec<Matcher>,

    #[serde(default)]
    pub created_by: String,

    #[serde(default)]
    pub comment: String,

    pub starts_at: DateTime<Utc>,

    pub ends_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Silence {
    /// Whether the silence is currently muting alerts
    pub fn is_active(&self) -> bool {
        self.status.state == SilenceState::Active
    }
}
