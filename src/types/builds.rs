use super::null_as_default;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Final outcome of a finished build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
    /// A result string this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Someone whose changes went into a build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Culprit {
    #[serde(deserialize_with = "null_as_default")]
    pub absolute_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
}

/// Build details from `GET /job/<name>/<number>/api/json`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BuildInfo {
    pub number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub id: Option<String>,
    /// Run time in milliseconds; `0` while building.
    pub duration: u64,
    /// Jenkins reports `-1` when it has no estimate.
    pub estimated_duration: Option<i64>,
    /// Start time, milliseconds since the Unix epoch.
    pub timestamp: Option<u64>,
    pub culprits: Vec<Culprit>,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    pub display_name: Option<String>,
    pub full_display_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub absolute_url: String,
    pub description: Option<String>,
    /// `None` while `building` is `true`.
    pub result: Option<BuildResult>,
    /// Agent name; empty for the built-in node.
    #[serde(deserialize_with = "null_as_default")]
    pub built_on: String,
    pub building: bool,
}

impl BuildInfo {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result == Some(BuildResult::Success)
    }
}
