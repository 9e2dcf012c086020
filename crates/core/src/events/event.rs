//! The event value published on the stream

use crate::errors::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub const INSTALL_SCRIPT_ACQUISITION_COMPLETED: &str = "DotnetInstallScriptAcquisitionCompleted";
pub const INSTALL_SCRIPT_ACQUISITION_ERROR: &str = "DotnetInstallScriptAcquisitionError";
pub const RELEASES_ACQUISITION_COMPLETED: &str = "DotnetReleasesAcquisitionCompleted";
pub const RELEASES_ACQUISITION_ERROR: &str = "DotnetReleasesAcquisitionError";
pub const CACHE_CLEARED: &str = "DotnetAcquisitionCacheCleared";

/// What kind of state transition an event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Completed,
    Error,
    Diagnostic,
}

/// A structured event. Built at a state transition, published once and never
/// mutated afterwards; observers only ever see it by shared reference.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    name: String,
    kind: EventKind,
    timestamp: DateTime<Utc>,
    properties: BTreeMap<String, String>,
    /// Property keys that may identify the user and must never reach telemetry
    #[serde(skip)]
    private_keys: BTreeSet<String>,
}

impl Event {
    fn new(name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            name: name.into(),
            kind,
            timestamp: Utc::now(),
            properties: BTreeMap::new(),
            private_keys: BTreeSet::new(),
        }
    }

    pub fn completed(name: impl Into<String>) -> Self {
        Self::new(name, EventKind::Completed)
    }

    pub fn error(name: impl Into<String>) -> Self {
        Self::new(name, EventKind::Error)
    }

    pub fn diagnostic(name: impl Into<String>) -> Self {
        Self::new(name, EventKind::Diagnostic)
    }

    /// Attach a property that is safe to send to telemetry (after home-directory redaction)
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Attach a property that stays local (logs, console) and is dropped on sanitization
    #[must_use]
    pub fn with_private_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let key = key.into();
        self.private_keys.insert(key.clone());
        self.properties.insert(key, value.into());
        self
    }

    /// Attach the standard properties describing a failure
    #[must_use]
    pub fn with_error_detail(self, error: &Error) -> Self {
        let event = self
            .with_property("error", error.to_string())
            .with_property("error_kind", error.kind())
            .with_private_property("error_detail", format!("{error:?}"));
        match error.fetch_reason() {
            Some(reason) => event.with_property("fetch_reason", reason.to_string()),
            None => event,
        }
    }

    pub fn install_script_acquisition_completed(script_path: &Path) -> Self {
        Self::completed(INSTALL_SCRIPT_ACQUISITION_COMPLETED)
            .with_private_property("script_path", script_path.display().to_string())
    }

    pub fn install_script_acquisition_error(error: &Error) -> Self {
        Self::error(INSTALL_SCRIPT_ACQUISITION_ERROR).with_error_detail(error)
    }

    pub fn releases_acquisition_completed(channel_count: usize) -> Self {
        Self::completed(RELEASES_ACQUISITION_COMPLETED)
            .with_property("channel_count", channel_count.to_string())
    }

    pub fn releases_acquisition_error(error: &Error) -> Self {
        Self::error(RELEASES_ACQUISITION_ERROR).with_error_detail(error)
    }

    pub fn cache_cleared(entries_removed: usize) -> Self {
        Self::diagnostic(CACHE_CLEARED).with_property("entries_removed", entries_removed.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn is_error(&self) -> bool {
        self.kind == EventKind::Error
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// All properties, private ones included
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Properties fit for telemetry: private keys removed, the user's home
    /// directory replaced with `~` and the user name with `<user>`. `None`
    /// when nothing is left.
    pub fn sanitized_properties(&self) -> Option<BTreeMap<String, String>> {
        self.sanitized_properties_with(dirs::home_dir().as_deref(), current_user_name().as_deref())
    }

    pub(crate) fn sanitized_properties_with(
        &self,
        home: Option<&Path>,
        user: Option<&str>,
    ) -> Option<BTreeMap<String, String>> {
        let sanitized: BTreeMap<String, String> = self
            .properties
            .iter()
            .filter(|(key, _)| !self.private_keys.contains(*key))
            .map(|(key, value)| (key.clone(), redact_user(&redact_home(value, home), user)))
            .collect();

        if sanitized.is_empty() {
            None
        } else {
            Some(sanitized)
        }
    }
}

const USER_PLACEHOLDER: &str = "<user>";

fn current_user_name() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|u| !u.trim().is_empty())
        .or_else(|| {
            dirs::home_dir()
                .and_then(|home| home.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
}

fn redact_home(value: &str, home: Option<&Path>) -> String {
    let Some(home) = home.and_then(Path::to_str) else {
        return value.to_string();
    };
    // "/" or "" would redact every path separator
    if home.len() <= 1 {
        return value.to_string();
    }
    value.replace(home, "~")
}

/// Replace the user name wherever it stands as a whole word, so `alice` is
/// redacted in `/mnt/alice/x` but not in `malice`.
fn redact_user(value: &str, user: Option<&str>) -> String {
    let Some(user) = user.filter(|u| u.chars().count() > 1) else {
        return value.to_string();
    };

    let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());
    let mut redacted = String::with_capacity(value.len());
    let mut last = 0;

    for (idx, _) in value.match_indices(user) {
        let end = idx + user.len();
        if is_boundary(value[..idx].chars().next_back()) && is_boundary(value[end..].chars().next()) {
            redacted.push_str(&value[last..idx]);
            redacted.push_str(USER_PLACEHOLDER);
            last = end;
        }
    }

    redacted.push_str(&value[last..]);
    redacted
}
