//! Remote calendar types.
//!
//! These mirror what the course platform hands back through a provider.
//! They are read-only snapshots: a reconciliation run fetches them once and
//! never refreshes them mid-run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context code prefix for events scoped to a single section.
pub const SECTION_CONTEXT_PREFIX: &str = "course_section_";

/// Context code prefix for course-wide events.
pub const COURSE_CONTEXT_PREFIX: &str = "course_";

/// A calendar event as it currently exists on the remote platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    /// `course_<id>` for course-wide events, `course_section_<id>` for
    /// section overrides.
    pub context_code: String,
    /// Groups section overrides under the event they override.
    #[serde(default)]
    pub parent_event_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// HTML body.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_address: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
}

impl RemoteEvent {
    /// Section id this event is scoped to, if it is a section override.
    pub fn section_id(&self) -> Option<&str> {
        self.context_code.strip_prefix(SECTION_CONTEXT_PREFIX)
    }
}

impl fmt::Display for RemoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title.as_deref().unwrap_or("(untitled)"))
    }
}

/// A course on the remote platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A section (cohort) of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
}

impl Section {
    /// Context code that scopes an event to this section.
    pub fn context_code(&self) -> String {
        format!("{SECTION_CONTEXT_PREFIX}{}", self.id)
    }
}
