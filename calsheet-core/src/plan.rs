//! The set of create/update operations produced by reconciliation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, Serializer};

/// Identifies one operation in an [`UpdatePlan`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlanKey {
    /// Update of the remote event with this id.
    Existing(String),
    /// Creation of the n-th new event of the run.
    New(usize),
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKey::Existing(id) => write!(f, "{id}"),
            PlanKey::New(n) => write!(f, "new_{n}"),
        }
    }
}

/// Field values to send for one event.
///
/// Only set fields are sent. `event_id` is always present, and is `None`
/// for new events. Dates use a double option: the outer `None` leaves the
/// date alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct EventChanges {
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
}

impl EventChanges {
    /// Changes for an existing event, with nothing but its id set yet.
    pub fn for_existing(event_id: impl Into<String>) -> Self {
        EventChanges {
            event_id: Some(event_id.into()),
            ..Default::default()
        }
    }

    /// True when no field besides the event id is set.
    pub fn is_unchanged(&self) -> bool {
        *self == EventChanges {
            event_id: self.event_id.clone(),
            ..Default::default()
        }
    }

    /// Names of the fields that are set, besides the event id.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut push = |set: bool, name| {
            if set {
                fields.push(name);
            }
        };
        push(self.context_code.is_some(), "context_code");
        push(self.parent_event_id.is_some(), "parent_event_id");
        push(self.title.is_some(), "title");
        push(self.start_at.is_some(), "start_at");
        push(self.end_at.is_some(), "end_at");
        push(self.description.is_some(), "description");
        push(self.location_name.is_some(), "location_name");
        push(self.location_address.is_some(), "location_address");
        fields
    }
}

/// Operations to apply to the remote calendar, in sheet order.
///
/// Serializes as a JSON object keyed by `PlanKey`'s display form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePlan {
    entries: Vec<(PlanKey, EventChanges)>,
}

impl UpdatePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation. A key that is already planned keeps its place and
    /// takes the new changes, so a later row for the same event wins.
    pub(crate) fn insert(&mut self, key: PlanKey, changes: EventChanges) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, planned)) => *planned = changes,
            None => self.entries.push((key, changes)),
        }
    }

    pub fn get(&self, key: &PlanKey) -> Option<&EventChanges> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, changes)| changes)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlanKey, &EventChanges)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (created, updated)
    pub fn counts(&self) -> (usize, usize) {
        let created = self
            .entries
            .iter()
            .filter(|(k, _)| matches!(k, PlanKey::New(_)))
            .count();
        (created, self.entries.len() - created)
    }
}

impl Serialize for UpdatePlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k.to_string(), v)))
    }
}
