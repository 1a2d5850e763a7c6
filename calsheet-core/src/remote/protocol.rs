//! Defines the JSON protocol used between calsheet and provider binaries
//! over stdin/stdout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::{Course, RemoteEvent, Section};
use crate::plan::UpdatePlan;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListCourses,
    ListEvents,
    ListSections,
    CommitPlan,
    NotifyExportReady,
}

/// Request sent from calsheet to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to calsheet.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// List every course the provider's account can manage.
#[derive(Debug, Serialize)]
pub struct ListCourses {}

impl ProviderCommand for ListCourses {
    type Response = Vec<Course>;
    fn command() -> Command {
        Command::ListCourses
    }
}

/// List all calendar events of a course, section overrides included.
#[derive(Debug, Serialize)]
pub struct ListEvents {
    pub course_id: String,
}

impl ProviderCommand for ListEvents {
    type Response = Vec<RemoteEvent>;
    fn command() -> Command {
        Command::ListEvents
    }
}

/// List the sections of a course.
#[derive(Debug, Serialize)]
pub struct ListSections {
    pub course_id: String,
}

impl ProviderCommand for ListSections {
    type Response = Vec<Section>;
    fn command() -> Command {
        Command::ListSections
    }
}

/// Queue a validated plan for commit. The provider acknowledges receipt and
/// reports completion to `email` on its own.
#[derive(Debug, Serialize)]
pub struct CommitPlan<'a> {
    pub email: &'a str,
    pub plan: &'a UpdatePlan,
}

impl ProviderCommand for CommitPlan<'_> {
    type Response = ();
    fn command() -> Command {
        Command::CommitPlan
    }
}

/// Hand an exported spreadsheet to the provider for delivery by email.
#[derive(Debug, Serialize)]
pub struct NotifyExportReady<'a> {
    pub email: &'a str,
    pub filename: &'a str,
    pub csv: &'a str,
}

impl ProviderCommand for NotifyExportReady<'_> {
    type Response = ();
    fn command() -> Command {
        Command::NotifyExportReady
    }
}
