//! Core of calsheet: keeps a course calendar and an editable spreadsheet of
//! its events in step.
//!
//! - `export` turns remote events into spreadsheet rows
//! - `reconcile` diffs an edited sheet against the remote events and
//!   produces an `UpdatePlan`, or the first `ValidationError` found
//! - `date_translation` converts between the sheet's date strings and UTC
//! - `remote` talks to the course platform through a provider binary

pub mod config;
pub mod date_translation;
pub mod error;
pub mod event;
pub mod export;
pub mod plan;
pub mod reconcile;
pub mod remote;
pub mod sections;
pub mod sheet;
pub mod validation;

pub use error::{CalsheetError, CalsheetResult};
pub use event::{Course, RemoteEvent, Section};
pub use export::export_rows;
pub use plan::{EventChanges, PlanKey, UpdatePlan};
pub use reconcile::reconcile;
pub use sections::{SectionDirectory, SectionLookup};
pub use sheet::SpreadsheetRow;
pub use validation::ValidationError;
