//! Reconciliation of an edited spreadsheet against the remote calendar.
//!
//! Each row is matched to a remote event by id. Rows without an id become
//! creations; rows with one become updates carrying only the fields that
//! differ. The first invalid row aborts the whole run, so a plan is either
//! complete or not produced at all.

use chrono::{DateTime, Utc};

use crate::date_translation::{to_local, to_utc};
use crate::error::CalsheetResult;
use crate::event::RemoteEvent;
use crate::plan::{EventChanges, PlanKey, UpdatePlan};
use crate::sections::SectionLookup;
use crate::sheet::{FIRST_DATA_ROW, SpreadsheetRow};
use crate::validation::ValidationError;

/// Compute the update plan that makes `remote_events` match `rows`.
///
/// `remote_events` must be a single snapshot of the course's events taken
/// before the call.
pub fn reconcile<L>(
    rows: &[SpreadsheetRow],
    remote_events: &[RemoteEvent],
    course_id: &str,
    sections: &L,
) -> CalsheetResult<UpdatePlan>
where
    L: SectionLookup + ?Sized,
{
    let mut run = Reconciliation {
        remote_events,
        course_id,
        sections,
        plan: UpdatePlan::new(),
        created: Vec::new(),
    };

    for (i, row) in rows.iter().enumerate() {
        run.apply_row(row, i + FIRST_DATA_ROW)?;
    }

    let (created, updated) = run.plan.counts();
    tracing::info!(
        rows = rows.len(),
        created,
        updated,
        unchanged = rows.len() - created - updated,
        "reconciled spreadsheet"
    );

    Ok(run.plan)
}

struct Reconciliation<'a, L: ?Sized> {
    remote_events: &'a [RemoteEvent],
    course_id: &'a str,
    sections: &'a L,
    plan: UpdatePlan,
    /// (context code, parent id) of every new event planned so far.
    created: Vec<(String, Option<String>)>,
}

impl<L> Reconciliation<'_, L>
where
    L: SectionLookup + ?Sized,
{
    fn apply_row(&mut self, row: &SpreadsheetRow, row_number: usize) -> CalsheetResult<()> {
        let start_at = to_utc(&row.start_at, row_number)?;
        let end_at = to_utc(&row.end_at, row_number)?;

        let event_id = row.event_id.trim();
        if event_id.is_empty() {
            return self.plan_new_event(row, row_number, start_at, end_at);
        }

        let Some(event) = self.remote_events.iter().find(|e| e.id == event_id) else {
            return Err(ValidationError::BadEventId {
                row: row_number,
                event_id: event_id.to_string(),
            }
            .into());
        };

        let mut changes = EventChanges::for_existing(event_id);
        if differs(&row.title, &event.title) {
            changes.title = Some(row.title.clone());
        }
        if differs(&row.description, &event.description) {
            changes.description = Some(row.description.clone());
        }
        if differs(&row.location_name, &event.location_name) {
            changes.location_name = Some(row.location_name.clone());
        }
        if differs(&row.location_address, &event.location_address) {
            changes.location_address = Some(row.location_address.clone());
        }
        // Dates are compared as displayed so an untouched cell never counts
        // as an edit.
        if row.start_at != to_local(event.start_at) {
            changes.start_at = Some(start_at);
        }
        if row.end_at != to_local(event.end_at) {
            changes.end_at = Some(end_at);
        }

        if changes.is_unchanged() {
            tracing::debug!(row = row_number, event_id, "unchanged");
        } else {
            tracing::debug!(
                row = row_number,
                event_id,
                fields = ?changes.changed_fields(),
                "changed"
            );
            self.plan
                .insert(PlanKey::Existing(event_id.to_string()), changes);
        }

        Ok(())
    }

    fn plan_new_event(
        &mut self,
        row: &SpreadsheetRow,
        row_number: usize,
        start_at: Option<DateTime<Utc>>,
        end_at: Option<DateTime<Utc>>,
    ) -> CalsheetResult<()> {
        let section = self
            .sections
            .section_by_name(self.course_id, &row.section_name, true)?
            .ok_or_else(|| ValidationError::BadSectionName {
                row: row_number,
                section_name: row.section_name.clone(),
            })?;

        let context_code = section.context_code();
        let parent_event_id = row.parent_event_id.clone();

        let existing = self.remote_events.iter().find(|e| {
            e.context_code == context_code && non_blank(&e.parent_event_id) == parent_event_id
        });
        let planned = self
            .created
            .iter()
            .any(|(code, parent)| *code == context_code && *parent == parent_event_id);

        if existing.is_some() || planned {
            return Err(ValidationError::DuplicateSection {
                row: row_number,
                section_name: row.section_name.clone(),
                conflicting_event_id: existing.map(|e| e.id.clone()),
            }
            .into());
        }

        let key = PlanKey::New(self.created.len());
        tracing::debug!(row = row_number, %key, context_code = %context_code, "new");

        self.created
            .push((context_code.clone(), parent_event_id.clone()));
        self.plan.insert(
            key,
            EventChanges {
                event_id: None,
                context_code: Some(context_code),
                parent_event_id: Some(parent_event_id),
                title: Some(row.title.clone()),
                start_at: Some(start_at),
                end_at: Some(end_at),
                description: Some(row.description.clone()),
                location_name: Some(row.location_name.clone()),
                location_address: Some(row.location_address.clone()),
            },
        );

        Ok(())
    }
}

/// A blank cell and a missing remote value are the same thing.
fn differs(cell: &str, remote: &Option<String>) -> bool {
    cell != remote.as_deref().unwrap_or_default()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
