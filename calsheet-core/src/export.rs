//! Turning remote events into spreadsheet rows.

use crate::date_translation::to_local;
use crate::error::CalsheetResult;
use crate::event::RemoteEvent;
use crate::sections::SectionLookup;
use crate::sheet::SpreadsheetRow;

/// Convert remote events into spreadsheet rows, in the same order.
///
/// Rows are produced lazily; section names are looked up as each row is
/// pulled. A failed lookup yields an error item, and the caller decides
/// whether to stop.
pub fn export_rows<'a, I, L>(
    events: I,
    course_id: &'a str,
    sections: &'a L,
) -> impl Iterator<Item = CalsheetResult<SpreadsheetRow>> + 'a
where
    I: IntoIterator<Item = RemoteEvent>,
    I::IntoIter: 'a,
    L: SectionLookup + ?Sized,
{
    events
        .into_iter()
        .map(move |event| export_row(event, course_id, sections))
}

fn export_row<L>(
    event: RemoteEvent,
    course_id: &str,
    sections: &L,
) -> CalsheetResult<SpreadsheetRow>
where
    L: SectionLookup + ?Sized,
{
    let section_name = match event.section_id() {
        Some(section_id) => match sections.section_by_id(course_id, section_id)? {
            Some(section) => section.name,
            None => {
                tracing::warn!(
                    event_id = %event.id,
                    section_id,
                    "section not found, leaving name blank"
                );
                String::new()
            }
        },
        None => String::new(),
    };

    Ok(SpreadsheetRow {
        start_at: to_local(event.start_at),
        end_at: to_local(event.end_at),
        event_id: event.id,
        context_code: event.context_code,
        parent_event_id: event.parent_event_id,
        section_name,
        title: event.title.unwrap_or_default(),
        description: event.description.unwrap_or_default(),
        location_name: event.location_name.unwrap_or_default(),
        location_address: event.location_address.unwrap_or_default(),
    })
}
