//! User-correctable problems found while reading an edited spreadsheet.
//!
//! Row numbers are the ones a spreadsheet program shows: the header is row 1,
//! so the first data row is row 2.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Row #{row} with date \"{value}\" is in the wrong format.")]
    BadDate { row: usize, value: String },

    #[error("Row #{row} has bad Event ID {event_id}. Double check it on the calendar.")]
    BadEventId { row: usize, event_id: String },

    #[error(
        "Row #{row} has bad Section Name {section_name}. Double check it on the calendar. These need to match exactly."
    )]
    BadSectionName { row: usize, section_name: String },

    #[error("{}", duplicate_message(.row, .section_name, .conflicting_event_id))]
    DuplicateSection {
        row: usize,
        section_name: String,
        /// The existing event already covering this section, or `None` when
        /// the clash is with another new row earlier in the same sheet.
        conflicting_event_id: Option<String>,
    },
}

fn duplicate_message(row: &usize, section_name: &str, conflicting: &Option<String>) -> String {
    let base = format!(
        "Row #{row} claims to create a new event for {section_name}, but a row already exists for that section. \
         Duplicates are not allowed and will confuse the calendar."
    );
    match conflicting {
        Some(id) => format!(
            "{base} If you want to edit the existing row, its Event ID column ought to be {id}."
        ),
        None => base,
    }
}

impl ValidationError {
    /// Spreadsheet row the problem was found on.
    pub fn row(&self) -> usize {
        match self {
            ValidationError::BadDate { row, .. }
            | ValidationError::BadEventId { row, .. }
            | ValidationError::BadSectionName { row, .. }
            | ValidationError::DuplicateSection { row, .. } => *row,
        }
    }

    /// How the user can fix this kind of problem.
    pub fn hint(&self) -> &'static str {
        match self {
            ValidationError::BadDate { .. } => {
                "Please write dates and times in format YYYY-MM-DD HH:MM ZZ. \
                 For example, \"2015-12-25 12:00 ET\" means noon in Eastern time on Christmas 2015."
            }
            ValidationError::BadEventId { .. } => {
                "Go to the event you want on the calendar. At the end of the URL there will be a number \
                 like /events/21. The event ID there would be 21."
            }
            ValidationError::DuplicateSection { .. } => {
                "Make sure each cohort only appears once per event. You might want to get a fresh export \
                 of the spreadsheet and then make your edits on that."
            }
            ValidationError::BadSectionName { .. } => {
                "Make sure the cohort name in the row is an exact match. Also double-check the event ID and \
                 course ID columns. If this is supposed to be a new override, make sure you cleared out the \
                 Event ID column (and if it is supposed to edit an existing one, leave that value the same as \
                 the export). Any given section should only appear once per event."
            }
        }
    }
}
