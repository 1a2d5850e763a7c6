//! Reading and writing the event spreadsheet.
//!
//! Columns are positional and always in the order of [`HEADER`]. Dates are
//! kept exactly as typed; translation happens during reconciliation.

use std::io;
use std::path::Path;

use crate::error::{CalsheetError, CalsheetResult};
use crate::event::{COURSE_CONTEXT_PREFIX, SECTION_CONTEXT_PREFIX};

pub const HEADER: [&str; 10] = [
    "Event ID (do not change)",
    "Course ID (do not change)",
    "Parent (do not change)",
    "Section Name",
    "Title",
    "Start At",
    "End At",
    "Description (HTML)",
    "Location Name",
    "Location Address",
];

/// Visible row number of the first data row (the header is row 1).
pub const FIRST_DATA_ROW: usize = 2;

/// One event row of the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetRow {
    /// Empty for rows that should create a new event.
    pub event_id: String,
    /// Informational on import.
    pub context_code: String,
    pub parent_event_id: Option<String>,
    pub section_name: String,
    pub title: String,
    pub start_at: String,
    pub end_at: String,
    pub description: String,
    pub location_name: String,
    pub location_address: String,
}

impl SpreadsheetRow {
    fn from_record(record: &csv::StringRecord) -> Self {
        let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
        let parent = cell(2);

        SpreadsheetRow {
            event_id: cell(0),
            context_code: cell(1),
            parent_event_id: (!parent.trim().is_empty()).then(|| parent.trim().to_string()),
            section_name: cell(3).trim().to_string(),
            title: cell(4),
            start_at: cell(5),
            end_at: cell(6),
            description: cell(7),
            location_name: cell(8),
            location_address: cell(9),
        }
    }

    fn to_record(&self) -> [&str; 10] {
        [
            self.event_id.as_str(),
            self.context_code.as_str(),
            self.parent_event_id.as_deref().unwrap_or_default(),
            self.section_name.as_str(),
            self.title.as_str(),
            self.start_at.as_str(),
            self.end_at.as_str(),
            self.description.as_str(),
            self.location_name.as_str(),
            self.location_address.as_str(),
        ]
    }
}

/// Read spreadsheet rows from CSV, skipping the header.
pub fn read_rows<R: io::Read>(reader: R) -> CalsheetResult<Vec<SpreadsheetRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let rows = csv_reader
        .records()
        .map(|record| record.map(|r| SpreadsheetRow::from_record(&r)))
        .collect::<Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        return Err(CalsheetError::Sheet(
            "The spreadsheet has no event rows".into(),
        ));
    }

    Ok(rows)
}

/// Read spreadsheet rows from a CSV file on disk.
pub fn read_rows_from_path(path: &Path) -> CalsheetResult<Vec<SpreadsheetRow>> {
    let file = std::fs::File::open(path).map_err(|e| {
        CalsheetError::Sheet(format!("Could not open {}: {e}", path.display()))
    })?;
    read_rows(file)
}

/// Write the header and `rows` as CSV.
pub fn write_rows<W, I>(writer: W, rows: I) -> CalsheetResult<()>
where
    W: io::Write,
    I: IntoIterator<Item = CalsheetResult<SpreadsheetRow>>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for row in rows {
        csv_writer.write_record(row?.to_record())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Work out which course an edited sheet belongs to.
///
/// The first data row's Course ID cell is expected to read `course_<id>`.
/// When that row is a section override, the first course-wide row is used
/// instead.
pub fn course_id_from_sheet(rows: &[SpreadsheetRow]) -> CalsheetResult<String> {
    rows.iter()
        .find_map(|row| course_id_from_context(&row.context_code))
        .ok_or_else(|| {
            CalsheetError::Sheet(
                "Could not find a Course ID like course_123 in the spreadsheet".into(),
            )
        })
}

fn course_id_from_context(context_code: &str) -> Option<String> {
    let context_code = context_code.trim();
    if context_code.starts_with(SECTION_CONTEXT_PREFIX) {
        return None;
    }
    context_code
        .strip_prefix(COURSE_CONTEXT_PREFIX)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SHEET: &str = "\
Event ID (do not change),Course ID (do not change),Parent (do not change),Section Name,Title,Start At,End At,Description (HTML),Location Name,Location Address
21,course_7,,,Kickoff,2015-12-25 06:00 PT,2015-12-25 07:00 PT,<p>Hi</p>,Hall,1 Main St
,course_section_42,21,  Cohort A  ,\"Kickoff, again\",2015-12-26 06:00 PT,,,,
";

    #[test]
    fn test_read_rows_skips_header_and_trims_section() {
        let rows = read_rows(SHEET.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event_id, "21");
        assert_eq!(rows[0].parent_event_id, None);
        assert_eq!(rows[0].description, "<p>Hi</p>");
        assert_eq!(rows[1].event_id, "");
        assert_eq!(rows[1].parent_event_id.as_deref(), Some("21"));
        assert_eq!(rows[1].section_name, "Cohort A");
        assert_eq!(rows[1].title, "Kickoff, again");
        assert_eq!(rows[1].end_at, "");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let sheet = "h1,h2\n,course_7,,Cohort A,Short\n";
        let rows = read_rows(sheet.as_bytes()).unwrap();

        assert_eq!(rows[0].title, "Short");
        assert_eq!(rows[0].location_address, "");
    }

    #[test]
    fn test_header_only_sheet_is_rejected() {
        let sheet = HEADER.join(",") + "\n";
        let err = read_rows(sheet.as_bytes()).unwrap_err();
        assert!(matches!(err, CalsheetError::Sheet(_)));
    }

    #[test]
    fn test_write_then_read_from_disk() {
        let row = SpreadsheetRow {
            event_id: "21".into(),
            context_code: "course_section_42".into(),
            parent_event_id: Some("20".into()),
            section_name: "Cohort A".into(),
            title: "Dinner, \"formal\"".into(),
            start_at: "2015-12-25 18:00 PT".into(),
            end_at: "2015-12-25 20:00 PT".into(),
            description: "<b>Bring</b>\nfood".into(),
            location_name: "Hall".into(),
            location_address: "1 Main St".into(),
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut buf = Vec::new();
        write_rows(&mut buf, vec![Ok(row.clone())]).unwrap();
        file.write_all(&buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Event ID (do not change),Course ID (do not change)"));

        let rows = read_rows_from_path(file.path()).unwrap();
        assert_eq!(rows, vec![row]);
    }

    #[test]
    fn test_write_stops_at_first_failed_row() {
        let rows = vec![Err(CalsheetError::Provider("boom".into()))];
        let err = write_rows(Vec::new(), rows).unwrap_err();
        assert!(matches!(err, CalsheetError::Provider(_)));
    }

    #[test]
    fn test_course_id_from_first_row() {
        let rows = read_rows(SHEET.as_bytes()).unwrap();
        assert_eq!(course_id_from_sheet(&rows).unwrap(), "7");
    }

    #[test]
    fn test_course_id_skips_section_overrides() {
        let rows = vec![
            SpreadsheetRow {
                context_code: "course_section_42".into(),
                ..Default::default()
            },
            SpreadsheetRow {
                context_code: "course_9".into(),
                ..Default::default()
            },
        ];
        assert_eq!(course_id_from_sheet(&rows).unwrap(), "9");
    }

    #[test]
    fn test_course_id_missing() {
        let rows = vec![SpreadsheetRow {
            context_code: "user_3".into(),
            ..Default::default()
        }];
        assert!(course_id_from_sheet(&rows).is_err());
    }
}
