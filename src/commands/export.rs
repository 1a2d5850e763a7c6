use std::path::Path;

use anyhow::{Context, Result};
use calsheet_core::export_rows;
use calsheet_core::remote::Remote;
use calsheet_core::sheet::write_rows;
use owo_colors::OwoColorize;

use crate::render::create_spinner;

pub async fn run(remote: &Remote, course_id: &str, output: &Path, email: Option<&str>) -> Result<()> {
    let spinner = create_spinner(format!("Fetching events for course {course_id}"));
    let fetched = tokio::try_join!(remote.events(course_id), remote.sections(course_id));
    spinner.finish_and_clear();
    let (events, sections) = fetched?;

    let mut count = 0usize;
    let mut csv = Vec::new();
    let rows = export_rows(events, course_id, &sections).inspect(|_| count += 1);
    write_rows(&mut csv, rows)?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, &csv)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(course_id, rows = count, path = %output.display(), "exported events");
    println!("Exported {} events to {}", count, output.display().green());

    if let Some(email) = email {
        let filename = output
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("course_{course_id}_events.csv"));
        let csv = String::from_utf8(csv).context("Exported spreadsheet is not valid UTF-8")?;

        remote.notify_export_ready(email, &filename, &csv).await?;
        println!("The spreadsheet will also be emailed to {}", email.cyan());
    }

    Ok(())
}
