use std::path::Path;

use anyhow::{Context, Result};
use calsheet_core::config::CalsheetConfig;
use calsheet_core::remote::Remote;
use calsheet_core::sheet::{course_id_from_sheet, read_rows_from_path};
use calsheet_core::{CalsheetError, reconcile};
use owo_colors::OwoColorize;

use crate::render::{Render, create_spinner};

pub struct ImportOptions<'a> {
    pub course: Option<&'a str>,
    pub email: Option<&'a str>,
    pub dry_run: bool,
    pub json: bool,
}

pub async fn run(remote: &Remote, file: &Path, options: ImportOptions<'_>) -> Result<()> {
    if !file.is_file() {
        anyhow::bail!("Please choose a CSV file to import ({} not found)", file.display());
    }

    // Commit notifications go by email, so find out where before touching
    // the remote.
    let email = if options.dry_run {
        None
    } else {
        let path = CalsheetConfig::config_path()?;
        Some(options.email.with_context(|| {
            format!(
                "No email address to notify when the changes are committed.\n\
                Pass --email or set `email` in {}",
                path.display()
            )
        })?)
    };

    let rows = read_rows_from_path(file)?;
    let course_id = match options.course {
        Some(course) => course.to_string(),
        None => course_id_from_sheet(&rows)?,
    };

    let spinner = create_spinner(format!("Fetching events for course {course_id}"));
    let fetched = tokio::try_join!(remote.events(&course_id), remote.sections(&course_id));
    spinner.finish_and_clear();
    let (events, sections) = fetched?;

    let plan = match reconcile(&rows, &events, &course_id, &sections) {
        Ok(plan) => plan,
        Err(CalsheetError::Invalid(e)) => anyhow::bail!("{}", e.render()),
        Err(e) => return Err(e).context("Failed to reconcile spreadsheet"),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("{}", plan.render());
    }

    if plan.is_empty() {
        return Ok(());
    }

    let Some(email) = email else {
        println!("\n{}", "Dry run, nothing was committed".dimmed());
        return Ok(());
    };

    remote.commit_plan(email, &plan).await?;

    let (created, updated) = plan.counts();
    println!(
        "\nQueued {} new and {} changed events. Check {} to know when it is complete.",
        created,
        updated,
        email.cyan()
    );

    Ok(())
}
