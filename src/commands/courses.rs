use anyhow::Result;
use calsheet_core::remote::Remote;
use owo_colors::OwoColorize;

use crate::render::create_spinner;

pub async fn run(remote: &Remote) -> Result<()> {
    let spinner = create_spinner("Fetching courses".to_string());
    let result = remote.courses().await;
    spinner.finish_and_clear();

    let courses = result?;
    if courses.is_empty() {
        println!("{}", "No courses found".dimmed());
        return Ok(());
    }

    for course in &courses {
        println!("   {}", course);
    }

    Ok(())
}
