//! Terminal rendering for calsheet-core types.

use calsheet_core::{EventChanges, PlanKey, UpdatePlan, ValidationError};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for PlanKey {
    fn render(&self) -> String {
        match self {
            PlanKey::New(_) => format!("{} {}", "+".green(), self.green()),
            PlanKey::Existing(_) => format!("{} {}", "~".yellow(), self.yellow()),
        }
    }
}

fn render_entry(key: &PlanKey, changes: &EventChanges) -> String {
    let detail = match key {
        PlanKey::New(_) => format!(
            "{} in {}",
            changes.title.as_deref().unwrap_or_default(),
            changes.context_code.as_deref().unwrap_or_default()
        ),
        PlanKey::Existing(_) => changes.changed_fields().join(", "),
    };
    format!("   {} {}", key.render(), detail.dimmed())
}

impl Render for UpdatePlan {
    fn render(&self) -> String {
        if self.is_empty() {
            return "   No changes".dimmed().to_string();
        }

        let mut lines: Vec<String> = self
            .iter()
            .map(|(key, changes)| render_entry(key, changes))
            .collect();

        let (created, updated) = self.counts();
        lines.push(String::new());
        lines.push(format!(
            "   {} new, {} changed",
            created.green(),
            updated.yellow()
        ));
        lines.join("\n")
    }
}

impl Render for ValidationError {
    fn render(&self) -> String {
        format!("{}\n\n{}", self, self.hint().dimmed())
    }
}

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use calsheet_core::SectionDirectory;
    use calsheet_core::{Section, SpreadsheetRow, reconcile};

    #[test]
    fn test_empty_plan() {
        assert!(UpdatePlan::new().render().contains("No changes"));
    }

    #[test]
    fn test_plan_lists_new_events_with_section() {
        let sections = SectionDirectory::new(
            "7",
            vec![Section {
                id: "42".into(),
                name: "Cohort A".into(),
            }],
        );
        let rows = vec![SpreadsheetRow {
            section_name: "Cohort A".into(),
            title: "Orientation".into(),
            start_at: "2015-12-25 09:00 ET".into(),
            ..Default::default()
        }];
        let plan = reconcile(&rows, &[], "7", &sections).unwrap();

        let text = plan.render();
        assert!(text.contains("new_0"));
        assert!(text.contains("Orientation in course_section_42"));
    }

    #[test]
    fn test_validation_error_includes_hint() {
        let err = ValidationError::BadDate {
            row: 4,
            value: "soon".into(),
        };
        let text = err.render();
        assert!(text.starts_with("Row #4 with date \"soon\""));
        assert!(text.contains("YYYY-MM-DD HH:MM ZZ"));
    }
}
