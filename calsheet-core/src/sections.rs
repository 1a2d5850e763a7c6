//! Section name/id resolution.

use crate::error::CalsheetResult;
use crate::event::Section;

/// Resolves course sections by display name or id.
///
/// Lookups are synchronous: reconciliation never suspends mid-run.
pub trait SectionLookup {
    /// Find a section by its display name. With `exact` set, only a
    /// character-for-character match (after trimming) counts.
    fn section_by_name(
        &self,
        course_id: &str,
        name: &str,
        exact: bool,
    ) -> CalsheetResult<Option<Section>>;

    fn section_by_id(&self, course_id: &str, section_id: &str) -> CalsheetResult<Option<Section>>;
}

/// In-memory lookup over one course's section list.
#[derive(Debug, Clone)]
pub struct SectionDirectory {
    course_id: String,
    sections: Vec<Section>,
}

impl SectionDirectory {
    pub fn new(course_id: impl Into<String>, sections: Vec<Section>) -> Self {
        SectionDirectory {
            course_id: course_id.into(),
            sections,
        }
    }

    fn for_course(&self, course_id: &str) -> &[Section] {
        if course_id == self.course_id {
            &self.sections
        } else {
            &[]
        }
    }
}

impl SectionLookup for SectionDirectory {
    fn section_by_name(
        &self,
        course_id: &str,
        name: &str,
        exact: bool,
    ) -> CalsheetResult<Option<Section>> {
        let wanted = name.trim();
        let found = self.for_course(course_id).iter().find(|s| {
            if exact {
                s.name.trim() == wanted
            } else {
                loose_name(&s.name) == loose_name(wanted)
            }
        });
        Ok(found.cloned())
    }

    fn section_by_id(&self, course_id: &str, section_id: &str) -> CalsheetResult<Option<Section>> {
        Ok(self
            .for_course(course_id)
            .iter()
            .find(|s| s.id == section_id)
            .cloned())
    }
}

/// Lowercased, with runs of whitespace collapsed to one space.
fn loose_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> SectionDirectory {
        SectionDirectory::new(
            "7",
            vec![
                Section {
                    id: "42".into(),
                    name: "Cohort A".into(),
                },
                Section {
                    id: "43".into(),
                    name: "Cohort  B ".into(),
                },
            ],
        )
    }

    #[test]
    fn test_exact_name_match() {
        let dir = directory();
        let found = dir.section_by_name("7", " Cohort A ", true).unwrap();
        assert_eq!(found.map(|s| s.id), Some("42".to_string()));
        assert!(dir.section_by_name("7", "cohort a", true).unwrap().is_none());
    }

    #[test]
    fn test_loose_name_match() {
        let dir = directory();
        let found = dir.section_by_name("7", "cohort b", false).unwrap();
        assert_eq!(found.map(|s| s.id), Some("43".to_string()));
    }

    #[test]
    fn test_loose_match_collapses_but_keeps_word_breaks() {
        let dir = directory();
        let found = dir.section_by_name("7", "  COHORT \t a", false).unwrap();
        assert_eq!(found.map(|s| s.id), Some("42".to_string()));
        assert!(dir.section_by_name("7", "CohortA", false).unwrap().is_none());
    }

    #[test]
    fn test_lookup_by_id_is_scoped_to_course() {
        let dir = directory();
        assert_eq!(
            dir.section_by_id("7", "42").unwrap().map(|s| s.name),
            Some("Cohort A".to_string())
        );
        assert!(dir.section_by_id("8", "42").unwrap().is_none());
        assert!(dir.section_by_name("8", "Cohort A", true).unwrap().is_none());
    }
}
