pub mod protocol;
pub mod provider;

use crate::config::CalsheetConfig;
use crate::error::CalsheetResult;
use crate::event::{Course, RemoteEvent};
use crate::plan::UpdatePlan;
use crate::remote::protocol::{
    CommitPlan, ListCourses, ListEvents, ListSections, NotifyExportReady,
};
use crate::remote::provider::Provider;
use crate::sections::SectionDirectory;

/// The course platform, as reached through one provider.
///
/// Construct once per invocation and pass it to whatever needs it.
#[derive(Debug, Clone)]
pub struct Remote {
    provider: Provider,
}

impl Remote {
    pub fn new(provider: Provider) -> Self {
        Remote { provider }
    }

    pub fn from_config(config: &CalsheetConfig) -> Self {
        Remote::new(Provider::new(&config.provider, config.provider_timeout_secs))
    }

    pub async fn courses(&self) -> CalsheetResult<Vec<Course>> {
        self.provider.call(ListCourses {}).await
    }

    pub async fn events(&self, course_id: &str) -> CalsheetResult<Vec<RemoteEvent>> {
        let events = self
            .provider
            .call(ListEvents {
                course_id: course_id.to_string(),
            })
            .await?;
        tracing::info!(course_id, count = events.len(), "fetched events");
        Ok(events)
    }

    /// Snapshot of a course's sections, ready for name/id lookups.
    pub async fn sections(&self, course_id: &str) -> CalsheetResult<SectionDirectory> {
        let sections = self
            .provider
            .call(ListSections {
                course_id: course_id.to_string(),
            })
            .await?;
        Ok(SectionDirectory::new(course_id, sections))
    }

    /// Hand a fully validated plan to the provider for commit.
    pub async fn commit_plan(&self, email: &str, plan: &UpdatePlan) -> CalsheetResult<()> {
        self.provider.call(CommitPlan { email, plan }).await
    }

    pub async fn notify_export_ready(
        &self,
        email: &str,
        filename: &str,
        csv: &str,
    ) -> CalsheetResult<()> {
        self.provider
            .call(NotifyExportReady {
                email,
                filename,
                csv,
            })
            .await
    }
}
