//! Event workflows: recurring creation with per-instance persistence.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::AccessEvaluator;
use crate::error::StewardResult;
use crate::models::event::{Event, EventTemplate, UpdateEvent};
use crate::models::module::Module;
use crate::models::role::Role;
use crate::recurrence::{ExpansionLimits, RecurrenceExpander};
use crate::registry::RoleRegistry;
use crate::repository::EventRepository;
use crate::schedule::week_window;

/// One instance that could not be stored.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Position of the instance in the expansion.
    pub index: usize,
    pub date: NaiveDate,
    pub reason: String,
}

/// Outcome of persisting an expanded template. Instances are stored one by
/// one, so a report can be partially successful.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub created: Vec<Event>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.created.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("Created {} event(s)", self.created.len())
        } else {
            format!(
                "Created {} of {} event(s); {} failed",
                self.created.len(),
                self.attempted(),
                self.failures.len()
            )
        }
    }
}

pub struct EventService<R: EventRepository> {
    repo: R,
    registry: Arc<RoleRegistry>,
    expander: RecurrenceExpander,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R, registry: Arc<RoleRegistry>, limits: ExpansionLimits) -> Self {
        Self {
            repo,
            registry,
            expander: RecurrenceExpander::new(limits),
        }
    }

    fn authorize(&self, role: Option<&Role>) -> StewardResult<()> {
        AccessEvaluator::new(&self.registry)
            .can_navigate(role, Module::Events)
            .into_result()
    }

    /// Expand `template` and store every resulting instance.
    ///
    /// Access and validation failures abort before anything is written.
    /// After that, a failed instance is recorded in the report and the
    /// remaining instances are still attempted.
    pub async fn create_event(
        &self,
        role: Option<&Role>,
        template: EventTemplate,
    ) -> StewardResult<BatchReport> {
        self.authorize(role)?;
        let instances = self.expander.expand(&template)?;

        let mut report = BatchReport::default();
        for (index, instance) in instances.into_iter().enumerate() {
            let date = instance.date;
            match self.repo.create(instance).await {
                Ok(event) => report.created.push(event),
                Err(e) => {
                    warn!(index, %date, error = %e, "Failed to store event instance");
                    report.failures.push(BatchFailure {
                        index,
                        date,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            title = %template.title,
            created = report.created.len(),
            failed = report.failures.len(),
            "Event creation finished"
        );
        Ok(report)
    }

    pub async fn update_event(
        &self,
        role: Option<&Role>,
        id: Uuid,
        input: UpdateEvent,
    ) -> StewardResult<Event> {
        self.authorize(role)?;
        self.repo.update(id, input).await
    }

    pub async fn delete_event(&self, role: Option<&Role>, id: Uuid) -> StewardResult<()> {
        self.authorize(role)?;
        self.repo.delete(id).await
    }

    /// Events in the Monday–Saturday window around `today`, earliest first.
    pub async fn week_events(&self, today: NaiveDate) -> StewardResult<Vec<Event>> {
        let (from, to) = week_window(today);
        self.repo.list_between(from, to).await
    }
}
