//! Application record service: CRUD over the student's applications and the
//! dashboard statistics derived from them.
//!
//! Mutations against an unknown id and adds with a blank company or role are
//! silent no-ops that leave the collection (and storage) untouched.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::model::{Application, ApplicationStatus, ApplicationUpdate, NewApplication};
use crate::storage::{PersistedCollection, StorageBackend};
use crate::util::{non_empty, today_string, unique_id};

/// Raw tally per status. Zero counts are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub applied: usize,
    pub interview: usize,
    pub offered: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Offered => self.offered,
            ApplicationStatus::Rejected => self.rejected,
        }
    }

    fn bump(&mut self, status: ApplicationStatus) {
        match status {
            ApplicationStatus::Applied => self.applied += 1,
            ApplicationStatus::Interview => self.interview += 1,
            ApplicationStatus::Offered => self.offered += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.applied + self.interview + self.offered + self.rejected
    }
}

/// One slice of the status pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub name: &'static str,
    pub value: usize,
}

/// One point of the applications-per-month line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

/// Headline numbers of the dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub interviews: usize,
    pub offers: usize,
    /// Applications still waiting on a first response.
    pub pending: usize,
}

pub struct ApplicationService {
    collection: PersistedCollection<Application>,
}

impl ApplicationService {
    pub fn open(
        backend: Arc<dyn StorageBackend>,
        key: impl Into<String>,
        defaults: Vec<Application>,
    ) -> Self {
        Self {
            collection: PersistedCollection::load(backend, key, defaults),
        }
    }

    pub fn snapshot(&self) -> &[Application] {
        self.collection.snapshot()
    }

    pub fn get(&self, id: &str) -> Option<&Application> {
        self.snapshot().iter().find(|app| app.id == id)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Prepends a new application. A blank `date_applied` becomes today.
    pub fn add(&mut self, input: NewApplication) -> Result<&[Application]> {
        if input.company.is_empty() || input.role.is_empty() {
            debug!("application add refused: company and role are required");
            return Ok(self.collection.snapshot());
        }
        let current = self.collection.snapshot();
        let id = unique_id(|candidate| current.iter().any(|app| app.id == candidate));
        let date_applied = if input.date_applied.is_empty() {
            today_string()
        } else {
            input.date_applied
        };
        let record = Application {
            id,
            company: input.company,
            role: input.role,
            date_applied,
            link: non_empty(input.link),
            notes: non_empty(input.notes),
            status: input.status,
        };
        debug!(id = %record.id, company = %record.company, "adding application");

        let mut items = Vec::with_capacity(current.len() + 1);
        items.push(record);
        items.extend(current.iter().cloned());
        self.collection.commit(items)
    }

    /// Any status may move to any other; there is no enforced progression.
    pub fn update_status(&mut self, id: &str, status: ApplicationStatus) -> Result<&[Application]> {
        self.update(
            id,
            ApplicationUpdate {
                status: Some(status),
                ..ApplicationUpdate::default()
            },
        )
    }

    /// Merges the supplied fields onto the record with `id`. Skipped when the
    /// id is unknown or the merge would leave company or role blank.
    pub fn update(&mut self, id: &str, update: ApplicationUpdate) -> Result<&[Application]> {
        let Some(position) = self.snapshot().iter().position(|app| app.id == id) else {
            debug!(id, "application update skipped: unknown id");
            return Ok(self.collection.snapshot());
        };

        let mut record = self.snapshot()[position].clone();
        if let Some(company) = update.company {
            record.company = company;
        }
        if let Some(role) = update.role {
            record.role = role;
        }
        // blank keeps the current date
        if let Some(date_applied) = non_empty(update.date_applied) {
            record.date_applied = date_applied;
        }
        if update.link.is_some() {
            record.link = non_empty(update.link);
        }
        if update.notes.is_some() {
            record.notes = non_empty(update.notes);
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        if record.company.is_empty() || record.role.is_empty() {
            debug!(id, "application update skipped: company and role are required");
            return Ok(self.collection.snapshot());
        }
        if record == self.snapshot()[position] {
            return Ok(self.collection.snapshot());
        }

        let mut items = self.snapshot().to_vec();
        items[position] = record;
        self.collection.commit(items)
    }

    pub fn remove(&mut self, id: &str) -> Result<&[Application]> {
        if !self.snapshot().iter().any(|app| app.id == id) {
            debug!(id, "application remove skipped: unknown id");
            return Ok(self.collection.snapshot());
        }
        let items: Vec<Application> = self
            .snapshot()
            .iter()
            .filter(|app| app.id != id)
            .cloned()
            .collect();
        self.collection.commit(items)
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for app in self.snapshot() {
            counts.bump(app.status);
        }
        counts
    }

    /// Pie chart projection: labelled counts in status order, zero slices omitted.
    pub fn status_breakdown(&self) -> Vec<StatusSlice> {
        let counts = self.status_counts();
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| StatusSlice {
                name: status.label(),
                value: counts.get(status),
            })
            .filter(|slice| slice.value > 0)
            .collect()
    }

    /// Applications per `YYYY-MM`, ascending. Months with no applications are absent.
    pub fn monthly_series(&self) -> Vec<MonthlyCount> {
        let mut months: BTreeMap<String, usize> = BTreeMap::new();
        for app in self.snapshot() {
            *months.entry(app.month_key()).or_default() += 1;
        }
        months
            .into_iter()
            .map(|(month, count)| MonthlyCount { month, count })
            .collect()
    }

    pub fn summary(&self) -> DashboardSummary {
        let counts = self.status_counts();
        DashboardSummary {
            total: self.len(),
            interviews: counts.interview,
            offers: counts.offered,
            pending: counts.applied,
        }
    }
}
