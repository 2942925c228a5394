//! Record types persisted by the store and the typed inputs the view layer
//! hands to the record services.
//!
//! Field names serialise in camelCase so the stored JSON matches what the web
//! frontend reads and writes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Offered,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offered,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Display label used by the dashboard and its charts.
    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offered => "Offered",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One internship application tracked by the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub company: String,
    pub role: String,
    pub date_applied: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
}

impl Application {
    /// `YYYY-MM` prefix of `date_applied`, used to bucket the monthly series.
    pub fn month_key(&self) -> String {
        self.date_applied.chars().take(7).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpportunityCategory {
    #[default]
    Tech,
    Design,
    Marketing,
    Finance,
    #[serde(rename = "HR")]
    Hr,
    Other,
}

impl OpportunityCategory {
    pub const ALL: [OpportunityCategory; 6] = [
        OpportunityCategory::Tech,
        OpportunityCategory::Design,
        OpportunityCategory::Marketing,
        OpportunityCategory::Finance,
        OpportunityCategory::Hr,
        OpportunityCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OpportunityCategory::Tech => "Tech",
            OpportunityCategory::Design => "Design",
            OpportunityCategory::Marketing => "Marketing",
            OpportunityCategory::Finance => "Finance",
            OpportunityCategory::Hr => "HR",
            OpportunityCategory::Other => "Other",
        }
    }
}

impl fmt::Display for OpportunityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpportunityCategory {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OpportunityCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| StoreError::UnknownCategory(value.to_string()))
    }
}

/// Category selector of the opportunity browser: the "all" sentinel or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(OpportunityCategory),
}

impl CategoryFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn matches(self, category: OpportunityCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == Self::ALL_SENTINEL {
            return Ok(CategoryFilter::All);
        }
        value.parse().map(CategoryFilter::Only)
    }
}

/// One listing posted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub company: String,
    pub role: String,
    pub description: String,
    pub location: String,
    /// Free text such as `$8,000/mo`; never parsed as a number.
    pub stipend: String,
    pub deadline: String,
    pub category: OpportunityCategory,
    pub posted_at: String,
}

/// Fields of the "Add Application" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewApplication {
    pub company: String,
    pub role: String,
    /// Empty means "today".
    pub date_applied: String,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub status: ApplicationStatus,
}

/// Partial edit of an application. `Some("")` clears `link` or `notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationUpdate {
    pub company: Option<String>,
    pub role: Option<String>,
    pub date_applied: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub status: Option<ApplicationStatus>,
}

/// Fields of the admin "Post Opportunity" form. `postedAt` is always stamped
/// by the service, so it has no slot here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewOpportunity {
    pub company: String,
    pub role: String,
    pub description: String,
    pub location: String,
    pub stipend: String,
    pub deadline: String,
    pub category: OpportunityCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpportunityUpdate {
    pub company: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub deadline: Option<String>,
    pub category: Option<OpportunityCategory>,
}
