//! Demo records shown on first launch, before anything has been saved.

use crate::model::{Application, ApplicationStatus, Opportunity, OpportunityCategory};

fn application(
    id: &str,
    company: &str,
    role: &str,
    date_applied: &str,
    status: ApplicationStatus,
    link: Option<&str>,
    notes: Option<&str>,
) -> Application {
    Application {
        id: id.to_string(),
        company: company.to_string(),
        role: role.to_string(),
        date_applied: date_applied.to_string(),
        link: link.map(str::to_string),
        notes: notes.map(str::to_string),
        status,
    }
}

#[allow(clippy::too_many_arguments)]
fn opportunity(
    id: &str,
    company: &str,
    role: &str,
    description: &str,
    location: &str,
    stipend: &str,
    deadline: &str,
    category: OpportunityCategory,
    posted_at: &str,
) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        company: company.to_string(),
        role: role.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        stipend: stipend.to_string(),
        deadline: deadline.to_string(),
        category,
        posted_at: posted_at.to_string(),
    }
}

pub fn default_applications() -> Vec<Application> {
    use ApplicationStatus::*;
    vec![
        application(
            "1",
            "Google",
            "SWE Intern",
            "2026-01-15",
            Interview,
            Some("https://careers.google.com"),
            Some("Referral from John"),
        ),
        application(
            "2",
            "Meta",
            "Product Design Intern",
            "2026-01-20",
            Applied,
            None,
            Some("Applied via website"),
        ),
        application(
            "3",
            "Stripe",
            "Backend Intern",
            "2026-02-01",
            Offered,
            Some("https://stripe.com/jobs"),
            None,
        ),
        application("4", "Amazon", "SDE Intern", "2025-12-10", Rejected, None, None),
        application(
            "5",
            "Notion",
            "Frontend Intern",
            "2026-02-10",
            Applied,
            None,
            Some("Portfolio submitted"),
        ),
        application("6", "Figma", "Design Engineer Intern", "2026-02-15", Interview, None, None),
    ]
}

pub fn default_opportunities() -> Vec<Opportunity> {
    use OpportunityCategory::*;
    vec![
        opportunity(
            "1",
            "Microsoft",
            "Software Engineering Intern",
            "Join the Azure team to build cloud infrastructure tools.",
            "Redmond, WA",
            "$8,000/mo",
            "2026-03-31",
            Tech,
            "2026-02-01",
        ),
        opportunity(
            "2",
            "Airbnb",
            "Product Design Intern",
            "Redesign the host experience for mobile platforms.",
            "San Francisco, CA",
            "$7,500/mo",
            "2026-04-15",
            Design,
            "2026-02-05",
        ),
        opportunity(
            "3",
            "HubSpot",
            "Marketing Intern",
            "Drive growth campaigns for SMB segment.",
            "Remote",
            "$5,000/mo",
            "2026-03-20",
            Marketing,
            "2026-02-10",
        ),
        opportunity(
            "4",
            "Goldman Sachs",
            "Summer Analyst",
            "Rotation across investment banking and asset management.",
            "New York, NY",
            "$10,000/mo",
            "2026-04-01",
            Finance,
            "2026-02-12",
        ),
        opportunity(
            "5",
            "Spotify",
            "Data Science Intern",
            "Build recommendation models for podcast discovery.",
            "Stockholm, SE",
            "€6,000/mo",
            "2026-05-01",
            Tech,
            "2026-02-20",
        ),
    ]
}
