//! Opportunity record service: admin-side CRUD over posted listings and the
//! search/category filter used by the browse page.

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::model::{CategoryFilter, NewOpportunity, Opportunity, OpportunityUpdate};
use crate::storage::{PersistedCollection, StorageBackend};
use crate::util::{today_string, unique_id};

pub struct OpportunityService {
    collection: PersistedCollection<Opportunity>,
}

impl OpportunityService {
    pub fn open(
        backend: Arc<dyn StorageBackend>,
        key: impl Into<String>,
        defaults: Vec<Opportunity>,
    ) -> Self {
        Self {
            collection: PersistedCollection::load(backend, key, defaults),
        }
    }

    pub fn snapshot(&self) -> &[Opportunity] {
        self.collection.snapshot()
    }

    pub fn get(&self, id: &str) -> Option<&Opportunity> {
        self.snapshot().iter().find(|opp| opp.id == id)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Prepends a new listing stamped with today's date.
    pub fn add(&mut self, input: NewOpportunity) -> Result<&[Opportunity]> {
        if input.company.is_empty() || input.role.is_empty() {
            debug!("opportunity add refused: company and role are required");
            return Ok(self.collection.snapshot());
        }
        let current = self.collection.snapshot();
        let id = unique_id(|candidate| current.iter().any(|opp| opp.id == candidate));
        let record = Opportunity {
            id,
            company: input.company,
            role: input.role,
            description: input.description,
            location: input.location,
            stipend: input.stipend,
            deadline: input.deadline,
            category: input.category,
            posted_at: today_string(),
        };
        debug!(id = %record.id, company = %record.company, "posting opportunity");

        let mut items = Vec::with_capacity(current.len() + 1);
        items.push(record);
        items.extend(current.iter().cloned());
        self.collection.commit(items)
    }

    /// Merges the supplied fields onto the listing with `id`; `id` and
    /// `posted_at` are never touched.
    pub fn update(&mut self, id: &str, update: OpportunityUpdate) -> Result<&[Opportunity]> {
        let Some(position) = self.snapshot().iter().position(|opp| opp.id == id) else {
            debug!(id, "opportunity update skipped: unknown id");
            return Ok(self.collection.snapshot());
        };

        let mut record = self.snapshot()[position].clone();
        if let Some(company) = update.company {
            record.company = company;
        }
        if let Some(role) = update.role {
            record.role = role;
        }
        if let Some(description) = update.description {
            record.description = description;
        }
        if let Some(location) = update.location {
            record.location = location;
        }
        if let Some(stipend) = update.stipend {
            record.stipend = stipend;
        }
        if let Some(deadline) = update.deadline {
            record.deadline = deadline;
        }
        if let Some(category) = update.category {
            record.category = category;
        }
        if record.company.is_empty() || record.role.is_empty() {
            debug!(id, "opportunity update skipped: company and role are required");
            return Ok(self.collection.snapshot());
        }
        if record == self.snapshot()[position] {
            return Ok(self.collection.snapshot());
        }

        let mut items = self.snapshot().to_vec();
        items[position] = record;
        self.collection.commit(items)
    }

    pub fn remove(&mut self, id: &str) -> Result<&[Opportunity]> {
        if !self.snapshot().iter().any(|opp| opp.id == id) {
            debug!(id, "opportunity remove skipped: unknown id");
            return Ok(self.collection.snapshot());
        }
        let items: Vec<Opportunity> = self
            .snapshot()
            .iter()
            .filter(|opp| opp.id != id)
            .cloned()
            .collect();
        self.collection.commit(items)
    }

    /// Listings whose company or role contains `search` (case-insensitive
    /// substring) and whose category passes `category`, in collection order.
    pub fn filter(&self, search: &str, category: CategoryFilter) -> Vec<&Opportunity> {
        let needle = search.to_lowercase();
        self.snapshot()
            .iter()
            .filter(|opp| {
                let matches_search = opp.company.to_lowercase().contains(needle.as_str())
                    || opp.role.to_lowercase().contains(needle.as_str());
                matches_search && category.matches(opp.category)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OpportunityCategory;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const KEY: &str = "interntrack-opps";

    fn listing(id: &str, company: &str, role: &str, category: OpportunityCategory) -> Opportunity {
        Opportunity {
            id: id.to_string(),
            company: company.to_string(),
            role: role.to_string(),
            description: String::new(),
            location: "Remote".to_string(),
            stipend: "$5,000/mo".to_string(),
            deadline: "2026-04-01".to_string(),
            category,
            posted_at: "2026-02-01".to_string(),
        }
    }

    fn service_with(records: Vec<Opportunity>) -> (OpportunityService, Arc<MemoryStorage>) {
        let backend = Arc::new(MemoryStorage::new());
        let service = OpportunityService::open(backend.clone(), KEY, records);
        (service, backend)
    }

    fn ids(found: &[&Opportunity]) -> Vec<String> {
        found.iter().map(|opp| opp.id.clone()).collect()
    }

    #[test]
    fn add_stamps_posted_at_with_today() {
        let (mut service, backend) = service_with(Vec::new());
        service
            .add(NewOpportunity {
                company: "HubSpot".into(),
                role: "Marketing Intern".into(),
                stipend: "$5,000/mo".into(),
                category: OpportunityCategory::Marketing,
                ..NewOpportunity::default()
            })
            .unwrap();

        let posted = &service.snapshot()[0];
        assert_eq!(posted.posted_at, today_string());
        assert_eq!(posted.stipend, "$5,000/mo");
        assert_eq!(posted.category, OpportunityCategory::Marketing);
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn add_prepends_new_listing() {
        let (mut service, _) = service_with(vec![listing("1", "Microsoft", "SWE Intern", OpportunityCategory::Tech)]);
        service
            .add(NewOpportunity {
                company: "Airbnb".into(),
                role: "Design Intern".into(),
                ..NewOpportunity::default()
            })
            .unwrap();
        assert_eq!(service.len(), 2);
        assert_eq!(service.snapshot()[0].company, "Airbnb");
        assert_eq!(service.snapshot()[1].id, "1");
    }

    #[test]
    fn add_without_role_is_refused() {
        let (mut service, backend) = service_with(Vec::new());
        service
            .add(NewOpportunity {
                company: "Airbnb".into(),
                ..NewOpportunity::default()
            })
            .unwrap();
        assert!(service.is_empty());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn update_preserves_unspecified_fields() {
        let original = listing("1", "Microsoft", "SWE Intern", OpportunityCategory::Tech);
        let (mut service, _) = service_with(vec![original.clone()]);
        service
            .update(
                "1",
                OpportunityUpdate {
                    stipend: Some("$9,000/mo".into()),
                    category: Some(OpportunityCategory::Other),
                    ..OpportunityUpdate::default()
                },
            )
            .unwrap();

        let expected = Opportunity {
            stipend: "$9,000/mo".into(),
            category: OpportunityCategory::Other,
            ..original
        };
        assert_eq!(service.snapshot(), &[expected]);
    }

    #[test]
    fn update_with_unknown_id_or_blank_company_is_a_no_op() {
        let original = listing("1", "Microsoft", "SWE Intern", OpportunityCategory::Tech);
        let (mut service, backend) = service_with(vec![original.clone()]);
        service
            .update(
                "404",
                OpportunityUpdate {
                    role: Some("PM Intern".into()),
                    ..OpportunityUpdate::default()
                },
            )
            .unwrap();
        service
            .update(
                "1",
                OpportunityUpdate {
                    company: Some(String::new()),
                    ..OpportunityUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(service.snapshot(), &[original]);
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn remove_twice_matches_remove_once() {
        let (mut service, _) = service_with(vec![
            listing("1", "Microsoft", "SWE Intern", OpportunityCategory::Tech),
            listing("2", "Airbnb", "Design Intern", OpportunityCategory::Design),
        ]);
        service.remove("2").unwrap();
        let once = service.snapshot().to_vec();
        service.remove("2").unwrap();
        assert_eq!(service.snapshot(), once.as_slice());
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn filter_by_category_keeps_relative_order() {
        let (service, _) = service_with(vec![
            listing("1", "Microsoft", "SWE Intern", OpportunityCategory::Tech),
            listing("2", "Airbnb", "Design Intern", OpportunityCategory::Design),
            listing("3", "Spotify", "Data Intern", OpportunityCategory::Tech),
        ]);
        let found = service.filter("", CategoryFilter::Only(OpportunityCategory::Tech));
        assert_eq!(ids(&found), vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn filter_search_is_case_insensitive_over_company_and_role() {
        let (service, _) = service_with(crate::seed::default_opportunities());
        let found = service.filter("SPOT", CategoryFilter::All);
        assert_eq!(ids(&found), vec!["3".to_string(), "5".to_string()]);

        let found = service.filter("intern", CategoryFilter::All);
        assert_eq!(found.len(), 4);

        let found = service.filter("design", CategoryFilter::Only(OpportunityCategory::Tech));
        assert!(found.is_empty());
    }

    #[test]
    fn filter_does_not_search_description_or_location() {
        let (service, _) = service_with(crate::seed::default_opportunities());
        assert!(service.filter("Azure", CategoryFilter::All).is_empty());
        assert!(service.filter("Redmond", CategoryFilter::All).is_empty());
    }

    fn arb_category() -> impl Strategy<Value = OpportunityCategory> {
        prop::sample::select(OpportunityCategory::ALL.to_vec())
    }

    fn arb_listings() -> impl Strategy<Value = Vec<Opportunity>> {
        prop::collection::vec(("[a-zA-Z ]{0,10}", "[a-zA-Z ]{0,10}", arb_category()), 0..25).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (company, role, category))| {
                        listing(i.to_string().as_str(), company.as_str(), role.as_str(), category)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn empty_search_with_all_returns_everything_in_order(records in arb_listings()) {
            let (service, _) = service_with(records.clone());
            let found: Vec<Opportunity> = service
                .filter("", CategoryFilter::All)
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(found, records);
        }

        #[test]
        fn filter_returns_exactly_the_matching_records(
            records in arb_listings(),
            search in "[a-zA-Z]{0,3}",
            category in prop::option::of(arb_category()),
        ) {
            let filter = category.map(CategoryFilter::Only).unwrap_or(CategoryFilter::All);
            let (service, _) = service_with(records.clone());
            let found = ids(&service.filter(search.as_str(), filter));

            let needle = search.to_lowercase();
            let expected: Vec<String> = records
                .iter()
                .filter(|opp| {
                    (opp.company.to_lowercase().contains(&needle)
                        || opp.role.to_lowercase().contains(&needle))
                        && category.map_or(true, |c| c == opp.category)
                })
                .map(|opp| opp.id.clone())
                .collect();
            prop_assert_eq!(found, expected);
        }
    }
}
