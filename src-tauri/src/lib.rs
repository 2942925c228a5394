//! InternTrack record store.
//!
//! Two independent persisted collections, applications and opportunities,
//! each owned by a record service that mutates the in-memory snapshot and
//! commits it to durable storage in the same call. The desktop shell (feature
//! `desktop`) exposes the services to the web frontend as Tauri commands.

pub mod applications;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod opportunities;
pub mod seed;
pub mod storage;
pub mod util;

#[cfg(feature = "desktop")]
pub mod commands;

use std::sync::Arc;
use tracing::info;

pub use applications::ApplicationService;
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use opportunities::OpportunityService;

use storage::{FileStorage, StorageBackend};

/// Both record services, opened once at startup and handed to every consumer.
pub struct Stores {
    pub applications: ApplicationService,
    pub opportunities: OpportunityService,
    backend: Arc<dyn StorageBackend>,
}

impl Stores {
    /// Opens both collections as JSON files in `config.data_dir`.
    pub fn open(config: &StoreConfig) -> Self {
        let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(config.data_dir.clone()));
        Self::with_backend(backend, config)
    }

    pub fn with_backend(backend: Arc<dyn StorageBackend>, config: &StoreConfig) -> Self {
        let (app_defaults, opp_defaults) = if config.seed_demo_data {
            (seed::default_applications(), seed::default_opportunities())
        } else {
            (Vec::new(), Vec::new())
        };
        let applications = ApplicationService::open(
            backend.clone(),
            config.applications_key.as_str(),
            app_defaults,
        );
        let opportunities = OpportunityService::open(
            backend.clone(),
            config.opportunities_key.as_str(),
            opp_defaults,
        );
        info!(
            location = %backend.location(),
            applications = applications.len(),
            opportunities = opportunities.len(),
            "stores opened"
        );
        Self {
            applications,
            opportunities,
            backend,
        }
    }

    /// Where the collections are persisted.
    pub fn location(&self) -> String {
        self.backend.location()
    }
}
