use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    hh_client::HhClient, loader_service::LoaderService, schema_service::SchemaService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub employers: u64,
    pub vacancies: u64,
}

/// Runs a full refresh: schema first, then employers, then the vacancies that reference them.
#[derive(Clone)]
pub struct SyncService {
    config: Config,
    hh_client: HhClient,
    schema_service: SchemaService,
    loader_service: LoaderService,
}

impl SyncService {
    pub fn new(
        config: Config,
        hh_client: HhClient,
        schema_service: SchemaService,
        loader_service: LoaderService,
    ) -> Self {
        Self {
            config,
            hh_client,
            schema_service,
            loader_service,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<SyncReport> {
        let hh = &self.config.hh;

        self.schema_service
            .ensure_database(&self.config.database.name)
            .await?;
        self.schema_service.ensure_schema().await?;

        let employers = self.hh_client.fetch_employers(&hh.employer_ids).await?;
        let vacancies = self
            .hh_client
            .fetch_vacancies(&hh.employer_ids, hh.pages, hh.vacancies_per_page)
            .await?;

        let report = SyncReport {
            employers: self.loader_service.load_employers(&employers).await?,
            vacancies: self.loader_service.load_vacancies(&vacancies).await?,
        };

        info!(
            employers = report.employers,
            vacancies = report.vacancies,
            "Sync completed"
        );
        Ok(report)
    }
}
