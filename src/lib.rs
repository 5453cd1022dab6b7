pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    hh_client::HhClient, loader_service::LoaderService, report_service::ReportService,
    schema_service::SchemaService, sync_service::SyncService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub hh_client: HhClient,
    pub schema_service: SchemaService,
    pub loader_service: LoaderService,
    pub report_service: ReportService,
    pub sync_service: SyncService,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let hh_client = HhClient::new(&config.hh)?;
        let schema_service = SchemaService::new(&config.database);
        let loader_service = LoaderService::new(&config.database);
        let report_service = ReportService::new(&config.database);
        let sync_service = SyncService::new(
            config.clone(),
            hh_client.clone(),
            schema_service.clone(),
            loader_service.clone(),
        );

        Ok(Self {
            config,
            hh_client,
            schema_service,
            loader_service,
            report_service,
            sync_service,
        })
    }
}
