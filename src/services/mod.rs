pub mod hh_client;
pub mod loader_service;
pub mod report_service;
pub mod schema_service;
pub mod sync_service;
