use crate::error::{Error, Result};
use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Employers tracked when `HH_EMPLOYER_IDS` is not set.
pub const DEFAULT_EMPLOYER_IDS: [i64; 10] = [
    1740,  // Yandex
    3529,  // Sber
    78638, // T-Bank
    15478, // VK
    1057,  // Kaspersky
    2180,  // Ozon
    84585, // Avito
    64174, // 2GIS
    87021, // Wildberries
    3776,  // MTS
];

/// Database every fresh PostgreSQL cluster has; used to create the target one.
pub const MAINTENANCE_DATABASE: &str = "postgres";

#[derive(Debug, Clone)]
pub struct Config {
    pub hh: HhConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Validate)]
pub struct HhConfig {
    pub base_url: Url,
    #[validate(length(min = 1))]
    pub user_agent: String,
    #[validate(length(min = 1))]
    pub employer_ids: Vec<i64>,
    #[validate(range(min = 1, max = 100))]
    pub vacancies_per_page: u32,
    #[validate(range(min = 1))]
    pub pages: u32,
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

#[derive(Clone, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
    #[validate(length(min = 1))]
    pub user: String,
    pub password: String,
    #[validate(length(min = 1, max = 63))]
    pub name: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let hh = HhConfig {
            base_url: parse_base_url(&get_env_or("HH_API_URL", "https://api.hh.ru"))?,
            user_agent: get_env_or("HH_USER_AGENT", "vacancy-etl/0.1"),
            employer_ids: match env::var("HH_EMPLOYER_IDS") {
                Ok(raw) => parse_id_list(&raw)?,
                Err(_) => DEFAULT_EMPLOYER_IDS.to_vec(),
            },
            vacancies_per_page: get_env_parse_or("HH_VACANCIES_PER_PAGE", 100)?,
            pages: get_env_parse_or("HH_PAGES", 5)?,
            request_timeout_secs: get_env_parse_or("HH_REQUEST_TIMEOUT_SECS", 30)?,
        };
        hh.validate()?;

        let database = DatabaseConfig {
            host: get_env_or("DB_HOST", "localhost"),
            port: get_env_parse_or("DB_PORT", 5432)?,
            user: get_env_or("DB_USER", "postgres"),
            password: get_env("DB_PASSWORD")?,
            name: get_env_or("DB_NAME", "vac"),
        };
        database.validate()?;

        Ok(Self { hh, database })
    }
}

impl HhConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DatabaseConfig {
    /// Connection options for the target database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.server_options().database(&self.name)
    }

    /// Connection options for the maintenance database, used before the target exists.
    pub fn maintenance_options(&self) -> PgConnectOptions {
        self.server_options().database(MAINTENANCE_DATABASE)
    }

    fn server_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| Error::Config(format!("Invalid API url {}: {}", raw, e)))
}

/// Parses a comma-separated list of employer ids, ignoring blank entries.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|e| Error::Config(format!("Invalid employer id {:?}: {}", part, e)))
        })
        .collect()
}
