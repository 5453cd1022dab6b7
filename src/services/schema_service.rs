use sqlx::postgres::PgConnectOptions;
use tracing::{info, instrument};

use crate::config::DatabaseConfig;
use crate::database::connection::{close, connect};
use crate::error::Result;
use crate::utils::validation::quote_identifier;

const CREATE_EMPLOYERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS employers (
        employer_id BIGINT PRIMARY KEY,
        employer_name VARCHAR(255) NOT NULL,
        employer_url VARCHAR(255) NOT NULL,
        open_vacancies INTEGER NOT NULL DEFAULT 0
    )
"#;

const CREATE_VACANCIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS vacancies (
        vacancy_id BIGINT PRIMARY KEY,
        employer_id BIGINT NOT NULL REFERENCES employers (employer_id)
            ON DELETE RESTRICT
            ON UPDATE RESTRICT,
        title VARCHAR(255) NOT NULL,
        url VARCHAR(255) NOT NULL,
        salary_from INTEGER NOT NULL DEFAULT 0,
        salary_to INTEGER NOT NULL DEFAULT 0,
        currency VARCHAR(15) NOT NULL,
        description TEXT,
        town VARCHAR(255) NOT NULL,
        education TEXT,
        experience VARCHAR(255) NOT NULL,
        date_pub DATE NOT NULL
    )
"#;

/// Creates the target database and its tables on demand. Every step is idempotent.
#[derive(Clone)]
pub struct SchemaService {
    server: PgConnectOptions,
    target: PgConnectOptions,
}

impl SchemaService {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            server: config.maintenance_options(),
            target: config.connect_options(),
        }
    }

    #[instrument(skip(self))]
    pub async fn ensure_database(&self, name: &str) -> Result<()> {
        let quoted = quote_identifier(name)?;
        let mut conn = connect(&self.server).await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
            .bind(name)
            .fetch_optional(&mut conn)
            .await?;

        if exists.is_none() {
            let statement = format!("CREATE DATABASE {}", quoted);
            sqlx::query(&statement).execute(&mut conn).await?;
            info!("Created database {}", name);
        }

        close(conn).await
    }

    #[instrument(skip(self))]
    pub async fn ensure_employer_table(&self) -> Result<()> {
        let mut conn = connect(&self.target).await?;
        sqlx::query(CREATE_EMPLOYERS_TABLE).execute(&mut conn).await?;
        close(conn).await
    }

    #[instrument(skip(self))]
    pub async fn ensure_vacancy_table(&self) -> Result<()> {
        let mut conn = connect(&self.target).await?;
        sqlx::query(CREATE_VACANCIES_TABLE).execute(&mut conn).await?;
        close(conn).await
    }

    /// Both tables, referenced one first.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.ensure_employer_table().await?;
        self.ensure_vacancy_table().await
    }
}
