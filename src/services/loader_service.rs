use sqlx::postgres::PgConnectOptions;
use tracing::{info, instrument};

use crate::config::DatabaseConfig;
use crate::database::connection::{close, connect};
use crate::error::Result;
use crate::models::employer::Employer;
use crate::models::vacancy::Vacancy;

/// Writes fetched records. No transaction is opened, so every statement
/// commits on its own and a failed load keeps the rows written before it.
#[derive(Clone)]
pub struct LoaderService {
    options: PgConnectOptions,
}

impl LoaderService {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: config.connect_options(),
        }
    }

    /// Replaces the employer table with `records`.
    ///
    /// Vacancies reference employers with a restrictive key, so they are
    /// cleared in the same `TRUNCATE`; load vacancies again afterwards.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn load_employers(&self, records: &[Employer]) -> Result<u64> {
        let mut conn = connect(&self.options).await?;

        sqlx::query("TRUNCATE TABLE employers CASCADE")
            .execute(&mut conn)
            .await?;

        let mut inserted = 0;
        for employer in records {
            let res = sqlx::query(
                r#"
                INSERT INTO employers (employer_id, employer_name, employer_url, open_vacancies)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(employer.employer_id)
            .bind(&employer.employer_name)
            .bind(&employer.employer_url)
            .bind(employer.open_vacancies)
            .execute(&mut conn)
            .await?;
            inserted += res.rows_affected();
        }

        close(conn).await?;
        info!("Loaded {} employers", inserted);
        Ok(inserted)
    }

    /// Appends `records`. Every referenced employer must already be loaded,
    /// and an id already present fails with a unique violation.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn load_vacancies(&self, records: &[Vacancy]) -> Result<u64> {
        let mut conn = connect(&self.options).await?;

        let mut inserted = 0;
        for vacancy in records {
            let res = sqlx::query(
                r#"
                INSERT INTO vacancies (
                    vacancy_id, employer_id, title, url,
                    salary_from, salary_to, currency, description,
                    town, education, experience, date_pub
                ) VALUES (
                    $1,$2,$3,$4,
                    $5,$6,$7,$8,
                    $9,$10,$11,$12
                )
                "#,
            )
            .bind(vacancy.vacancy_id)
            .bind(vacancy.employer_id)
            .bind(&vacancy.title)
            .bind(&vacancy.url)
            .bind(vacancy.salary_from)
            .bind(vacancy.salary_to)
            .bind(&vacancy.currency)
            .bind(&vacancy.description)
            .bind(&vacancy.town)
            .bind(&vacancy.education)
            .bind(&vacancy.experience)
            .bind(vacancy.date_pub)
            .execute(&mut conn)
            .await?;
            inserted += res.rows_affected();
        }

        close(conn).await?;
        info!("Loaded {} vacancies", inserted);
        Ok(inserted)
    }
}
