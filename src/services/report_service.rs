use sqlx::postgres::PgConnectOptions;
use tracing::instrument;

use crate::config::DatabaseConfig;
use crate::database::connection::{close, connect};
use crate::error::Result;
use crate::models::report::{
    AverageSalary, CompanyVacancyCount, VacancyMatch, VacancySalary, VacancySummary,
};
use crate::utils::validation::trim_keyword;

/// Read-only queries over the loaded tables.
#[derive(Clone)]
pub struct ReportService {
    options: PgConnectOptions,
}

impl ReportService {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: config.connect_options(),
        }
    }

    /// Every employer with the number of stored vacancies, largest first.
    #[instrument(skip(self))]
    pub async fn companies_with_vacancy_counts(&self) -> Result<Vec<CompanyVacancyCount>> {
        let mut conn = connect(&self.options).await?;
        let rows = sqlx::query_as::<_, CompanyVacancyCount>(
            r#"
            SELECT e.employer_name, COUNT(v.vacancy_id) AS total
            FROM employers e
            LEFT JOIN vacancies v USING (employer_id)
            GROUP BY e.employer_id, e.employer_name
            ORDER BY total DESC, e.employer_name
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        close(conn).await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn all_vacancies_summary(&self) -> Result<Vec<VacancySummary>> {
        let mut conn = connect(&self.options).await?;
        let rows = sqlx::query_as::<_, VacancySummary>(
            r#"
            SELECT e.employer_name,
                   v.title,
                   CONCAT('from ', v.salary_from, ' to ', v.salary_to, ' ', v.currency) AS salary,
                   v.url
            FROM vacancies v
            JOIN employers e USING (employer_id)
            ORDER BY e.employer_name, v.vacancy_id
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        close(conn).await?;
        Ok(rows)
    }

    /// Zero marks an unknown bound, so zeros are left out of both averages.
    #[instrument(skip(self))]
    pub async fn average_salary(&self) -> Result<AverageSalary> {
        let mut conn = connect(&self.options).await?;
        let row = sqlx::query_as::<_, AverageSalary>(
            r#"
            SELECT ROUND(AVG(salary_from) FILTER (WHERE salary_from <> 0)) AS salary_from,
                   ROUND(AVG(salary_to) FILTER (WHERE salary_to <> 0)) AS salary_to
            FROM vacancies
            "#,
        )
        .fetch_one(&mut conn)
        .await?;
        close(conn).await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn vacancies_above_average_salary(&self) -> Result<Vec<VacancySalary>> {
        let mut conn = connect(&self.options).await?;
        let rows = sqlx::query_as::<_, VacancySalary>(
            r#"
            SELECT e.employer_name, v.title, v.salary_from, v.url
            FROM vacancies v
            JOIN employers e USING (employer_id)
            WHERE v.salary_from > (
                SELECT AVG(salary_from) FROM vacancies WHERE salary_from <> 0
            )
            ORDER BY e.employer_name, v.salary_from DESC
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        close(conn).await?;
        Ok(rows)
    }

    /// Case-insensitive literal substring search over title, description and town.
    /// Both sides are lowercased by the server so they fold under the same locale.
    #[instrument(skip(self))]
    pub async fn vacancies_matching_keyword(&self, keyword: &str) -> Result<Vec<VacancyMatch>> {
        let keyword = trim_keyword(keyword)?;
        let mut conn = connect(&self.options).await?;
        let rows = sqlx::query_as::<_, VacancyMatch>(
            r#"
            SELECT e.employer_name, v.title, v.url, v.salary_from, v.town, v.description
            FROM vacancies v
            JOIN employers e USING (employer_id)
            WHERE strpos(lower(v.title), lower($1)) > 0
               OR strpos(lower(v.description), lower($1)) > 0
               OR strpos(lower(v.town), lower($1)) > 0
            ORDER BY e.employer_name, v.vacancy_id
            "#,
        )
        .bind(keyword)
        .fetch_all(&mut conn)
        .await?;
        close(conn).await?;
        Ok(rows)
    }
}
