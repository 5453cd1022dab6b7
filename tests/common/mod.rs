#![allow(dead_code)]

use std::env;

use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};
use vacancy_etl::config::DatabaseConfig;
use vacancy_etl::models::employer::Employer;
use vacancy_etl::models::vacancy::{Vacancy, CURRENCY_NOT_SPECIFIED};
use vacancy_etl::services::schema_service::SchemaService;

/// Settings for a throwaway database named `name`, dropped and recreated with both tables.
///
/// Returns `None` when `DB_PASSWORD` is not configured, so database tests are
/// skipped on machines without PostgreSQL.
pub async fn fresh_database(name: &str) -> Option<DatabaseConfig> {
    dotenvy::dotenv().ok();
    let Ok(password) = env::var("DB_PASSWORD") else {
        eprintln!("DB_PASSWORD not set, skipping database test {}", name);
        return None;
    };
    let config = DatabaseConfig {
        host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5432),
        user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
        password,
        name: name.to_string(),
    };

    let mut conn = PgConnection::connect_with(&config.maintenance_options())
        .await
        .expect("connect to maintenance database");
    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{}\"", name))
        .execute(&mut conn)
        .await
        .expect("drop test database");
    conn.close().await.expect("close");

    let schema = SchemaService::new(&config);
    schema.ensure_database(name).await.expect("create database");
    schema.ensure_schema().await.expect("create tables");

    Some(config)
}

pub async fn target_connection(config: &DatabaseConfig) -> PgConnection {
    PgConnection::connect_with(&config.connect_options())
        .await
        .expect("connect to test database")
}

pub fn employer(id: i64, name: &str) -> Employer {
    Employer {
        employer_id: id,
        employer_name: name.to_string(),
        employer_url: format!("https://x/{}", id),
        open_vacancies: 0,
    }
}

pub fn vacancy(id: i64, employer_id: i64) -> Vacancy {
    Vacancy {
        vacancy_id: id,
        employer_id,
        title: format!("Vacancy {}", id),
        url: format!("https://hh.ru/vacancy/{}", id),
        salary_from: 0,
        salary_to: 0,
        currency: CURRENCY_NOT_SPECIFIED.to_string(),
        description: Some("Maintain services".to_string()),
        town: "Moscow".to_string(),
        education: Some("Higher education".to_string()),
        experience: "No experience".to_string(),
        date_pub: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

pub fn with_salary(mut vacancy: Vacancy, from: i32, to: i32, currency: &str) -> Vacancy {
    vacancy.salary_from = from;
    vacancy.salary_to = to;
    vacancy.currency = currency.to_string();
    vacancy
}
