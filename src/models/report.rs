use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CompanyVacancyCount {
    pub employer_name: String,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VacancySummary {
    pub employer_name: String,
    pub title: String,
    pub salary: String,
    pub url: String,
}

/// Rounded averages over non-zero salary bounds. `None` when no vacancy has that bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AverageSalary {
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VacancySalary {
    pub employer_name: String,
    pub title: String,
    pub salary_from: i32,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VacancyMatch {
    pub employer_name: String,
    pub title: String,
    pub url: String,
    pub salary_from: i32,
    pub town: String,
    pub description: Option<String>,
}
