use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored in place of a currency code when the API reports no salary.
pub const CURRENCY_NOT_SPECIFIED: &str = "not specified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub vacancy_id: i64,
    pub employer_id: i64,
    pub title: String,
    pub url: String,
    /// Zero when the lower bound is unknown.
    pub salary_from: i32,
    /// Zero when the upper bound is unknown.
    pub salary_to: i32,
    pub currency: String,
    pub description: Option<String>,
    pub town: String,
    pub education: Option<String>,
    pub experience: String,
    pub date_pub: NaiveDate,
}
