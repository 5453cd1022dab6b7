//! Response shapes of the hh.ru public API, reduced to the fields that get stored.

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::models::employer::Employer;
use crate::models::vacancy::{Vacancy, CURRENCY_NOT_SPECIFIED};
use crate::utils::time::publication_date;

/// hh.ru sends identifiers as decimal strings; numbers are accepted as well.
fn deserialize_id_flexible<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrString {
        Int(i64),
        String(String),
    }

    match IdOrString::deserialize(deserializer)? {
        IdOrString::Int(i) => Ok(i),
        IdOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid identifier: {}", s))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhEmployer {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: i64,
    pub name: String,
    pub alternate_url: String,
    pub open_vacancies: i32,
}

impl From<HhEmployer> for Employer {
    fn from(raw: HhEmployer) -> Self {
        Self {
            employer_id: raw.id,
            employer_name: raw.name,
            employer_url: raw.alternate_url,
            open_vacancies: raw.open_vacancies,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhVacancyPage {
    pub items: Vec<HhVacancy>,
    pub found: u32,
    /// Total number of pages the search produced.
    pub pages: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhVacancy {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: i64,
    pub name: String,
    pub alternate_url: String,
    pub employer: HhEmployerRef,
    pub salary: Option<HhSalary>,
    pub snippet: HhSnippet,
    pub area: HhNamed,
    pub experience: HhNamed,
    pub published_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhEmployerRef {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSalary {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSnippet {
    pub requirement: Option<String>,
    pub responsibility: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhNamed {
    pub name: String,
}

impl TryFrom<HhVacancy> for Vacancy {
    type Error = Error;

    fn try_from(raw: HhVacancy) -> Result<Self> {
        let date_pub = publication_date(&raw.published_at).map_err(|e| {
            Error::Api(format!(
                "vacancy {} has unparseable published_at {:?}: {}",
                raw.id, raw.published_at, e
            ))
        })?;

        let (salary_from, salary_to, currency) = match raw.salary {
            Some(salary) => (
                salary.from.unwrap_or(0),
                salary.to.unwrap_or(0),
                salary
                    .currency
                    .unwrap_or_else(|| CURRENCY_NOT_SPECIFIED.to_string()),
            ),
            None => (0, 0, CURRENCY_NOT_SPECIFIED.to_string()),
        };

        Ok(Self {
            vacancy_id: raw.id,
            employer_id: raw.employer.id,
            title: raw.name,
            url: raw.alternate_url,
            salary_from,
            salary_to,
            currency,
            description: raw.snippet.responsibility,
            town: raw.area.name,
            education: raw.snippet.requirement,
            experience: raw.experience.name,
            date_pub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn vacancy_json(salary: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "93353083",
            "name": "Rust developer",
            "alternate_url": "https://hh.ru/vacancy/93353083",
            "employer": { "id": "1740", "name": "Yandex" },
            "salary": salary,
            "snippet": {
                "requirement": "Experience with <highlighttext>Rust</highlighttext>",
                "responsibility": null
            },
            "area": { "id": "1", "name": "Moscow" },
            "experience": { "id": "between1And3", "name": "1-3 years" },
            "published_at": "2024-03-05T12:30:00+0300"
        })
    }

    #[test]
    fn absent_salary_becomes_zero_with_sentinel_currency() {
        let raw: HhVacancy = serde_json::from_value(vacancy_json(json!(null))).unwrap();
        let vacancy = Vacancy::try_from(raw).unwrap();

        assert_eq!(vacancy.salary_from, 0);
        assert_eq!(vacancy.salary_to, 0);
        assert_eq!(vacancy.currency, CURRENCY_NOT_SPECIFIED);
    }

    #[test]
    fn present_salary_is_copied_and_open_bound_is_zero() {
        let raw: HhVacancy = serde_json::from_value(vacancy_json(
            json!({ "from": 150000, "to": null, "currency": "RUR", "gross": false }),
        ))
        .unwrap();
        let vacancy = Vacancy::try_from(raw).unwrap();

        assert_eq!(vacancy.salary_from, 150000);
        assert_eq!(vacancy.salary_to, 0);
        assert_eq!(vacancy.currency, "RUR");
    }

    #[test]
    fn maps_fields_into_flat_record() {
        let raw: HhVacancy = serde_json::from_value(vacancy_json(json!(null))).unwrap();
        let vacancy = Vacancy::try_from(raw).unwrap();

        assert_eq!(vacancy.vacancy_id, 93353083);
        assert_eq!(vacancy.employer_id, 1740);
        assert_eq!(vacancy.town, "Moscow");
        assert_eq!(vacancy.experience, "1-3 years");
        assert_eq!(vacancy.description, None);
        assert!(vacancy.education.unwrap().contains("Rust"));
        assert_eq!(vacancy.date_pub, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn unparseable_date_is_an_api_error() {
        let mut value = vacancy_json(json!(null));
        value["published_at"] = json!("soon");
        let raw: HhVacancy = serde_json::from_value(value).unwrap();

        assert!(matches!(Vacancy::try_from(raw), Err(Error::Api(_))));
    }

    #[test]
    fn missing_area_fails_to_deserialize() {
        let mut value = vacancy_json(json!(null));
        value.as_object_mut().unwrap().remove("area");

        assert!(serde_json::from_value::<HhVacancy>(value).is_err());
    }

    #[test]
    fn page_without_page_count_fails_to_deserialize() {
        let result = serde_json::from_value::<HhVacancyPage>(json!({
            "items": [],
            "found": 0,
            "page": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn employer_accepts_numeric_and_string_ids() {
        let from_string: HhEmployer = serde_json::from_value(json!({
            "id": "3529",
            "name": "Sber",
            "alternate_url": "https://hh.ru/employer/3529",
            "open_vacancies": 42
        }))
        .unwrap();
        let from_number: HhEmployer = serde_json::from_value(json!({
            "id": 3529,
            "name": "Sber",
            "alternate_url": "https://hh.ru/employer/3529",
            "open_vacancies": 42
        }))
        .unwrap();

        assert_eq!(Employer::from(from_string), Employer::from(from_number));
    }

    #[test]
    fn non_numeric_employer_id_is_rejected() {
        let result = serde_json::from_value::<HhEmployer>(json!({
            "id": "abc",
            "name": "Sber",
            "alternate_url": "https://hh.ru/employer/3529",
            "open_vacancies": 42
        }));
        assert!(result.is_err());
    }
}
