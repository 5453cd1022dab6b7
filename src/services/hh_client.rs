use std::collections::HashSet;

use reqwest::{header, Client};
use tracing::{debug, info, instrument};

use crate::config::HhConfig;
use crate::dto::hh_dto::{HhEmployer, HhVacancyPage};
use crate::error::Result;
use crate::models::employer::Employer;
use crate::models::vacancy::Vacancy;

#[derive(Clone)]
pub struct HhClient {
    client: Client,
    base_url: String,
    per_page: u32,
}

impl HhClient {
    pub fn new(config: &HhConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            per_page: config.vacancies_per_page,
        })
    }

    fn filter_params(employer_ids: &[i64], per_page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", per_page.to_string()),
            ("archive", "false".to_string()),
        ];
        params.extend(employer_ids.iter().map(|id| ("employer_id", id.to_string())));
        params
    }

    /// Fetches every configured employer, one request each, in the given order.
    #[instrument(skip(self, employer_ids), fields(count = employer_ids.len()))]
    pub async fn fetch_employers(&self, employer_ids: &[i64]) -> Result<Vec<Employer>> {
        let mut params = Self::filter_params(employer_ids, self.per_page);
        params.push(("only_with_vacancies", "true".to_string()));

        let mut employers = Vec::with_capacity(employer_ids.len());
        for id in employer_ids {
            let url = format!("{}/employers/{}", self.base_url, id);
            debug!("Fetching employer from: {}", url);

            let employer = self
                .client
                .get(&url)
                .header(header::ACCEPT, "application/json")
                .query(&params)
                .send()
                .await?
                .error_for_status()?
                .json::<HhEmployer>()
                .await?;
            employers.push(Employer::from(employer));
        }

        info!("Fetched {} employers", employers.len());
        Ok(employers)
    }

    /// Walks the vacancy search for the given employers page by page,
    /// asking for `page_size` vacancies per page.
    ///
    /// Each page contributes whatever items it actually holds; the walk ends
    /// after `total_pages` requests or at the last page the API reports,
    /// whichever comes first. A vacancy repeated on a later page is kept once.
    #[instrument(skip(self, employer_ids))]
    pub async fn fetch_vacancies(
        &self,
        employer_ids: &[i64],
        total_pages: u32,
        page_size: u32,
    ) -> Result<Vec<Vacancy>> {
        let url = format!("{}/vacancies", self.base_url);
        let base_params = Self::filter_params(employer_ids, page_size);

        let mut vacancies = Vec::new();
        let mut seen = HashSet::new();

        for page in 0..total_pages {
            let mut params = base_params.clone();
            params.push(("page", page.to_string()));

            let data = self
                .client
                .get(&url)
                .header(header::ACCEPT, "application/json")
                .query(&params)
                .send()
                .await?
                .error_for_status()?
                .json::<HhVacancyPage>()
                .await?;

            debug!(
                page,
                items = data.items.len(),
                found = data.found,
                pages = data.pages,
                "Fetched vacancy page"
            );

            for item in data.items {
                if !seen.insert(item.id) {
                    debug!(vacancy_id = item.id, "Skipping vacancy repeated across pages");
                    continue;
                }
                vacancies.push(Vacancy::try_from(item)?);
            }

            if page + 1 >= data.pages {
                break;
            }
        }

        info!("Fetched {} vacancies", vacancies.len());
        Ok(vacancies)
    }
}
