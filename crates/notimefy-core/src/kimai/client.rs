//! Blocking Kimai timesheet client.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use super::{Credentials, ReportingPeriod, TimeRecord, TimesheetSource};
use crate::config::KimaiConfig;
use crate::error::FetchError;

const TIMESHEETS_PATH: &str = "/timesheets";

pub struct KimaiClient {
    base_url: String,
    credentials: Credentials,
    page_size: Option<u32>,
    http: Client,
}

impl KimaiClient {
    /// Build a client for the configured Kimai instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &KimaiConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            credentials: Credentials {
                username: config.username.clone(),
                token: config.token.clone(),
            },
            page_size: config.page_size,
            http,
        })
    }

    fn page_url(&self, period: &ReportingPeriod, page: u32) -> Result<Url, FetchError> {
        let raw = format!("{}{}", self.base_url, TIMESHEETS_PATH);
        let mut url = Url::parse(&raw).map_err(|source| FetchError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("begin", &period.begin_param())
                .append_pair("end", &period.end_param())
                .append_pair("page", &page.to_string());
            if let Some(size) = self.page_size {
                query.append_pair("size", &size.to_string());
            }
        }

        Ok(url)
    }

    fn fetch_page(&self, url: Url) -> Result<String, FetchError> {
        let resp = self
            .http
            .get(url)
            .header("X-AUTH-USER", &self.credentials.username)
            .header("X-AUTH-TOKEN", &self.credentials.token)
            .send()?;

        tracing::debug!(status = %resp.status(), "Timesheet page received");
        Ok(resp.text()?)
    }

    /// Fetch every record logged within `period`.
    ///
    /// Pages are requested from 1 upward until a body does not decode as a
    /// record list, or decodes to an empty one. That first failing page is
    /// the end of the data, not an error; on page 1 it means no records.
    ///
    /// # Errors
    ///
    /// Returns an error on request construction or transport failure.
    pub fn fetch_month_records(
        &self,
        period: &ReportingPeriod,
    ) -> Result<Vec<TimeRecord>, FetchError> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let url = self.page_url(period, page)?;
            let body = self.fetch_page(url)?;

            let page_records = match serde_json::from_str::<Vec<TimeRecord>>(&body) {
                Ok(page_records) => page_records,
                Err(e) => {
                    tracing::debug!(page, error = %e, "Page is not a record list, stopping");
                    break;
                }
            };
            if page_records.is_empty() {
                tracing::debug!(page, "Empty page, stopping");
                break;
            }

            tracing::debug!(page, count = page_records.len(), "Fetched timesheet page");
            records.extend(page_records);
            page += 1;
        }

        tracing::info!(
            records = records.len(),
            begin = %period.begin_param(),
            end = %period.end_param(),
            "Fetched Kimai timesheets"
        );
        Ok(records)
    }
}

impl TimesheetSource for KimaiClient {
    fn fetch_records(&self, period: &ReportingPeriod) -> Result<Vec<TimeRecord>, FetchError> {
        self.fetch_month_records(period)
    }
}
