use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use super::{ObservationsResponse, RateTable, Seasonality, StateRate};
use crate::constants::{FRED_OBSERVATIONS_URL, FRED_REQUEST_PACING, FRED_TIMEOUT};
use crate::error::UpdateError;

/// Blocking client for the FRED `series/observations` endpoint
pub struct FredClient {
    http: Client,
    api_key: String,
    base_url: String,
    pacing: Duration,
}

impl FredClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>) -> Result<Self, UpdateError> {
        let http = Client::builder().timeout(FRED_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: FRED_OBSERVATIONS_URL.to_string(),
            pacing: FRED_REQUEST_PACING,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Most recent observation of one series, `None` when the series is empty
    ///
    /// # Errors
    /// Returns an error if the request fails, the status is not a success, or
    /// the body is not a valid observations response
    pub fn latest(&self, series_id: &str) -> Result<Option<StateRate>, UpdateError> {
        let response: ObservationsResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", "1"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.observations.first().map(StateRate::from))
    }

    /// Latest rate for every state in `states`.
    ///
    /// A state whose request fails is logged and recorded without data so a
    /// single bad series never aborts the whole update.
    pub fn latest_rates<'a>(
        &self,
        states: impl IntoIterator<Item = &'a str>,
        seasonality: Seasonality,
    ) -> RateTable {
        let mut table = RateTable::new();

        for (index, state) in states.into_iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }

            let series_id = seasonality.series_id(state);
            let rate = match self.latest(&series_id) {
                Ok(Some(rate)) => rate,
                Ok(None) => {
                    log::warn!("{state}: series {series_id} has no observations");
                    StateRate::default()
                }
                Err(e) => {
                    log::warn!("{state}: fetch of {series_id} failed: {e}");
                    StateRate::default()
                }
            };
            log::debug!("{state}: {rate:?}");
            table.insert(state, rate);
        }

        table
    }
}
