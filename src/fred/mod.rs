//! FRED (Federal Reserve Economic Data) observations for per-state series.

#[cfg(not(target_arch = "wasm32"))]
mod client;

#[cfg(not(target_arch = "wasm32"))]
pub use client::FredClient;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which variant of the state series to fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seasonality {
    #[default]
    #[serde(rename = "SA")]
    SeasonallyAdjusted,
    #[serde(rename = "NSA")]
    NotSeasonallyAdjusted,
}

impl Seasonality {
    /// Series id for a state: `CAUR` when adjusted, `CAURN` when not
    #[must_use]
    pub fn series_id(self, state: &str) -> String {
        let state = state.to_ascii_uppercase();
        match self {
            Self::SeasonallyAdjusted => format!("{state}UR"),
            Self::NotSeasonallyAdjusted => format!("{state}URN"),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SeasonallyAdjusted => "Seasonally Adjusted",
            Self::NotSeasonallyAdjusted => "Not Seasonally Adjusted",
        }
    }
}

impl FromStr for Seasonality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SA" => Ok(Self::SeasonallyAdjusted),
            "NSA" => Ok(Self::NotSeasonallyAdjusted),
            other => Err(format!("seasonal must be SA or NSA, got '{other}'")),
        }
    }
}

impl fmt::Display for Seasonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeasonallyAdjusted => f.write_str("SA"),
            Self::NotSeasonallyAdjusted => f.write_str("NSA"),
        }
    }
}

/// Body of a `series/observations` response; only the fields we read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationsResponse {
    #[serde(default)]
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub value: String,
}

impl Observation {
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// FRED marks missing values with `"."`
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        match self.value.trim() {
            "" | "." => None,
            value => value.parse().ok().filter(|v: &f64| v.is_finite()),
        }
    }
}

/// Latest known observation for one state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateRate {
    pub date: Option<NaiveDate>,
    pub rate: Option<f64>,
}

impl From<&Observation> for StateRate {
    fn from(observation: &Observation) -> Self {
        Self {
            date: observation.date(),
            rate: observation.rate(),
        }
    }
}

/// Rates keyed by uppercase state abbreviation, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: IndexMap<String, StateRate>,
}

impl RateTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, state: &str, rate: StateRate) {
        self.rates.insert(state.to_ascii_uppercase(), rate);
    }

    #[must_use]
    pub fn get(&self, state: &str) -> Option<&StateRate> {
        self.rates.get(&state.to_ascii_uppercase())
    }

    #[must_use]
    pub fn rate(&self, state: &str) -> Option<f64> {
        self.get(state).and_then(|r| r.rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateRate)> {
        self.rates.iter().map(|(state, rate)| (state.as_str(), rate))
    }

    /// States whose latest observation has no value, in table order
    #[must_use]
    pub fn states_without_data(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, rate)| rate.rate.is_none())
            .map(|(state, _)| state.to_string())
            .collect()
    }

    pub fn rates(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rates.values().map(|r| r.rate)
    }

    /// Most recent observation date across all states
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rates.values().filter_map(|r| r.date).max()
    }

    #[must_use]
    pub fn with_data(&self) -> usize {
        self.rates.values().filter(|r| r.rate.is_some()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, StateRate)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, StateRate)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (state, rate) in iter {
            table.insert(state, rate);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_ids() {
        assert_eq!(Seasonality::SeasonallyAdjusted.series_id("ca"), "CAUR");
        assert_eq!(Seasonality::NotSeasonallyAdjusted.series_id("TX"), "TXURN");
    }

    #[test]
    fn test_parse_seasonality() {
        assert_eq!("sa".parse::<Seasonality>(), Ok(Seasonality::SeasonallyAdjusted));
        assert_eq!(" NSA ".parse::<Seasonality>(), Ok(Seasonality::NotSeasonallyAdjusted));
        let err = "monthly".parse::<Seasonality>().expect_err("Expected error");
        assert!(err.contains("SA or NSA"));
    }

    #[test]
    fn test_seasonality_labels() {
        assert_eq!(Seasonality::SeasonallyAdjusted.label(), "Seasonally Adjusted");
        assert_eq!(Seasonality::NotSeasonallyAdjusted.to_string(), "NSA");
    }

    #[test]
    fn test_deserialize_observations() {
        let json = r#"{
            "realtime_start": "2025-01-01",
            "count": 1,
            "observations": [
                {"realtime_start": "2025-01-01", "date": "2024-11-01", "value": "5.4"}
            ]
        }"#;
        let response: ObservationsResponse = serde_json::from_str(json).expect("should parse");
        let observation = &response.observations[0];
        assert_eq!(observation.rate(), Some(5.4));
        assert_eq!(observation.date(), NaiveDate::from_ymd_opt(2024, 11, 1));
    }

    #[test]
    fn test_missing_observations_field() {
        let response: ObservationsResponse =
            serde_json::from_str(r#"{"error_code": 400}"#).expect("should parse");
        assert!(response.observations.is_empty());
    }

    #[test]
    fn test_missing_values() {
        for value in ["", ".", "n/a", "NaN"] {
            let observation = Observation {
                date: "bad date".to_string(),
                value: value.to_string(),
            };
            assert_eq!(observation.rate(), None, "value {value:?}");
            assert_eq!(observation.date(), None);
        }
    }

    #[test]
    fn test_rate_table() {
        let table: RateTable = [
            ("ca", StateRate { date: NaiveDate::from_ymd_opt(2024, 10, 1), rate: Some(5.4) }),
            ("TX", StateRate { date: NaiveDate::from_ymd_opt(2024, 11, 1), rate: Some(4.1) }),
            ("NY", StateRate::default()),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rate("CA"), Some(5.4));
        assert_eq!(table.rate("ny"), None);
        assert_eq!(table.with_data(), 2);
        assert_eq!(table.latest_date(), NaiveDate::from_ymd_opt(2024, 11, 1));
        let order: Vec<&str> = table.iter().map(|(state, _)| state).collect();
        assert_eq!(order, ["CA", "TX", "NY"]);
        assert_eq!(table.states_without_data(), ["NY"]);
    }
}
