//! Per-frequency rate table served by the pool calculator endpoint

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProjectionError;

/// Contribution / compounding cadence selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// All frequencies in display order
    pub const ALL: [Frequency; 3] = [Frequency::Weekly, Frequency::Monthly, Frequency::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(ProjectionError::UnknownFrequency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = ProjectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Rates for one pool, as fractional values (0.01 = 1%)
///
/// The server names the fields `weeklyOptions` / `monthlyOptions` / `yearlyOptions`.
/// Any value that is not a finite, non-negative JSON number decodes as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(
        rename = "weeklyOptions",
        alias = "weeklyRate",
        default,
        deserialize_with = "lenient_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub weekly_rate: Option<f64>,

    #[serde(
        rename = "monthlyOptions",
        alias = "monthlyRate",
        default,
        deserialize_with = "lenient_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_rate: Option<f64>,

    #[serde(
        rename = "yearlyOptions",
        alias = "yearlyRate",
        default,
        deserialize_with = "lenient_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub yearly_rate: Option<f64>,
}

fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}

fn lenient_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let rate = value.as_ref().and_then(serde_json::Value::as_f64);
    if value.is_some() && rate.is_none() {
        log::warn!("Ignoring non-numeric rate value: {:?}", value);
    }
    Ok(rate.filter(|r| is_valid_rate(*r)))
}

impl RateTable {
    /// Table with every rate absent
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_weekly(mut self, rate: f64) -> Self {
        self.weekly_rate = Some(rate);
        self
    }

    pub fn with_monthly(mut self, rate: f64) -> Self {
        self.monthly_rate = Some(rate);
        self
    }

    pub fn with_yearly(mut self, rate: f64) -> Self {
        self.yearly_rate = Some(rate);
        self
    }

    /// Rate for the given frequency, if present and usable
    pub fn rate_for(&self, frequency: Frequency) -> Option<f64> {
        let rate = match frequency {
            Frequency::Weekly => self.weekly_rate,
            Frequency::Monthly => self.monthly_rate,
            Frequency::Yearly => self.yearly_rate,
        };
        rate.filter(|r| is_valid_rate(*r))
    }

    pub fn is_empty(&self) -> bool {
        Frequency::ALL.iter().all(|f| self.rate_for(*f).is_none())
    }

    /// Decode a bare rate object or the `{ "data": { ... } }` envelope
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(mut value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if let Some(inner) = value.get_mut("data").filter(|d| d.is_object()) {
            let inner = inner.take();
            return serde_json::from_value(inner);
        }
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parse() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" monthly ".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("YEARLY".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert!("daily".parse::<Frequency>().is_err());

        let f: Frequency = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(f, Frequency::Monthly);
        assert_eq!(serde_json::to_string(&Frequency::Yearly).unwrap(), "\"Yearly\"");
    }

    #[test]
    fn test_decode_server_names() {
        let table = RateTable::from_json_str(
            r#"{"weeklyOptions": 0.01, "monthlyOptions": 0.02, "yearlyOptions": 0.12, "poolName": "GBTC"}"#,
        )
        .unwrap();
        assert_eq!(table.rate_for(Frequency::Weekly), Some(0.01));
        assert_eq!(table.rate_for(Frequency::Monthly), Some(0.02));
        assert_eq!(table.rate_for(Frequency::Yearly), Some(0.12));
    }

    #[test]
    fn test_decode_envelope_and_aliases() {
        let table = RateTable::from_json_str(r#"{"data": {"monthlyRate": 0.03}}"#).unwrap();
        assert_eq!(table.rate_for(Frequency::Monthly), Some(0.03));
        assert_eq!(table.rate_for(Frequency::Weekly), None);
    }

    #[test]
    fn test_non_numeric_rates_are_absent() {
        let table = RateTable::from_json_str(
            r#"{"weeklyOptions": "0.01", "monthlyOptions": null, "yearlyOptions": -0.5}"#,
        )
        .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_rate_for_filters_invalid_values() {
        let table = RateTable::empty().with_weekly(f64::NAN).with_monthly(f64::INFINITY).with_yearly(0.05);
        assert_eq!(table.rate_for(Frequency::Weekly), None);
        assert_eq!(table.rate_for(Frequency::Monthly), None);
        assert_eq!(table.rate_for(Frequency::Yearly), Some(0.05));
    }

    #[test]
    fn test_serialize_skips_absent() {
        let json = serde_json::to_string(&RateTable::empty().with_weekly(0.01)).unwrap();
        assert_eq!(json, r#"{"weeklyOptions":0.01}"#);
    }
}
