use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::units;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// A place resolved by the geocoding stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One 3-hour slot of the upstream forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    pub temperature_kelvin: f64,
    pub wind_speed_mps: f64,
    pub humidity_pct: u8,
    pub condition: String,
    pub icon_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Used on forecast cards.
    Small,
    /// Used on the current-weather panel.
    Large,
}

impl ForecastSample {
    /// Date part of the sample timestamp, `YYYY-MM-DD`.
    pub fn date_label(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn temperature_fahrenheit(&self) -> f64 {
        units::round_hundredths(units::kelvin_to_fahrenheit(self.temperature_kelvin))
    }

    pub fn icon_url(&self, size: IconSize) -> String {
        match size {
            IconSize::Small => format!("{ICON_BASE_URL}/{}.png", self.icon_id),
            IconSize::Large => format!("{ICON_BASE_URL}/{}@4x.png", self.icon_id),
        }
    }
}

/// Forecast reduced to one sample per calendar day.
///
/// Index 0 is the nearest-future sample and stands in for current weather;
/// the remaining samples are the following days, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyDigest {
    samples: Vec<ForecastSample>,
}

impl DailyDigest {
    pub(crate) fn from_samples(samples: Vec<ForecastSample>) -> Self {
        Self { samples }
    }

    pub fn current(&self) -> Option<&ForecastSample> {
        self.samples.first()
    }

    pub fn upcoming(&self) -> &[ForecastSample] {
        self.samples.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastSample> {
        self.samples.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn sample_at(day: u32, hour: u32, kelvin: f64) -> ForecastSample {
        ForecastSample {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .expect("valid test timestamp"),
            temperature_kelvin: kelvin,
            wind_speed_mps: 3.5,
            humidity_pct: 70,
            condition: "light rain".to_string(),
            icon_id: "10d".to_string(),
        }
    }

    #[test]
    fn date_label_is_date_part_of_timestamp() {
        let sample = sample_at(15, 21, 280.0);
        assert_eq!(sample.date_label(), "2024-01-15");
    }

    #[test]
    fn icon_urls_by_size() {
        let sample = sample_at(15, 12, 280.0);
        assert_eq!(
            sample.icon_url(IconSize::Small),
            "https://openweathermap.org/img/wn/10d.png"
        );
        assert_eq!(
            sample.icon_url(IconSize::Large),
            "https://openweathermap.org/img/wn/10d@4x.png"
        );
    }

    #[test]
    fn digest_splits_current_from_upcoming() {
        let digest = DailyDigest::from_samples(vec![
            sample_at(15, 12, 280.0),
            sample_at(16, 0, 281.0),
            sample_at(17, 0, 282.0),
        ]);

        assert_eq!(digest.len(), 3);
        assert_eq!(digest.current().map(|s| s.temperature_kelvin), Some(280.0));
        assert_eq!(digest.upcoming().len(), 2);
    }

    #[test]
    fn empty_digest_has_no_current_or_upcoming() {
        let digest = DailyDigest::default();
        assert!(digest.is_empty());
        assert!(digest.current().is_none());
        assert!(digest.upcoming().is_empty());
    }
}
