//! Reduces a 3-hour forecast feed to one sample per calendar day.

use std::collections::HashSet;

use chrono::Datelike;
use tracing::{debug, instrument};

use crate::{
    error::LookupError,
    model::{DailyDigest, ForecastSample, Location},
    provider::ForecastSource,
};

/// Current weather plus five forecast cards.
pub const DEFAULT_MAX_DAYS: usize = 6;

/// Keep the first sample of each day-of-month, in feed order, until `max_days`
/// distinct days have been kept.
///
/// Days are keyed on the day-of-month only; the feed covers five days so
/// month wrap-around cannot produce a collision in practice.
pub fn reduce_by_day<I>(samples: I, max_days: usize) -> DailyDigest
where
    I: IntoIterator<Item = ForecastSample>,
{
    let mut seen_days = HashSet::new();

    let kept = samples
        .into_iter()
        .filter(|sample| {
            let day = sample.timestamp.day();
            if seen_days.len() < max_days && !seen_days.contains(&day) {
                seen_days.insert(day);
                true
            } else {
                false
            }
        })
        .collect();

    DailyDigest::from_samples(kept)
}

/// Second lookup stage: fetch the feed for a location and reduce it.
#[derive(Debug, Clone)]
pub struct ForecastReducer<S> {
    source: S,
    max_days: usize,
}

impl<S> ForecastReducer<S> {
    pub fn new(source: S, max_days: usize) -> Self {
        Self { source, max_days }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: ForecastSource> ForecastReducer<S> {
    #[instrument(skip(self, location), fields(place = %location.name))]
    pub async fn fetch_digest(&self, location: &Location) -> Result<DailyDigest, LookupError> {
        let samples = self.source.fetch_samples(location).await?;
        let total = samples.len();

        let digest = reduce_by_day(samples, self.max_days);
        debug!(total, kept = digest.len(), max_days = self.max_days, "reduced forecast feed");

        Ok(digest)
    }
}
