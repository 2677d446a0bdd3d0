//! The lookup pipeline: place name → coordinates → daily digest → sink.
//!
//! Stages run strictly one after another and the first failure ends the
//! lookup. The sink is only written once a full digest is available, and is
//! then cleared and repopulated in one go, so overlapping lookups leave the
//! output of whichever finished last.

use tracing::{debug, info};

use crate::{
    digest::ForecastReducer,
    error::LookupError,
    model::{DailyDigest, ForecastSample},
    provider::{ForecastSource, Geocoder},
};

/// Output surface for a lookup.
pub trait WeatherSink {
    /// Drop any previously rendered output.
    fn clear(&mut self);

    fn render_current(&mut self, place: &str, sample: &ForecastSample);

    fn render_forecast(&mut self, sample: &ForecastSample);

    /// Present a failed lookup to the user.
    fn alert(&mut self, error: &LookupError);

    /// Replace the output with `digest`: index 0 as current weather, the rest
    /// as forecast cards.
    fn render_digest(&mut self, place: &str, digest: &DailyDigest) {
        self.clear();

        if let Some(current) = digest.current() {
            self.render_current(place, current);
        }
        for sample in digest.upcoming() {
            self.render_forecast(sample);
        }
    }
}

/// Result of a lookup that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupStatus {
    /// Input was blank; nothing was requested or rendered.
    Skipped,
    Rendered(DailyDigest),
}

#[derive(Debug, Clone)]
pub struct Lookup<G, F> {
    geocoder: G,
    reducer: ForecastReducer<F>,
}

impl<G: Geocoder, F: ForecastSource> Lookup<G, F> {
    pub fn new(geocoder: G, reducer: ForecastReducer<F>) -> Self {
        Self { geocoder, reducer }
    }

    /// Run one lookup for the raw user `input`.
    ///
    /// Failures are reported to `sink.alert` and also returned.
    pub async fn search<S>(&self, input: &str, sink: &mut S) -> Result<LookupStatus, LookupError>
    where
        S: WeatherSink + ?Sized,
    {
        let place = input.trim();
        if place.is_empty() {
            debug!("blank input, skipping lookup");
            return Ok(LookupStatus::Skipped);
        }

        match self.run(place).await {
            Ok((name, digest)) => {
                info!(place = %name, days = digest.len(), "rendering forecast");
                sink.render_digest(&name, &digest);
                Ok(LookupStatus::Rendered(digest))
            }
            Err(err) => {
                sink.alert(&err);
                Err(err)
            }
        }
    }

    async fn run(&self, place: &str) -> Result<(String, DailyDigest), LookupError> {
        let location = self.geocoder.resolve(place).await?;
        let digest = self.reducer.fetch_digest(&location).await?;
        Ok((location.name, digest))
    }
}
