//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The two-stage lookup: geocoding a place name, then fetching and
//!   reducing its forecast to one sample per day
//! - The sink abstraction the lookup renders into
//! - Configuration & credentials handling
//! - Shared domain models and unit conversion
//!
//! It is used by `forecast-cli`, but can also back other front ends.

pub mod config;
pub mod digest;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod units;

pub use config::{Config, Endpoints};
pub use digest::{DEFAULT_MAX_DAYS, ForecastReducer, reduce_by_day};
pub use error::{LookupError, Stage};
pub use model::{DailyDigest, ForecastSample, IconSize, Location};
pub use pipeline::{Lookup, LookupStatus, WeatherSink};
pub use provider::{ForecastSource, Geocoder, openweather::OpenWeatherClient};
