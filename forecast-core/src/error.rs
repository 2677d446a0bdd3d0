use thiserror::Error;

/// Which upstream round trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    Forecast,
}

/// User-facing lookup failures.
///
/// `Network` carries no cause. Transport, status and parse failures are
/// logged where they happen and shown to the user as one message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("No coordinates found for {0}")]
    NotFound(String),

    #[error("An error occurred while fetching the {0}!")]
    Network(Stage),
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Geocoding => "coordinates",
            Stage::Forecast => "weather forecast",
        })
    }
}
