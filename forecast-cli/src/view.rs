use forecast_core::{ForecastSample, IconSize, LookupError, WeatherSink, units};

/// Terminal stand-in for the two output panels and the alert box.
#[derive(Debug, Default)]
pub struct TerminalView {
    current: Vec<String>,
    forecast: Vec<Vec<String>>,
    alerts: Vec<String>,
}

impl TerminalView {
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Current-weather panel followed by the forecast cards.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for line in &self.current {
            out.push_str(line);
            out.push('\n');
        }

        if !self.forecast.is_empty() {
            out.push_str(&format!("\n{}-Day Forecast\n", self.forecast.len()));
            for card in &self.forecast {
                out.push('\n');
                for line in card {
                    out.push_str("  ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }

        out
    }
}

impl WeatherSink for TerminalView {
    fn clear(&mut self) {
        self.current.clear();
        self.forecast.clear();
    }

    fn render_current(&mut self, place: &str, sample: &ForecastSample) {
        self.current = vec![
            format!("{place} ({})", sample.date_label()),
            format!("Temperature: {}", units::format_fahrenheit(sample.temperature_kelvin)),
            format!("Wind: {} M/S", sample.wind_speed_mps),
            format!("Humidity: {}%", sample.humidity_pct),
            format!("{} [{}]", sample.condition, sample.icon_url(IconSize::Large)),
        ];
    }

    fn render_forecast(&mut self, sample: &ForecastSample) {
        self.forecast.push(vec![
            format!("({})", sample.date_label()),
            sample.icon_url(IconSize::Small),
            format!("Temp: {}", units::format_fahrenheit(sample.temperature_kelvin)),
            format!("Wind: {} M/S", sample.wind_speed_mps),
            format!("Humidity: {}%", sample.humidity_pct),
        ]);
    }

    fn alert(&mut self, error: &LookupError) {
        self.alerts.push(error.to_string());
    }
}
