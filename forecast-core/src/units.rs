//! Temperature conversion for display.
//!
//! The forecast feed reports absolute temperatures in Kelvin; everything the
//! user sees is Fahrenheit with two decimals.

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0
}

/// Round half away from zero to two decimal places.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Kelvin rendered as e.g. `"68.00°F"`.
pub fn format_fahrenheit(kelvin: f64) -> String {
    format!("{:.2}°F", kelvin_to_fahrenheit(kelvin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point() {
        assert_eq!(round_hundredths(kelvin_to_fahrenheit(273.15)), 32.0);
        assert_eq!(format_fahrenheit(273.15), "32.00°F");
    }

    #[test]
    fn boiling_point() {
        assert!((round_hundredths(kelvin_to_fahrenheit(373.15)) - 212.0).abs() < 1e-9);
        assert_eq!(format_fahrenheit(373.15), "212.00°F");
    }

    #[test]
    fn absolute_zero() {
        assert_eq!(format_fahrenheit(0.0), "-459.67°F");
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 290.0 K = 62.33 °F (62.330000...)
        assert_eq!(format_fahrenheit(290.0), "62.33°F");
        assert!((round_hundredths(kelvin_to_fahrenheit(290.0)) - 62.33).abs() < 1e-9);
    }
}
