use tracing::warn;

use crate::config::DEFAULT_CITY;
use crate::sources::weather::WeatherSource;

/// What the temperature panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReadout {
    pub celsius: f64,
    pub phrase: &'static str,
}

impl WeatherReadout {
    pub fn new(celsius: f64) -> Self {
        Self {
            celsius,
            phrase: phrase_for_temperature(celsius),
        }
    }

    /// Rounded to a whole degree, e.g. `18 °C`
    pub fn temperature_label(&self) -> String {
        format!("{} °C", self.celsius.round() as i64)
    }
}

impl std::fmt::Display for WeatherReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} · {}", self.temperature_label(), self.phrase)
    }
}

/// Trimmed, lower-cased, whitespace runs joined with `+`
pub fn normalize_city(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("+")
}

pub fn phrase_for_temperature(celsius: f64) -> &'static str {
    if celsius <= -5.0 {
        "Bitterly cold outside"
    } else if celsius <= 5.0 {
        "Very cold today"
    } else if celsius <= 12.0 {
        "Pleasantly cool day"
    } else if celsius <= 20.0 {
        "Mild and comfortable"
    } else if celsius <= 28.0 {
        "Nice warm day"
    } else if celsius <= 35.0 {
        "Hot day—keep cool"
    } else {
        "Scorching heat—extreme temps"
    }
}

pub struct WeatherService<W: WeatherSource> {
    source: W,
}

impl<W: WeatherSource> WeatherService<W> {
    pub fn new(source: W) -> Self {
        Self { source }
    }

    /// Current readout for `city`. Any failure means no readout.
    pub fn readout(&self, city: &str) -> Option<WeatherReadout> {
        let city = normalize_city(city);
        let city = if city.is_empty() {
            normalize_city(DEFAULT_CITY)
        } else {
            city
        };

        match self.source.temperature_celsius(&city) {
            Ok(Some(celsius)) if celsius.is_finite() => Some(WeatherReadout::new(celsius)),
            Ok(_) => None,
            Err(e) => {
                warn!(city = %city, error = %e, "weather lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HeadlinesError;
    use crate::sources::weather::MockWeatherSource;

    #[test]
    fn test_normalize_city() {
        assert_eq!(normalize_city("  San   Francisco "), "san+francisco");
        assert_eq!(normalize_city("Oakland"), "oakland");
        assert_eq!(normalize_city("   "), "");
    }

    #[test]
    fn test_phrase_boundaries() {
        assert_eq!(phrase_for_temperature(-5.0), "Bitterly cold outside");
        assert_eq!(phrase_for_temperature(-4.9), "Very cold today");
        assert_eq!(phrase_for_temperature(12.0), "Pleasantly cool day");
        assert_eq!(phrase_for_temperature(20.0), "Mild and comfortable");
        assert_eq!(phrase_for_temperature(28.0), "Nice warm day");
        assert_eq!(phrase_for_temperature(35.0), "Hot day—keep cool");
        assert_eq!(phrase_for_temperature(35.1), "Scorching heat—extreme temps");
    }

    #[test]
    fn test_temperature_label_rounds() {
        assert_eq!(WeatherReadout::new(17.6).temperature_label(), "18 °C");
        assert_eq!(WeatherReadout::new(-0.4).temperature_label(), "0 °C");
    }

    #[test]
    fn test_readout_uses_normalized_city() {
        let mut source = MockWeatherSource::new();
        source
            .expect_temperature_celsius()
            .withf(|city| city == "new+york")
            .returning(|_| Ok(Some(22.0)));
        let service = WeatherService::new(source);

        let readout = service.readout(" New York ").unwrap();

        assert_eq!(readout.phrase, "Nice warm day");
    }

    #[test]
    fn test_blank_city_falls_back_to_default() {
        let mut source = MockWeatherSource::new();
        source
            .expect_temperature_celsius()
            .withf(|city| city == "oakland")
            .returning(|_| Ok(Some(15.0)));
        let service = WeatherService::new(source);

        assert!(service.readout("").is_some());
    }

    #[test]
    fn test_failures_mean_no_readout() {
        let mut source = MockWeatherSource::new();
        source
            .expect_temperature_celsius()
            .returning(|_| Err(HeadlinesError::UpstreamStatus(404)));
        assert!(WeatherService::new(source).readout("Oakland").is_none());

        let mut source = MockWeatherSource::new();
        source.expect_temperature_celsius().returning(|_| Ok(None));
        assert!(WeatherService::new(source).readout("Oakland").is_none());

        let mut source = MockWeatherSource::new();
        source
            .expect_temperature_celsius()
            .returning(|_| Ok(Some(f64::NAN)));
        assert!(WeatherService::new(source).readout("Oakland").is_none());
    }
}
