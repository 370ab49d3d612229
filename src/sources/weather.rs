use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::HeadlinesResult;
use crate::sources::payload::{success_body, REQUEST_TIMEOUT_SECS, USER_AGENT};

/// Boundary for the temperature readout.
#[cfg_attr(test, mockall::automock)]
pub trait WeatherSource: Send + Sync {
    /// Current temperature in Celsius for an already-normalized city name,
    /// or `None` when the body carries no numeric temperature
    fn temperature_celsius(&self, city: &str) -> HeadlinesResult<Option<f64>>;
}

pub struct HttpWeatherSource {
    client: Client,
    endpoint: Url,
}

impl HttpWeatherSource {
    pub fn new(endpoint: &str) -> HeadlinesResult<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: Url::parse(endpoint)?,
        })
    }

    fn request_url(&self, city: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("city", city);
        url
    }
}

/// Pull `main.temp` out of a weather body
pub fn parse_temperature(bytes: &[u8]) -> HeadlinesResult<Option<f64>> {
    let body: Value = serde_json::from_slice(bytes)?;
    Ok(body
        .get("main")
        .and_then(|main| main.get("temp"))
        .and_then(Value::as_f64))
}

impl WeatherSource for HttpWeatherSource {
    fn temperature_celsius(&self, city: &str) -> HeadlinesResult<Option<f64>> {
        let url = self.request_url(city);
        debug!(%url, "requesting weather");

        let response = self.client.get(url).send()?;
        let body = success_body(response)?;

        parse_temperature(&body)
    }
}
