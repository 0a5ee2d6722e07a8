use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    FetchFailed,
    clock::DisplayZone,
    model::{LocationQuery, WeatherReport, format_temperature_range},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    zone: DisplayZone,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            zone: DisplayZone::Local,
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Timezone for sunrise/sunset text.
    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherReport, FetchFailed> {
        let url = format!("{}/weather", self.base_url);
        let q = query.to_query();

        debug!(q = %q, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", q.as_str()), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchFailed::new(format!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        self.normalize(parsed)
    }

    fn normalize(&self, parsed: OwCurrentResponse) -> Result<WeatherReport, FetchFailed> {
        let OwCurrentResponse { main, sys, weather, wind, visibility } = parsed;

        let condition = weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchFailed::new("OpenWeather response contained no weather entry"))?;

        let sunrise = self.wall_clock(sys.sunrise, "sunrise")?;
        let sunset = self.wall_clock(sys.sunset, "sunset")?;

        Ok(WeatherReport {
            current_temperature: main.temp,
            temperature_range: format_temperature_range(main.temp_min, main.temp_max),
            country_code: sys.country,
            weather_type: condition.main,
            description: condition.description,
            humidity: main.humidity,
            pressure: main.pressure,
            visibility,
            wind_speed: wind.speed,
            wind_direction: wind.deg,
            sunrise,
            sunset,
        })
    }

    fn wall_clock(&self, epoch_secs: i64, field: &str) -> Result<String, FetchFailed> {
        self.zone
            .format_wall_clock(epoch_secs)
            .ok_or_else(|| FetchFailed::new(format!("{field} timestamp {epoch_secs} out of range")))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    sys: OwSys,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: u32,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherReport, FetchFailed> {
        self.fetch_current(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
