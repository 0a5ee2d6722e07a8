use crate::{
    Config, FetchFailed, LocationQuery, WeatherReport, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherReport, FetchFailed>;
}

/// Construct the OpenWeather provider from config.
///
/// The API key comes from `WEATHERLOOKUP_API_KEY` when set, otherwise from the config file.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let env_key = std::env::var(crate::config::API_KEY_ENV).ok();
    provider_with_key(config, env_key.as_deref())
}

fn provider_with_key(config: &Config, env_key: Option<&str>) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.resolve_api_key(env_key).ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weatherlookup configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let zone = config.display_zone()?;

    Ok(OpenWeatherProvider::new(api_key.to_owned())
        .with_base_url(config.base_url.clone())
        .with_zone(zone))
}
