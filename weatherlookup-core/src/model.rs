use serde::{Deserialize, Serialize};

use crate::category::WeatherCategory;

pub const DEFAULT_CITY: &str = "Lucknow";
pub const DEFAULT_COUNTRY: &str = "India";

/// The location a fetch asks about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub country: String,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self { city: city.into(), country: country.into() }
    }

    /// `"<city>,<country>"`, the provider's combined location query.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.city, self.country)
    }
}

/// Current conditions normalized from a provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current_temperature: f64,
    pub temperature_range: String,
    pub country_code: String,
    pub weather_type: String,
    pub description: String,
    pub humidity: u8,
    pub pressure: u32,
    pub visibility: u32,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub sunrise: String,
    pub sunset: String,
}

/// `"<min>/<max>"` with numbers in their shortest form (`12.5/13`).
pub fn format_temperature_range(min: f64, max: f64) -> String {
    format!("{}/{}", unsigned_zero(min), unsigned_zero(max))
}

// `-0` prints as "-0"; show it as "0".
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Everything the results card shows, plus the two editable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub city: String,
    pub country: String,
    pub current_temperature: f64,
    pub temperature_range: String,
    pub country_code: String,
    pub weather_type: String,
    pub description: String,
    pub humidity: u8,
    pub pressure: u32,
    pub visibility: u32,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub sunrise: String,
    pub sunset: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_location(DEFAULT_CITY, DEFAULT_COUNTRY)
    }
}

impl ViewState {
    /// Fresh state: the given location, every weather field zero or empty.
    pub fn with_location(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            current_temperature: 0.0,
            temperature_range: String::new(),
            country_code: String::new(),
            weather_type: String::new(),
            description: String::new(),
            humidity: 0,
            pressure: 0,
            visibility: 0,
            wind_speed: 0.0,
            wind_direction: 0,
            sunrise: String::new(),
            sunset: String::new(),
        }
    }

    pub fn query(&self) -> LocationQuery {
        LocationQuery::new(self.city.clone(), self.country.clone())
    }

    pub fn category(&self) -> WeatherCategory {
        WeatherCategory::from_provider(&self.weather_type)
    }

    /// Replace every weather field with `report`, keeping city and country as held.
    pub fn apply_report(&mut self, report: WeatherReport) {
        let WeatherReport {
            current_temperature,
            temperature_range,
            country_code,
            weather_type,
            description,
            humidity,
            pressure,
            visibility,
            wind_speed,
            wind_direction,
            sunrise,
            sunset,
        } = report;

        *self = Self {
            city: std::mem::take(&mut self.city),
            country: std::mem::take(&mut self.country),
            current_temperature,
            temperature_range,
            country_code,
            weather_type,
            description,
            humidity,
            pressure,
            visibility,
            wind_speed,
            wind_direction,
            sunrise,
            sunset,
        };
    }
}
