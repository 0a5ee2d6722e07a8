use serde::{Deserialize, Serialize};

/// Coarse weather classification used to pick a display glyph.
///
/// The provider reports it as free text (`weather[0].main`). Anything outside
/// the known set collapses to [`WeatherCategory::Cloudy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherCategory {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Smoke,
    Haze,
    Fog,
    #[default]
    Cloudy,
}

/// What the results card shows for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Weather-icons name, e.g. `wi-day-sunny`.
    pub icon: &'static str,
    /// Terminal symbol.
    pub symbol: &'static str,
    pub label: &'static str,
}

impl WeatherCategory {
    pub const fn all() -> &'static [WeatherCategory] {
        &[
            WeatherCategory::Clear,
            WeatherCategory::Clouds,
            WeatherCategory::Rain,
            WeatherCategory::Thunderstorm,
            WeatherCategory::Snow,
            WeatherCategory::Mist,
            WeatherCategory::Smoke,
            WeatherCategory::Haze,
            WeatherCategory::Fog,
            WeatherCategory::Cloudy,
        ]
    }

    /// Classify provider text. Matching is exact and case-sensitive.
    pub fn from_provider(text: &str) -> Self {
        match text {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            "Mist" => Self::Mist,
            "Smoke" => Self::Smoke,
            "Haze" => Self::Haze,
            "Fog" => Self::Fog,
            _ => Self::Cloudy,
        }
    }

    pub const fn glyph(self) -> Glyph {
        match self {
            Self::Clear => Glyph { icon: "wi-day-sunny", symbol: "☀", label: "Clear" },
            Self::Clouds => Glyph { icon: "wi-cloudy", symbol: "☁", label: "Clouds" },
            Self::Rain => Glyph { icon: "wi-rain", symbol: "🌧", label: "Rain" },
            Self::Thunderstorm => {
                Glyph { icon: "wi-thunderstorm", symbol: "⛈", label: "Thunderstorm" }
            }
            Self::Snow => Glyph { icon: "wi-snow", symbol: "❄", label: "Snow" },
            Self::Mist => Glyph { icon: "wi-fog", symbol: "🌫", label: "Mist" },
            Self::Smoke => Glyph { icon: "wi-smoke", symbol: "💨", label: "Smoke" },
            Self::Haze => Glyph { icon: "wi-day-haze", symbol: "🌁", label: "Haze" },
            Self::Fog => Glyph { icon: "wi-fog", symbol: "🌫", label: "Fog" },
            Self::Cloudy => Glyph { icon: "wi-cloud", symbol: "☁", label: "Cloudy" },
        }
    }
}
