//! Core library for the `weatherlookup` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - The view state and the controller that owns it
//! - Category glyphs, time formatting and the text card
//!
//! It is used by `weatherlookup-cli`, but can also be reused by other front ends.

pub mod category;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod view;

pub use category::{Glyph, WeatherCategory};
pub use clock::DisplayZone;
pub use config::Config;
pub use error::FetchFailed;
pub use model::{LocationQuery, ViewState, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use render::render_card;
pub use view::{Completion, FetchOutcome, FetchTicket, Field, Input, ViewController};
