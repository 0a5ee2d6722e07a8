use crate::ViewState;

/// Plain-text results card for a view state, stamped with `as_of`.
pub fn render_card(state: &ViewState, as_of: &str) -> String {
    let glyph = state.category().glyph();
    // Before the first fetch there is no provider code yet.
    let place = if state.country_code.is_empty() { &state.country } else { &state.country_code };

    format!(
        "{city}, {place}. Weather\n\
         As of {as_of}\n\
         {symbol} {label}\n\
         {temp}°C  ({range}°C)  {description}\n\
         Humidity     : {humidity}%\n\
         Pressure     : {pressure} hPa\n\
         Visibility   : {visibility} m\n\
         Wind         : {wind_speed} m/s at {wind_direction}°\n\
         Sunrise      : {sunrise}\n\
         Sunset       : {sunset}",
        city = state.city,
        symbol = glyph.symbol,
        label = glyph.label,
        temp = state.current_temperature,
        range = state.temperature_range,
        description = state.description,
        humidity = state.humidity,
        pressure = state.pressure,
        visibility = state.visibility,
        wind_speed = state.wind_speed,
        wind_direction = state.wind_direction,
        sunrise = state.sunrise,
        sunset = state.sunset,
    )
}
