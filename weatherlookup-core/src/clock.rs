//! Wall-clock formatting for provider timestamps.
//!
//! Sunrise and sunset arrive as seconds since the Unix epoch. They are shown as
//! en-US 12-hour time (`6:12:05 AM`) in a display zone, which is the machine's
//! local timezone unless a fixed offset is configured.

use std::{fmt, str::FromStr};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

const WALL_CLOCK_FORMAT: &str = "%-I:%M:%S %p";
const AS_OF_FORMAT: &str = "%I:%M:%S %p";

/// Timezone used when turning epoch seconds into displayed times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// Whatever timezone the runtime reports.
    #[default]
    Local,
    /// A fixed UTC offset, e.g. `+05:30`.
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Format `epoch_secs` as `h:mm:ss AM|PM` in this zone.
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    pub fn format_wall_clock(&self, epoch_secs: i64) -> Option<String> {
        let utc = DateTime::from_timestamp(epoch_secs, 0)?;

        let text = match self {
            Self::Local => utc.with_timezone(&Local).format(WALL_CLOCK_FORMAT).to_string(),
            Self::Fixed(offset) => utc.with_timezone(offset).format(WALL_CLOCK_FORMAT).to_string(),
        };

        Some(text)
    }

    /// Card timestamp for `at`, two-digit hour (`04:05:06 PM`).
    pub fn format_as_of(&self, at: DateTime<Utc>) -> String {
        match self {
            Self::Local => at.with_timezone(&Local).format(AS_OF_FORMAT).to_string(),
            Self::Fixed(offset) => at.with_timezone(offset).format(AS_OF_FORMAT).to_string(),
        }
    }

    pub fn now_as_of(&self) -> String {
        self.format_as_of(Utc::now())
    }
}

impl FromStr for DisplayZone {
    type Err = anyhow::Error;

    /// Accepts `local` (any case) or an offset such as `+05:30` / `-08:00`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }

        parse_offset(trimmed).map(Self::Fixed).with_context(|| {
            format!("Invalid UTC offset '{s}'. Expected 'local' or a value like '+05:30'.")
        })
    }
}

/// `+HH:MM`, `-HH:MM` or `+HH`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };

    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}
