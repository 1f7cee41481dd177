//! Date and duration formatting used by the web views.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::str::FromStr;

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    German,
    #[default]
    English,
}

impl Locale {
    fn date_time_pattern(self) -> &'static str {
        match self {
            Locale::German => "%d.%m.%Y %H:%M:%S",
            Locale::English => "%b %-d, %Y %-I:%M:%S %p",
        }
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    /// Accepts language tags such as `de`, `de-DE` or `en_US`. Unknown tags
    /// resolve to English.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Ok(match language.as_str() {
            "de" => Locale::German,
            _ => Locale::English,
        })
    }
}

/// Renders a duration as `"{d} days {h} hours {m} min {s} sec"`.
pub fn format_millis(millis: u64) -> String {
    let days = millis / MILLIS_PER_DAY;
    let hours = (millis % MILLIS_PER_DAY) / MILLIS_PER_HOUR;
    let minutes = (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    format!("{} days {} hours {} min {} sec", days, hours, minutes, seconds)
}

/// Formats the wall-clock time of `date_time` in its own offset.
pub fn format_by_locale<Tz>(date_time: &DateTime<Tz>, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date_time.format(locale.date_time_pattern()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn may_20_2017() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2017, 5, 20, 20, 25, 0)
            .unwrap()
    }

    #[test]
    fn test_format_millis() {
        let eight_thirty = ((8 * 60) + 30) * 60 * 1000;
        assert_eq!(format_millis(eight_thirty), "0 days 8 hours 30 min 0 sec");
    }

    #[test]
    fn test_format_millis_over_a_day() {
        let twenty_five_fifty_four = ((25 * 60) + 54) * 60 * 1000;
        assert_eq!(
            format_millis(twenty_five_fifty_four),
            "1 days 1 hours 54 min 0 sec"
        );
    }

    #[test]
    fn test_format_by_locale_german() {
        assert_eq!(
            format_by_locale(&may_20_2017(), Locale::German),
            "20.05.2017 20:25:00"
        );
    }

    #[test]
    fn test_format_by_locale_english() {
        assert_eq!(
            format_by_locale(&may_20_2017(), Locale::English),
            "May 20, 2017 8:25:00 PM"
        );
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!("de-DE".parse::<Locale>().unwrap(), Locale::German);
        assert_eq!("DE".parse::<Locale>().unwrap(), Locale::German);
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("fr".parse::<Locale>().unwrap(), Locale::English);
    }
}
