//! Display labels for the two supported languages.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Cs,
    En,
}

impl Locale {
    pub fn weekday(self, day: Weekday) -> &'static str {
        const CS: [&str; 7] = [
            "Pondělí", "Úterý", "Středa", "Čtvrtek", "Pátek", "Sobota", "Neděle",
        ];
        const EN: [&str; 7] = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];
        let index = day.num_days_from_monday() as usize;
        match self {
            Locale::Cs => CS[index],
            Locale::En => EN[index],
        }
    }

    pub fn closed(self) -> &'static str {
        match self {
            Locale::Cs => "Zavřeno",
            Locale::En => "Closed",
        }
    }

    pub fn open(self) -> &'static str {
        match self {
            Locale::Cs => "Otevřeno",
            Locale::En => "Open",
        }
    }

    pub fn open_24_7(self) -> &'static str {
        match self {
            Locale::Cs => "Otevřeno 24/7",
            Locale::En => "Open 24/7",
        }
    }

    pub fn today(self) -> &'static str {
        match self {
            Locale::Cs => "Dnes",
            Locale::En => "Today",
        }
    }

    pub fn opening_hours(self) -> &'static str {
        match self {
            Locale::Cs => "Otevírací doba",
            Locale::En => "Opening Hours",
        }
    }

    pub fn multisport(self, accepted: bool) -> &'static str {
        match (self, accepted) {
            (Locale::Cs, true) => "Přijímá MultiSport",
            (Locale::Cs, false) => "Nepřijímá MultiSport",
            (Locale::En, true) => "Accepts MultiSport",
            (Locale::En, false) => "No MultiSport",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cs" => Ok(Locale::Cs),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale {other:?}, expected cs or en")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Cs => "cs",
            Locale::En => "en",
        })
    }
}
