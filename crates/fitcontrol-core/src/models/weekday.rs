// ABOUTME: Weekday labels used to key scheduled units and compliance dates
// ABOUTME: Fixed Sunday-first enumeration with localized storage names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::AppError;

/// Day of the week a scheduled unit belongs to.
///
/// Indexes run Sunday = 0 through Saturday = 6. The serialized form is the
/// localized display name, which is also what the record store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekdayLabel {
    /// Domingo
    Sunday,
    /// Lunes
    Monday,
    /// Martes
    Tuesday,
    /// Miércoles
    Wednesday,
    /// Jueves
    Thursday,
    /// Viernes
    Friday,
    /// Sábado
    Saturday,
}

impl WeekdayLabel {
    /// All labels in index order
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Sunday-based index (0..=6)
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Label for a Sunday-based index, `None` outside 0..=6
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Weekday of a calendar date
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Localized display name, also the storage value
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sunday => "Domingo",
            Self::Monday => "Lunes",
            Self::Tuesday => "Martes",
            Self::Wednesday => "Miércoles",
            Self::Thursday => "Jueves",
            Self::Friday => "Viernes",
            Self::Saturday => "Sábado",
        }
    }
}

impl From<Weekday> for WeekdayLabel {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::Sunday,
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for WeekdayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WeekdayLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'á' => 'a',
                'é' => 'e',
                _ => c,
            })
            .collect();

        match folded.as_str() {
            "domingo" | "sunday" => Ok(Self::Sunday),
            "lunes" | "monday" => Ok(Self::Monday),
            "martes" | "tuesday" => Ok(Self::Tuesday),
            "miercoles" | "wednesday" => Ok(Self::Wednesday),
            "jueves" | "thursday" => Ok(Self::Thursday),
            "viernes" | "friday" => Ok(Self::Friday),
            "sabado" | "saturday" => Ok(Self::Saturday),
            _ => Err(AppError::invalid_format(format!(
                "Unknown weekday label: {s}"
            ))),
        }
    }
}

impl Serialize for WeekdayLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

// Accepts the same spellings as `FromStr`: any case, with or without accents
impl<'de> Deserialize<'de> for WeekdayLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|err: AppError| D::Error::custom(err.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_from_date_matches_calendar() {
        // 2024-01-07 was a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(WeekdayLabel::from_date(sunday), WeekdayLabel::Sunday);
        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(WeekdayLabel::from_date(wednesday), WeekdayLabel::Wednesday);
    }

    #[test]
    fn test_index_round_trip_is_sunday_first() {
        assert_eq!(WeekdayLabel::Sunday.index(), 0);
        assert_eq!(WeekdayLabel::Saturday.index(), 6);
        assert_eq!(WeekdayLabel::from_index(3), Some(WeekdayLabel::Wednesday));
        assert_eq!(WeekdayLabel::from_index(7), None);
    }

    #[test]
    fn test_parse_accepts_accents_case_and_english() {
        assert_eq!(
            "MIÉRCOLES".parse::<WeekdayLabel>().unwrap(),
            WeekdayLabel::Wednesday
        );
        assert_eq!(
            "sabado".parse::<WeekdayLabel>().unwrap(),
            WeekdayLabel::Saturday
        );
        assert_eq!(
            " Monday ".parse::<WeekdayLabel>().unwrap(),
            WeekdayLabel::Monday
        );
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = "Funday".parse::<WeekdayLabel>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_serializes_as_display_name() {
        let json = serde_json::to_string(&WeekdayLabel::Saturday).unwrap();
        assert_eq!(json, "\"Sábado\"");
        let parsed: WeekdayLabel = serde_json::from_str("\"Miercoles\"").unwrap();
        assert_eq!(parsed, WeekdayLabel::Wednesday);
    }

    #[test]
    fn test_deserialize_is_case_and_accent_insensitive() {
        let parsed: Vec<WeekdayLabel> =
            serde_json::from_str(r#"["lunes", "MIÉRCOLES", "sabado", "Sunday"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                WeekdayLabel::Monday,
                WeekdayLabel::Wednesday,
                WeekdayLabel::Saturday,
                WeekdayLabel::Sunday,
            ]
        );

        let err = serde_json::from_str::<WeekdayLabel>("\"Funday\"").unwrap_err();
        assert!(err.to_string().contains("Unknown weekday label"));
    }
}
