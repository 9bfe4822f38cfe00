//! Per-request feature record and its parsing from raw form fields.

use super::PipelineError;
use crate::schema::{columns, FieldKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Season of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Winter
    Winter,
    /// Spring
    Spring,
    /// Summer
    Summer,
    /// Fall
    Fall,
}

impl Season {
    /// All seasons in form order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Label used in forms and by the fitted encoder.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl FromStr for Season {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| PipelineError::UnknownCategory {
                field: "Season",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Label used in forms and by the fitted encoder.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl FromStr for Weekday {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| PipelineError::UnknownCategory {
                field: "Weekday",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form fields exactly as submitted. Every field is optional so that a
/// missing or malformed value surfaces as a [`PipelineError`] rather than
/// an extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    /// `Season` form field
    #[serde(rename = "Season", default)]
    pub season: Option<String>,
    /// `Month` form field
    #[serde(rename = "Month", default)]
    pub month: Option<String>,
    /// `Weekday` form field
    #[serde(rename = "Weekday", default)]
    pub weekday: Option<String>,
    /// `Working_Day` form field
    #[serde(rename = "Working_Day", default)]
    pub working_day: Option<String>,
    /// `Temp` form field
    #[serde(rename = "Temp", default)]
    pub temp: Option<String>,
    /// `Humidity` form field
    #[serde(rename = "Humidity", default)]
    pub humidity: Option<String>,
    /// `Wind` form field
    #[serde(rename = "Wind", default)]
    pub wind: Option<String>,
}

/// A single cell of the one-row feature table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Raw category label, encoded later.
    Category(&'static str),
    /// Numeric value.
    Number(f32),
}

/// One request's worth of features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    /// Season
    pub season: Season,
    /// Month, 1..=12
    pub month: u8,
    /// Day of week
    pub weekday: Weekday,
    /// 1 on working days, else 0
    pub working_day: u8,
    /// Temperature, °C
    pub temp_c: f32,
    /// Relative humidity, %
    pub humidity_pct: f32,
    /// Wind speed, km/h
    pub wind_kmh: f32,
}

impl FeatureRecord {
    /// Coerces raw form strings into a typed record.
    ///
    /// Fields are checked in form order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// Missing fields, unparsable numbers, out-of-range month or working-day
    /// flag, non-finite measurements or ones beyond [`MEASUREMENT_LIMIT`],
    /// and unknown season/weekday names.
    pub fn from_submission(raw: &RawSubmission) -> Result<Self, PipelineError> {
        let season: Season = required("Season", raw.season.as_deref())?.parse()?;
        let month = parse_int("Month", raw.month.as_deref())?;
        let weekday: Weekday = required("Weekday", raw.weekday.as_deref())?.parse()?;
        let working_day = parse_int("Working_Day", raw.working_day.as_deref())?;
        let temp_c = parse_float("Temp", raw.temp.as_deref())?;
        let humidity_pct = parse_float("Humidity", raw.humidity.as_deref())?;
        let wind_kmh = parse_float("Wind", raw.wind.as_deref())?;

        if !(1..=12).contains(&month) {
            return Err(PipelineError::OutOfRange {
                field: "Month",
                value: month.to_string(),
                range: "1..=12",
            });
        }
        if !(0..=1).contains(&working_day) {
            return Err(PipelineError::OutOfRange {
                field: "Working_Day",
                value: working_day.to_string(),
                range: "0 or 1",
            });
        }

        Ok(Self {
            season,
            // Range-checked above.
            month: month as u8,
            weekday,
            working_day: working_day as u8,
            temp_c,
            humidity_pct,
            wind_kmh,
        })
    }

    /// Kind of value this record supplies for `column`, if it knows it.
    #[must_use]
    pub fn column_kind(column: &str) -> Option<FieldKind> {
        match column {
            columns::SEASON | columns::WEEKDAY => Some(FieldKind::Categorical),
            columns::MONTH
            | columns::WORKING_DAY
            | columns::TEMP_C
            | columns::HUMIDITY_PCT
            | columns::WIND_KMH => Some(FieldKind::Numeric),
            _ => None,
        }
    }

    /// Value of `column` in the feature table.
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<Cell> {
        let cell = match column {
            columns::SEASON => Cell::Category(self.season.as_str()),
            columns::MONTH => Cell::Number(f32::from(self.month)),
            columns::WEEKDAY => Cell::Category(self.weekday.as_str()),
            columns::WORKING_DAY => Cell::Number(f32::from(self.working_day)),
            columns::TEMP_C => Cell::Number(self.temp_c),
            columns::HUMIDITY_PCT => Cell::Number(self.humidity_pct),
            columns::WIND_KMH => Cell::Number(self.wind_kmh),
            _ => return None,
        };
        Some(cell)
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, PipelineError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PipelineError::MissingField { field }),
    }
}

fn parse_int(field: &'static str, value: Option<&str>) -> Result<i64, PipelineError> {
    let raw = required(field, value)?;
    raw.parse().map_err(|_| PipelineError::InvalidNumber {
        field,
        value: raw.to_string(),
        expected: "an integer",
    })
}

/// Largest accepted magnitude for a measurement field.
pub const MEASUREMENT_LIMIT: f32 = 1e6;

fn parse_float(field: &'static str, value: Option<&str>) -> Result<f32, PipelineError> {
    let raw = required(field, value)?;
    match raw.parse::<f32>() {
        Ok(v) if v.abs() <= MEASUREMENT_LIMIT => Ok(v),
        Ok(v) if v.is_finite() => Err(PipelineError::OutOfRange {
            field,
            value: raw.to_string(),
            range: "-1e6..=1e6",
        }),
        _ => Err(PipelineError::InvalidNumber {
            field,
            value: raw.to_string(),
            expected: "a finite number",
        }),
    }
}
