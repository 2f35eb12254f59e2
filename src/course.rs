use std::fmt;
use std::str::FromStr;

use anyhow::{bail, ensure, Context, Error};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;

use crate::{normalize::FieldRecord, policy::NamePolicy};

/// Position of the start timestamp in a normalized event.
pub const START_FIELD: usize = 1;
/// Position of the course title.
pub const TITLE_FIELD: usize = 3;
/// Position of the free text holding the instructor name.
pub const DESCRIPTION_FIELD: usize = 5;

const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
const STAMP_LEN: usize = 15;

/// A compact `YYYYMMDDTHHMMSS` start timestamp, optionally suffixed with `Z`.
///
/// The wall clock time is taken as written, no timezone conversion happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StartStamp(NaiveDateTime);

impl StartStamp {
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }
}

impl FromStr for StartStamp {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let stamp = value.strip_suffix('Z').unwrap_or(value);

        ensure!(
            stamp.len() == STAMP_LEN
                && stamp
                    .char_indices()
                    .all(|(idx, c)| if idx == 8 { c == 'T' } else { c.is_ascii_digit() }),
            "invalid start timestamp {:?}, expected YYYYMMDDTHHMMSS",
            value
        );

        let parsed = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT)
            .with_context(|| format!("invalid start timestamp {:?}", value))?;

        Ok(StartStamp(parsed))
    }
}

/// One course occurrence with its guessed instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub title: String,
    pub instructor: String,
}

impl CourseEntry {
    /// `DD/MM/YYYY`
    pub fn date_label(&self) -> String {
        format_date(self.date)
    }

    /// `HHhMM`
    pub fn time_label(&self) -> String {
        self.time.format("%Hh%M").to_string()
    }

    pub fn with_instructor(&self, instructor: String) -> CourseEntry {
        CourseEntry {
            instructor,
            ..self.clone()
        }
    }
}

impl fmt::Display for CourseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date_label(),
            self.time_label(),
            self.instructor,
            self.title
        )
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a `DD/MM/YYYY` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    let value = value.trim();
    if value.len() != 10 {
        bail!("invalid date {:?}, expected JJ/MM/AAAA", value);
    }

    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .with_context(|| format!("invalid date {:?}, expected JJ/MM/AAAA", value))
}

/// Build a course from a normalized event.
pub fn extract(record: &FieldRecord, policy: &NamePolicy) -> Result<CourseEntry, Error> {
    let start: StartStamp = record.value(START_FIELD)?.parse()?;
    let title = record.value(TITLE_FIELD)?.to_string();
    let instructor = guess_instructor(record.value(DESCRIPTION_FIELD)?, policy);

    Ok(CourseEntry {
        date: start.date(),
        time: start.time(),
        title,
        instructor,
    })
}

/// Keep the name-looking words of `description` before its first `(`.
///
/// This is a heuristic: the result may be empty, or hold several names run
/// together, or a partial one.
pub fn guess_instructor(description: &str, policy: &NamePolicy) -> String {
    let head = match description.find('(') {
        Some(idx) => &description[..idx],
        None => description,
    };

    head.trim()
        .split(' ')
        .filter(|token| policy.keeps_token(token))
        .join(" ")
}
