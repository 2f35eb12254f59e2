use std::io::{BufRead, Write};

use anyhow::{bail, Error};
use chrono::NaiveDate;
use tracing::debug;

use crate::{
    course::{parse_date, CourseEntry},
    select::ensure_reference_in_range,
};

pub const PROMPT: &str = "Entrer une date (JJ/MM/AAAA) : ";

/// Ask for a reference date until one parses and leaves at least one course
/// day after it.
///
/// Running out of input is an error.
pub fn prompt_reference_date<R, W>(
    mut input: R,
    mut output: W,
    courses: &[CourseEntry],
) -> Result<NaiveDate, Error>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("no reference date given");
        }

        match check_reference(&line, courses) {
            Ok(date) => return Ok(date),
            Err(err) => {
                debug!(input = line.trim(), "rejected reference date");
                writeln!(output, "{}", err)?;
            }
        }
    }
}

/// Parse `value` and make sure it can be used as a reference date.
pub fn check_reference(value: &str, courses: &[CourseEntry]) -> Result<NaiveDate, Error> {
    let date = parse_date(value)?;
    ensure_reference_in_range(courses, date)?;

    Ok(date)
}
