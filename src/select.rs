use anyhow::{bail, Error};
use chrono::NaiveDate;
use itertools::Itertools;

use crate::course::{format_date, CourseEntry};

/// Check that some course can still follow `reference`.
///
/// `entries` must be sorted, as [`crate::filter::filter_instructors`] leaves
/// them. The reference may equal the last course date.
pub fn ensure_reference_in_range(entries: &[CourseEntry], reference: NaiveDate) -> Result<(), Error> {
    let last = match entries.last() {
        Some(last) => last.date,
        None => bail!("no course left after filtering"),
    };

    if reference > last {
        bail!(
            "Il n'y a pas de cours après cette date. La date doit être antérieure au {}",
            format_date(last)
        );
    }

    Ok(())
}

/// The first course of every instructor strictly after `reference`.
pub fn next_occurrences(entries: &[CourseEntry], reference: NaiveDate) -> Vec<CourseEntry> {
    entries
        .iter()
        .filter(|entry| entry.date > reference)
        .unique_by(|entry| entry.instructor.clone())
        .cloned()
        .collect()
}
