use chrono::{NaiveDate, Timelike};
use itertools::Itertools;
use tracing::debug;

use crate::{course::CourseEntry, policy::NamePolicy};

/// More spaces than this means several names were captured together.
const MAX_NAME_SPACES: usize = 2;

/// Drop permanent staff, split run-together names and sort by start.
///
/// A name with more than two spaces is cut into consecutive word pairs
/// (`w0 w1`, `w2 w3`, ...); a trailing odd word is lost. Each pair that is not
/// denylisted becomes its own entry. The sort is stable.
pub fn filter_instructors(entries: Vec<CourseEntry>, policy: &NamePolicy) -> Vec<CourseEntry> {
    let mut filtered = Vec::with_capacity(entries.len());

    for entry in entries {
        if policy.is_denylisted(&entry.instructor) {
            debug!(instructor = %entry.instructor, "dropping permanent staff");
            continue;
        }

        if entry.instructor.matches(' ').count() > MAX_NAME_SPACES {
            let candidates = split_names(&entry.instructor);
            debug!(instructor = %entry.instructor, ?candidates, "splitting compound name");

            filtered.extend(
                candidates
                    .into_iter()
                    .filter(|name| !policy.is_denylisted(name))
                    .map(|name| entry.with_instructor(name)),
            );
        } else {
            filtered.push(entry);
        }
    }

    filtered.sort_by_key(start_key);

    filtered
}

/// Sort key of an entry: day, hour and minute. Seconds are ignored.
pub fn start_key(entry: &CourseEntry) -> (NaiveDate, u32, u32) {
    (entry.date, entry.time.hour(), entry.time.minute())
}

/// Pair up the words of a compound name.
pub fn split_names(compound: &str) -> Vec<String> {
    compound
        .split_whitespace()
        .tuples()
        .map(|(first, last)| format!("{} {}", first, last))
        .collect()
}
