//! The stages chained together.
//!
//! Each function takes the complete output of the previous stage and
//! returns a fresh value; nothing is shared between stages.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Error};
use tracing::info;

use crate::{
    course::{self, CourseEntry},
    filter::filter_instructors,
    loader::{self, RawLine},
    normalize::{self, FieldRecord, EVENT_COLUMNS},
    policy::NamePolicy,
    segment,
};

/// Load, segment and normalize an export file.
pub fn read_calendar(path: &Path) -> Result<Vec<FieldRecord>, Error> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let lines = loader::load_lines(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;

    records_from_lines(&lines).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_calendar(data: &str) -> Result<Vec<FieldRecord>, Error> {
    records_from_lines(&loader::lines_from_str(data))
}

/// Every event must carry exactly the exported columns.
pub fn records_from_lines(lines: &[RawLine]) -> Result<Vec<FieldRecord>, Error> {
    let events = segment::segment(lines)?;
    info!(lines = lines.len(), events = events.len(), "segmented calendar");

    events
        .iter()
        .enumerate()
        .map(|(idx, event)| {
            normalize_event(event).with_context(|| format!("parsing event #{}", idx + 1))
        })
        .collect()
}

fn normalize_event(event: &segment::RawEvent) -> Result<FieldRecord, Error> {
    let record = normalize::normalize(event)?;
    record.ensure_arity(&EVENT_COLUMNS)?;

    Ok(record)
}

pub fn extract_courses(records: &[FieldRecord], policy: &NamePolicy) -> Result<Vec<CourseEntry>, Error> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            course::extract(record, policy).with_context(|| format!("reading course of event #{}", idx + 1))
        })
        .collect()
}

/// Courses taught by non-permanent staff, in chronological order.
pub fn vacataire_courses(records: &[FieldRecord], policy: &NamePolicy) -> Result<Vec<CourseEntry>, Error> {
    let courses = extract_courses(records, policy)?;
    let total = courses.len();

    let filtered = filter_instructors(courses, policy);
    info!(courses = total, kept = filtered.len(), "filtered instructors");

    Ok(filtered)
}
