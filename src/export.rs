use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Error};
use chrono::NaiveDate;

use crate::{
    course::CourseEntry,
    normalize::{FieldRecord, EVENT_COLUMNS},
};

pub const COURSE_COLUMNS: [&str; 4] = ["Date", "Heure", "Cours", "Vacataire"];

/// Name shared by the CSV and PNG outputs of a run, e.g. `vacataire_15-01-2024`.
pub fn artifact_stem(reference: NaiveDate) -> String {
    format!("vacataire_{}", reference.format("%d-%m-%Y"))
}

/// Write every normalized event, one row per event.
pub fn write_records<W: Write>(writer: W, records: &[FieldRecord]) -> Result<(), Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&EVENT_COLUMNS)?;
    for record in records {
        csv.write_record(record.values())?;
    }
    csv.flush()?;

    Ok(())
}

pub fn write_courses<W: Write>(writer: W, courses: &[CourseEntry]) -> Result<(), Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&COURSE_COLUMNS)?;
    for course in courses {
        csv.write_record(&[
            course.date_label(),
            course.time_label(),
            course.title.clone(),
            course.instructor.clone(),
        ])?;
    }
    csv.flush()?;

    Ok(())
}

pub fn save_records(path: &Path, records: &[FieldRecord]) -> Result<(), Error> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_records(file, records).with_context(|| format!("writing {}", path.display()))
}

pub fn save_courses(path: &Path, courses: &[CourseEntry]) -> Result<(), Error> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_courses(file, courses).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn courses_table() {
        let courses = vec![CourseEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            title: "R101, Réseaux".to_string(),
            instructor: "DUPONT MARIE".to_string(),
        }];

        let mut out = Vec::new();
        write_courses(&mut out, &courses).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Heure,Cours,Vacataire\n15/01/2024,09h00,\"R101, Réseaux\",DUPONT MARIE\n"
        );
    }

    #[test]
    fn empty_tables_keep_their_header() {
        let mut out = Vec::new();
        write_records(&mut out, &[]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "DTSTAMP,DTSTART,DTEND,SUMMARY,LOCATION,DESCRIPTION,UID,CREATED,LAST-MODIFIED,SEQUENCE\n"
        );
    }

    #[test]
    fn stem() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        assert_eq!(artifact_stem(date), "vacataire_05-01-2024");
    }
}
