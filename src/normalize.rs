use anyhow::{bail, ensure, Context, Error};

use crate::{
    parser::Property,
    segment::{RawEvent, BEGIN_EVENT, END_EVENT},
};

/// Columns of an ADE event, in the order the export writes them.
pub const EVENT_COLUMNS: [&str; 10] = [
    "DTSTAMP",
    "DTSTART",
    "DTEND",
    "SUMMARY",
    "LOCATION",
    "DESCRIPTION",
    "UID",
    "CREATED",
    "LAST-MODIFIED",
    "SEQUENCE",
];

/// A literal `\n` escape as written in the export.
const ESCAPED_NEWLINE: &str = "\\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// The fields of one event, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    fields: Vec<Field>,
}

impl FieldRecord {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Value of the field at `idx`.
    pub fn value(&self, idx: usize) -> Result<&str, Error> {
        self.fields
            .get(idx)
            .map(|field| field.value.as_str())
            .with_context(|| format!("event has no field #{} ({} fields)", idx, self.len()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|field| field.value.as_str())
    }

    pub fn ensure_arity(&self, columns: &[&str]) -> Result<(), Error> {
        ensure!(
            self.len() == columns.len(),
            "event has {} fields, expected {} ({})",
            self.len(),
            columns.len(),
            self.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(", ")
        );

        Ok(())
    }
}

/// Turn an event's lines into its field values.
///
/// Continuation lines are glued onto the previous value before anything is
/// split, so folded values come back whole.
pub fn normalize(event: &RawEvent) -> Result<FieldRecord, Error> {
    let mut fields: Vec<Field> = Vec::new();

    for line in event.lines() {
        let raw = line.as_str();
        if raw.is_empty() || raw == BEGIN_EVENT || raw == END_EVENT {
            continue;
        }

        let raw = raw.replace(ESCAPED_NEWLINE, " ");

        if line.is_continuation() {
            let last = match fields.last_mut() {
                Some(last) => last,
                None => bail!("continuation line {:?} has no field to continue", raw),
            };
            last.value.push_str(raw.trim());
        } else {
            let property = Property::parse(&raw)?;
            fields.push(Field {
                name: property.name,
                value: property.value.trim().to_string(),
            });
        }
    }

    Ok(FieldRecord { fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{loader::lines_from_str, segment::segment};

    fn first_event(data: &str) -> RawEvent {
        segment(&lines_from_str(data)).unwrap().remove(0)
    }

    #[test]
    fn strips_names_and_joins_folds() {
        let event = first_event(
            "BEGIN:VEVENT\n\
             DTSTART:20240115T090000Z\n\
             SUMMARY: Réseaux locaux \n\
             DESCRIPTION:\\nBUT RT1 TD1\\nDUPONT MA\n RIE\\n(Exporté le:10/01/2024)\n\
             END:VEVENT",
        );

        let record = normalize(&event).unwrap();

        assert_eq!(
            record.values().collect::<Vec<_>>(),
            vec![
                "20240115T090000Z",
                "Réseaux locaux",
                "BUT RT1 TD1 DUPONT MARIE (Exporté le:10/01/2024)",
            ]
        );
        assert_eq!(record.fields()[2].name, "DESCRIPTION");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let event = first_event("BEGIN:VEVENT\nSUMMARY:A\n\nLOCATION:B\nEND:VEVENT");

        assert_eq!(normalize(&event).unwrap().len(), 2);
    }

    #[test]
    fn leading_continuation_is_an_error() {
        let event = first_event("BEGIN:VEVENT\n orphan\nEND:VEVENT");

        assert!(normalize(&event).is_err());
    }

    #[test]
    fn arity() {
        let event = first_event("BEGIN:VEVENT\nSUMMARY:A\nEND:VEVENT");
        let record = normalize(&event).unwrap();

        assert!(record.ensure_arity(&["SUMMARY"]).is_ok());
        assert!(record.ensure_arity(&EVENT_COLUMNS).is_err());
        assert!(record.value(1).is_err());
    }
}
