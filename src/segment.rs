use anyhow::{bail, ensure, Error};
use tracing::{trace, warn};

use crate::loader::RawLine;

pub const BEGIN_EVENT: &str = "BEGIN:VEVENT";
pub const END_EVENT: &str = "END:VEVENT";

/// The lines between one `BEGIN:VEVENT` and its `END:VEVENT`, delimiters
/// excluded. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    lines: Vec<RawLine>,
}

impl RawEvent {
    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }
}

/// Group a flat line sequence into events.
///
/// Lines outside of any event (calendar header, `END:VCALENDAR`, ...) are
/// ignored. A `BEGIN:VEVENT` seen while an event is still open discards the
/// partial event.
pub fn segment(lines: &[RawLine]) -> Result<Vec<RawEvent>, Error> {
    let mut events = Vec::new();
    let mut current: Option<(usize, Vec<RawLine>)> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;

        match line.as_str() {
            BEGIN_EVENT => {
                if let Some((start, partial)) = current.take() {
                    warn!(
                        start,
                        discarded = partial.len(),
                        "event opened on line {} was never closed, discarding it",
                        start
                    );
                }
                current = Some((line_no, Vec::new()));
            }
            END_EVENT => {
                let (start, lines) = match current.take() {
                    Some(open) => open,
                    None => bail!("{} on line {} without matching {}", END_EVENT, line_no, BEGIN_EVENT),
                };
                ensure!(!lines.is_empty(), "event opened on line {} has no content", start);

                events.push(RawEvent { lines });
            }
            _ => match &mut current {
                Some((_, lines)) => lines.push(line.clone()),
                None => trace!(line_no, "skipping line outside of an event"),
            },
        }
    }

    if let Some((start, _)) = current {
        bail!("event opened on line {} is missing its {}", start, END_EVENT);
    }

    ensure!(!events.is_empty(), "document contains no {} block", BEGIN_EVENT);

    Ok(events)
}
