use std::fmt;
use std::io::BufRead;

use anyhow::{Context, Error};

/// A trimmed source line.
///
/// Folded lines keep a single leading space so the next stage can glue them
/// onto the field they continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine(String);

impl RawLine {
    pub fn new(line: &str) -> RawLine {
        if line.starts_with(' ') {
            RawLine(format!(" {}", line.trim()))
        } else {
            RawLine(line.trim().to_string())
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.0.starts_with(' ')
    }

    /// The line without its continuation marker.
    pub fn content(&self) -> &str {
        self.0.trim_start_matches(' ')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read every line of `reader`, marking continuation lines.
pub fn load_lines<R: BufRead>(reader: R) -> Result<Vec<RawLine>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            line.map(|line| RawLine::new(&line))
                .with_context(|| format!("reading line {}", idx + 1))
        })
        .collect()
}

pub fn lines_from_str(data: &str) -> Vec<RawLine> {
    data.lines().map(RawLine::new).collect()
}
