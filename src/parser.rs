use anyhow::{bail, Context, Error};
use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct LineParser;

/// One unfolded content line, split into its name and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    /// Split a logical line on its first colon.
    ///
    /// Everything before the colon is the property name with optional
    /// `;`-separated parameters, everything after is the raw value.
    pub fn parse(line: &str) -> Result<Property, Error> {
        let pair = LineParser::parse(Rule::content_line, line)
            .with_context(|| format!("invalid content line {:?}", line))?
            .next()
            .with_context(|| format!("empty content line {:?}", line))?;

        Property::from_pair(pair)
    }

    fn from_pair(pair: Pair<Rule>) -> Result<Property, Error> {
        let span = pair.as_span();
        let mut name = None;
        let mut value = None;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::property_value => value = Some(inner_pair.as_str().to_string()),
                _ => bail!("Unexpected type {:?}", inner_pair.as_rule()),
            }
        }

        if let (Some(name), Some(value)) = (name, value) {
            Ok(Property { name, value })
        } else {
            bail!("No name for property: {:?}", span.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_colon() {
        let prop = Property::parse("DESCRIPTION:BUT RT1 TD1 DUPONT MARIE (Salle 12: B)").unwrap();

        assert_eq!(prop.name, "DESCRIPTION");
        assert_eq!(prop.value, "BUT RT1 TD1 DUPONT MARIE (Salle 12: B)");
    }

    #[test]
    fn skips_parameters() {
        let prop = Property::parse("DTSTART;TZID=Europe/Paris;VALUE=DATE-TIME:20240115T090000")
            .unwrap();

        assert_eq!(
            prop,
            Property {
                name: "DTSTART".to_string(),
                value: "20240115T090000".to_string(),
            }
        );

        let prop = Property::parse("ATTENDEE;ROLE=REQ-PARTICIPANT;X-FLAG:mailto:a@b.fr").unwrap();
        assert_eq!(prop.name, "ATTENDEE");
        assert_eq!(prop.value, "mailto:a@b.fr");
    }

    #[test]
    fn empty_value() {
        let prop = Property::parse("LOCATION:").unwrap();

        assert_eq!(prop.name, "LOCATION");
        assert_eq!(prop.value, "");
    }

    #[test]
    fn missing_colon() {
        assert!(Property::parse("VCALENDAR").is_err());
        assert!(Property::parse(":no name").is_err());
    }
}
