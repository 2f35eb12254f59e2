//! Command line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser, Debug)]
#[command(
    name = "vacataires",
    version,
    about = "Prochaine intervention des vacataires à partir d'un export ADE",
    long_about = "Reads an ADE calendar export, writes it out as CSV, then lists the next \
                  course of every non-permanent instructor after a reference date, as a CSV \
                  table and a timeline image."
)]
pub struct Cli {
    /// Calendar export to read.
    #[arg(value_name = "INPUT", default_value = "ADECal.ics")]
    pub input: PathBuf,

    /// Directory receiving the generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Name policy (denylist, noise tokens) replacing the built-in one.
    #[arg(long = "policy", value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Reference date (JJ/MM/AAAA); asked interactively when missing.
    #[arg(long = "date", value_name = "JJ/MM/AAAA")]
    pub date: Option<String>,

    /// Skip the timeline image.
    #[arg(long = "no-chart")]
    pub no_chart: bool,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "full")]
    pub log_format: LogFormatArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    /// One line per event with its fields.
    Full,
    Compact,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::from_flags(self.verbose, self.quiet);
        config.format = match self.log_format {
            LogFormatArg::Full => LogFormat::Full,
            LogFormatArg::Compact => LogFormat::Compact,
        };
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["vacataires"]).unwrap();

        assert_eq!(cli.input, PathBuf::from("ADECal.ics"));
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(cli.date.is_none());
        assert!(!cli.no_chart);
        assert_eq!(cli.log_config().level, LevelFilter::WARN);
        assert_eq!(cli.log_config().format, LogFormat::Full);
    }

    #[test]
    fn log_formats() {
        let cli = Cli::try_parse_from(["vacataires", "--log-format", "full"]).unwrap();
        assert_eq!(cli.log_config().format, LogFormat::Full);

        assert!(Cli::try_parse_from(["vacataires", "--log-format", "pretty"]).is_err());
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from([
            "vacataires",
            "export.ics",
            "--date",
            "15/01/2024",
            "--output-dir",
            "out",
            "-vv",
            "--log-format",
            "compact",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("export.ics"));
        assert_eq!(cli.date.as_deref(), Some("15/01/2024"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));

        let config = cli.log_config();
        assert_eq!(config.level, LevelFilter::DEBUG);
        assert_eq!(config.format, LogFormat::Compact);

        assert!(Cli::try_parse_from(["vacataires", "-v", "-q"]).is_err());
    }
}
