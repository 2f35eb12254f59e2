//! The whole run: read, export, select, report.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Error};
use chrono::NaiveDate;
use tracing::info;

use crate::{
    cli::Cli,
    course::CourseEntry,
    export,
    pipeline,
    policy::NamePolicy,
    prompt,
    select::next_occurrences,
    timeline::{self, Timeline},
};

/// What a run produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub reference: NaiveDate,
    pub selected: Vec<CourseEntry>,
    pub records_csv: PathBuf,
    pub courses_csv: PathBuf,
    pub chart: Option<PathBuf>,
}

/// Run the tool. `input` answers the date prompt, `output` gets the
/// messages meant for the user.
pub fn run<R, W>(cli: &Cli, input: R, mut output: W) -> Result<Report, Error>
where
    R: BufRead,
    W: Write,
{
    let policy = match &cli.policy {
        Some(path) => NamePolicy::load(path)?,
        None => NamePolicy::builtin()?,
    };

    let records = pipeline::read_calendar(&cli.input)?;
    info!(events = records.len(), input = %cli.input.display(), "read calendar");

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;

    let records_csv = cli.output_dir.join(records_file_name(&cli.input));
    export::save_records(&records_csv, &records)?;
    writeln!(output, "\nLe fichier {} a été généré\n", records_csv.display())?;

    let courses = pipeline::vacataire_courses(&records, &policy)?;
    ensure!(
        !courses.is_empty(),
        "no course left after filtering {}",
        cli.input.display()
    );

    let reference = match &cli.date {
        Some(date) => prompt::check_reference(date, &courses)?,
        None => prompt::prompt_reference_date(input, &mut output, &courses)?,
    };

    let selected = next_occurrences(&courses, reference);
    info!(reference = %reference, instructors = selected.len(), "selected next courses");

    for course in &selected {
        writeln!(
            output,
            "Le prochain cours de l'enseignant {} a lieu le {} à {} pour un cours intitulé {}",
            course.instructor,
            course.date_label(),
            course.time_label(),
            course.title
        )?;
    }

    writeln!(
        output,
        "\nLes enseignants vacataires intervenant encore dans l'établissement après la date \
         saisie sont donnés dans les fichiers générés suivants :\n"
    )?;

    let stem = export::artifact_stem(reference);

    let courses_csv = cli.output_dir.join(format!("{}.csv", stem));
    export::save_courses(&courses_csv, &selected)?;
    writeln!(output, "        - {} (Tableau)", courses_csv.display())?;

    let chart = if cli.no_chart {
        None
    } else {
        let path = cli.output_dir.join(format!("{}.png", stem));
        timeline::save_png(&Timeline::from_courses(&selected, reference), &path)?;
        writeln!(output, "        - {} (Frise chronologique)", path.display())?;
        Some(path)
    };

    Ok(Report {
        reference,
        selected,
        records_csv,
        courses_csv,
        chart,
    })
}

/// `ADECal.ics` is exported as `ADECal.csv`.
fn records_file_name(input: &Path) -> PathBuf {
    let name = input.file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("calendar"));

    name.with_extension("csv")
}
