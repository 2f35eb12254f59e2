//! Timeline chart of the selected courses.
//!
//! The chart is laid out as an SVG document, then rasterized to PNG with
//! `resvg`. One stem per distinct date: the stem rises above the axis with
//! the instructors of that day and drops below it with the date.

use std::path::Path;

use anyhow::{Context, Error};
use chrono::NaiveDate;
use quick_xml::escape::escape;
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::course::{format_date, CourseEntry};

const WIDTH: f64 = 1600.0;
const HEIGHT: f64 = 900.0;
const MARGIN: f64 = 60.0;
const TITLE_Y: f64 = 50.0;
const AXIS_Y: f64 = 640.0;
/// Room for the annotation to the right of the last stem.
const RIGHT_PAD: f64 = 260.0;
const BELOW_STEP: f64 = 35.0;
/// Stems below the axis cycle through this many lengths.
const BELOW_LEVELS: usize = 5;
const FONT: &str = "DejaVu Sans, Liberation Sans, Arial, sans-serif";
const COLORS: [&str; 6] = ["#1f4fd1", "#1a8a2e", "#d12a1f", "#11a3b5", "#b51fa8", "#c9a500"];
const PNG_SCALE: f32 = 2.0;

/// Everything on one date of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub date: NaiveDate,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub title: String,
    pub stops: Vec<Stop>,
}

impl Timeline {
    /// Group `courses` (sorted by date) into one stop per date.
    pub fn from_courses(courses: &[CourseEntry], reference: NaiveDate) -> Timeline {
        let mut stops: Vec<Stop> = Vec::new();

        for course in courses {
            let label = format!(
                "{} ({} à {})",
                course.instructor,
                course.title,
                course.time_label()
            );

            match stops.last_mut() {
                Some(stop) if stop.date == course.date => stop.labels.push(label),
                _ => stops.push(Stop {
                    date: course.date,
                    labels: vec![label],
                }),
            }
        }

        Timeline {
            title: format!(
                "Date de la prochaine intervention des vacataires à compter du {}",
                format_date(reference)
            ),
            stops,
        }
    }

    /// Horizontal position of every stop, proportional to elapsed days.
    fn positions(&self) -> Vec<f64> {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Vec::new(),
        };

        let span = (last - first).num_days() as f64;
        let usable = WIDTH - 2.0 * MARGIN - RIGHT_PAD;

        self.stops
            .iter()
            .map(|stop| {
                if span == 0.0 {
                    MARGIN + usable / 2.0
                } else {
                    MARGIN + usable * (stop.date - first).num_days() as f64 / span
                }
            })
            .collect()
    }
}

pub fn render_svg(timeline: &Timeline) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = WIDTH,
        h = HEIGHT,
        font = FONT,
    ));
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="white"/>"#,
        WIDTH, HEIGHT
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" font-size="24" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        TITLE_Y,
        escape(timeline.title.as_str())
    ));

    // Axis with its arrow head.
    let axis_end = WIDTH - MARGIN;
    svg.push_str(&format!(
        r##"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="#7fd3df" stroke-width="14"/>"##,
        MARGIN,
        axis_end - 30.0,
        y = AXIS_Y
    ));
    svg.push_str(&format!(
        r##"<polygon points="{},{} {},{} {},{}" fill="#7fd3df"/>"##,
        axis_end - 30.0,
        AXIS_Y - 22.0,
        axis_end,
        AXIS_Y,
        axis_end - 30.0,
        AXIS_Y + 22.0
    ));

    if timeline.stops.is_empty() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="18" text-anchor="middle">Aucun cours</text>"#,
            WIDTH / 2.0,
            AXIS_Y - 60.0
        ));
    }

    let count = timeline.stops.len();
    let rise_step = (AXIS_Y - TITLE_Y - 60.0) / count.max(1) as f64;

    for (idx, (stop, x)) in timeline.stops.iter().zip(timeline.positions()).enumerate() {
        // Earlier dates get the taller stems so their labels stay clear.
        let level = count - idx;
        let top = AXIS_Y - level as f64 * rise_step;
        let bottom = AXIS_Y + ((level % BELOW_LEVELS) + 1) as f64 * BELOW_STEP;
        let color = COLORS[idx % COLORS.len()];

        svg.push_str(&format!(
            r#"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{c}" stroke-width="2"/>"#,
            top,
            bottom,
            x = x,
            c = color
        ));
        for y in &[top, AXIS_Y, bottom] {
            svg.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="5" fill="{}"/>"#,
                x, y, color
            ));
        }

        let text_x = x + 10.0;
        svg.push_str(&format!(r#"<text x="{}" y="{}" font-size="12">"#, text_x, top + 4.0));
        for (line, label) in stop.labels.iter().enumerate() {
            let dy = if line == 0 { "0" } else { "1.2em" };
            svg.push_str(&format!(
                r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                text_x,
                dy,
                escape(label.as_str())
            ));
        }
        svg.push_str("</text>");

        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12">{}</text>"#,
            text_x,
            bottom + 4.0,
            format_date(stop.date)
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Rasterize the chart into a PNG file.
pub fn save_png(timeline: &Timeline, path: &Path) -> Result<(), Error> {
    let svg = render_svg(timeline);

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&svg, &options).context("building timeline chart")?;

    let size = tree.size();
    let width = (size.width() * PNG_SCALE).ceil() as u32;
    let height = (size.height() * PNG_SCALE).ceil() as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).context("allocating timeline image")?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(PNG_SCALE, PNG_SCALE),
        &mut pixmap.as_mut(),
    );

    debug!(width, height, "rendered timeline");

    pixmap
        .save_png(path)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn course(day: u32, hour: u32, title: &str, instructor: &str) -> CourseEntry {
        CourseEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 30, 0).unwrap(),
            title: title.to_string(),
            instructor: instructor.to_string(),
        }
    }

    #[test]
    fn one_stop_per_date() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let timeline = Timeline::from_courses(
            &[
                course(15, 9, "R101", "DUPONT MARIE"),
                course(15, 14, "R102", "MARTIN PAUL"),
                course(18, 8, "R103", "BERNARD LUC"),
            ],
            reference,
        );

        assert_eq!(
            timeline.title,
            "Date de la prochaine intervention des vacataires à compter du 10/01/2024"
        );
        assert_eq!(timeline.stops.len(), 2);
        assert_eq!(
            timeline.stops[0].labels,
            vec!["DUPONT MARIE (R101 à 09h30)", "MARTIN PAUL (R102 à 14h30)"]
        );
        assert_eq!(timeline.stops[1].labels, vec!["BERNARD LUC (R103 à 08h30)"]);

        let positions = timeline.positions();
        assert_eq!(positions[0], MARGIN);
        assert_eq!(positions[1], WIDTH - MARGIN - RIGHT_PAD);
    }

    #[test]
    fn svg_holds_every_label() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let timeline = Timeline::from_courses(&[course(15, 9, "Maths & <Info>", "DUPONT MARIE")], reference);

        let svg = render_svg(&timeline);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("DUPONT MARIE (Maths &amp; &lt;Info&gt; à 09h30)"));
        assert!(svg.contains(">15/01/2024<"));
        assert!(svg.contains("à compter du 10/01/2024"));
    }

    #[test]
    fn empty_timeline_still_renders() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let svg = render_svg(&Timeline::from_courses(&[], reference));

        assert!(svg.contains("Aucun cours"));
    }
}
