use std::sync::LazyLock;

use log::{info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::core::course_builder::{build_course, header_code, is_header_row};
use crate::model::report::{DepartmentReport, SkippedCourse};
use crate::model::scrape_config::ParseOptions;

/// Id of the table that holds the course listing on the schedule page.
pub const SCHEDULE_TABLE_ID: &str = "ctl00_PageBody_tblBodyShow1";

static SCHEDULE_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("#{}", SCHEDULE_TABLE_ID)).unwrap());
static ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr[bgcolor]").unwrap());

/// Parses every course on a department page.
///
/// A course that fails to build is recorded in `skipped` and the pass moves on
/// to the next header row.
pub fn parse_department(html: &str, options: &ParseOptions) -> DepartmentReport {
    let document = Html::parse_document(html);
    let mut report = DepartmentReport::default();

    for (position, header) in header_rows(&document).into_iter().enumerate() {
        match build_course(header, options) {
            Ok(course) => report.courses.push(course),
            Err(err) => {
                warn!("skipping course #{}: {}", position, err);
                report.skipped.push(SkippedCourse {
                    position,
                    code: header_code(header),
                    row: err.row(),
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        "parsed {} courses, skipped {}",
        report.courses.len(),
        report.skipped.len()
    );
    report
}

/// Header rows of the schedule table, in document order.
pub fn header_rows(document: &Html) -> Vec<ElementRef<'_>> {
    let rows: Vec<_> = match document.select(&SCHEDULE_TABLE).next() {
        Some(table) => table.select(&ROWS).collect(),
        None => {
            warn!("table #{} not found, scanning the whole page", SCHEDULE_TABLE_ID);
            document.select(&ROWS).collect()
        }
    };
    rows.into_iter().filter(|row| is_header_row(*row)).collect()
}
