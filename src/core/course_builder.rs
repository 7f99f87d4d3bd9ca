use log::debug;
use scraper::ElementRef;

use crate::core::classifier::{Row, RowKind, classify};
use crate::core::time_slot::parse_time_slot;
use crate::core::tree::{self, NodeKind};
use crate::error::parse::{ParseError, RowFault};
use crate::model::course_record::CourseRecord;
use crate::model::scrape_config::ParseOptions;
use crate::utils::text::same_color;

/// Background color of a course's first row.
pub const HEADER_COLOR: &str = "LightBlue";
/// Background color that, without an `align` attribute, starts the next course's lead-in.
pub const LEAD_IN_COLOR: &str = "White";

const CODE_CELL: usize = 2;
const NAME_CELL: usize = 3;
const CREDITS_CELL: usize = 4;

pub fn is_header_row(element: ElementRef<'_>) -> bool {
    tree::is_row(element)
        && tree::attr(element, "bgcolor").is_some_and(|color| same_color(color, HEADER_COLOR))
}

/// Whether `node` still belongs to the course block being scanned.
fn continues_block<'a>(node: &NodeKind<'a>) -> Option<ElementRef<'a>> {
    let element = node.as_element().filter(|e| tree::is_row(*e))?;
    let color = tree::attr(element, "bgcolor")?;
    if same_color(color, HEADER_COLOR) {
        return None;
    }
    if same_color(color, LEAD_IN_COLOR) && tree::attr(element, "align").is_none() {
        return None;
    }
    Some(element)
}

/// Builds one course from its header row and the continuation rows that follow it.
///
/// The walk stops before the first sibling that is not a colored row, is the
/// next header row, or is a `White` row without `align`. That row is left
/// untouched for the caller.
pub fn build_course(header: ElementRef<'_>, options: &ParseOptions) -> Result<CourseRecord, ParseError> {
    let mut course = read_header(header)?;
    debug!("course {}: {}", course.code, course.name);

    let mut index = 0;
    let mut next = tree::next_sibling(header);
    while let Some(element) = next.as_ref().and_then(continues_block) {
        index += 1;
        let row = Row::new(element);
        match classify(&row, options).map_err(|fault| fault.at(&course.code, index))? {
            RowKind::Prerequisite(text) => {
                if let Some(previous) = course.prereq.replace(text) {
                    debug!("{}: prerequisite {:?} replaced by row {}", course.code, previous, index);
                }
            }
            RowKind::SpecialNote(text) => {
                if let Some(previous) = course.special_note.replace(text) {
                    debug!("{}: special note {:?} replaced by row {}", course.code, previous, index);
                }
            }
            RowKind::TimeSlot => {
                let slot = parse_time_slot(&row).map_err(|fault| fault.at(&course.code, index))?;
                course.times.push(slot);
            }
            RowKind::Ignore => debug!("{}: row {} ignored", course.code, index),
        }
        next = tree::next_sibling(element);
    }

    Ok(course)
}

/// Reads code, name and credits from cells 2, 3 and 4 of the header row.
fn read_header(header: ElementRef<'_>) -> Result<CourseRecord, ParseError> {
    let row = Row::new(header);
    let field = |index: usize| row.cell(index).map(tree::element_text).unwrap_or_default();

    let code = field(CODE_CELL);
    if code.is_empty() {
        return Err(RowFault::EmptyField("code").at("<unknown>", 0));
    }
    let name = field(NAME_CELL);
    if name.is_empty() {
        return Err(RowFault::EmptyField("name").at(&code, 0));
    }
    let credits = field(CREDITS_CELL);
    if credits.is_empty() {
        return Err(RowFault::EmptyField("credits").at(&code, 0));
    }

    Ok(CourseRecord {
        code,
        name,
        credits,
        ..CourseRecord::default()
    })
}

/// Course code of a header row, if readable. Used to label skipped courses.
pub fn header_code(header: ElementRef<'_>) -> Option<String> {
    Row::new(header)
        .cell(CODE_CELL)
        .map(tree::element_text)
        .filter(|code| !code.is_empty())
}
