use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::core::tree::{self, NodeKind};
use crate::error::parse::RowFault;
use crate::model::scrape_config::ParseOptions;

pub const PREREQUISITE_MARKER: &str = "Prerequisite:";
pub const SPECIAL_NOTE_MARKER: &str = "Special Note:";
pub const SLOT_MARKERS: [&str; 4] = ["/1", "/2", "/3", "/4"];

/// Cells a time-slot row has beyond the leading spacer columns.
const MIN_TIME_ROW_CELLS: usize = 6;

/// Column positions on continuation rows.
pub const LABEL_CELL: usize = 2;
pub const PAYLOAD_CELL: usize = 3;

static MARKER_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/\d+$").unwrap());

/// One `<tr>` of the schedule table with its cells in column order.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub element: ElementRef<'a>,
    pub cells: Vec<ElementRef<'a>>,
}

impl<'a> Row<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        let cells = tree::children(element)
            .iter()
            .filter_map(NodeKind::as_element)
            .collect();
        Row { element, cells }
    }

    pub fn cell(&self, index: usize) -> Option<ElementRef<'a>> {
        self.cells.get(index).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Prerequisite(String),
    SpecialNote(String),
    TimeSlot,
    Ignore,
}

/// Decides what a continuation row holds. First matching rule wins:
/// label cell mentions `Prerequisite:`, label cell mentions `Special Note:`,
/// a wide row whose label cell starts with a slot marker, anything else.
pub fn classify(row: &Row<'_>, options: &ParseOptions) -> Result<RowKind, RowFault> {
    let Some(label_cell) = row.cell(LABEL_CELL) else {
        if options.lenient {
            return Ok(RowKind::Ignore);
        }
        return Err(RowFault::Missing("label cell"));
    };
    let label = tree::element_text(label_cell);

    if label.contains(PREREQUISITE_MARKER) {
        return payload(row).map(RowKind::Prerequisite);
    }
    if label.contains(SPECIAL_NOTE_MARKER) {
        return payload(row).map(RowKind::SpecialNote);
    }

    if row.len() >= MIN_TIME_ROW_CELLS {
        if let Some(token) = slot_token(label_cell) {
            if SLOT_MARKERS.contains(&token.as_str()) {
                return Ok(RowKind::TimeSlot);
            }
            if MARKER_SHAPE.is_match(&token) {
                return Err(RowFault::UnexpectedMarker(token));
            }
        }
    }

    Ok(RowKind::Ignore)
}

/// First text token inside the label cell, e.g. `/1` from `<td><font><b>/1</b>`.
pub fn slot_token(label_cell: ElementRef<'_>) -> Option<String> {
    NodeKind::Element(label_cell).first_text()
}

/// Text of the payload cell that follows a `Prerequisite:` or `Special Note:` label.
fn payload(row: &Row<'_>) -> Result<String, RowFault> {
    row.cell(PAYLOAD_CELL)
        .map(tree::element_text)
        .ok_or(RowFault::Missing("note payload cell"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn with_row<T>(cells: &str, f: impl FnOnce(&Row<'_>) -> T) -> T {
        let html = format!("<table><tr bgcolor=\"White\" align=\"left\">{}</tr></table>", cells);
        let doc = Html::parse_document(&html);
        let selector = Selector::parse("tr").unwrap();
        let row = Row::new(doc.select(&selector).next().unwrap());
        f(&row)
    }

    fn strict() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn prerequisite_row() {
        let kind = with_row(
            "<td></td><td></td><td><font>Prerequisite:</font></td><td><font>COMP 202 or COMP 208</font></td>",
            |row| classify(row, &strict()),
        );
        assert_eq!(kind, Ok(RowKind::Prerequisite("COMP 202 or COMP 208".into())));
    }

    #[test]
    fn special_note_row() {
        let kind = with_row(
            "<td></td><td></td><td>Special Note:</td><td> Lab fees apply. </td>",
            |row| classify(row, &strict()),
        );
        assert_eq!(kind, Ok(RowKind::SpecialNote("Lab fees apply.".into())));
    }

    #[test]
    fn prerequisite_wins_over_time_shape() {
        let kind = with_row(
            "<td></td><td></td><td>/1 Prerequisite:</td><td>MATH 203</td><td></td><td></td><td></td>",
            |row| classify(row, &strict()),
        );
        assert_eq!(kind, Ok(RowKind::Prerequisite("MATH 203".into())));
    }

    #[test]
    fn every_slot_marker_is_a_time_row() {
        for marker in SLOT_MARKERS {
            let cells = format!(
                "<td></td><td></td><td><font><b>{}</b></font></td><td></td><td></td><td></td>",
                marker
            );
            let kind = with_row(&cells, |row| classify(row, &strict()));
            assert_eq!(kind, Ok(RowKind::TimeSlot), "marker {}", marker);
        }
    }

    #[test]
    fn narrow_row_with_marker_is_ignored() {
        let kind = with_row(
            "<td></td><td></td><td><b>/1</b></td><td>Lecture</td><td>Mon</td>",
            |row| classify(row, &strict()),
        );
        assert_eq!(kind, Ok(RowKind::Ignore));
    }

    #[test]
    fn unknown_marker_on_time_shaped_row() {
        let kind = with_row(
            "<td></td><td></td><td><b>/7</b></td><td></td><td></td><td></td>",
            |row| classify(row, &strict()),
        );
        assert_eq!(kind, Err(RowFault::UnexpectedMarker("/7".into())));
    }

    #[test]
    fn other_wide_rows_are_ignored() {
        let kind = with_row(
            "<td></td><td></td><td>Section</td><td>Type</td><td>Time</td><td>Room</td>",
            |row| classify(row, &strict()),
        );
        assert_eq!(kind, Ok(RowKind::Ignore));
    }

    #[test]
    fn short_row_depends_on_leniency() {
        let cells = "<td colspan=\"7\">&nbsp;</td>";
        assert_eq!(
            with_row(cells, |row| classify(row, &strict())),
            Err(RowFault::Missing("label cell"))
        );
        assert_eq!(
            with_row(cells, |row| classify(row, &ParseOptions { lenient: true })),
            Ok(RowKind::Ignore)
        );
    }

    #[test]
    fn note_without_payload_is_malformed() {
        let kind = with_row("<td></td><td></td><td>Special Note:</td>", |row| {
            classify(row, &ParseOptions { lenient: true })
        });
        assert_eq!(kind, Err(RowFault::Missing("note payload cell")));
    }
}
