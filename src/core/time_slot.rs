//! Field extraction for time-slot rows.
//!
//! Layout of a time-slot row (0-based cells):
//!
//! | cell | content                                   |
//! |------|-------------------------------------------|
//! | 2    | slot marker, `<font><b>/1</b></font>`      |
//! | 3    | component name, one or more `<b>` pieces  |
//! | 4    | time, first `<b>` holds one or two values |
//! | 5    | location, first `<b>` like the time cell  |
//! | 6    | professors (optional cell), same          |
//!
//! Cells without a `<b>` fall back to their innermost wrapper element, so
//! `<td><font>H 110</font></td>` and `<td><b>H 110</b></td>` read alike.
//!
//! Two-value cells interleave data with a separator node (`<br>` or similar):
//! `[value, separator, value, ...]`. Separators are skipped by position.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::core::classifier::{LABEL_CELL, Row, slot_token};
use crate::core::tree::NodeKind;
use crate::error::parse::RowFault;
use crate::model::course_record::TimeSlot;

pub const CANCELLED_MARKER: &str = "*Cancelled*";

const NAME_CELL: usize = 3;
const TIME_CELL: usize = 4;
const LOCATION_CELL: usize = 5;
const PROFESSOR_CELL: usize = 6;

static BOLD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("b").unwrap());

pub fn parse_time_slot(row: &Row<'_>) -> Result<TimeSlot, RowFault> {
    let session = session(row)?;
    let name = component_name(row)?;
    let cancelled = name.contains(CANCELLED_MARKER);
    let time = time_of_day(row)?;
    let location = location(row)?;
    let professors = professors(row);

    Ok(TimeSlot {
        session,
        name,
        time,
        location,
        professors,
        cancelled,
    })
}

/// Cell 2: the slot marker token.
fn session(row: &Row<'_>) -> Result<String, RowFault> {
    let cell = row.cell(LABEL_CELL).ok_or(RowFault::Missing("session cell"))?;
    slot_token(cell)
        .filter(|s| !s.is_empty())
        .ok_or(RowFault::EmptyField("session"))
}

/// Cell 3: every bolded fragment, joined by single spaces.
fn component_name(row: &Row<'_>) -> Result<String, RowFault> {
    let cell = row.cell(NAME_CELL).ok_or(RowFault::Missing("name cell"))?;
    let name = cell
        .select(&BOLD)
        .map(|b| NodeKind::Element(b).text())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(name, "name")
}

/// Cell 4: the first `<b>` element, read as a one- or two-part value.
fn time_of_day(row: &Row<'_>) -> Result<String, RowFault> {
    let cell = row.cell(TIME_CELL).ok_or(RowFault::Missing("time cell"))?;
    let bold = cell
        .select(&BOLD)
        .next()
        .ok_or(RowFault::Missing("time value"))?;
    let value = two_part(NodeKind::Element(bold)).ok_or(RowFault::Missing("second time value"))?;
    non_empty(value, "time")
}

/// Cell 5, read like the time cell.
fn location(row: &Row<'_>) -> Result<String, RowFault> {
    let cell = row.cell(LOCATION_CELL).ok_or(RowFault::Missing("location cell"))?;
    let node = value_node(cell);
    let value = two_part(node).ok_or(RowFault::Missing("second location value"))?;
    non_empty(value, "location")
}

/// Cell 6, when present: names at even child positions of its value node.
/// A missing cell or an empty one (staff not yet assigned) gives no professors.
fn professors(row: &Row<'_>) -> Vec<String> {
    let Some(node) = row.cell(PROFESSOR_CELL).map(value_node) else {
        return Vec::new();
    };

    let children = node.children();
    let names = if children.len() > 1 {
        children.iter().step_by(2).map(NodeKind::text).collect()
    } else {
        vec![node.text()]
    };

    names.into_iter().filter(|name| !name.is_empty()).collect()
}

/// Element whose children hold a cell's value: the first `<b>`, otherwise the
/// innermost element reached through single-element wrappers. Never a text
/// node, so a `[value, separator, value]` split is always visible.
fn value_node(cell: ElementRef<'_>) -> NodeKind<'_> {
    if let Some(bold) = cell.select(&BOLD).next() {
        return NodeKind::Element(bold);
    }

    let mut node = cell;
    loop {
        match NodeKind::Element(node).children().as_slice() {
            [NodeKind::Element(only)] => node = *only,
            _ => return NodeKind::Element(node),
        }
    }
}

/// `child0 + " " + child2` when the node has more than one child, else its only value.
/// `None` when the second value is missing.
fn two_part(node: NodeKind<'_>) -> Option<String> {
    let children = node.children();
    if children.len() > 1 {
        let second = children.get(2)?;
        Some(format!("{} {}", children[0].text(), second.text()).trim().to_string())
    } else {
        Some(node.text())
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, RowFault> {
    if value.is_empty() {
        Err(RowFault::EmptyField(field))
    } else {
        Ok(value)
    }
}
