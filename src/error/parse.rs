use thiserror::Error;

/// Why a course could not be built. Every variant names the course and the row
/// (0 is the header row, 1 the first row after it, and so on).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed row {row} in course {course}: missing {missing}")]
    MalformedRow {
        course: String,
        row: usize,
        missing: &'static str,
    },

    #[error("unexpected slot marker {marker:?} at row {row} in course {course}")]
    UnexpectedMarker {
        course: String,
        row: usize,
        marker: String,
    },

    #[error("empty required field `{field}` at row {row} in course {course}")]
    EmptyRequiredField {
        course: String,
        row: usize,
        field: &'static str,
    },
}

impl ParseError {
    /// Row of the failure, counted from the course header (0).
    pub fn row(&self) -> usize {
        match self {
            ParseError::MalformedRow { row, .. }
            | ParseError::UnexpectedMarker { row, .. }
            | ParseError::EmptyRequiredField { row, .. } => *row,
        }
    }
}

/// A row-level failure before the course context is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFault {
    Missing(&'static str),
    UnexpectedMarker(String),
    EmptyField(&'static str),
}

impl RowFault {
    pub fn at(self, course: &str, row: usize) -> ParseError {
        let course = course.to_string();
        match self {
            RowFault::Missing(missing) => ParseError::MalformedRow { course, row, missing },
            RowFault::UnexpectedMarker(marker) => ParseError::UnexpectedMarker { course, row, marker },
            RowFault::EmptyField(field) => ParseError::EmptyRequiredField { course, row, field },
        }
    }
}
