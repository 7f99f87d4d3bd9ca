//! Course schedule scraper: turns the faculty course-listing pages of the
//! class schedule site into structured course records.

pub mod core;
pub mod error;
pub mod http;
pub mod model;
pub mod utils;

pub use crate::core::course_builder::build_course;
pub use crate::core::html_parser::parse_department;
pub use crate::core::runner::run;
pub use crate::error::{ParseError, ScrapeError};
pub use crate::model::{CourseRecord, DepartmentReport, ParseOptions, ScrapeConfig, TimeSlot};
