pub mod course_record;
pub mod department;
pub mod report;
pub mod scrape_config;

pub use course_record::{CourseRecord, TimeSlot};
pub use department::{Department, DepartmentQuery, Level, Session};
pub use report::{DepartmentReport, DepartmentSummary, RunSummary, SkippedCourse};
pub use scrape_config::{ParseOptions, ScrapeConfig, WriteMode};
