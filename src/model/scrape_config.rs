use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::scrape::ScrapeError;
use crate::model::department::{Department, DepartmentQuery, Level, Session};

pub const DEFAULT_BASE_URL: &str = "http://fcms.concordia.ca/fcms/asc002_stud_all.aspx";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Truncate the output file before writing.
    #[default]
    Overwrite,
    Append,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Treat rows too short to classify as ignorable instead of failing the course.
    pub lenient: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub year: String,
    pub session: Session,
    pub level: Level,
    pub departments: Vec<Department>,
    pub output: PathBuf,
    pub write_mode: WriteMode,
    pub lenient: bool,
    pub concurrency: usize,
    pub retries: u32,
    pub timeout_secs: u64,
    /// Directory that receives a copy of each fetched page, as `<key>.html`.
    pub save_html: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            year: "2014".to_string(),
            session: Session::All,
            level: Level::All,
            departments: Department::ALL.to_vec(),
            output: PathBuf::from("courses.jsonl"),
            write_mode: WriteMode::Overwrite,
            lenient: false,
            concurrency: 2,
            retries: 2,
            timeout_secs: 30,
            save_html: None,
        }
    }
}

impl ScrapeConfig {
    /// Loads a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ScrapeError::with_context(&format!("reading {}", path.display()), e))?;
        serde_json::from_str(&text)
            .map_err(|e| ScrapeError::with_context(&format!("parsing {}", path.display()), e))
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            lenient: self.lenient,
        }
    }

    pub fn queries(&self) -> Vec<DepartmentQuery> {
        self.departments
            .iter()
            .map(|&department| DepartmentQuery {
                department,
                year: self.year.clone(),
                session: self.session,
                level: self.level,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"year": "2013", "departments": ["encs"], "write_mode": "append", "lenient": true}}"#
        )
        .unwrap();

        let config = ScrapeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.year, "2013");
        assert_eq!(config.departments, vec![Department::Encs]);
        assert_eq!(config.write_mode, WriteMode::Append);
        assert!(config.parse_options().lenient);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.save_html, None);
    }

    #[test]
    fn save_html_directory_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"save_html": "pages/2014"}}"#).unwrap();
        let config = ScrapeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.save_html, Some(PathBuf::from("pages/2014")));
    }

    #[test]
    fn bad_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = ScrapeConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("parsing "));
    }

    #[test]
    fn one_query_per_department() {
        let config = ScrapeConfig {
            departments: vec![Department::Jmsb, Department::FineArts],
            session: Session::Winter,
            ..ScrapeConfig::default()
        };
        let queries = config.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].department, Department::FineArts);
        assert_eq!(queries[1].session, Session::Winter);
        assert_eq!(queries[0].year, "2014");
    }
}
