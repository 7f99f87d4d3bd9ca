use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use log::debug;
use serde::Serialize;

use crate::error::scrape::ScrapeError;
use crate::model::course_record::CourseRecord;
use crate::model::department::Department;
use crate::model::scrape_config::WriteMode;

/// Destination for parsed courses, one department at a time.
pub trait CourseWriter {
    fn write_department(
        &mut self,
        department: Department,
        courses: &[CourseRecord],
    ) -> Result<(), ScrapeError>;

    fn finish(&mut self) -> Result<(), ScrapeError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct OutputLine<'a> {
    department: Department,
    scraped_at: &'a str,
    #[serde(flatten)]
    course: &'a CourseRecord,
}

/// Writes one JSON object per course per line.
pub struct JsonLinesWriter {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonLinesWriter {
    pub fn create(path: impl AsRef<Path>, mode: WriteMode) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        match mode {
            WriteMode::Overwrite => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true).create(true),
        };
        let file = options
            .open(path)
            .map_err(|e| ScrapeError::with_context(&format!("opening {}", path.display()), e))?;

        Ok(JsonLinesWriter {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl CourseWriter for JsonLinesWriter {
    fn write_department(
        &mut self,
        department: Department,
        courses: &[CourseRecord],
    ) -> Result<(), ScrapeError> {
        let scraped_at = Utc::now().to_rfc3339();
        for course in courses {
            let line = OutputLine {
                department,
                scraped_at: &scraped_at,
                course,
            };
            serde_json::to_writer(&mut self.writer, &line)?;
            self.writer.write_all(b"\n")?;
            self.written += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ScrapeError> {
        self.writer.flush()?;
        debug!("flushed {} courses", self.written);
        Ok(())
    }
}

/// Keeps everything in memory, in the order it was written.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub departments: Vec<(Department, Vec<CourseRecord>)>,
}

impl MemoryWriter {
    pub fn courses(&self) -> impl Iterator<Item = &CourseRecord> {
        self.departments.iter().flat_map(|(_, courses)| courses.iter())
    }
}

impl CourseWriter for MemoryWriter {
    fn write_department(
        &mut self,
        department: Department,
        courses: &[CourseRecord],
    ) -> Result<(), ScrapeError> {
        self.departments.push((department, courses.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> CourseRecord {
        CourseRecord {
            code: code.into(),
            name: "Some Course".into(),
            credits: "3.00".into(),
            ..CourseRecord::default()
        }
    }

    fn lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn overwrite_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/courses.jsonl");

        let mut writer = JsonLinesWriter::create(&path, WriteMode::Overwrite).unwrap();
        writer
            .write_department(Department::Encs, &[course("COMP 248"), course("COMP 249")])
            .unwrap();
        writer.finish().unwrap();
        assert_eq!(writer.written(), 2);

        let mut writer = JsonLinesWriter::create(&path, WriteMode::Append).unwrap();
        writer.write_department(Department::FineArts, &[course("ARTH 200")]).unwrap();
        writer.finish().unwrap();

        let rows = lines(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["department"], "encs");
        assert_eq!(rows[0]["code"], "COMP 248");
        assert!(rows[0]["scraped_at"].is_string());
        assert_eq!(rows[2]["department"], "fa");

        let mut writer = JsonLinesWriter::create(&path, WriteMode::Overwrite).unwrap();
        writer.write_department(Department::Jmsb, &[course("COMM 217")]).unwrap();
        writer.finish().unwrap();
        assert_eq!(lines(&path).len(), 1);
    }

    #[test]
    fn memory_writer_keeps_order() {
        let mut writer = MemoryWriter::default();
        writer.write_department(Department::Encs, &[course("A")]).unwrap();
        writer.write_department(Department::ArtsAndScience, &[course("B"), course("C")]).unwrap();
        let codes: Vec<_> = writer.courses().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["A", "B", "C"]);
    }
}
