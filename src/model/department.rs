use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Faculty selector of the schedule form (`ctl00$PageBody$ddlDept`).
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    #[serde(rename = "as")]
    #[value(name = "as")]
    ArtsAndScience,
    #[serde(rename = "jmsb")]
    #[value(name = "jmsb")]
    Jmsb,
    #[serde(rename = "encs")]
    #[value(name = "encs")]
    Encs,
    #[serde(rename = "fa")]
    #[value(name = "fa")]
    FineArts,
    #[serde(rename = "el")]
    #[value(name = "el")]
    ExtendedLearning,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::ArtsAndScience,
        Department::Jmsb,
        Department::Encs,
        Department::FineArts,
        Department::ExtendedLearning,
    ];

    /// Short tag used in output records and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Department::ArtsAndScience => "as",
            Department::Jmsb => "jmsb",
            Department::Encs => "encs",
            Department::FineArts => "fa",
            Department::ExtendedLearning => "el",
        }
    }

    /// Value posted in the department dropdown.
    pub fn form_code(self) -> &'static str {
        match self {
            Department::ArtsAndScience => "01",
            Department::Jmsb => "03",
            Department::Encs => "04",
            Department::FineArts => "06",
            Department::ExtendedLearning => "09",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    Summer,
    Fall,
    FallWinter,
    Winter,
    #[default]
    All,
}

impl Session {
    pub fn form_code(self) -> &'static str {
        match self {
            Session::Summer => "1",
            Session::Fall => "2",
            Session::FallWinter => "3",
            Session::Winter => "4",
            Session::All => "A",
        }
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Undergraduate,
    Graduate,
    #[default]
    All,
}

impl Level {
    pub fn form_code(self) -> &'static str {
        match self {
            Level::Undergraduate => "U",
            Level::Graduate => "G",
            Level::All => "A",
        }
    }
}

/// Everything the schedule form needs to list one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentQuery {
    pub department: Department,
    pub year: String,
    pub session: Session,
    pub level: Level,
}
