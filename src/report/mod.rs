mod pdf;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::entities::TravelSequenceEntry;
use crate::error::{invalid_input_error, Error};

pub use pdf::{layout, PageLayout, PlacedRow};

pub const SUBTITLE: &str = "Sequenced List";
pub const TABLE_HEAD: [&str; 2] = ["Label", "Location"];

/// How the exported file is named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `travel_plan_<YYYY-MM-DD>.pdf`
    Dated,
    /// `travel_plan.pdf`
    Static,
}

impl FileNaming {
    pub fn file_name(&self, date: NaiveDate) -> String {
        match self {
            Self::Dated => format!("travel_plan_{}.pdf", date.format("%Y-%m-%d")),
            Self::Static => "travel_plan.pdf".into(),
        }
    }
}

impl FromStr for FileNaming {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dated" => Ok(Self::Dated),
            "static" => Ok(Self::Static),
            _ => Err(invalid_input_error()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub location: String,
}

pub fn rows(sequence: &[TravelSequenceEntry]) -> Vec<ReportRow> {
    sequence
        .iter()
        .map(|entry| ReportRow {
            label: entry.position.label(),
            location: entry.label.clone(),
        })
        .collect()
}

pub fn footer_caption(year: i32) -> String {
    format!("Generated by Shortest Path Finder | © {}", year)
}

#[derive(Clone, Debug)]
pub struct Report {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Report {
    #[tracing::instrument(skip(sequence, config))]
    pub fn generate(
        sequence: &[TravelSequenceEntry],
        config: &ReportConfig,
        date: NaiveDate,
    ) -> Result<Self, Error> {
        let rows = rows(sequence);
        let bytes = pdf::render(&rows, &config.title, &footer_caption(date.year()))?;

        tracing::info!(rows = rows.len(), size = bytes.len(), "rendered travel plan");

        Ok(Self {
            file_name: config.naming.file_name(date),
            bytes,
        })
    }

    /// Writes the report into `dir`, replacing a file of the same name.
    #[tracing::instrument(skip(self), fields(file_name = %self.file_name))]
    pub fn save(&self, dir: &Path) -> Result<PathBuf, Error> {
        fs::create_dir_all(dir)?;

        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;

        tracing::info!(path = %path.display(), "saved travel plan");

        Ok(path)
    }
}
