//! Researchers roster ingestion and export.
//!
//! Rosters travel as CSV with the grants office's column names. Columns the
//! engine does not read are carried through untouched so the exported roster
//! is the uploaded one plus eligibility columns.

mod export;
pub mod hr_update;
mod normalizer;
mod parser;
pub mod synthetic;

use crate::eligibility::ResearcherRecord;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::info;

use parser::RosterRow;

#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Csv(csv::Error),
    RowCountMismatch { rows: usize, results: usize },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Io(err) => write!(f, "failed to access roster file: {}", err),
            RosterError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterError::RowCountMismatch { rows, results } => write!(
                f,
                "roster has {} rows but {} eligibility results were supplied",
                rows, results
            ),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io(err) => Some(err),
            RosterError::Csv(err) => Some(err),
            RosterError::RowCountMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// An uploaded roster: typed records plus the raw cells for pass-through.
#[derive(Debug, Clone)]
pub struct Roster {
    headers: StringRecord,
    cells: Vec<StringRecord>,
    records: Vec<ResearcherRecord>,
}

impl Roster {
    pub fn records(&self) -> &[ResearcherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Roster, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Roster, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut cells = Vec::new();
        let mut records = Vec::new();

        for (row, result) in csv_reader.records().enumerate() {
            let mut raw = result?;
            normalizer::pad_record(&mut raw, headers.len());
            let parsed: RosterRow = raw.deserialize(Some(&headers))?;
            records.push(parsed.into_record(row));
            cells.push(raw);
        }

        info!(rows = records.len(), "roster imported");

        Ok(Roster {
            headers,
            cells,
            records,
        })
    }
}
