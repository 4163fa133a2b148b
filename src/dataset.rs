use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

pub const COL_YEAR: &str = "Year";
pub const COL_WINNERS: &str = "Winners";
pub const COL_RUNNERS_UP: &str = "Runners_up";
pub const COL_SCORE: &str = "Score";

/// One World Cup final, as read from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub year: i32,
    pub winners: String,
    pub runners_up: String,
    pub score: String,
}

struct ColumnIndex {
    year: usize,
    winners: usize,
    runners_up: usize,
    score: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or(DashboardError::MissingColumn { column })
        };
        Ok(Self {
            year: find(COL_YEAR)?,
            winners: find(COL_WINNERS)?,
            runners_up: find(COL_RUNNERS_UP)?,
            score: find(COL_SCORE)?,
        })
    }
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DashboardError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DashboardError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let records = read_matches(file)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(records)
}

pub fn parse_matches_csv(raw: &str) -> Result<Vec<MatchRecord>> {
    read_matches(raw.as_bytes())
}

fn read_matches<R: Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let cols = ColumnIndex::from_headers(&headers)?;

    let mut out = Vec::new();
    for row in reader.records() {
        let row = row?;
        out.push(parse_row(&row, &cols)?);
    }
    Ok(out)
}

fn parse_row(row: &StringRecord, cols: &ColumnIndex) -> Result<MatchRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    let field = |idx: usize, name: &str| {
        row.get(idx).ok_or_else(|| DashboardError::Parse {
            line,
            message: format!("missing {name} field"),
        })
    };

    let required = |idx: usize, name: &str| match field(idx, name) {
        Ok("") => Err(DashboardError::Parse {
            line,
            message: format!("empty {name} field"),
        }),
        other => other,
    };

    let raw_year = required(cols.year, COL_YEAR)?;
    let year = raw_year.parse::<i32>().map_err(|_| DashboardError::Parse {
        line,
        message: format!("Year `{raw_year}` is not an integer"),
    })?;

    Ok(MatchRecord {
        year,
        winners: required(cols.winners, COL_WINNERS)?.to_string(),
        runners_up: field(cols.runners_up, COL_RUNNERS_UP)?.to_string(),
        score: field(cols.score, COL_SCORE)?.to_string(),
    })
}
