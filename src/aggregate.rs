use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::MatchRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinEntry {
    pub country: String,
    pub wins: usize,
}

/// Championship count per country, most wins first.
///
/// Countries with equal counts keep the order in which they first appear as
/// winners in the record table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct WinAggregate {
    entries: Vec<WinEntry>,
}

impl WinAggregate {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<WinEntry> = Vec::new();

        for record in records {
            match index.get(record.winners.as_str()) {
                Some(&pos) => entries[pos].wins += 1,
                None => {
                    index.insert(record.winners.as_str(), entries.len());
                    entries.push(WinEntry {
                        country: record.winners.clone(),
                        wins: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-encountered order among ties.
        entries.sort_by(|a, b| b.wins.cmp(&a.wins));
        Self { entries }
    }

    pub fn entries(&self) -> &[WinEntry] {
        &self.entries
    }

    pub fn wins_for(&self, country: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.country == country)
            .map(|entry| entry.wins)
    }

    pub fn total_wins(&self) -> usize {
        self.entries.iter().map(|entry| entry.wins).sum()
    }

    pub fn max_wins(&self) -> usize {
        self.entries.first().map(|entry| entry.wins).unwrap_or(0)
    }

    pub fn min_wins(&self) -> usize {
        self.entries.last().map(|entry| entry.wins).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
