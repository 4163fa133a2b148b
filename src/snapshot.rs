use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::aggregate::WinAggregate;
use crate::country_codes::{AnnotatedRecord, CountryCodeTable, annotate, unmapped_winners};
use crate::dataset::{MatchRecord, load_matches};
use crate::error::Result;

/// Everything the callbacks read, computed once at startup and never mutated.
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub records: Vec<MatchRecord>,
    pub annotated: Vec<AnnotatedRecord>,
    pub aggregate: WinAggregate,
    pub codes: CountryCodeTable,
    pub country_options: Vec<String>,
    pub year_options: Vec<i32>,
    pub unmapped: Vec<String>,
}

impl DashboardSnapshot {
    pub fn build(records: Vec<MatchRecord>, codes: &CountryCodeTable) -> Self {
        let annotated = annotate(&records, codes);
        let aggregate = WinAggregate::from_records(&records);
        let unmapped = unmapped_winners(&records, codes);
        for country in &unmapped {
            tracing::warn!(%country, "winner has no country code; map colouring degraded");
        }

        let country_options = records
            .iter()
            .map(|r| r.winners.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let year_options = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            records,
            annotated,
            aggregate,
            codes: codes.clone(),
            country_options,
            year_options,
            unmapped,
        }
    }

    pub fn load(path: &Path) -> Result<Arc<Self>> {
        let records = load_matches(path)?;
        Ok(Arc::new(Self::build(records, CountryCodeTable::builtin())))
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.country_options.iter().any(|c| c == country)
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.year_options.binary_search(&year).is_ok()
    }
}
