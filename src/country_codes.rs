use std::collections::{HashMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use crate::dataset::MatchRecord;

const BUILTIN_CODES: &[(&str, &str)] = &[
    ("Argentina", "ARG"),
    ("Brazil", "BRA"),
    ("Croatia", "HRV"),
    // Czech Republic's code stands in for the former state.
    ("Czechoslovakia", "CZE"),
    ("England", "GBR"),
    ("France", "FRA"),
    ("Germany", "DEU"),
    ("Hungary", "HUN"),
    ("Italy", "ITA"),
    ("Netherlands", "NLD"),
    ("Spain", "ESP"),
    ("Sweden", "SWE"),
    ("Uruguay", "URY"),
];

static BUILTIN: Lazy<CountryCodeTable> = Lazy::new(|| CountryCodeTable::new(BUILTIN_CODES));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryCode {
    Known(&'static str),
    Unknown,
}

impl CountryCode {
    pub fn as_str(self) -> &'static str {
        match self {
            CountryCode::Known(code) => code,
            CountryCode::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, CountryCode::Known(_))
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Read-only country name → ISO 3-letter code mapping.
#[derive(Debug, Clone)]
pub struct CountryCodeTable {
    codes: HashMap<&'static str, &'static str>,
}

impl CountryCodeTable {
    pub fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            codes: entries.iter().copied().collect(),
        }
    }

    pub fn builtin() -> &'static CountryCodeTable {
        &BUILTIN
    }

    pub fn lookup(&self, country: &str) -> CountryCode {
        self.codes
            .get(country)
            .map(|code| CountryCode::Known(*code))
            .unwrap_or(CountryCode::Unknown)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub country_code: CountryCode,
}

pub fn annotate(records: &[MatchRecord], table: &CountryCodeTable) -> Vec<AnnotatedRecord> {
    records
        .iter()
        .map(|record| AnnotatedRecord {
            country_code: table.lookup(&record.winners),
            record: record.clone(),
        })
        .collect()
}

/// Distinct winners the table has no code for, in first-seen order.
pub fn unmapped_winners(records: &[MatchRecord], table: &CountryCodeTable) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        if table.lookup(&record.winners).is_known() {
            continue;
        }
        if seen.insert(record.winners.as_str()) {
            out.push(record.winners.clone());
        }
    }
    out
}
