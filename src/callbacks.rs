use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{DashboardError, Result};
use crate::figure::ChoroplethFigure;
use crate::fragment::Fragment;
use crate::snapshot::DashboardSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetKey {
    pub id: &'static str,
    pub property: &'static str,
}

impl WidgetKey {
    pub const fn new(id: &'static str, property: &'static str) -> Self {
        Self { id, property }
    }
}

impl fmt::Display for WidgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.property)
    }
}

impl Serialize for WidgetKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const COUNTRY_DROPDOWN: WidgetKey = WidgetKey::new("country-dropdown", "value");
pub const YEAR_DROPDOWN: WidgetKey = WidgetKey::new("year-dropdown", "value");
pub const WINNERS_LIST_ID: WidgetKey = WidgetKey::new("winners-list", "id");
pub const CHOROPLETH_FIGURE: WidgetKey = WidgetKey::new("choropleth-map", "figure");
pub const COUNTRY_STATS: WidgetKey = WidgetKey::new("country-stats", "children");
pub const YEAR_STATS: WidgetKey = WidgetKey::new("year-stats", "children");
pub const WINNERS_LIST: WidgetKey = WidgetKey::new("winners-list", "children");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    Integer(i64),
    Trigger,
}

impl InputValue {
    fn as_text(&self, key: WidgetKey) -> Result<&str> {
        match self {
            InputValue::Text(text) => Ok(text.as_str()),
            _ => Err(DashboardError::InvalidInput {
                key: key.to_string(),
                expected: "country name",
            }),
        }
    }

    fn as_year(&self, key: WidgetKey) -> Result<i32> {
        let invalid = || DashboardError::InvalidInput {
            key: key.to_string(),
            expected: "year",
        };
        match self {
            InputValue::Integer(n) => i32::try_from(*n).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Figure(ChoroplethFigure),
    Children(Fragment),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Update {
    pub output: WidgetKey,
    pub value: Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryStats {
    pub country: String,
    pub wins: usize,
    pub years: Vec<i32>,
}

impl CountryStats {
    pub fn to_fragment(&self) -> Fragment {
        Fragment::div(vec![
            Fragment::heading(format!("Statistics for {}", self.country)),
            Fragment::paragraph(format!("Number of World Cup wins: {}", self.wins)),
            Fragment::paragraph("Years won:"),
            Fragment::list(self.years.iter().map(|y| y.to_string())),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearStats {
    pub year: i32,
    pub winner: String,
    pub runner_up: String,
    pub score: String,
}

impl YearStats {
    pub fn to_fragment(&self) -> Fragment {
        Fragment::div(vec![
            Fragment::heading(format!("World Cup {}", self.year)),
            Fragment::paragraph(format!("Winner: {}", self.winner)),
            Fragment::paragraph(format!("Runner-up: {}", self.runner_up)),
            Fragment::paragraph(format!("Score: {}", self.score)),
        ])
    }
}

/// The map always shows the full aggregate; the selected country does not filter it.
pub fn choropleth_figure(snapshot: &DashboardSnapshot, _selected_country: &str) -> ChoroplethFigure {
    ChoroplethFigure::from_snapshot(snapshot)
}

pub fn country_stats(snapshot: &DashboardSnapshot, country: &str) -> CountryStats {
    let years: Vec<i32> = snapshot
        .records
        .iter()
        .filter(|r| r.winners == country)
        .map(|r| r.year)
        .collect();
    CountryStats {
        country: country.to_string(),
        wins: years.len(),
        years,
    }
}

pub fn year_stats(snapshot: &DashboardSnapshot, year: i32) -> Result<YearStats> {
    let record = snapshot
        .records
        .iter()
        .find(|r| r.year == year)
        .ok_or(DashboardError::LookupMiss { year })?;
    Ok(YearStats {
        year,
        winner: record.winners.clone(),
        runner_up: record.runners_up.clone(),
        score: record.score.clone(),
    })
}

pub fn winners_list(snapshot: &DashboardSnapshot) -> Vec<String> {
    snapshot
        .aggregate
        .entries()
        .iter()
        .map(|entry| format!("{} ({} wins)", entry.country, entry.wins))
        .collect()
}

pub type Handler = fn(&DashboardSnapshot, &InputValue) -> Result<Output>;

fn map_handler(snapshot: &DashboardSnapshot, value: &InputValue) -> Result<Output> {
    let country = value.as_text(COUNTRY_DROPDOWN)?;
    Ok(Output::Figure(choropleth_figure(snapshot, country)))
}

fn country_stats_handler(snapshot: &DashboardSnapshot, value: &InputValue) -> Result<Output> {
    let country = value.as_text(COUNTRY_DROPDOWN)?;
    Ok(Output::Children(country_stats(snapshot, country).to_fragment()))
}

fn year_stats_handler(snapshot: &DashboardSnapshot, value: &InputValue) -> Result<Output> {
    let year = value.as_year(YEAR_DROPDOWN)?;
    Ok(Output::Children(year_stats(snapshot, year)?.to_fragment()))
}

fn winners_list_handler(snapshot: &DashboardSnapshot, _value: &InputValue) -> Result<Output> {
    Ok(Output::Children(Fragment::div(vec![Fragment::list(
        winners_list(snapshot),
    )])))
}

#[derive(Clone, Copy)]
pub struct Callback {
    pub input: WidgetKey,
    pub output: WidgetKey,
    handler: Handler,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

/// Initial widget values fired through every callback on startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialValues {
    pub country: String,
    pub year: i32,
}

#[derive(Debug, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
    outputs: HashSet<WidgetKey>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(COUNTRY_DROPDOWN, CHOROPLETH_FIGURE, map_handler)?;
        registry.register(COUNTRY_DROPDOWN, COUNTRY_STATS, country_stats_handler)?;
        registry.register(YEAR_DROPDOWN, YEAR_STATS, year_stats_handler)?;
        registry.register(WINNERS_LIST_ID, WINNERS_LIST, winners_list_handler)?;
        Ok(registry)
    }

    pub fn register(&mut self, input: WidgetKey, output: WidgetKey, handler: Handler) -> Result<()> {
        if !self.outputs.insert(output) {
            return Err(DashboardError::DuplicateOutput {
                key: output.to_string(),
            });
        }
        self.callbacks.push(Callback {
            input,
            output,
            handler,
        });
        Ok(())
    }

    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    pub fn inputs(&self) -> Vec<WidgetKey> {
        let mut seen = HashSet::new();
        self.callbacks
            .iter()
            .map(|cb| cb.input)
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Runs every callback bound to `input`. Handler errors are turned into notices.
    pub fn dispatch(
        &self,
        snapshot: &DashboardSnapshot,
        input: WidgetKey,
        value: &InputValue,
    ) -> Vec<Update> {
        self.callbacks
            .iter()
            .filter(|cb| cb.input == input)
            .map(|cb| Update {
                output: cb.output,
                value: run_contained(cb, snapshot, value),
            })
            .collect()
    }

    pub fn initial_updates(&self, snapshot: &DashboardSnapshot, initial: &InitialValues) -> Vec<Update> {
        let mut out = Vec::new();
        for input in self.inputs() {
            let value = if input == COUNTRY_DROPDOWN {
                InputValue::Text(initial.country.clone())
            } else if input == YEAR_DROPDOWN {
                InputValue::Integer(i64::from(initial.year))
            } else {
                InputValue::Trigger
            };
            out.extend(self.dispatch(snapshot, input, &value));
        }
        out
    }
}

fn run_contained(cb: &Callback, snapshot: &DashboardSnapshot, value: &InputValue) -> Output {
    match (cb.handler)(snapshot, value) {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!(output = %cb.output, error = %err, "callback failed");
            let text = match err {
                DashboardError::LookupMiss { year } => format!("No data for World Cup {year}"),
                other => other.to_string(),
            };
            Output::Children(Fragment::notice(text))
        }
    }
}
