use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::callbacks::{
    CHOROPLETH_FIGURE, COUNTRY_DROPDOWN, CallbackRegistry, InitialValues, InputValue, Output,
    Update, WidgetKey, YEAR_DROPDOWN,
};
use crate::config::DashboardConfig;
use crate::figure::ChoroplethFigure;
use crate::fragment::Fragment;
use crate::snapshot::DashboardSnapshot;

const MAX_LOGS: usize = 200;

#[derive(Debug)]
pub struct AppState {
    pub snapshot: Arc<DashboardSnapshot>,
    registry: CallbackRegistry,
    pub country_selected: usize,
    pub year_selected: usize,
    pub outputs: HashMap<WidgetKey, Output>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(
        snapshot: Arc<DashboardSnapshot>,
        registry: CallbackRegistry,
        config: &DashboardConfig,
    ) -> Self {
        let mut state = Self {
            snapshot,
            registry,
            country_selected: 0,
            year_selected: 0,
            outputs: HashMap::new(),
            logs: VecDeque::new(),
            help_overlay: false,
        };

        let countries = &state.snapshot.country_options;
        match countries.iter().position(|c| *c == config.default_country) {
            Some(idx) => state.country_selected = idx,
            None => {
                let fallback = countries.first().cloned().unwrap_or_default();
                state.push_log(format!(
                    "[WARN] Default country {} not in dataset, using {}",
                    config.default_country, fallback
                ));
            }
        }

        let years = &state.snapshot.year_options;
        match years.iter().position(|y| *y == config.default_year) {
            Some(idx) => state.year_selected = idx,
            None => {
                state.year_selected = years.len().saturating_sub(1);
                state.push_log(format!(
                    "[WARN] Default year {} not in dataset",
                    config.default_year
                ));
            }
        }

        for country in state.snapshot.unmapped.clone() {
            state.push_log(format!("[WARN] No country code for {country}"));
        }

        let initial = InitialValues {
            country: state.selected_country().unwrap_or_default().to_string(),
            year: state.selected_year().unwrap_or(config.default_year),
        };
        let updates = state.registry.initial_updates(&state.snapshot, &initial);
        state.apply(updates);
        state.push_log(format!(
            "[INFO] Loaded {} finals, {} winning nations",
            state.snapshot.records.len(),
            state.snapshot.aggregate.len()
        ));
        state
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.snapshot
            .country_options
            .get(self.country_selected)
            .map(String::as_str)
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.snapshot.year_options.get(self.year_selected).copied()
    }

    pub fn next_country(&mut self) {
        let total = self.snapshot.country_options.len();
        if total == 0 {
            return;
        }
        self.country_selected = (self.country_selected + 1) % total;
        self.country_changed();
    }

    pub fn prev_country(&mut self) {
        let total = self.snapshot.country_options.len();
        if total == 0 {
            return;
        }
        self.country_selected = if self.country_selected == 0 {
            total - 1
        } else {
            self.country_selected - 1
        };
        self.country_changed();
    }

    pub fn next_year(&mut self) {
        let total = self.snapshot.year_options.len();
        if total == 0 {
            return;
        }
        self.year_selected = (self.year_selected + 1) % total;
        self.year_changed();
    }

    pub fn prev_year(&mut self) {
        let total = self.snapshot.year_options.len();
        if total == 0 {
            return;
        }
        self.year_selected = if self.year_selected == 0 {
            total - 1
        } else {
            self.year_selected - 1
        };
        self.year_changed();
    }

    fn country_changed(&mut self) {
        let Some(country) = self.selected_country().map(str::to_string) else {
            return;
        };
        self.fire(COUNTRY_DROPDOWN, InputValue::Text(country));
    }

    fn year_changed(&mut self) {
        let Some(year) = self.selected_year() else {
            return;
        };
        self.fire(YEAR_DROPDOWN, InputValue::Integer(i64::from(year)));
    }

    /// Dispatches an input change and stores the resulting outputs.
    pub fn fire(&mut self, input: WidgetKey, value: InputValue) {
        let updates = self.registry.dispatch(&self.snapshot, input, &value);
        self.apply(updates);
    }

    fn apply(&mut self, updates: Vec<Update>) {
        for update in updates {
            if let Output::Children(fragment) = &update.value
                && fragment.is_notice()
            {
                let line = fragment.lines().join(" ");
                self.push_log(format!("[WARN] {}: {}", update.output, line.trim_start_matches("! ")));
            }
            self.outputs.insert(update.output, update.value);
        }
    }

    pub fn figure(&self) -> Option<&ChoroplethFigure> {
        match self.outputs.get(&CHOROPLETH_FIGURE) {
            Some(Output::Figure(figure)) => Some(figure),
            _ => None,
        }
    }

    pub fn fragment(&self, key: WidgetKey) -> Option<&Fragment> {
        match self.outputs.get(&key) {
            Some(Output::Children(fragment)) => Some(fragment),
            _ => None,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
