use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use wc_winners::callbacks::{
    COUNTRY_DROPDOWN, CallbackRegistry, InputValue, Output, WINNERS_LIST_ID, YEAR_DROPDOWN,
};
use wc_winners::config::DashboardConfig;
use wc_winners::snapshot::DashboardSnapshot;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = DashboardConfig::from_env();
    let data_path = arg_value("data").map(PathBuf::from).unwrap_or(config.data_path);
    let country = arg_value("country").unwrap_or(config.default_country);
    let year = match arg_value("year") {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| anyhow!("--year expects an integer, got `{raw}`"))?,
        None => config.default_year,
    };

    let snapshot = DashboardSnapshot::load(&data_path)
        .with_context(|| format!("load dataset {}", data_path.display()))?;
    let registry = CallbackRegistry::standard().context("register callbacks")?;

    let mut outputs: BTreeMap<String, Output> = BTreeMap::new();
    let inputs = [
        (COUNTRY_DROPDOWN, InputValue::Text(country)),
        (YEAR_DROPDOWN, InputValue::Integer(i64::from(year))),
        (WINNERS_LIST_ID, InputValue::Trigger),
    ];
    for (key, value) in &inputs {
        for update in registry.dispatch(&snapshot, *key, value) {
            outputs.insert(update.output.to_string(), update.value);
        }
    }

    let json = serde_json::to_string_pretty(&outputs).context("serialize outputs")?;
    println!("{json}");
    Ok(())
}

/// Accepts both `--name value` and `--name=value`.
fn arg_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let flag = format!("--{name}");
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
