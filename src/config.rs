use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "wc_winners";
const DEFAULT_DATA_PATH: &str = "data/world_cup.csv";
const DEFAULT_COUNTRY: &str = "Brazil";
const DEFAULT_YEAR: i32 = 2022;
const DEFAULT_TICK_MS: u64 = 250;
const MIN_TICK_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub default_country: String,
    pub default_year: i32,
    pub tick_rate: Duration,
    pub log_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::with_cache_dir(app_cache_dir())
    }
}

fn cache_dir_from<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base) = lookup("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = lookup("HOME")?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}

impl DashboardConfig {
    fn with_cache_dir(cache_dir: Option<PathBuf>) -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_country: DEFAULT_COUNTRY.to_string(),
            default_year: DEFAULT_YEAR,
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
            log_dir: cache_dir.map(|dir| dir.join("logs")),
        }
    }

    /// Reads `WC_*` variables (and the cache dir vars); anything missing or unparsable keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut cfg = Self::with_cache_dir(cache_dir_from(&lookup));

        if let Some(path) = get("WC_DATA_PATH") {
            cfg.data_path = PathBuf::from(path);
        }
        if let Some(country) = get("WC_DEFAULT_COUNTRY") {
            cfg.default_country = country;
        }
        if let Some(year) = get("WC_DEFAULT_YEAR").and_then(|v| v.parse::<i32>().ok()) {
            cfg.default_year = year;
        }
        if let Some(ms) = get("WC_TICK_MS").and_then(|v| v.parse::<u64>().ok()) {
            cfg.tick_rate = Duration::from_millis(ms.max(MIN_TICK_MS));
        }
        if let Some(dir) = get("WC_LOG_DIR") {
            cfg.log_dir = Some(PathBuf::from(dir));
        }
        cfg
    }
}

pub fn app_cache_dir() -> Option<PathBuf> {
    cache_dir_from(&|key: &str| std::env::var(key).ok())
}
