pub mod aggregate;
pub mod callbacks;
pub mod config;
pub mod country_codes;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod fragment;
pub mod logging;
pub mod snapshot;
pub mod state;
