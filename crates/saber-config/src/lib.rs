// Run configuration (track geometry, judge windows, scoring, tick rate)

pub mod config;

pub use config::Config;
