use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use panel_core::PanelTimings;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "smartdeliver.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub recommendation_delay_ms: u64,
    pub submission_delay_ms: u64,
    pub collaborator_timeout_ms: u64,
    pub event_capacity: usize,
    pub log_filter: String,
    pub customer_name: String,
    pub customer_address: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recommendation_delay_ms: 1000,
            submission_delay_ms: 2000,
            collaborator_timeout_ms: 10_000,
            event_capacity: 64,
            log_filter: "info".into(),
            customer_name: "Robert Chen".into(),
            customer_address: "456 Pine Avenue, Suburbs".into(),
        }
    }
}

impl Settings {
    pub fn timings(&self) -> PanelTimings {
        PanelTimings {
            recommendation_delay: Duration::from_millis(self.recommendation_delay_ms),
            submission_delay: Duration::from_millis(self.submission_delay_ms),
            collaborator_timeout: Duration::from_millis(self.collaborator_timeout_ms),
        }
    }
}

/// Keys accepted in `smartdeliver.toml`; anything omitted keeps its default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    recommendation_delay_ms: Option<u64>,
    submission_delay_ms: Option<u64>,
    collaborator_timeout_ms: Option<u64>,
    event_capacity: Option<usize>,
    log_filter: Option<String>,
    customer_name: Option<String>,
    customer_address: Option<String>,
}

/// Defaults, then the config file, then the environment.
///
/// An explicit `path` must exist; the default `smartdeliver.toml` is
/// optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if required || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file.recommendation_delay_ms {
        settings.recommendation_delay_ms = v;
    }
    if let Some(v) = file.submission_delay_ms {
        settings.submission_delay_ms = v;
    }
    if let Some(v) = file.collaborator_timeout_ms {
        settings.collaborator_timeout_ms = v;
    }
    if let Some(v) = file.event_capacity {
        settings.event_capacity = v;
    }
    if let Some(v) = file.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file.customer_name {
        settings.customer_name = v;
    }
    if let Some(v) = file.customer_address {
        settings.customer_address = v;
    }
    Ok(())
}

/// `SMARTDELIVER_<KEY>` is read first, `APP__<KEY>` wins over it.
fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let var = |key: &str| {
        lookup(&format!("APP__{key}")).or_else(|| lookup(&format!("SMARTDELIVER_{key}")))
    };

    if let Some(v) = var("RECOMMENDATION_DELAY_MS") {
        settings.recommendation_delay_ms = parse_number("RECOMMENDATION_DELAY_MS", &v)?;
    }
    if let Some(v) = var("SUBMISSION_DELAY_MS") {
        settings.submission_delay_ms = parse_number("SUBMISSION_DELAY_MS", &v)?;
    }
    if let Some(v) = var("COLLABORATOR_TIMEOUT_MS") {
        settings.collaborator_timeout_ms = parse_number("COLLABORATOR_TIMEOUT_MS", &v)?;
    }
    if let Some(v) = var("EVENT_CAPACITY") {
        settings.event_capacity = parse_number("EVENT_CAPACITY", &v)?;
    }
    if let Some(v) = var("LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = var("CUSTOMER_NAME") {
        settings.customer_name = v;
    }
    if let Some(v) = var("CUSTOMER_ADDRESS") {
        settings.customer_address = v;
    }
    Ok(())
}

fn parse_number<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("environment override {key}='{raw}' is not a number"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
