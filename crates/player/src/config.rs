//! Player configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::application::services::{LoginTiming, DEFAULT_POLL_INTERVAL_MS};

/// Player configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Re-render cadence of the poller
    pub poll_interval_ms: u64,
    /// Sign-in animation delays
    pub login: LoginTiming,
    /// Storage file for the desktop store (platform config dir when unset)
    pub storage_path: Option<PathBuf>,
    /// Page simulated by the headless desktop runner
    pub headless: HeadlessPageConfig,
}

/// Description of the page the headless runner renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessPageConfig {
    /// Page path, e.g. `faculty_classlist.html` or `faculty_7.html`
    pub path: String,
    /// Class ids listed as class rows and count cells
    pub classes: Vec<String>,
    /// Number of approve controls on a class page
    pub items: usize,
    /// Item indexes to approve after load
    pub approve: Vec<usize>,
    /// Sign-in form values when `path` is a login page
    pub email: String,
    pub password: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            login: LoginTiming::default(),
            storage_path: None,
            headless: HeadlessPageConfig::default(),
        }
    }
}

impl Default for HeadlessPageConfig {
    fn default() -> Self {
        Self {
            path: "faculty_classlist.html".to_string(),
            classes: Vec::new(),
            items: 0,
            approve: Vec::new(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let login_defaults = LoginTiming::default();
        let headless_defaults = HeadlessPageConfig::default();

        Ok(Self {
            poll_interval_ms: parse_var(&var, "CLEARANCE_POLL_INTERVAL_MS")
                .context("CLEARANCE_POLL_INTERVAL_MS must be a number of milliseconds")?
                .unwrap_or(defaults.poll_interval_ms),

            login: LoginTiming {
                greeting_ms: parse_var(&var, "CLEARANCE_LOGIN_GREETING_MS")
                    .context("CLEARANCE_LOGIN_GREETING_MS must be a number of milliseconds")?
                    .unwrap_or(login_defaults.greeting_ms),
                redirect_ms: parse_var(&var, "CLEARANCE_LOGIN_REDIRECT_MS")
                    .context("CLEARANCE_LOGIN_REDIRECT_MS must be a number of milliseconds")?
                    .unwrap_or(login_defaults.redirect_ms),
            },

            storage_path: var("CLEARANCE_STORAGE_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),

            headless: HeadlessPageConfig {
                path: var("CLEARANCE_PAGE")
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or(headless_defaults.path),
                classes: var("CLEARANCE_CLASSES")
                    .map(|s| split_list(&s).map(str::to_string).collect())
                    .unwrap_or_default(),
                items: parse_var(&var, "CLEARANCE_ITEMS")
                    .context("CLEARANCE_ITEMS must be a count")?
                    .unwrap_or(headless_defaults.items),
                approve: match var("CLEARANCE_APPROVE") {
                    Some(raw) => split_list(&raw)
                        .map(|s| s.parse::<usize>())
                        .collect::<Result<Vec<_>, _>>()
                        .context("CLEARANCE_APPROVE must be a comma-separated list of item indexes")?,
                    None => Vec::new(),
                },
                email: var("CLEARANCE_EMAIL").unwrap_or_default(),
                password: var("CLEARANCE_PASSWORD").unwrap_or_default(),
            },
        })
    }
}

fn parse_var<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, T::Err> {
    match var(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some),
        _ => Ok(None),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
