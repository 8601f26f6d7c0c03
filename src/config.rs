use std::{env, str::FromStr, time::Duration};

use crate::{
    error::{PlannerError, Result},
    services::openai_client::DEFAULT_BASE_URL,
};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Completion settings used for every itinerary request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Sampling temperature; 0 keeps replies deterministic
    pub temperature: f32,
    pub timeout: Duration,
    pub base_url: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            timeout: DEFAULT_TIMEOUT,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Defaults overlaid with `PLANNER_MODEL`, `PLANNER_MAX_TOKENS`,
    /// `PLANNER_TIMEOUT_SECS` and `OPENAI_BASE_URL` when present.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(model) = lookup("PLANNER_MODEL") {
            config.model = model;
        }
        if let Some(max_tokens) = parse_var::<u32, _>(&lookup, "PLANNER_MAX_TOKENS")? {
            config.max_tokens = max_tokens;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "PLANNER_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|err| {
                PlannerError::Config(format!("{key} must be a number, got `{raw}`: {err}"))
            })
        })
        .transpose()
}
