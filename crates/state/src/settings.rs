//! Tunable policy settings for matching and recommendation.
//!
//! This module handles:
//! - File-based configuration from `~/.tutelage/settings.toml` (or `$TUTELAGE_SETTINGS`)
//! - Environment variable overrides
//! - Range checks on the resulting values
//!
//! Scoring weights, the minimum level gap and mentor capacity are not
//! configurable; they live as constants next to the code that uses them.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tutelage_core::STRONG_SKILL_THRESHOLD;

use crate::env::{
    env_history_window, env_strong_skill_threshold, env_top_candidates,
    env_underutilized_threshold, settings_file,
};

const DEFAULT_TOP_CANDIDATES: usize = 5;
const DEFAULT_UNDERUTILIZED_THRESHOLD: usize = 3;

/// Settings consumed by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    /// Proficiency above which a mentor skill counts as "strong".
    pub strong_skill_threshold: f64,
    /// Default length of ranked candidate lists.
    pub top_candidates: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            strong_skill_threshold: STRONG_SKILL_THRESHOLD,
            top_candidates: DEFAULT_TOP_CANDIDATES,
        }
    }
}

/// Settings consumed by the transfer recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderSettings {
    /// Transfer types with fewer records than this are flagged for exploration.
    pub underutilized_threshold: usize,
    /// Only the most recent N records are considered when set.
    pub history_window: Option<usize>,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            underutilized_threshold: DEFAULT_UNDERUTILIZED_THRESHOLD,
            history_window: None,
        }
    }
}

/// All tunable settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutelageSettings {
    pub matching: MatchingSettings,
    pub recommender: RecommenderSettings,
}

impl TutelageSettings {
    /// Load settings from the settings file, then apply environment overrides.
    ///
    /// A missing, unreadable or unparsable file falls back to defaults with a
    /// warning. Out-of-range values are an error.
    pub fn load() -> Result<Self> {
        let mut settings = settings_file()
            .map(|path| load_file(&path))
            .unwrap_or_default();
        settings.apply_env();
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from TOML text without consulting the environment.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings: Self = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `TUTELAGE_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Some(threshold) = env_strong_skill_threshold() {
            self.matching.strong_skill_threshold = threshold;
        }
        if let Some(n) = env_top_candidates() {
            self.matching.top_candidates = n;
        }
        if let Some(n) = env_underutilized_threshold() {
            self.recommender.underutilized_threshold = n;
        }
        if let Some(window) = env_history_window() {
            self.recommender.history_window = window;
        }
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.matching.strong_skill_threshold;
        if !(0.0..1.0).contains(&threshold) {
            bail!("strong_skill_threshold must be in [0, 1), got {threshold}");
        }
        if self.matching.top_candidates == 0 {
            bail!("top_candidates must be at least 1");
        }
        if self.recommender.history_window == Some(0) {
            bail!("history_window must be at least 1 when set");
        }
        Ok(())
    }
}

fn load_file(path: &Path) -> TutelageSettings {
    if !path.exists() {
        return TutelageSettings::default();
    }
    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<TutelageSettings>(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse tutelage settings"
                );
                TutelageSettings::default()
            }
        },
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to read tutelage settings"
            );
            TutelageSettings::default()
        }
    }
}
