//! Shared test utilities for tutelage crates.
//!
//! This crate provides agent and catalogue builders plus guards for tests
//! that touch process-global state.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

use tutelage_core::{AgentId, AgentProfile, AgentStatus, CurriculumCatalogue, MentorStats};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = tutelage_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value" until _guard drops
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Temporary directory holding a `settings.toml`.
///
/// The tempdir is removed when this struct is dropped.
pub struct SettingsFixture {
    pub tempdir: tempfile::TempDir,
    settings: PathBuf,
}

impl SettingsFixture {
    /// Write `contents` to `<tempdir>/settings.toml`.
    pub fn new(contents: &str) -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let settings = tempdir.path().join("settings.toml");
        std::fs::write(&settings, contents)?;
        Ok(Self { tempdir, settings })
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.settings
    }

    /// Write a JSON snapshot next to the settings file and return its path.
    pub fn write_snapshot(&self, name: &str, json: &str) -> std::io::Result<PathBuf> {
        let path = self.tempdir.path().join(name);
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// Fluent builder for [`AgentProfile`] test data.
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    profile: AgentProfile,
}

impl AgentBuilder {
    pub fn new(id: &str, level: u32) -> Self {
        Self {
            profile: AgentProfile::new(id, level),
        }
    }

    pub fn skill(mut self, name: &str, proficiency: f64) -> Self {
        self.profile
            .skill_proficiency
            .insert(name.to_string(), proficiency);
        self
    }

    /// Give the agent `count` placeholder mentees named `<id>-mentee-<n>`.
    pub fn mentees(mut self, count: usize) -> Self {
        let id = self.profile.agent_id.clone();
        self.profile.mentees = (0..count)
            .map(|n| AgentId::new(format!("{id}-mentee-{n}")))
            .collect();
        self
    }

    pub fn mentee(mut self, mentee: &str) -> Self {
        self.profile.mentees.push(AgentId::from(mentee));
        self
    }

    pub fn stats(mut self, total: u32, graduated: u32, average_days: f64) -> Self {
        self.profile.mentor_stats = MentorStats {
            total_mentees: total,
            graduated_mentees: graduated,
            average_training_time_days: Some(average_days),
        };
        self
    }

    pub fn status(mut self, status: AgentStatus) -> Self {
        self.profile.status = status;
        self
    }

    pub fn mentor(mut self, mentor: &str) -> Self {
        self.profile.mentor_id = Some(AgentId::from(mentor));
        self
    }

    pub fn build(self) -> AgentProfile {
        self.profile
    }
}

/// Build a catalogue from `(level, skills)` pairs.
pub fn catalogue(levels: &[(u32, &[&str])]) -> CurriculumCatalogue {
    levels
        .iter()
        .fold(CurriculumCatalogue::new(), |acc, (level, skills)| {
            acc.with_level(*level, skills.iter().copied())
        })
}

/// The worked example: a level-5 mentor with a strong record and one
/// strong skill shared with the mentee's next level.
pub fn exemplary_mentor() -> AgentProfile {
    AgentBuilder::new("mentor-exemplary", 5)
        .skill("x", 0.9)
        .skill("y", 0.8)
        .stats(10, 9, 3.0)
        .build()
}
