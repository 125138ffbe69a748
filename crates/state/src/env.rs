use anyhow::Result;
use std::path::PathBuf;

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the path to the settings file.
///
/// `TUTELAGE_SETTINGS` wins; otherwise `~/.tutelage/settings.toml`.
pub fn settings_file() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("TUTELAGE_SETTINGS") {
        return Some(PathBuf::from(custom));
    }
    home_dir()
        .ok()
        .map(|h| h.join(".tutelage/settings.toml"))
}

/// Returns the strong-skill threshold from `TUTELAGE_STRONG_SKILL_THRESHOLD`.
pub fn env_strong_skill_threshold() -> Option<f64> {
    std::env::var("TUTELAGE_STRONG_SKILL_THRESHOLD")
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Returns the ranked-candidate count from `TUTELAGE_TOP_CANDIDATES`.
pub fn env_top_candidates() -> Option<usize> {
    std::env::var("TUTELAGE_TOP_CANDIDATES")
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Returns the exploration threshold from `TUTELAGE_UNDERUTILIZED_THRESHOLD`.
pub fn env_underutilized_threshold() -> Option<usize> {
    std::env::var("TUTELAGE_UNDERUTILIZED_THRESHOLD")
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Returns the history window from `TUTELAGE_HISTORY_WINDOW`.
///
/// `0` or `all` disables the window.
pub fn env_history_window() -> Option<Option<usize>> {
    let raw = std::env::var("TUTELAGE_HISTORY_WINDOW").ok()?;
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("all") {
        return Some(None);
    }
    match raw.parse::<usize>() {
        Ok(0) => Some(None),
        Ok(n) => Some(Some(n)),
        Err(_) => None,
    }
}
