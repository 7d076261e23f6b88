use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thoughtgrid::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope {
    Explicit,
    User,
}

#[derive(Debug, Clone)]
pub struct SettingsLocation {
    pub path: PathBuf,
    pub scope: SettingsScope,
}

pub fn locate_settings(explicit: Option<&Path>) -> Result<SettingsLocation> {
    if let Some(path) = explicit {
        return Ok(SettingsLocation {
            path: path.to_path_buf(),
            scope: SettingsScope::Explicit,
        });
    }
    let dirs = project_dirs()?;
    Ok(SettingsLocation {
        path: dirs.config_dir().join("settings.yml"),
        scope: SettingsScope::User,
    })
}

/// Reads settings, falling back to defaults when the file does not exist.
pub fn load_settings(location: &SettingsLocation) -> Result<Settings> {
    if !location.path.exists() {
        tracing::debug!(path = %location.path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let data = fs::read_to_string(&location.path)
        .with_context(|| format!("reading {:?}", location.path))?;
    let settings: Settings = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing settings file {:?}", location.path))?;
    tracing::info!(path = %location.path.display(), "loaded settings");
    Ok(settings)
}

/// Writes default settings unless a file is already present. Returns whether
/// a file was created.
pub fn init_settings(location: &SettingsLocation) -> Result<bool> {
    if location.path.exists() {
        return Ok(false);
    }
    save_settings(location, &Settings::default())?;
    Ok(true)
}

pub fn save_settings(location: &SettingsLocation, settings: &Settings) -> Result<()> {
    if let Some(parent) = location.path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let serialized = serde_yaml::to_string(settings).context("serializing settings")?;
    fs::write(&location.path, serialized)
        .with_context(|| format!("writing {:?}", location.path))?;
    Ok(())
}

/// Directory for the TUI log file.
pub fn log_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "thoughtgrid").context("locating data directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults_without_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/settings.yml");
        let location = locate_settings(Some(&path)).unwrap();
        assert_eq!(location.scope, SettingsScope::Explicit);
        assert_eq!(load_settings(&location).unwrap(), Settings::default());
        assert!(!path.exists());
    }

    #[test]
    fn init_writes_once() {
        let dir = tempdir().unwrap();
        let location = locate_settings(Some(&dir.path().join("cfg/settings.yml"))).unwrap();
        assert!(init_settings(&location).unwrap());
        assert!(!init_settings(&location).unwrap());
        assert_eq!(load_settings(&location).unwrap(), Settings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempdir().unwrap();
        let location = locate_settings(Some(&dir.path().join("settings.yml"))).unwrap();
        let settings = Settings {
            history_limit: Some(3),
            ..Settings::default()
        };
        save_settings(&location, &settings).unwrap();
        assert_eq!(load_settings(&location).unwrap(), settings);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        fs::write(&path, "history_limit: [").unwrap();
        let location = locate_settings(Some(&path)).unwrap();
        let err = load_settings(&location).unwrap_err();
        assert!(format!("{err:#}").contains("parsing settings file"));
    }
}
