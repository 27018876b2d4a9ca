//! Where preferences live on disk and how they are read back

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug)]
pub enum PreferencesError {
    /// The platform reports no per-user config directory
    NoConfigDir,
    Io(PathBuf, String),
    Json(PathBuf, String),
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::NoConfigDir => write!(f, "no config directory on this platform"),
            PreferencesError::Io(path, e) => write!(f, "{}: {}", path.display(), e),
            PreferencesError::Json(path, e) => {
                write!(f, "{}: invalid preferences: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for PreferencesError {}

/// A preferences file at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesFile {
    path: PathBuf,
}

impl PreferencesFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` in the platform config directory for led
    pub fn user() -> Result<Self, PreferencesError> {
        ProjectDirs::from("org", "led", "led")
            .map(|dirs| Self::at(dirs.config_dir().join(PREFERENCES_FILE)))
            .ok_or(PreferencesError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored preferences, or the defaults when nothing was saved yet
    pub fn read(&self) -> Result<EditorPreferences, PreferencesError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(EditorPreferences::default())
            }
            Err(e) => return Err(PreferencesError::Io(self.path.clone(), e.to_string())),
        };
        serde_json::from_str(&content)
            .map_err(|e| PreferencesError::Json(self.path.clone(), e.to_string()))
    }

    pub fn write(&self, preferences: &EditorPreferences) -> Result<(), PreferencesError> {
        let io = |e: std::io::Error| PreferencesError::Io(self.path.clone(), e.to_string());
        let content = serde_json::to_string_pretty(preferences)
            .map_err(|e| PreferencesError::Json(self.path.clone(), e.to_string()))?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(io)?;
        }
        std::fs::write(&self.path, content).map_err(io)?;
        bevy::log::info!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

impl EditorPreferences {
    /// The user's saved preferences; any failure falls back to the defaults
    pub fn load() -> Self {
        PreferencesFile::user()
            .and_then(|file| file.read())
            .unwrap_or_else(|e| {
                bevy::log::warn!("Using default preferences ({})", e);
                Self::default()
            })
    }

    pub fn save(&self) -> Result<(), PreferencesError> {
        PreferencesFile::user()?.write(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = PreferencesFile::at(dir.path().join("nested").join(PREFERENCES_FILE));
        let prefs = EditorPreferences {
            tileset_path: "tilesets/dungeon.png".to_string(),
            tileset_grid_size: 16,
            ..Default::default()
        };
        file.write(&prefs).unwrap();
        assert_eq!(file.read().unwrap(), prefs);
    }

    #[test]
    fn test_missing_file_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = PreferencesFile::at(dir.path().join("none.json"));
        assert_eq!(file.read().unwrap(), EditorPreferences::default());
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = PreferencesFile::at(dir.path().join(PREFERENCES_FILE));
        std::fs::write(file.path(), "{ not json").unwrap();
        assert!(matches!(file.read(), Err(PreferencesError::Json(..))));
    }

    #[test]
    fn test_directory_in_place_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = PreferencesFile::at(dir.path());
        assert!(matches!(file.read(), Err(PreferencesError::Io(..))));
    }
}
