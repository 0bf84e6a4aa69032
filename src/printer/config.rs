//! # Preferred-Printer Preferences
//!
//! The operator's preferred printer, persisted as a small JSON file.
//!
//! The preference is an explicit object constructed at startup and passed
//! where it is needed; there is no ambient global. Changes are validated
//! against the [`PrinterDirectory`] before persisting, and
//! [`PrinterPreferences::reload`] re-reads the file on demand (e.g. when an
//! operator edits it by hand).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::directory::PrinterDirectory;
use crate::error::ImprentaError;

/// On-disk schema.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    preferred: Option<String>,
}

/// The persisted preferred-printer preference.
#[derive(Debug)]
pub struct PrinterPreferences {
    path: PathBuf,
    preferred: Option<String>,
}

impl PrinterPreferences {
    /// Load preferences from `path`. A missing file yields an empty
    /// preference (first run); a malformed file is a config error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ImprentaError> {
        let path = path.into();
        let preferred = read_preferred(&path)?;
        Ok(Self { path, preferred })
    }

    /// Re-read the preferences file, replacing the in-memory value.
    pub fn reload(&mut self) -> Result<(), ImprentaError> {
        self.preferred = read_preferred(&self.path)?;
        Ok(())
    }

    /// The preferred printer name, if set.
    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    /// Set and persist the preferred printer.
    ///
    /// ## Errors
    ///
    /// [`ImprentaError::Config`] when `name` is not in the directory;
    /// nothing is persisted in that case.
    pub fn set_preferred(
        &mut self,
        name: &str,
        directory: &PrinterDirectory,
    ) -> Result<(), ImprentaError> {
        if !directory.contains(name) {
            return Err(ImprentaError::Config(format!(
                "Unknown printer: {}",
                name
            )));
        }
        self.preferred = Some(name.to_string());
        self.persist()
    }

    fn persist(&self) -> Result<(), ImprentaError> {
        let file = PreferencesFile {
            preferred: self.preferred.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| ImprentaError::Config(format!("Failed to serialize preferences: {}", e)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn read_preferred(path: &Path) -> Result<Option<String>, ImprentaError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    let file: PreferencesFile = serde_json::from_str(&contents).map_err(|e| {
        ImprentaError::Config(format!(
            "Malformed preferences file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(file.preferred)
}

/// Resolve the printer a job should go to.
///
/// Order: preferred (when still installed) → system default → first
/// installed. An empty directory is a config error.
pub fn resolve_printer(
    preferences: &PrinterPreferences,
    directory: &PrinterDirectory,
) -> Result<String, ImprentaError> {
    if let Some(name) = preferences.preferred() {
        if directory.contains(name) {
            return Ok(name.to_string());
        }
        warn!(printer = name, "preferred printer no longer installed");
    }

    if let Some(default) = directory.system_default() {
        return Ok(default.to_string());
    }

    directory
        .list_installed()
        .first()
        .cloned()
        .ok_or_else(|| ImprentaError::Config("No printers available".to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("imprenta-prefs-{}.json", uuid::Uuid::new_v4()))
    }

    fn directory() -> PrinterDirectory {
        PrinterDirectory::with_installed(vec!["TM-T20".into(), "ZD420".into()])
    }

    #[test]
    fn test_missing_file_is_empty_preference() {
        let prefs = PrinterPreferences::load(temp_path()).unwrap();
        assert!(prefs.preferred().is_none());
    }

    #[test]
    fn test_set_and_reload_round_trip() {
        let path = temp_path();
        let dir = directory();

        let mut prefs = PrinterPreferences::load(&path).unwrap();
        prefs.set_preferred("ZD420", &dir).unwrap();

        let mut reread = PrinterPreferences::load(&path).unwrap();
        assert_eq!(reread.preferred(), Some("ZD420"));

        // External edit, then explicit reload
        fs::write(&path, r#"{"preferred": "TM-T20"}"#).unwrap();
        reread.reload().unwrap();
        assert_eq!(reread.preferred(), Some("TM-T20"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unknown_printer_rejected_before_persist() {
        let path = temp_path();
        let mut prefs = PrinterPreferences::load(&path).unwrap();

        let err = prefs.set_preferred("Ghost", &directory()).unwrap_err();
        assert!(matches!(err, ImprentaError::Config(_)));
        assert!(prefs.preferred().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = temp_path();
        fs::write(&path, "not json").unwrap();
        assert!(PrinterPreferences::load(&path).is_err());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resolve_prefers_preference() {
        let path = temp_path();
        let dir = directory();
        let mut prefs = PrinterPreferences::load(&path).unwrap();
        prefs.set_preferred("ZD420", &dir).unwrap();

        assert_eq!(resolve_printer(&prefs, &dir).unwrap(), "ZD420");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let prefs = PrinterPreferences::load(temp_path()).unwrap();
        assert_eq!(resolve_printer(&prefs, &directory()).unwrap(), "TM-T20");
    }

    #[test]
    fn test_resolve_skips_uninstalled_preference() {
        let path = temp_path();
        let wide = PrinterDirectory::with_installed(vec!["TM-T20".into(), "Old".into()]);
        let mut prefs = PrinterPreferences::load(&path).unwrap();
        prefs.set_preferred("Old", &wide).unwrap();

        // "Old" has since been removed
        let narrow = PrinterDirectory::with_installed(vec!["TM-T20".into()]);
        assert_eq!(resolve_printer(&prefs, &narrow).unwrap(), "TM-T20");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resolve_empty_directory_is_error() {
        let prefs = PrinterPreferences::load(temp_path()).unwrap();
        let empty = PrinterDirectory::with_installed(vec![]);
        assert!(resolve_printer(&prefs, &empty).is_err());
    }
}
