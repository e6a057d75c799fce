// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Stored as pretty-printed JSON under the user data directory. Values here are
// defaults only; anything passed explicitly on a print call wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PdfPrintError, Result};
use crate::types::{PrintOptions, PrintSettings};

/// File name of the persisted configuration.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent defaults applied to every print call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Printer used when a call does not name one.
    pub default_printer: Option<String>,
    /// SumatraPDF executable to use instead of the bundled one.
    pub sumatra_pdf_path: Option<PathBuf>,
    /// Extra SumatraPDF arguments prepended to every Windows print.
    pub win32: Vec<String>,
    /// Extra `lp` arguments prepended to every Unix print.
    pub unix: Vec<String>,
    /// Default print settings.
    pub settings: Option<PrintSettings>,
}

impl AppConfig {
    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| PdfPrintError::Config(format!("{}: {e}", path.display())))
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Fill every unset field of `options` from this config.
    ///
    /// Passthrough lists are concatenated with the config entries first, so a
    /// call can still append flags after the configured ones.
    pub fn apply_to(&self, mut options: PrintOptions) -> PrintOptions {
        if options.target_printer().is_none() {
            options.printer = self.default_printer.clone();
        }
        if options.sumatra_pdf_path.is_none() {
            options.sumatra_pdf_path = self.sumatra_pdf_path.clone();
        }
        options.win32 = merge_list(&self.win32, options.win32);
        options.unix = merge_list(&self.unix, options.unix);
        if options.settings.is_none() {
            options.settings = self.settings.clone();
        }
        options
    }
}

fn merge_list(configured: &[String], given: Option<Vec<String>>) -> Option<Vec<String>> {
    match given {
        None if configured.is_empty() => None,
        None => Some(configured.to_vec()),
        Some(given) => Some(configured.iter().cloned().chain(given).collect()),
    }
}

/// Return the pdfprint data directory (not created).
///
/// Uses `$XDG_DATA_HOME`, then `$HOME/.local/share`, then the temp dir.
pub fn data_dir() -> PathBuf {
    dirs_fallback().join("pdfprint")
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    data_dir().join(CONFIG_FILE)
}

fn dirs_fallback() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scale;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = AppConfig::load(&dir.path().join(CONFIG_FILE)).expect("load");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let cfg = AppConfig {
            default_printer: Some("Office Laser".into()),
            win32: vec!["-print-settings \"fit\"".into()],
            settings: Some(PrintSettings {
                scale: Some(Scale::Fit),
                ..Default::default()
            }),
            ..Default::default()
        };
        cfg.save(&path).expect("save");
        assert_eq!(AppConfig::load(&path).expect("load"), cfg);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(AppConfig::load(&path), Err(PdfPrintError::Config(_))));
    }

    #[test]
    fn explicit_options_win_over_config() {
        let cfg = AppConfig {
            default_printer: Some("Office Laser".into()),
            sumatra_pdf_path: Some("C:\\cfg\\SumatraPDF.exe".into()),
            win32: vec!["-print-settings \"fit\"".into()],
            ..Default::default()
        };

        let merged = cfg.apply_to(PrintOptions {
            printer: Some("Zebra".into()),
            win32: Some(vec!["-print-dialog".into()]),
            ..Default::default()
        });
        assert_eq!(merged.printer.as_deref(), Some("Zebra"));
        assert_eq!(
            merged.win32,
            Some(vec!["-print-settings \"fit\"".to_string(), "-print-dialog".to_string()])
        );
        assert_eq!(merged.sumatra_pdf_path, Some(PathBuf::from("C:\\cfg\\SumatraPDF.exe")));

        let untouched = AppConfig::default().apply_to(PrintOptions::default());
        assert_eq!(untouched, PrintOptions::default());
    }
}
