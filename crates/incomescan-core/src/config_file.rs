use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ScanConfig;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub ocr: Option<OcrConfig>,
    pub scan: Option<ScanSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrConfig {
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSection {
    pub low_confidence_warn: Option<f64>,
}

/// Platform config directory path: `<config_dir>/incomescan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("incomescan").join("config.toml"))
}

/// Load config by cascading CWD `.incomescan.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".incomescan.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        ocr: Some(OcrConfig {
            language: overlay
                .ocr
                .as_ref()
                .and_then(|o| o.language.clone())
                .or_else(|| base.ocr.as_ref().and_then(|o| o.language.clone())),
        }),
        scan: Some(ScanSection {
            low_confidence_warn: overlay
                .scan
                .as_ref()
                .and_then(|s| s.low_confidence_warn)
                .or_else(|| base.scan.as_ref().and_then(|s| s.low_confidence_warn)),
        }),
    }
}

impl ConfigFile {
    /// Apply file values over the built-in defaults.
    pub fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default();
        if let Some(language) = self.ocr.as_ref().and_then(|o| o.language.clone()) {
            config.ocr_language = language;
        }
        if let Some(threshold) = self.scan.as_ref().and_then(|s| s.low_confidence_warn) {
            config.low_confidence_warn = threshold;
        }
        config
    }
}
