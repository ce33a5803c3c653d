use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XlscanError};

/// Top-level configuration, usually read from a TOML file.
///
/// ```toml
/// [page]
/// rows_per_page = 40
/// overlap = 0
///
/// [analysis]
/// use_print_area = false
///
/// [export]
/// compact_json = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page: PageConfig,
    pub analysis: AnalysisConfig,
    pub export: ExportConfig,
}

/// Page tiling and figure settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub rows_per_page: u32,
    pub cols_per_page: u32,
    /// Extra rows/columns added to every page except the last in each axis.
    pub overlap: u32,
    /// Resolution used when sizing page figures.
    pub dpi: u32,
}

/// Which parts of the pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub use_pagination: bool,
    /// Restrict each sheet to its print area when one is defined.
    pub use_print_area: bool,
}

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Single-line JSON. When off, JSON is indented and each page is also
    /// written to its own file.
    pub compact_json: bool,
    pub write_markdown: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 30,
            cols_per_page: 10,
            overlap: 2,
            dpi: 120,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            use_pagination: true,
            use_print_area: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compact_json: true,
            write_markdown: true,
        }
    }
}

impl PageConfig {
    /// Reject settings the tiler cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.rows_per_page == 0 {
            return Err(XlscanError::Config("rows_per_page must be at least 1".into()));
        }
        if self.cols_per_page == 0 {
            return Err(XlscanError::Config("cols_per_page must be at least 1".into()));
        }
        if self.dpi == 0 {
            return Err(XlscanError::Config("dpi must be at least 1".into()));
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.page.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`AppConfig::load`], but falls back to defaults when the file is
    /// missing or unusable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(XlscanError::Io(_)) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config at {}: {e}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}
