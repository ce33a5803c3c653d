//! Structured error types for xlscan.

/// All errors that can occur while reading a workbook or exporting its structure.
#[derive(Debug, thiserror::Error)]
pub enum XlscanError {
    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Requested sheet does not exist in the workbook.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Rejected configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be decoded.
    #[error("Config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON serialization: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlscanError>;
