//! Import/export rules for editor documents and diagram images.
//!
//! The actual file pickers, downloads and rasterisation belong to the host; this module only
//! decides what is allowed and how things are named.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::Error;

pub const DEFAULT_IMAGE_FILE_NAME: &str = "Diagram";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentMode {
    #[default]
    Json,
    Xml,
}

impl DocumentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// File extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => ".json",
            Self::Xml => ".xml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Xml => "XML",
        }
    }
}

impl fmt::Display for DocumentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(Error::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Please select a {} file (got {}). Current editor type is {}.",
    .expected.to_uppercase(),
    describe_extension(.actual),
    .mode.label()
)]
pub struct ImportError {
    pub expected: String,
    pub actual: String,
    pub mode: DocumentMode,
}

fn describe_extension(actual: &str) -> String {
    if actual.is_empty() {
        "a file without extension".to_string()
    } else {
        actual.to_uppercase()
    }
}

/// Lower-cased text after the last `.` of the file name, including the dot, or an empty string.
///
/// A dot-file such as `.json` counts as having that extension.
pub fn file_extension(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    name.rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

pub fn validate_import(file_name: &str, mode: DocumentMode) -> Result<(), ImportError> {
    let actual = file_extension(file_name);
    if actual != mode.extension() {
        tracing::debug!(file_name, expected = mode.extension(), "import rejected");
        return Err(ImportError {
            expected: mode.extension().to_string(),
            actual,
            mode,
        });
    }
    Ok(())
}

/// Validates the picked file and hands back its text unchanged for the editor.
pub fn import_document(
    file_name: &str,
    content: String,
    mode: DocumentMode,
) -> Result<String, ImportError> {
    validate_import(file_name, mode)?;
    Ok(content)
}

pub fn export_file_name(mode: DocumentMode) -> String {
    format!("diagram.{}", mode.as_str())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
}

impl FromStr for ImageFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportRegion {
    #[default]
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageExportRequest {
    pub file_name: String,
    pub format: ImageFormat,
    pub region: ExportRegion,
}

impl ImageExportRequest {
    pub fn new(file_name: Option<&str>, format: Option<ImageFormat>) -> Self {
        let file_name = file_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_IMAGE_FILE_NAME);
        Self {
            file_name: file_name.to_string(),
            format: format.unwrap_or_default(),
            region: ExportRegion::Content,
        }
    }
}
