//! File type resolution from file names.
//!
//! Resolution is two table lookups: extension to MIME type, then MIME type
//! to classification. Neither miss is an error; callers receive an empty
//! result and decide for themselves.

use serde::{Deserialize, Serialize};

/// Recognized file kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum FileClassification {
    /// Portable Document Format
    #[display("PDF")]
    Pdf,
    /// JPEG image
    #[display("JPG")]
    Jpg,
    /// PNG image
    #[display("PNG")]
    Png,
    /// GIF image
    #[display("GIF")]
    Gif,
    /// Excel spreadsheet
    #[display("XLSX")]
    Xlsx,
    /// Word document
    #[display("DOCX")]
    Docx,
    /// Comma-separated values
    #[display("CSV")]
    Csv,
    /// XML document
    #[display("XML")]
    Xml,
}

impl FileClassification {
    /// Upper-case label used in descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileClassification::Pdf => "PDF",
            FileClassification::Jpg => "JPG",
            FileClassification::Png => "PNG",
            FileClassification::Gif => "GIF",
            FileClassification::Xlsx => "XLSX",
            FileClassification::Docx => "DOCX",
            FileClassification::Csv => "CSV",
            FileClassification::Xml => "XML",
        }
    }
}

impl std::str::FromStr for FileClassification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PDF" => Ok(FileClassification::Pdf),
            "JPG" => Ok(FileClassification::Jpg),
            "PNG" => Ok(FileClassification::Png),
            "GIF" => Ok(FileClassification::Gif),
            "XLSX" => Ok(FileClassification::Xlsx),
            "DOCX" => Ok(FileClassification::Docx),
            "CSV" => Ok(FileClassification::Csv),
            "XML" => Ok(FileClassification::Xml),
            _ => Err(format!("Unknown file classification: {}", s)),
        }
    }
}

const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[
    (".doc", "application/msword"),
    (
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (".xls", "application/vnd.ms-excel"),
    (
        ".xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (".csv", "text/csv"),
    (".xml", "text/xml"),
    (".jpg", "image/jgp"),
    (".jpeg", "image/jgp"),
    (".png", "image/png"),
    (".gif", "image/gif"),
    (".pdf", "application/pdf"),
];

// Extensions resolve to the historical "image/jgp", which stored
// descriptors carry. "image/jpeg" classifies as JPG too.
const MIME_CLASSIFICATIONS: &[(&str, FileClassification)] = &[
    ("image/gif", FileClassification::Gif),
    ("image/png", FileClassification::Png),
    ("image/jgp", FileClassification::Jpg),
    ("image/jpeg", FileClassification::Jpg),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        FileClassification::Docx,
    ),
    ("application/msword", FileClassification::Docx),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        FileClassification::Xlsx,
    ),
    ("application/vnd.ms-excel", FileClassification::Xlsx),
    ("text/csv", FileClassification::Csv),
    ("text/xml", FileClassification::Xml),
    ("application/xml", FileClassification::Xml),
    ("application/pdf", FileClassification::Pdf),
];

/// Outcome of resolving a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ResolvedFileType {
    /// Classification, when the MIME type maps to one
    classification: Option<FileClassification>,
    /// MIME type, when the extension is known
    mime_type: Option<&'static str>,
    /// Extension including the leading dot, empty when the name has none
    extension: String,
}

impl ResolvedFileType {
    /// Whether neither a classification nor a MIME type was found.
    pub fn is_unknown(&self) -> bool {
        self.classification.is_none() && self.mime_type.is_none()
    }
}

/// Resolve classification and MIME type from a file name or path.
///
/// The extension is everything from the last `.` to the end and is matched
/// case-sensitively, so `photo.JPG` does not resolve. A name without a dot
/// yields an empty extension and an unknown result.
///
/// # Examples
///
/// ```
/// use coffer_core::{resolve_file_type, FileClassification};
///
/// let resolved = resolve_file_type("reports/q3.csv");
/// assert_eq!(*resolved.classification(), Some(FileClassification::Csv));
/// assert_eq!(*resolved.mime_type(), Some("text/csv"));
/// assert_eq!(resolved.extension(), ".csv");
///
/// assert!(resolve_file_type("notes.unknownext").is_unknown());
/// assert!(resolve_file_type("README").is_unknown());
/// ```
pub fn resolve_file_type(file_name: &str) -> ResolvedFileType {
    let extension = file_name
        .rfind('.')
        .map(|index| &file_name[index..])
        .unwrap_or_default();

    let mime_type = EXTENSION_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime);

    let classification = mime_type.and_then(|mime| {
        MIME_CLASSIFICATIONS
            .iter()
            .find(|(known, _)| *known == mime)
            .map(|(_, classification)| *classification)
    });

    ResolvedFileType {
        classification,
        mime_type,
        extension: extension.to_string(),
    }
}

/// Every MIME type that maps to `classification`.
///
/// # Examples
///
/// ```
/// use coffer_core::{mime_types_for, FileClassification};
///
/// let jpeg = mime_types_for(FileClassification::Jpg);
/// assert!(jpeg.contains(&"image/jpeg"));
/// assert_eq!(mime_types_for(FileClassification::Csv), vec!["text/csv"]);
/// ```
pub fn mime_types_for(classification: FileClassification) -> Vec<&'static str> {
    MIME_CLASSIFICATIONS
        .iter()
        .filter(|(_, mapped)| *mapped == classification)
        .map(|(mime, _)| *mime)
        .collect()
}

/// File type metadata carried on a descriptor.
///
/// Both fields are empty strings when resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FileTypeInfo {
    /// Classification label (e.g. "CSV"), or empty
    #[serde(default)]
    pub name: String,
    /// MIME type, or empty
    #[serde(default)]
    pub mime_type: String,
}

impl FileTypeInfo {
    /// Parsed classification, if the label is a known one.
    pub fn classification(&self) -> Option<FileClassification> {
        self.name.parse().ok()
    }

    /// Whether neither a label nor a MIME type is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.mime_type.is_empty()
    }
}

impl From<ResolvedFileType> for FileTypeInfo {
    fn from(resolved: ResolvedFileType) -> Self {
        Self {
            name: resolved
                .classification
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            mime_type: resolved.mime_type.unwrap_or_default().to_string(),
        }
    }
}
