//! Filename and extension validation
//!
//! Pure functions of their inputs; the allow-set is passed in by the caller.
//!
//! # Examples
//!
//! ```rust
//! use fileproc_server::config::AllowedExtensions;
//! use fileproc_server::features::shared::validation::validate_extension;
//!
//! let allowed = AllowedExtensions::new(["txt", "csv"]);
//! assert_eq!(validate_extension("Report.CSV", &allowed).unwrap(), "csv");
//! assert!(validate_extension("report.pdf", &allowed).is_err());
//! ```

use thiserror::Error;

use crate::config::AllowedExtensions;
use crate::error::AppError;

/// Errors that can occur during extension validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("missing or invalid extension")]
    Missing,

    #[error("unsupported type: {extension}; allowed: {allowed}")]
    Unsupported {
        extension: String,
        allowed: AllowedExtensions,
    },
}

impl From<ExtensionError> for AppError {
    fn from(err: ExtensionError) -> Self {
        let message = err.to_string();
        match err {
            ExtensionError::Missing => AppError::UnsupportedFileType {
                message,
                value: None,
                allowed: Vec::new(),
            },
            ExtensionError::Unsupported { extension, allowed } => AppError::UnsupportedFileType {
                message,
                value: Some(extension),
                allowed: allowed.to_vec(),
            },
        }
    }
}

/// Derive the lower-cased extension of `filename`
///
/// # Rules
/// - The filename must not be empty
/// - It must contain a `.` followed by a non-empty suffix
/// - The suffix after the final `.` is the extension; a suffix containing a
///   path separator belongs to a directory name and does not count
pub fn extension_of(filename: &str) -> Result<String, ExtensionError> {
    let (_, suffix) = filename.rsplit_once('.').ok_or(ExtensionError::Missing)?;

    if suffix.is_empty() || suffix.contains(['/', '\\']) {
        return Err(ExtensionError::Missing);
    }

    Ok(suffix.to_lowercase())
}

/// `extension` must already be lower-case
#[inline]
pub fn is_allowed(extension: &str, allowed: &AllowedExtensions) -> bool {
    allowed.contains(extension)
}

/// Derive the extension of `filename` and check it against the allow-set
///
/// # Returns
/// The normalized extension, or the reason it was rejected
pub fn validate_extension(
    filename: &str,
    allowed: &AllowedExtensions,
) -> Result<String, ExtensionError> {
    let extension = extension_of(filename)?;

    if !is_allowed(&extension, allowed) {
        return Err(ExtensionError::Unsupported {
            extension,
            allowed: allowed.clone(),
        });
    }

    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt_csv() -> AllowedExtensions {
        AllowedExtensions::new(["txt", "csv"])
    }

    #[test]
    fn test_extension_of_valid() {
        assert_eq!(extension_of("notes.txt").unwrap(), "txt");
        assert_eq!(extension_of("Data.CSV").unwrap(), "csv");
        assert_eq!(extension_of("archive.2024.txt").unwrap(), "txt");
        assert_eq!(extension_of(".txt").unwrap(), "txt");
    }

    #[test]
    fn test_extension_of_missing() {
        assert_eq!(extension_of(""), Err(ExtensionError::Missing));
        assert_eq!(extension_of("report"), Err(ExtensionError::Missing));
        assert_eq!(extension_of("report."), Err(ExtensionError::Missing));
        assert_eq!(extension_of("dir.v1/report"), Err(ExtensionError::Missing));
    }

    #[test]
    fn test_is_allowed() {
        let allowed = txt_csv();
        assert!(is_allowed("txt", &allowed));
        assert!(is_allowed("csv", &allowed));
        assert!(!is_allowed("pdf", &allowed));
    }

    #[test]
    fn test_validate_extension_case_insensitive() {
        assert_eq!(validate_extension("REPORT.TxT", &txt_csv()).unwrap(), "txt");
    }

    #[test]
    fn test_validate_extension_rejections() {
        let allowed = txt_csv();

        assert_eq!(validate_extension("report", &allowed), Err(ExtensionError::Missing));
        assert_eq!(validate_extension("report.", &allowed), Err(ExtensionError::Missing));

        let err = validate_extension("report.pdf", &allowed).unwrap_err();
        assert_eq!(
            err,
            ExtensionError::Unsupported {
                extension: "pdf".to_string(),
                allowed: txt_csv(),
            }
        );
        assert_eq!(err.to_string(), "unsupported type: pdf; allowed: [csv, txt]");
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = validate_extension("report.PDF", &txt_csv()).unwrap_err().into();
        match err {
            AppError::UnsupportedFileType { value, allowed, .. } => {
                assert_eq!(value.as_deref(), Some("pdf"));
                assert_eq!(allowed, vec!["csv", "txt"]);
            },
            other => panic!("unexpected error: {other:?}"),
        }

        let err: AppError = ExtensionError::Missing.into();
        assert_eq!(err.to_string(), "missing or invalid extension");
    }
}
