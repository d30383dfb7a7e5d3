//! Resume intake: upload-or-paste with type and size checks.
use serde::{Deserialize, Serialize};

use crate::error::FileRejection;

pub const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeMode {
    #[default]
    Upload,
    Paste,
}

/// What the host knows about a chosen file. Contents never reach the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

/// Type first, then size.
///
/// # Errors
///
/// Returns the first rule the file breaks.
pub fn validate_file(file: &FileDescriptor, max_bytes: u64) -> Result<(), FileRejection> {
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(FileRejection::UnsupportedType);
    }
    if file.size > max_bytes {
        return Err(FileRejection::TooLarge);
    }
    Ok(())
}

/// Human-readable size, e.g. `1.5 MB`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    #[allow(clippy::cast_precision_loss)]
    let as_f64 = bytes as f64;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", as_f64 / 1024.0)
    } else {
        format!("{:.1} MB", as_f64 / (1024.0 * 1024.0))
    }
}

/// Transient intake state; the chosen file lives only for the mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeIntake {
    file: Option<FileDescriptor>,
    error: Option<FileRejection>,
}

impl ResumeIntake {
    /// Accept or reject a file. A rejected file leaves any earlier choice in place.
    ///
    /// # Errors
    ///
    /// Returns the rejection, which is also kept for display.
    pub fn choose(&mut self, file: FileDescriptor, max_bytes: u64) -> Result<(), FileRejection> {
        match validate_file(&file, max_bytes) {
            Ok(()) => {
                self.error = None;
                self.file = Some(file);
                Ok(())
            }
            Err(rejection) => {
                log::debug!("resume `{}` rejected: {rejection}", file.name);
                self.error = Some(rejection.clone());
                Err(rejection)
            }
        }
    }

    pub fn remove(&mut self) {
        self.file = None;
        self.error = None;
    }

    #[must_use]
    pub const fn file(&self) -> Option<&FileDescriptor> {
        self.file.as_ref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Whether the active mode has something to analyze.
    #[must_use]
    pub fn has_content(&self, mode: ResumeMode, pasted_text: &str) -> bool {
        match mode {
            ResumeMode::Upload => self.file.is_some(),
            ResumeMode::Paste => !pasted_text.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 5 * 1024 * 1024;

    fn file(mime: &str, size: u64) -> FileDescriptor {
        FileDescriptor {
            name: "cv".into(),
            size,
            mime_type: mime.into(),
        }
    }

    #[test]
    fn type_is_checked_before_size() {
        assert_eq!(
            validate_file(&file("image/png", LIMIT * 10), LIMIT),
            Err(FileRejection::UnsupportedType)
        );
        assert_eq!(
            validate_file(&file("application/pdf", LIMIT + 1), LIMIT),
            Err(FileRejection::TooLarge)
        );
        assert!(validate_file(&file("application/msword", LIMIT), LIMIT).is_ok());
    }

    #[test]
    fn rejection_keeps_previous_file_and_message() {
        let mut intake = ResumeIntake::default();
        intake.choose(file("application/pdf", 10), LIMIT).unwrap();
        assert!(intake.choose(file("text/plain", 10), LIMIT).is_err());
        assert!(intake.file().is_some());
        assert_eq!(
            intake.error_message().as_deref(),
            Some("Please upload a PDF, DOC, or DOCX file.")
        );
        intake.remove();
        assert!(intake.file().is_none());
        assert!(intake.error_message().is_none());
    }

    #[test]
    fn content_depends_on_mode() {
        let mut intake = ResumeIntake::default();
        assert!(!intake.has_content(ResumeMode::Upload, "text"));
        assert!(!intake.has_content(ResumeMode::Paste, "  \t"));
        assert!(intake.has_content(ResumeMode::Paste, "resume"));
        intake.choose(file("application/pdf", 1), LIMIT).unwrap();
        assert!(intake.has_content(ResumeMode::Upload, ""));
    }

    #[test]
    fn sizes_are_formatted_for_display() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
