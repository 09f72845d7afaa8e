//! Error handling for the skill gap analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillGapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Vectorization error: {0}")]
    Vectorization(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl SkillGapError {
    /// Whether the caller supplied something we refuse to process, as opposed
    /// to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SkillGapError::UnsupportedFormat(_)
                | SkillGapError::EmptyInput(_)
                | SkillGapError::PdfExtraction(_)
                | SkillGapError::DocxExtraction(_)
                | SkillGapError::InvalidInput(_)
        )
    }

    /// Process exit status: 2 for client errors, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        if self.is_client_error() {
            2
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillGapError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for SkillGapError {
    fn from(err: anyhow::Error) -> Self {
        SkillGapError::InvalidInput(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(SkillGapError::UnsupportedFormat("txt".into()).is_client_error());
        assert!(SkillGapError::EmptyInput("file".into()).is_client_error());
        assert!(SkillGapError::DocxExtraction("bad zip".into()).is_client_error());
        assert!(!SkillGapError::Configuration("bad".into()).is_client_error());
        assert!(!SkillGapError::Vectorization("empty vocabulary".into()).is_client_error());
        assert!(!SkillGapError::OutputFormatting("disk full".into()).is_client_error());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SkillGapError::InvalidInput("empty".into()).exit_code(), 2);
        assert_eq!(SkillGapError::UnsupportedFormat("txt".into()).exit_code(), 2);
        assert_eq!(SkillGapError::Configuration("bad".into()).exit_code(), 1);
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(SkillGapError::from(io).exit_code(), 1);
    }

    #[test]
    fn test_anyhow_conversion_keeps_context() {
        let err = anyhow::anyhow!("root cause").context("loading jobs.toml");
        let converted: SkillGapError = err.into();
        let message = converted.to_string();
        assert!(message.contains("loading jobs.toml"));
        assert!(message.contains("root cause"));
    }
}
