//! Rich YAML error diagnostics
//!
//! Wraps serde_yml errors in miette diagnostics so parse failures point at
//! the offending spot in the record file instead of printing a bare message.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors from reading and parsing record YAML
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error("{0}")]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A YAML syntax or structure error with source context
#[derive(Debug, Error, Diagnostic)]
#[error("failed to parse {filename}")]
#[diagnostic(code(tiller::yaml::parse))]
pub struct YamlSyntaxError {
    pub filename: String,

    /// Underlying parser message
    #[help]
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("{message}")]
    pub span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error and the source it came from
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = err.location().map(|loc| SourceSpan::from(loc.index()..loc.index() + 1));
        Self {
            filename: filename.to_string(),
            message: err.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_carries_location() {
        let content = "name: ok\n  bad: indent";
        let err = serde_yml::from_str::<serde_yml::Value>(content).unwrap_err();
        let diag = YamlSyntaxError::from_serde_error(&err, content, "test.yaml");

        assert_eq!(diag.filename, "test.yaml");
        assert!(!diag.message.is_empty());
    }
}
