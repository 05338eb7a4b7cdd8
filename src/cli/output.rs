//! Output formatting utilities

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_depends_on_context() {
        assert_eq!(
            effective_format(OutputFormat::Auto, true),
            OutputFormat::Table
        );
        assert_eq!(
            effective_format(OutputFormat::Auto, false),
            OutputFormat::Yaml
        );
        assert_eq!(
            effective_format(OutputFormat::Json, true),
            OutputFormat::Json
        );
    }
}
