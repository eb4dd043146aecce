//! Simple Output and Reporting
//!
//! This module provides output formatting for catalog runs.

use crate::cli::VerbosityLevel;
use crate::pipeline::RunSummary;

/// Simple output formatter for human-readable results
pub struct Output {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Formatter that never emits colour codes
    pub fn plain(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: false,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_results(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        if let Some(path) = &summary.output_path {
            output.push_str(&format!("Catalog written to {}\n", path.display()));
        }

        if self.verbosity == VerbosityLevel::Quiet {
            return output;
        }

        output.push_str(&self.format_summary(summary));

        if self.verbosity >= VerbosityLevel::Verbose && !summary.skipped.is_empty() {
            output.push_str("Skipped files:\n");
            for skip in &summary.skipped {
                output.push_str(&format!(
                    "  {} {} ({}) - {}\n",
                    self.colorize("- SKIPPED", "33"),
                    skip.path.display(),
                    skip.kind,
                    skip.reason
                ));
            }
        }

        output
    }

    fn format_summary(&self, summary: &RunSummary) -> String {
        let mut output = format!(
            "  {} {} file{} ({} XSD, {} DTD)",
            self.colorize("Cataloged:", "32"),
            summary.cataloged_files(),
            if summary.cataloged_files() == 1 { "" } else { "s" },
            summary.xsd_files,
            summary.dtd_files
        );
        if !summary.skipped.is_empty() {
            output.push_str(&format!(
                ", {} {}",
                self.colorize("skipped:", "33"),
                summary.skipped.len()
            ));
        }
        output.push('\n');

        if self.verbosity >= VerbosityLevel::Verbose {
            output.push_str(&format!(
                "  Entries: {} public, {} system, {} rewrite\n",
                summary.public_entries, summary.system_entries, summary.rewrite_entries
            ));
            output.push_str(&format!(
                "  Scan root: {}\n",
                summary.scan_root.display()
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::SkippedFile;
    use crate::file_discovery::SchemaKind;
    use std::path::PathBuf;

    fn create_test_summary() -> RunSummary {
        RunSummary {
            output_path: Some(PathBuf::from("galleon-catalog.xml")),
            scan_root: PathBuf::from("/schemas"),
            xsd_files: 3,
            dtd_files: 1,
            skipped: vec![SkippedFile {
                path: PathBuf::from("/schemas/plain.xsd"),
                kind: SchemaKind::Xsd,
                reason: "no schema namespace".to_string(),
            }],
            public_entries: 3,
            system_entries: 1,
            rewrite_entries: 2,
        }
    }

    #[test]
    fn test_quiet_prints_only_output_path() {
        let formatted = Output::plain(VerbosityLevel::Quiet).format_results(&create_test_summary());
        assert_eq!(formatted, "Catalog written to galleon-catalog.xml\n");
    }

    #[test]
    fn test_normal_summary() {
        let formatted = Output::plain(VerbosityLevel::Normal).format_results(&create_test_summary());
        assert!(formatted.contains("Catalog written to galleon-catalog.xml"));
        assert!(formatted.contains("Cataloged: 3 files (3 XSD, 1 DTD), skipped: 1"));
        assert!(!formatted.contains("plain.xsd"));
    }

    #[test]
    fn test_verbose_lists_skipped_files() {
        let formatted =
            Output::plain(VerbosityLevel::Verbose).format_results(&create_test_summary());
        assert!(formatted.contains("Entries: 3 public, 1 system, 2 rewrite"));
        assert!(formatted.contains("- SKIPPED /schemas/plain.xsd (XSD) - no schema namespace"));
    }
}
