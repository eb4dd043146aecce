use clap::Parser;
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// Only show the output path and errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show skipped files and per-kind counts
    Verbose,
}

const EXAMPLES: &str = "EXAMPLES:
  catgen test/schema galleon
  catgen test/dtd slee --prefer-public
  catgen --xsd-only schemas/ wildfly";

/// Generate an OASIS XML Catalog from XSD and DTD files
#[derive(Parser, Debug, Clone)]
#[command(name = "catgen")]
#[command(about = "Generate OASIS XML Catalog from XSD and DTD files")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Directory containing XSD or DTD files
    #[arg(help = "Directory containing XSD or DTD files")]
    pub directory: PathBuf,

    /// Prefix for the output catalog file
    #[arg(help = "Prefix for output catalog file (creates <prefix>-catalog.xml)")]
    pub catalog_prefix: String,

    /// Set prefer="public" on the catalog element
    #[arg(
        long = "prefer-public",
        help = "Set prefer=\"public\" attribute on catalog element (prefer PUBLIC identifiers over SYSTEM)"
    )]
    pub prefer_public: bool,

    /// Only process XSD files
    #[arg(long = "xsd-only", help = "Ignore DTD files and only catalog XSD schemas")]
    pub xsd_only: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", help = "Configuration file (TOML or JSON)")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.directory.exists() {
            return Err(format!(
                "Directory does not exist: {}",
                self.directory.display()
            ));
        }
        if !self.directory.is_dir() {
            return Err(format!("Not a directory: {}", self.directory.display()));
        }
        if self.catalog_prefix.is_empty() {
            return Err("Catalog prefix must not be empty".to_string());
        }
        Ok(())
    }
}
