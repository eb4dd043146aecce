use crate::cli::{Cli, VerbosityLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Optional pipeline features
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Emit prefer="public" on the catalog element
    pub prefer_public: bool,
    /// Collect DTD files in addition to XSD files
    pub include_dtd: bool,
}

/// Directory scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// File name suffix of XSD files
    pub xsd_extension: String,
    /// File name suffix of DTD files
    pub dtd_extension: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the catalog prefix to form the output file name
    pub suffix: String,
    /// Verbose output
    pub verbose: bool,
    /// Quiet mode (errors only)
    pub quiet: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            prefer_public: false,
            include_dtd: true,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            xsd_extension: ".xsd".to_string(),
            dtd_extension: ".dtd".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "-catalog.xml".to_string(),
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Output file for a catalog prefix, e.g. `galleon` -> `galleon-catalog.xml`
    pub fn output_path(&self, catalog_prefix: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", catalog_prefix, self.output.suffix))
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.output.quiet {
            VerbosityLevel::Quiet
        } else if self.output.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub fn load_config(cli: &Cli) -> Result<Config> {
        let mut config = Config::default();

        if let Some(config_path) = &cli.config {
            let file_config = Self::load_from_file(config_path)?;
            config = Self::merge_configs(config, file_config);
        } else if let Some(found_config) = Self::find_config_file()? {
            config = Self::merge_configs(config, found_config);
        }

        config = Self::apply_environment_overrides(config)?;
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Result<Option<Config>> {
        let config_names = ["catgen.toml", "catgen.json", ".catgen.toml", ".catgen.json"];

        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(Some(Self::load_from_file(&path)?));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("catgen");
            for name in &config_names {
                let path = app_config_dir.join(name);
                if path.exists() {
                    return Ok(Some(Self::load_from_file(&path)?));
                }
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides using the system environment
    pub fn apply_environment_overrides(config: Config) -> Result<Config> {
        Self::apply_environment_overrides_with(&SystemEnvProvider, config)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        if let Some(prefer_public) = env.get("CATGEN_PREFER_PUBLIC") {
            config.catalog.prefer_public = prefer_public.parse().map_err(|_| {
                ConfigError::Environment(format!(
                    "Invalid CATGEN_PREFER_PUBLIC value: {}",
                    prefer_public
                ))
            })?;
        }

        if let Some(include_dtd) = env.get("CATGEN_INCLUDE_DTD") {
            config.catalog.include_dtd = include_dtd.parse().map_err(|_| {
                ConfigError::Environment(format!(
                    "Invalid CATGEN_INCLUDE_DTD value: {}",
                    include_dtd
                ))
            })?;
        }

        if let Some(ext) = env.get("CATGEN_XSD_EXTENSION") {
            config.scan.xsd_extension = ext;
        }

        if let Some(ext) = env.get("CATGEN_DTD_EXTENSION") {
            config.scan.dtd_extension = ext;
        }

        if let Some(suffix) = env.get("CATGEN_OUTPUT_SUFFIX") {
            config.output.suffix = suffix;
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if cli.prefer_public {
            config.catalog.prefer_public = true;
        }
        if cli.xsd_only {
            config.catalog.include_dtd = false;
        }

        if cli.verbose {
            config.output.verbose = true;
            config.output.quiet = false;
        }
        if cli.quiet {
            config.output.quiet = true;
            config.output.verbose = false;
        }

        config
    }

    /// Merge two configurations (second takes precedence)
    pub fn merge_configs(mut base: Config, override_config: Config) -> Config {
        base.catalog = override_config.catalog;

        if !override_config.scan.xsd_extension.is_empty() {
            base.scan.xsd_extension = override_config.scan.xsd_extension;
        }
        if !override_config.scan.dtd_extension.is_empty() {
            base.scan.dtd_extension = override_config.scan.dtd_extension;
        }

        if !override_config.output.suffix.is_empty() {
            base.output.suffix = override_config.output.suffix;
        }
        base.output.verbose = override_config.output.verbose;
        base.output.quiet = override_config.output.quiet;

        base
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if config.scan.xsd_extension.is_empty() {
            return Err(ConfigError::Validation(
                "XSD extension must not be empty".to_string(),
            ));
        }

        if config.scan.dtd_extension.is_empty() {
            return Err(ConfigError::Validation(
                "DTD extension must not be empty".to_string(),
            ));
        }

        if config.scan.xsd_extension == config.scan.dtd_extension {
            return Err(ConfigError::Validation(format!(
                "XSD and DTD extensions must differ: {}",
                config.scan.xsd_extension
            )));
        }

        for ext in [&config.scan.xsd_extension, &config.scan.dtd_extension] {
            if ext.contains('/') || ext.contains('\\') {
                return Err(ConfigError::Validation(format!(
                    "Invalid file extension: {}",
                    ext
                )));
            }
        }

        if config.output.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "Output suffix must not be empty".to_string(),
            ));
        }

        if config.output.verbose && config.output.quiet {
            return Err(ConfigError::Validation(
                "Cannot enable both verbose and quiet modes".to_string(),
            ));
        }

        Ok(())
    }
}
