//! # catgen Library
//!
//! Builds OASIS XML Catalogs for directories of XSD and DTD files: exact
//! `public`/`system` entries per file plus shared-prefix rewrite rules, so XML
//! tooling can resolve schema identifiers locally instead of over the network.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod extractor;
pub mod file_discovery;
pub mod output;
pub mod pipeline;
pub mod prefix;
pub mod writer;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry};
pub use cli::{Cli, VerbosityLevel};
pub use config::{CatalogConfig, Config, ConfigError, ConfigManager, OutputConfig, ScanConfig};
pub use encoding::decode_xml;
pub use error::CatalogError;
pub use extractor::{
    DtdRecord, Extraction, IdentifierExtractor, NamespaceSource, SkippedFile, XsdRecord,
    doctype_identifiers, schema_namespace,
};
pub use file_discovery::{DiscoveredFiles, FileDiscovery, SchemaFile, SchemaKind, normalized_absolute};
pub use output::Output;
pub use pipeline::{CatalogPipeline, RunSummary};
pub use prefix::longest_common_prefix;
pub use writer::{CATALOG_NAMESPACE, CatalogWriter};
