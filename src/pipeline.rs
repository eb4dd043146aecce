//! The catalog generation pipeline: scan, extract, build, write.
//!
//! Runs single-threaded with blocking I/O. The document is assembled in
//! memory and written with a single call, so a failure before the write
//! leaves any existing catalog untouched.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogBuilder};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::extractor::{Extraction, IdentifierExtractor, SkippedFile};
use crate::file_discovery::{FileDiscovery, normalized_absolute};
use crate::writer::CatalogWriter;

/// What a run found and produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub output_path: Option<PathBuf>,
    pub scan_root: PathBuf,
    pub xsd_files: usize,
    pub dtd_files: usize,
    pub skipped: Vec<SkippedFile>,
    pub public_entries: usize,
    pub system_entries: usize,
    pub rewrite_entries: usize,
}

impl RunSummary {
    pub fn cataloged_files(&self) -> usize {
        self.xsd_files + self.dtd_files - self.skipped.len()
    }
}

/// One configurable pipeline covering both the XSD-only and the XSD+DTD runs
#[derive(Debug, Clone)]
pub struct CatalogPipeline {
    config: Config,
}

impl CatalogPipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan `directory` and assemble the catalog without writing it
    pub fn generate(&self, directory: &Path) -> Result<(Catalog, RunSummary)> {
        if !directory.is_dir() {
            return Err(CatalogError::InvalidDirectory {
                path: directory.to_path_buf(),
            });
        }
        let scan_root = normalized_absolute(directory)?;

        let discovery = FileDiscovery::new()
            .with_extensions(
                self.config.scan.xsd_extension.clone(),
                self.config.scan.dtd_extension.clone(),
            )
            .with_include_dtd(self.config.catalog.include_dtd);
        let files = discovery.discover_files(&scan_root)?;
        debug!(
            root = %scan_root.display(),
            xsd = files.xsd.len(),
            dtd = files.dtd.len(),
            "scan complete"
        );

        let extractor = IdentifierExtractor::new(&scan_root);
        let mut skipped = Vec::new();

        let mut xsd_records = Vec::with_capacity(files.xsd.len());
        for file in &files.xsd {
            match extractor.extract_xsd(file)? {
                Extraction::Found(record) => xsd_records.push(record),
                Extraction::Skipped(skip) => skipped.push(skip),
            }
        }

        let mut dtd_records = Vec::with_capacity(files.dtd.len());
        for file in &files.dtd {
            match extractor.extract_dtd(file)? {
                Extraction::Found(record) => dtd_records.push(record),
                Extraction::Skipped(skip) => skipped.push(skip),
            }
        }

        let builder = CatalogBuilder::new(&scan_root, self.config.catalog.prefer_public);
        let catalog = builder.build(&xsd_records, &dtd_records);

        let summary = RunSummary {
            output_path: None,
            scan_root,
            xsd_files: files.xsd.len(),
            dtd_files: files.dtd.len(),
            skipped,
            public_entries: catalog.public_count(),
            system_entries: catalog.system_count(),
            rewrite_entries: catalog.rewrite_count(),
        };

        Ok((catalog, summary))
    }

    /// Generate the catalog for `directory` and write it to `output_path`
    pub fn run(&self, directory: &Path, output_path: &Path) -> Result<RunSummary> {
        let (catalog, mut summary) = self.generate(directory)?;
        CatalogWriter::write(&catalog, output_path)?;

        info!(
            output = %output_path.display(),
            cataloged = summary.cataloged_files(),
            skipped = summary.skipped.len(),
            "generation finished"
        );
        summary.output_path = Some(output_path.to_path_buf());
        Ok(summary)
    }
}
