use std::path::Path;

use crate::extractor::{DtdRecord, XsdRecord};
use crate::prefix::longest_common_prefix;

/// One entry of an OASIS XML Catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    /// `<public publicId=".." uri=".."/>`
    Public { public_id: String, uri: String },
    /// `<system systemId=".." uri=".."/>`
    System { system_id: String, uri: String },
    /// `<rewriteURI uriStartString=".." rewritePrefix=".."/>`
    RewriteUri {
        prefix: String,
        rewrite_prefix: String,
    },
    /// `<rewriteSystem systemIdStartString=".." rewritePrefix=".."/>`
    RewriteSystem {
        prefix: String,
        rewrite_prefix: String,
    },
}

impl CatalogEntry {
    pub fn is_rewrite(&self) -> bool {
        matches!(
            self,
            CatalogEntry::RewriteUri { .. } | CatalogEntry::RewriteSystem { .. }
        )
    }
}

/// An assembled catalog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    prefer_public: bool,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>, prefer_public: bool) -> Self {
        Self {
            entries,
            prefer_public,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn prefer_public(&self) -> bool {
        self.prefer_public
    }

    pub fn public_count(&self) -> usize {
        self.count(|e| matches!(e, CatalogEntry::Public { .. }))
    }

    pub fn system_count(&self) -> usize {
        self.count(|e| matches!(e, CatalogEntry::System { .. }))
    }

    pub fn rewrite_count(&self) -> usize {
        self.count(CatalogEntry::is_rewrite)
    }

    fn count(&self, predicate: impl Fn(&CatalogEntry) -> bool) -> usize {
        self.entries.iter().filter(|&e| predicate(e)).count()
    }
}

/// Turns extracted identifiers into catalog entries
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    rewrite_prefix: String,
    prefer_public: bool,
}

impl CatalogBuilder {
    /// `scan_root` is the absolute directory that rewrite rules point into
    pub fn new(scan_root: &Path, prefer_public: bool) -> Self {
        Self {
            rewrite_prefix: directory_prefix(scan_root),
            prefer_public,
        }
    }

    pub fn rewrite_prefix(&self) -> &str {
        &self.rewrite_prefix
    }

    /// Exact entries first (XSD, then DTD, in record order), followed by at
    /// most one `rewriteURI` over the XSD namespaces and one `rewriteSystem`
    /// over the DTD system identifiers.
    pub fn build(&self, xsd_records: &[XsdRecord], dtd_records: &[DtdRecord]) -> Catalog {
        let mut entries = Vec::with_capacity(xsd_records.len() + 2 * dtd_records.len() + 2);

        for record in xsd_records {
            entries.push(CatalogEntry::Public {
                public_id: record.namespace.clone(),
                uri: record.relative_path.clone(),
            });
        }

        for record in dtd_records {
            entries.push(CatalogEntry::Public {
                public_id: record.public_id.clone(),
                uri: record.relative_path.clone(),
            });
            entries.push(CatalogEntry::System {
                system_id: record.system_id.clone(),
                uri: record.relative_path.clone(),
            });
        }

        let namespaces: Vec<&str> = xsd_records.iter().map(|r| r.namespace.as_str()).collect();
        let namespace_prefix = longest_common_prefix(&namespaces);
        if !namespace_prefix.is_empty() {
            entries.push(CatalogEntry::RewriteUri {
                prefix: namespace_prefix,
                rewrite_prefix: self.rewrite_prefix.clone(),
            });
        }

        let system_ids: Vec<&str> = dtd_records.iter().map(|r| r.system_id.as_str()).collect();
        let system_prefix = longest_common_prefix(&system_ids);
        if !system_prefix.is_empty() {
            entries.push(CatalogEntry::RewriteSystem {
                prefix: system_prefix,
                rewrite_prefix: self.rewrite_prefix.clone(),
            });
        }

        Catalog::new(entries, self.prefer_public)
    }
}

/// Directory path with exactly one trailing `/`
fn directory_prefix(dir: &Path) -> String {
    let mut prefix = dir.to_string_lossy().into_owned();
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}
