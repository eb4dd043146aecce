use std::fs;
use std::path::Path;
use tracing::debug;

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{CatalogError, Result};

pub const CATALOG_NAMESPACE: &str = "urn:oasis:names:tc:entity:xmlns:xml:catalog";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "    ";

/// Serializes a catalog to OASIS XML Catalog format
pub struct CatalogWriter;

impl CatalogWriter {
    /// Render the whole document. Lines are `\n`-separated with no trailing
    /// newline after the closing tag.
    pub fn render(catalog: &Catalog) -> String {
        let mut lines = Vec::with_capacity(catalog.entries().len() + 3);
        lines.push(XML_DECLARATION.to_string());

        if catalog.prefer_public() {
            lines.push(format!(
                r#"<catalog xmlns="{}" prefer="public">"#,
                CATALOG_NAMESPACE
            ));
        } else {
            lines.push(format!(r#"<catalog xmlns="{}">"#, CATALOG_NAMESPACE));
        }

        for entry in catalog.entries() {
            lines.push(format!("{}{}", INDENT, render_entry(entry)));
        }

        lines.push("</catalog>".to_string());
        lines.join("\n")
    }

    /// Render and write in one call, replacing any existing file
    pub fn write(catalog: &Catalog, path: &Path) -> Result<()> {
        let document = Self::render(catalog);
        fs::write(path, document).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), entries = catalog.entries().len(), "catalog written");
        Ok(())
    }
}

fn render_entry(entry: &CatalogEntry) -> String {
    match entry {
        CatalogEntry::Public { public_id, uri } => format!(
            r#"<public publicId="{}" uri="{}"/>"#,
            escape_attribute(public_id),
            escape_attribute(uri)
        ),
        CatalogEntry::System { system_id, uri } => format!(
            r#"<system systemId="{}" uri="{}"/>"#,
            escape_attribute(system_id),
            escape_attribute(uri)
        ),
        CatalogEntry::RewriteUri {
            prefix,
            rewrite_prefix,
        } => format!(
            r#"<rewriteURI uriStartString="{}" rewritePrefix="{}"/>"#,
            escape_attribute(prefix),
            escape_attribute(rewrite_prefix)
        ),
        CatalogEntry::RewriteSystem {
            prefix,
            rewrite_prefix,
        } => format!(
            r#"<rewriteSystem systemIdStartString="{}" rewritePrefix="{}"/>"#,
            escape_attribute(prefix),
            escape_attribute(rewrite_prefix)
        ),
    }
}

/// Escape a value for a double-quoted attribute
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
