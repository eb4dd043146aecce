//! Identifier extraction for discovered schema files.
//!
//! XSD files contribute a namespace URI taken from the root element; DTD files
//! contribute the PUBLIC/SYSTEM pair of their DOCTYPE declaration. A file that
//! yields nothing usable is skipped, while unreadable files and malformed XML
//! abort the run.

use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::encoding::decode_xml;
use crate::error::{CatalogError, Result};
use crate::file_discovery::{SchemaFile, SchemaKind};

/// Cached regex for `<!DOCTYPE name PUBLIC "public" "system">`
static DOCTYPE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_doctype_regex() -> &'static Regex {
    DOCTYPE_REGEX.get_or_init(|| {
        Regex::new(r#"<!DOCTYPE\s+\S+\s+PUBLIC\s+"([^"]+)"\s+"([^"]+)">"#)
            .expect("Failed to compile DOCTYPE regex")
    })
}

/// Prefix of the namespace declarations XSD files bind to the XML Schema namespace
const SCHEMA_PREFIX_DECLARATION: &str = "xmlns:x";

/// Root attribute sources for an XSD namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceSource {
    /// `xmlns`
    DefaultDeclaration,
    /// Any `xmlns:x*`, e.g. `xmlns:xs` or `xmlns:xsd`
    SchemaPrefixDeclaration,
    /// `targetNamespace`
    TargetNamespace,
}

impl NamespaceSource {
    /// Evaluation order; the first source with a matching attribute wins
    pub const PRIORITY: [NamespaceSource; 3] = [
        NamespaceSource::DefaultDeclaration,
        NamespaceSource::SchemaPrefixDeclaration,
        NamespaceSource::TargetNamespace,
    ];

    pub fn matches(self, attribute_name: &str) -> bool {
        match self {
            NamespaceSource::DefaultDeclaration => attribute_name == "xmlns",
            NamespaceSource::SchemaPrefixDeclaration => {
                attribute_name.starts_with(SCHEMA_PREFIX_DECLARATION)
            }
            NamespaceSource::TargetNamespace => attribute_name == "targetNamespace",
        }
    }
}

/// Identifier extracted from an XSD file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdRecord {
    pub namespace: String,
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

/// Identifier pair extracted from a DTD file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtdRecord {
    pub public_id: String,
    pub system_id: String,
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

/// A candidate that produced no usable identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub kind: SchemaKind,
    pub reason: String,
}

/// Outcome of extracting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Found(T),
    Skipped(SkippedFile),
}

/// A root element attribute as it appears in the source, namespace
/// declarations included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootAttribute {
    pub name: String,
    pub value: String,
}

/// Extracts identifiers relative to one scan root
#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    root: PathBuf,
}

impl IdentifierExtractor {
    /// `root` must be the absolute scan directory the files were discovered in
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn extract_xsd(&self, file: &SchemaFile) -> Result<Extraction<XsdRecord>> {
        let path = &file.absolute_path;
        let bytes = read_file(path)?;
        let content = decode_xml(&bytes, path)?;

        match schema_namespace(&content, path)? {
            Some(namespace) => {
                debug!(path = %path.display(), %namespace, "extracted schema namespace");
                Ok(Extraction::Found(XsdRecord {
                    namespace,
                    relative_path: self.relative_uri(path)?,
                    absolute_path: path.clone(),
                }))
            }
            None => {
                warn!("No schema namespace in {}", path.display());
                Ok(Extraction::Skipped(SkippedFile {
                    path: path.clone(),
                    kind: SchemaKind::Xsd,
                    reason: "no schema namespace".to_string(),
                }))
            }
        }
    }

    pub fn extract_dtd(&self, file: &SchemaFile) -> Result<Extraction<DtdRecord>> {
        let path = &file.absolute_path;
        let bytes = read_file(path)?;
        let content = String::from_utf8_lossy(&bytes);

        match doctype_identifiers(&content) {
            Some((public_id, system_id)) => {
                debug!(
                    path = %path.display(),
                    %public_id,
                    %system_id,
                    "extracted DOCTYPE identifiers"
                );
                Ok(Extraction::Found(DtdRecord {
                    public_id,
                    system_id,
                    relative_path: self.relative_uri(path)?,
                    absolute_path: path.clone(),
                }))
            }
            None => {
                warn!("No DOCTYPE declaration found in {}", path.display());
                Ok(Extraction::Skipped(SkippedFile {
                    path: path.clone(),
                    kind: SchemaKind::Dtd,
                    reason: "no DOCTYPE PUBLIC declaration".to_string(),
                }))
            }
        }
    }

    /// Path of `path` relative to the scan root, `/`-separated
    pub fn relative_uri(&self, path: &Path) -> Result<String> {
        let relative =
            path.strip_prefix(&self.root)
                .map_err(|_| CatalogError::FileSystemTraversal {
                    path: path.to_path_buf(),
                    reason: format!("not under scan root {}", self.root.display()),
                })?;

        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s),
                _ => None,
            })
            .map(|s| match s.to_str() {
                Some(segment) => segment.to_string(),
                None => {
                    warn!(
                        "Non-UTF-8 path segment in {}, written with replacement characters",
                        path.display()
                    );
                    s.to_string_lossy().into_owned()
                }
            })
            .collect();
        Ok(segments.join("/"))
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `content` as XML and pick the namespace identifying the schema.
///
/// Sources are tried in fixed priority: the default `xmlns` declaration, then
/// the first declaration whose name starts with `xmlns:x` (in document order),
/// then `targetNamespace`. An empty selected value counts as not found.
pub fn schema_namespace(content: &str, path: &Path) -> Result<Option<String>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document =
        Document::parse_with_options(content, options).map_err(|e| CatalogError::XmlParse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    let attributes = root_attributes(document.root_element());
    let selected = NamespaceSource::PRIORITY.iter().find_map(|source| {
        attributes
            .iter()
            .find(|attribute| source.matches(&attribute.name))
            .map(|attribute| (*source, attribute))
    });

    if let Some((source, attribute)) = selected {
        debug!(path = %path.display(), ?source, attribute = %attribute.name, "namespace source");
    }

    Ok(selected
        .map(|(_, attribute)| attribute.value.clone())
        .filter(|value| !value.is_empty()))
}

/// Root attributes in document order, namespace declarations first.
///
/// The parser reports namespace declarations separately from ordinary
/// attributes, so they are rebuilt as `xmlns` / `xmlns:prefix` here.
/// The implicitly bound `xml` prefix is not a declaration and is left out.
pub fn root_attributes(root: Node<'_, '_>) -> Vec<RootAttribute> {
    let declarations = root
        .namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .map(|ns| RootAttribute {
            name: match ns.name() {
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            },
            value: ns.uri().to_string(),
        });

    let attributes = root.attributes().map(|attr| {
        let name = match attr.namespace().and_then(|uri| root.lookup_prefix(uri)) {
            Some(prefix) => format!("{}:{}", prefix, attr.name()),
            None => attr.name().to_string(),
        };
        RootAttribute {
            name,
            value: attr.value().to_string(),
        }
    });

    declarations.chain(attributes).collect()
}

/// Find the first `<!DOCTYPE name PUBLIC "..." "...">` and return its
/// public and system identifiers. SYSTEM-only declarations do not match.
pub fn doctype_identifiers(content: &str) -> Option<(String, String)> {
    get_doctype_regex()
        .captures(content)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}
