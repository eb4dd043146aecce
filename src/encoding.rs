//! Character encoding detection for XML input.
//!
//! The encoding is taken from a byte order mark, then from the byte pattern of
//! an unmarked UTF-16 `<?`, then from the `encoding` pseudo-attribute of the
//! XML declaration, and defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{CatalogError, Result};

/// Cached regex for the `encoding` pseudo-attribute of an XML declaration
static DECLARED_ENCODING_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_declared_encoding_regex() -> &'static Regex {
    DECLARED_ENCODING_REGEX.get_or_init(|| {
        Regex::new(r#"(?-u)\A\s*<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z][A-Za-z0-9._:-]*)["']"#)
            .expect("Failed to compile XML declaration regex")
    })
}

/// Decode the raw bytes of an XML document into a string.
///
/// Bytes that are not valid in the detected encoding, or a declared encoding
/// with no known decoder, are a parse failure for `path`.
pub fn decode_xml<'a>(bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>> {
    let (encoding, body) = detect_encoding(bytes, path)?;

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| CatalogError::XmlParse {
            path: path.to_path_buf(),
            details: format!("invalid {} byte sequence", encoding.name()),
        })
}

/// Detected encoding plus the bytes following any byte order mark
fn detect_encoding<'a>(bytes: &'a [u8], path: &Path) -> Result<(&'static Encoding, &'a [u8])> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return Ok((encoding, &bytes[bom_length..]));
    }

    match bytes {
        [0x3C, 0x00, 0x3F, 0x00, ..] => return Ok((UTF_16LE, bytes)),
        [0x00, 0x3C, 0x00, 0x3F, ..] => return Ok((UTF_16BE, bytes)),
        _ => {}
    }

    let Some(caps) = get_declared_encoding_regex().captures(bytes) else {
        return Ok((UTF_8, bytes));
    };
    let label = &caps[1];
    let encoding = Encoding::for_label(label).ok_or_else(|| CatalogError::XmlParse {
        path: path.to_path_buf(),
        details: format!(
            "unsupported encoding: {}",
            String::from_utf8_lossy(label)
        ),
    })?;

    // The declaration was readable as ASCII, so the document cannot really be
    // UTF-16 without a byte order mark.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok((UTF_8, bytes));
    }
    Ok((encoding, bytes))
}
