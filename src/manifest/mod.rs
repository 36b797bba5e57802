//! AndroidManifest.xml reader
//!
//! Only the root `package` attribute is needed: it names the application's
//! own namespace, which drives the first filter pass.

use crate::error::SiftError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;
use tracing::{info, warn};

pub const MANIFEST_FILE: &str = "AndroidManifest.xml";

/// `package` attribute of the root `<manifest>` element.
///
/// Returns `Ok(None)` when the root element is not `<manifest>` or carries
/// no (or an empty) `package` attribute.
pub fn parse_package(xml: &str) -> Result<Option<String>, String> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(element) | Event::Empty(element) => {
                if element.name().as_ref() != b"manifest" {
                    return Ok(None);
                }

                for attr in element.attributes() {
                    let attr = attr.map_err(|e| e.to_string())?;
                    if attr.key.as_ref() != b"package" {
                        continue;
                    }
                    let raw = std::str::from_utf8(&attr.value).map_err(|e| e.to_string())?;
                    let value = quick_xml::escape::unescape(raw).map_err(|e| e.to_string())?;
                    let value = value.trim();
                    return Ok((!value.is_empty()).then(|| value.to_string()));
                }

                return Ok(None);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Application package from the manifest in a decompiled tree.
///
/// Every failure (missing file, unreadable file, bad XML, no attribute) is
/// logged and reported as absence.
pub fn read_package(root: &Path) -> Option<String> {
    let path = root.join(MANIFEST_FILE);
    if !path.is_file() {
        warn!("{}", SiftError::missing("manifest", &path));
        return None;
    }

    let xml = match std::fs::read_to_string(&path) {
        Ok(xml) => xml,
        Err(e) => {
            warn!("{}", SiftError::filesystem(&path, e));
            return None;
        }
    };

    match parse_package(&xml) {
        Ok(Some(package)) => {
            info!("Package name from manifest: {}", package);
            Some(package)
        }
        Ok(None) => {
            warn!("No 'package' attribute in {}", path.display());
            None
        }
        Err(e) => {
            warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}
