use crate::error::{QualityError, Result};
use crate::models::SiteRecord;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

/// Reads previously exported site tables back into `SiteRecord`s.
///
/// Columns are matched by header name; derived quality columns and any other
/// unknown columns are ignored.
pub struct SiteCsvReader {
    allow_legacy_encoding: bool,
}

impl SiteCsvReader {
    pub fn new() -> Self {
        Self {
            allow_legacy_encoding: true,
        }
    }

    /// When disabled, input that is not valid UTF-8 is rejected instead of
    /// being decoded as Windows-1252.
    pub fn with_legacy_encoding(allow_legacy_encoding: bool) -> Self {
        Self {
            allow_legacy_encoding,
        }
    }

    pub fn read_sites(&self, path: &Path) -> Result<Vec<SiteRecord>> {
        let bytes = std::fs::read(path)?;
        let text = self.decode(&bytes, path)?;
        let sites = self.parse_sites(&text)?;

        debug!(path = %path.display(), count = sites.len(), "read site records");
        Ok(sites)
    }

    pub fn parse_sites(&self, text: &str) -> Result<Vec<SiteRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        reader
            .deserialize::<SiteRecord>()
            .map(|row| row.map_err(QualityError::from))
            .collect()
    }

    fn decode<'a>(&self, bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>> {
        // Strips a UTF-8 BOM if present
        let (text, malformed) = UTF_8.decode_with_bom_removal(bytes);
        if !malformed {
            return Ok(text);
        }

        if !self.allow_legacy_encoding {
            return Err(QualityError::Encoding {
                encoding: UTF_8.name(),
                path: path.display().to_string(),
            });
        }

        warn!(path = %path.display(), "input is not valid UTF-8, decoding as Windows-1252");
        let (text, _, _) = WINDOWS_1252.decode(bytes);
        Ok(text)
    }
}

impl Default for SiteCsvReader {
    fn default() -> Self {
        Self::new()
    }
}
