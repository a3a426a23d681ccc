use crate::error::Result;
use crate::models::{SiteClassification, SiteRecord, QUALITY_COLUMNS, SITE_COLUMNS};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes site records with their derived quality columns appended.
pub struct QualityCsvWriter;

impl QualityCsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn header() -> Vec<&'static str> {
        SITE_COLUMNS
            .iter()
            .chain(QUALITY_COLUMNS.iter())
            .copied()
            .collect()
    }

    /// Write the annotated table to `path`, creating parent directories.
    pub fn write_report(
        &self,
        sites: &[SiteRecord],
        classifications: &[SiteClassification],
        path: &Path,
    ) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), sites, classifications)?;

        info!(path = %path.display(), rows = sites.len(), "wrote quality report");
        Ok(())
    }

    /// Annotated table as UTF-8 CSV bytes.
    pub fn to_bytes(
        &self,
        sites: &[SiteRecord],
        classifications: &[SiteClassification],
    ) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, sites, classifications)?;
        Ok(buffer)
    }

    pub fn write_to<W: Write>(
        &self,
        sink: W,
        sites: &[SiteRecord],
        classifications: &[SiteClassification],
    ) -> Result<()> {
        debug_assert_eq!(sites.len(), classifications.len());

        let mut writer = csv::Writer::from_writer(sink);

        writer.write_record(Self::header())?;
        for (site, classification) in sites.iter().zip(classifications) {
            let mut record = site.to_csv_fields();
            record.extend(classification.to_csv_fields());
            writer.write_record(&record)?;
        }
        writer.flush()?;

        Ok(())
    }
}

impl Default for QualityCsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
