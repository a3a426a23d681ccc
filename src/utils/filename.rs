use crate::models::SiteRecord;
use crate::utils::constants::{OUTPUT_DIR, OUTPUT_FILE_PREFIX, UNKNOWN_ORGANIZATION};
use std::path::PathBuf;

/// Lower-cased organization name with spaces and slashes replaced by underscores.
pub fn safe_organization_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '/'], "_")
}

/// Organization name taken from the first record, or a placeholder.
pub fn organization_name(sites: &[SiteRecord]) -> &str {
    sites
        .first()
        .and_then(|site| site.organization.as_deref())
        .unwrap_or(UNKNOWN_ORGANIZATION)
}

/// Generate default report filename with format: output/data_quality_check_{name}.csv
pub fn generate_default_report_filename(organization: &str) -> PathBuf {
    let filename = format!(
        "{}{}.csv",
        OUTPUT_FILE_PREFIX,
        safe_organization_name(organization)
    );
    PathBuf::from(OUTPUT_DIR).join(filename)
}
