use crate::models::{CountryGroup, IssueField, SiteRecord};
use crate::processors::rules::{
    commitments_missing, country_group, is_placeholder_coordinates, is_valid_utility_id,
    normalized_utility_id, present,
};
use crate::utils::constants::{MAX_NORMAL_CAPACITY_KWP, PERFORMANCE_MISMATCH_THRESHOLD};

/// Fields that are absent (or effectively absent) on a site.
///
/// A missing utility ID only counts for Mexican sites.
pub fn missing_issues(site: &SiteRecord) -> Vec<IssueField> {
    let mut issues = Vec::new();

    if present(site.installed_capacity).is_none() {
        issues.push(IssueField::InstalledCapacity);
    }
    if present(site.performance).is_none() {
        issues.push(IssueField::Performance);
    }
    if present(site.latitude).is_none() || present(site.longitude).is_none() {
        issues.push(IssueField::Coordinates);
    }
    if commitments_missing(site) {
        issues.push(IssueField::MonthlyCommitments);
    }
    if normalized_utility_id(site.utility_id.as_deref()).is_none()
        && country_group(site.site_country.as_deref()) == CountryGroup::Mexico
    {
        issues.push(IssueField::UtilityId);
    }

    issues
}

/// Fields that are present but hold implausible values.
pub fn mismatch_issues(site: &SiteRecord) -> Vec<IssueField> {
    let mut issues = Vec::new();

    if let Some(capacity) = present(site.installed_capacity) {
        if capacity == 0.0 || capacity > MAX_NORMAL_CAPACITY_KWP {
            issues.push(IssueField::InstalledCapacity);
        }
    }
    if let Some(performance) = present(site.performance) {
        if performance > PERFORMANCE_MISMATCH_THRESHOLD {
            issues.push(IssueField::Performance);
        }
    }
    if let (Some(lat), Some(lon)) = (present(site.latitude), present(site.longitude)) {
        if is_placeholder_coordinates(lat, lon) {
            issues.push(IssueField::Coordinates);
        }
    }
    if let Some(utility_id) = normalized_utility_id(site.utility_id.as_deref()) {
        if !is_valid_utility_id(utility_id) {
            issues.push(IssueField::UtilityId);
        }
    }

    issues
}
