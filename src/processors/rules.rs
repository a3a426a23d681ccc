use crate::models::{
    CapacityCategory, CommitmentsCategory, CountryGroup, GeoCategory, PerformanceCategory,
    SiteRecord, UtilityIdCategory,
};
use crate::utils::constants::{
    ABSENT_UTILITY_IDS, MAX_NORMAL_CAPACITY_KWP, MAX_NORMAL_PERFORMANCE,
    MIN_NORMAL_CAPACITY_KWP, MIN_NORMAL_PERFORMANCE, PLACEHOLDER_COORDINATES,
    PLACEHOLDER_SUN_HOURS, UTILITY_ID_LENGTH, UTILITY_ID_REQUIRED_COUNTRY,
};

/// A numeric field counts as present only if it holds a real number.
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

pub fn categorize_capacity(capacity: Option<f64>) -> CapacityCategory {
    match present(capacity) {
        None => CapacityCategory::Missing,
        Some(c) if c == 0.0 => CapacityCategory::Zero,
        Some(c) if c < MIN_NORMAL_CAPACITY_KWP => CapacityCategory::BelowOneKwp,
        Some(c) if c > MAX_NORMAL_CAPACITY_KWP => CapacityCategory::AboveTwoMwp,
        Some(_) => CapacityCategory::NormalRange,
    }
}

pub fn categorize_performance(performance: Option<f64>) -> PerformanceCategory {
    match present(performance) {
        None => PerformanceCategory::Missing,
        Some(p) if p == 0.0 => PerformanceCategory::Zero,
        Some(p) if p < MIN_NORMAL_PERFORMANCE => PerformanceCategory::BelowFifty,
        Some(p) if p <= MAX_NORMAL_PERFORMANCE => PerformanceCategory::NormalRange,
        Some(_) => PerformanceCategory::AboveTwoHundred,
    }
}

/// Exact match against the placeholder pairs; no tolerance.
pub fn is_placeholder_coordinates(latitude: f64, longitude: f64) -> bool {
    PLACEHOLDER_COORDINATES
        .iter()
        .any(|&(lat, lon)| latitude == lat && longitude == lon)
}

pub fn categorize_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> GeoCategory {
    match (present(latitude), present(longitude)) {
        (Some(lat), Some(lon)) if is_placeholder_coordinates(lat, lon) => GeoCategory::Invalid,
        (Some(_), Some(_)) => GeoCategory::Ok,
        _ => GeoCategory::Missing,
    }
}

/// Commitments are missing when the column is NULL and neither the sun-hours
/// estimate nor the annual yield carries real information.
pub fn commitments_missing(site: &SiteRecord) -> bool {
    let sun_hours_unset = match present(site.expected_sun_hours) {
        None => true,
        Some(hours) => PLACEHOLDER_SUN_HOURS.contains(&hours),
    };
    let yield_unset = match present(site.expected_annual_yield) {
        None => true,
        Some(y) => y == 0.0,
    };

    site.commitments_are_null() && sun_hours_unset && yield_unset
}

pub fn categorize_commitments(site: &SiteRecord) -> CommitmentsCategory {
    if commitments_missing(site) {
        CommitmentsCategory::Missing
    } else {
        CommitmentsCategory::Ok
    }
}

/// Trimmed utility ID, or `None` when the value is a placeholder for "no ID".
pub fn normalized_utility_id(utility_id: Option<&str>) -> Option<&str> {
    let trimmed = utility_id?.trim();
    if ABSENT_UTILITY_IDS.contains(&trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

pub fn is_valid_utility_id(utility_id: &str) -> bool {
    utility_id.len() == UTILITY_ID_LENGTH && utility_id.bytes().all(|b| b.is_ascii_digit())
}

pub fn country_group(country: Option<&str>) -> CountryGroup {
    let country = country.map(|c| c.trim().to_lowercase()).unwrap_or_default();
    if country == UTILITY_ID_REQUIRED_COUNTRY {
        CountryGroup::Mexico
    } else if country.is_empty() {
        CountryGroup::MissingCountry
    } else {
        CountryGroup::Other
    }
}

pub fn categorize_utility_id(utility_id: Option<&str>, country: Option<&str>) -> UtilityIdCategory {
    let group = country_group(country);
    match normalized_utility_id(utility_id) {
        Some(id) if is_valid_utility_id(id) => UtilityIdCategory::Correct(group),
        Some(_) => UtilityIdCategory::IncorrectFormat,
        None => UtilityIdCategory::Missing(group),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteRecordBuilder;

    #[test]
    fn test_capacity_boundaries() {
        assert_eq!(categorize_capacity(None), CapacityCategory::Missing);
        assert_eq!(categorize_capacity(Some(f64::NAN)), CapacityCategory::Missing);
        assert_eq!(categorize_capacity(Some(0.0)), CapacityCategory::Zero);
        assert_eq!(categorize_capacity(Some(0.5)), CapacityCategory::BelowOneKwp);
        assert_eq!(categorize_capacity(Some(1.0)), CapacityCategory::NormalRange);
        assert_eq!(categorize_capacity(Some(2000.0)), CapacityCategory::NormalRange);
        assert_eq!(categorize_capacity(Some(2000.5)), CapacityCategory::AboveTwoMwp);
        assert_eq!(categorize_capacity(Some(2001.0)), CapacityCategory::AboveTwoMwp);
        assert_eq!(categorize_capacity(Some(-3.0)), CapacityCategory::BelowOneKwp);
    }

    #[test]
    fn test_performance_boundaries() {
        assert_eq!(categorize_performance(None), PerformanceCategory::Missing);
        assert_eq!(categorize_performance(Some(0.0)), PerformanceCategory::Zero);
        assert_eq!(categorize_performance(Some(49.9)), PerformanceCategory::BelowFifty);
        assert_eq!(categorize_performance(Some(50.0)), PerformanceCategory::NormalRange);
        assert_eq!(categorize_performance(Some(200.0)), PerformanceCategory::NormalRange);
        assert_eq!(categorize_performance(Some(200.1)), PerformanceCategory::AboveTwoHundred);
    }

    #[test]
    fn test_coordinates() {
        assert_eq!(categorize_coordinates(None, Some(1.0)), GeoCategory::Missing);
        assert_eq!(categorize_coordinates(Some(1.0), None), GeoCategory::Missing);
        assert_eq!(categorize_coordinates(Some(0.0), Some(0.0)), GeoCategory::Invalid);
        assert_eq!(categorize_coordinates(Some(-1.0), Some(-1.0)), GeoCategory::Invalid);
        assert_eq!(categorize_coordinates(Some(0.0), Some(-1.0)), GeoCategory::Invalid);
        assert_eq!(categorize_coordinates(Some(-0.0), Some(0.0)), GeoCategory::Invalid);
        assert_eq!(categorize_coordinates(Some(0.0), Some(0.0001)), GeoCategory::Ok);
        assert_eq!(categorize_coordinates(Some(1.0), Some(-1.0)), GeoCategory::Ok);
        assert_eq!(categorize_coordinates(Some(19.43), Some(-99.13)), GeoCategory::Ok);
    }

    #[test]
    fn test_commitments_placeholder_sun_hours() {
        let site = SiteRecordBuilder::new("1")
            .commitments_flag("NULL")
            .expected_sun_hours(3.5)
            .expected_annual_yield(0.0)
            .build();
        assert_eq!(categorize_commitments(&site), CommitmentsCategory::Missing);

        let site = SiteRecordBuilder::new("1")
            .commitments_flag("NULL")
            .expected_sun_hours(5.0)
            .expected_annual_yield(0.0)
            .build();
        assert_eq!(categorize_commitments(&site), CommitmentsCategory::Ok);
    }

    #[test]
    fn test_commitments_other_branches() {
        // Nothing at all
        assert_eq!(categorize_commitments(&SiteRecord::new("1")), CommitmentsCategory::Missing);

        // Yield carries information
        let site = SiteRecordBuilder::new("1").expected_annual_yield(15000.0).build();
        assert_eq!(categorize_commitments(&site), CommitmentsCategory::Ok);

        // Commitments column populated
        let site = SiteRecordBuilder::new("1").monthly_commitments([0.0; 12]).build();
        assert_eq!(categorize_commitments(&site), CommitmentsCategory::Ok);

        // Zero sun hours is also a placeholder
        let site = SiteRecordBuilder::new("1").expected_sun_hours(0.0).build();
        assert_eq!(categorize_commitments(&site), CommitmentsCategory::Missing);
    }

    #[test]
    fn test_normalized_utility_id() {
        assert_eq!(normalized_utility_id(None), None);
        assert_eq!(normalized_utility_id(Some("")), None);
        assert_eq!(normalized_utility_id(Some("  ")), None);
        assert_eq!(normalized_utility_id(Some(" 0 ")), None);
        assert_eq!(normalized_utility_id(Some("nan")), None);
        assert_eq!(normalized_utility_id(Some(" 123 ")), Some("123"));
    }

    #[test]
    fn test_utility_id_format() {
        assert!(is_valid_utility_id("123456789012"));
        assert!(is_valid_utility_id("000000000001"));
        assert!(!is_valid_utility_id("12345678901"));
        assert!(!is_valid_utility_id("1234567890123"));
        assert!(!is_valid_utility_id("12345678901A"));
        assert!(!is_valid_utility_id("١٢٣٤٥٦٧٨٩٠١٢"));
    }

    #[test]
    fn test_utility_id_categories() {
        assert_eq!(
            categorize_utility_id(Some("123456789012"), Some("Mexico")),
            UtilityIdCategory::Correct(CountryGroup::Mexico)
        );
        assert_eq!(
            categorize_utility_id(Some("123456789012"), Some(" MEXICO ")),
            UtilityIdCategory::Correct(CountryGroup::Mexico)
        );
        assert_eq!(
            categorize_utility_id(Some("123456789012"), None),
            UtilityIdCategory::Correct(CountryGroup::MissingCountry)
        );
        assert_eq!(
            categorize_utility_id(Some("123456789012"), Some("Brazil")),
            UtilityIdCategory::Correct(CountryGroup::Other)
        );
        assert_eq!(
            categorize_utility_id(Some("ABC"), Some("Mexico")),
            UtilityIdCategory::IncorrectFormat
        );
        assert_eq!(
            categorize_utility_id(Some("ABC"), Some("")),
            UtilityIdCategory::IncorrectFormat
        );
        assert_eq!(
            categorize_utility_id(Some(""), Some("Mexico")),
            UtilityIdCategory::Missing(CountryGroup::Mexico)
        );
        assert_eq!(
            categorize_utility_id(Some("0"), Some("  ")),
            UtilityIdCategory::Missing(CountryGroup::MissingCountry)
        );
        assert_eq!(
            categorize_utility_id(None, Some("Chile")),
            UtilityIdCategory::Missing(CountryGroup::Other)
        );
    }
}
