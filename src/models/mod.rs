pub mod organization;
pub mod quality;
pub mod site;

pub use organization::Organization;
pub use quality::{
    CapacityCategory, CommitmentsCategory, CountryGroup, GeoCategory, IssueField,
    PerformanceCategory, QualityVerdict, SiteClassification, UtilityIdCategory, QUALITY_COLUMNS,
};
pub use site::{SiteRecord, SiteRecordBuilder, SITE_COLUMNS};
