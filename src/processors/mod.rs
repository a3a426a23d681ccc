pub mod issues;
pub mod quality_checker;
pub mod rules;

pub use issues::{mismatch_issues, missing_issues};
pub use quality_checker::{FlaggedSite, QualityChecker, QualityReport};
