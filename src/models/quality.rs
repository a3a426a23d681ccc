use serde::{Deserialize, Serialize};

/// Column names of the derived quality columns, in export order.
pub const QUALITY_COLUMNS: [&str; 7] = [
    "Installed Capacity Category",
    "Performance Category",
    "Geo Coordinates Category",
    "Monthly Commitments Category",
    "Utility ID Format Category",
    "Data Quality Flag",
    "Data Issues Summary",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityCategory {
    Missing,
    Zero,
    BelowOneKwp,
    AboveTwoMwp,
    NormalRange,
}

impl CapacityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CapacityCategory::Missing => "IC is missing",
            CapacityCategory::Zero => "IC is 0",
            CapacityCategory::BelowOneKwp => "IC < 1 kWp",
            CapacityCategory::AboveTwoMwp => "IC > 2 MWp",
            CapacityCategory::NormalRange => "IC between 1 kWp and 2 MWp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceCategory {
    Missing,
    Zero,
    BelowFifty,
    NormalRange,
    AboveTwoHundred,
}

impl PerformanceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceCategory::Missing => "Performance is missing",
            PerformanceCategory::Zero => "Performance is 0%",
            PerformanceCategory::BelowFifty => "Performance < 50%",
            PerformanceCategory::NormalRange => "Performance between 50% and 200%",
            PerformanceCategory::AboveTwoHundred => "Performance > 200%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoCategory {
    Missing,
    Invalid,
    Ok,
}

impl GeoCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GeoCategory::Missing => "Coordinates missing",
            GeoCategory::Invalid => "Invalid coordinates",
            GeoCategory::Ok => "Coordinates OK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitmentsCategory {
    Missing,
    Ok,
}

impl CommitmentsCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CommitmentsCategory::Missing => "Missing commitments",
            CommitmentsCategory::Ok => "Commitments OK",
        }
    }
}

/// How a site's country bears on utility ID requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountryGroup {
    Mexico,
    MissingCountry,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtilityIdCategory {
    IncorrectFormat,
    Correct(CountryGroup),
    Missing(CountryGroup),
}

impl UtilityIdCategory {
    pub fn label(&self) -> &'static str {
        match self {
            UtilityIdCategory::IncorrectFormat => "Incorrect Format",
            UtilityIdCategory::Correct(CountryGroup::Mexico) => "Correct (Mexico)",
            UtilityIdCategory::Correct(CountryGroup::MissingCountry) => "Correct (Missing Country)",
            UtilityIdCategory::Correct(CountryGroup::Other) => "Correct (Other Country)",
            UtilityIdCategory::Missing(CountryGroup::Mexico) => "Missing (Mexico)",
            UtilityIdCategory::Missing(CountryGroup::MissingCountry) => "Missing (Missing Country)",
            UtilityIdCategory::Missing(CountryGroup::Other) => "Missing (Other Country)",
        }
    }
}

/// Fields that can appear in the missing or mismatch issue lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueField {
    InstalledCapacity,
    Performance,
    Coordinates,
    MonthlyCommitments,
    UtilityId,
}

impl IssueField {
    pub fn display_name(&self) -> &'static str {
        match self {
            IssueField::InstalledCapacity => "Installed Capacity",
            IssueField::Performance => "Performance",
            IssueField::Coordinates => "Coordinates",
            IssueField::MonthlyCommitments => "Monthly Commitments",
            IssueField::UtilityId => "Utility ID",
        }
    }
}

impl std::fmt::Display for IssueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityVerdict {
    Complete,
    Missing,
    Mismatch,
    MissingAndMismatch,
}

impl QualityVerdict {
    /// Derive the verdict from the presence of missing and mismatch issues.
    pub fn from_issues(has_missing: bool, has_mismatch: bool) -> Self {
        match (has_missing, has_mismatch) {
            (false, false) => QualityVerdict::Complete,
            (true, true) => QualityVerdict::MissingAndMismatch,
            (true, false) => QualityVerdict::Missing,
            (false, true) => QualityVerdict::Mismatch,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityVerdict::Complete => "Data Complete",
            QualityVerdict::Missing => "Data Missing",
            QualityVerdict::Mismatch => "Data Mismatch",
            QualityVerdict::MissingAndMismatch => "Data Missing + Mismatch",
        }
    }

    pub fn all() -> [QualityVerdict; 4] {
        [
            QualityVerdict::Complete,
            QualityVerdict::Missing,
            QualityVerdict::Mismatch,
            QualityVerdict::MissingAndMismatch,
        ]
    }
}

impl std::fmt::Display for QualityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything derived from one site record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteClassification {
    pub capacity: CapacityCategory,
    pub performance: PerformanceCategory,
    pub geo: GeoCategory,
    pub commitments: CommitmentsCategory,
    pub utility_id: UtilityIdCategory,
    pub missing: Vec<IssueField>,
    pub mismatch: Vec<IssueField>,
}

impl SiteClassification {
    pub fn verdict(&self) -> QualityVerdict {
        QualityVerdict::from_issues(!self.missing.is_empty(), !self.mismatch.is_empty())
    }

    /// `"Missing: a, b; Mismatch: c"`, leaving out empty parts.
    pub fn issue_summary(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.missing.is_empty() {
            parts.push(format!("Missing: {}", join_fields(&self.missing)));
        }
        if !self.mismatch.is_empty() {
            parts.push(format!("Mismatch: {}", join_fields(&self.mismatch)));
        }
        parts.join("; ")
    }

    /// Derived column values in `QUALITY_COLUMNS` order.
    pub fn to_csv_fields(&self) -> Vec<String> {
        vec![
            self.capacity.label().to_string(),
            self.performance.label().to_string(),
            self.geo.label().to_string(),
            self.commitments.label().to_string(),
            self.utility_id.label().to_string(),
            self.verdict().label().to_string(),
            self.issue_summary(),
        ]
    }
}

fn join_fields(fields: &[IssueField]) -> String {
    fields
        .iter()
        .map(IssueField::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}
