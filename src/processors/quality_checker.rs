use crate::models::{QualityVerdict, SiteClassification, SiteRecord};
use crate::processors::issues::{mismatch_issues, missing_issues};
use crate::processors::rules::{
    categorize_capacity, categorize_commitments, categorize_coordinates, categorize_performance,
    categorize_utility_id,
};
use chrono::{DateTime, Local};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
pub struct QualityReport {
    pub generated_at: DateTime<Local>,
    pub total_records: usize,
    pub verdict_counts: HashMap<QualityVerdict, usize>,
    pub capacity_counts: BTreeMap<&'static str, usize>,
    pub performance_counts: BTreeMap<&'static str, usize>,
    pub geo_counts: BTreeMap<&'static str, usize>,
    pub commitments_counts: BTreeMap<&'static str, usize>,
    pub utility_id_counts: BTreeMap<&'static str, usize>,
    pub missing_field_counts: BTreeMap<&'static str, usize>,
    pub mismatch_field_counts: BTreeMap<&'static str, usize>,
    pub flagged_sites: Vec<FlaggedSite>,
}

impl QualityReport {
    pub fn count(&self, verdict: QualityVerdict) -> usize {
        self.verdict_counts.get(&verdict).copied().unwrap_or(0)
    }

    pub fn percentage(&self, verdict: QualityVerdict) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        100.0 * self.count(verdict) as f64 / self.total_records as f64
    }
}

/// A site whose verdict is anything but complete.
#[derive(Debug, Clone)]
pub struct FlaggedSite {
    pub site_id: String,
    pub site_name: Option<String>,
    pub verdict: QualityVerdict,
    pub summary: String,
}

/// Classifies site records and aggregates the results.
///
/// Every row is classified on its own; the output has one entry per input
/// row in the same order.
pub struct QualityChecker {
    summary_site_limit: usize,
}

impl QualityChecker {
    pub fn new() -> Self {
        Self {
            summary_site_limit: 10,
        }
    }

    pub fn with_summary_site_limit(mut self, limit: usize) -> Self {
        self.summary_site_limit = limit;
        self
    }

    pub fn classify(&self, site: &SiteRecord) -> SiteClassification {
        SiteClassification {
            capacity: categorize_capacity(site.installed_capacity),
            performance: categorize_performance(site.performance),
            geo: categorize_coordinates(site.latitude, site.longitude),
            commitments: categorize_commitments(site),
            utility_id: categorize_utility_id(
                site.utility_id.as_deref(),
                site.site_country.as_deref(),
            ),
            missing: missing_issues(site),
            mismatch: mismatch_issues(site),
        }
    }

    pub fn classify_all(&self, sites: &[SiteRecord]) -> Vec<SiteClassification> {
        sites.iter().map(|site| self.classify(site)).collect()
    }

    /// Aggregate counts over an already classified table.
    pub fn build_report(
        &self,
        sites: &[SiteRecord],
        classifications: &[SiteClassification],
    ) -> QualityReport {
        let mut report = QualityReport {
            generated_at: Local::now(),
            total_records: classifications.len(),
            verdict_counts: HashMap::new(),
            capacity_counts: BTreeMap::new(),
            performance_counts: BTreeMap::new(),
            geo_counts: BTreeMap::new(),
            commitments_counts: BTreeMap::new(),
            utility_id_counts: BTreeMap::new(),
            missing_field_counts: BTreeMap::new(),
            mismatch_field_counts: BTreeMap::new(),
            flagged_sites: Vec::new(),
        };

        for (site, classification) in sites.iter().zip(classifications) {
            let verdict = classification.verdict();
            *report.verdict_counts.entry(verdict).or_default() += 1;

            *report.capacity_counts.entry(classification.capacity.label()).or_default() += 1;
            *report.performance_counts.entry(classification.performance.label()).or_default() += 1;
            *report.geo_counts.entry(classification.geo.label()).or_default() += 1;
            *report.commitments_counts.entry(classification.commitments.label()).or_default() += 1;
            *report.utility_id_counts.entry(classification.utility_id.label()).or_default() += 1;

            for field in &classification.missing {
                *report.missing_field_counts.entry(field.display_name()).or_default() += 1;
            }
            for field in &classification.mismatch {
                *report.mismatch_field_counts.entry(field.display_name()).or_default() += 1;
            }

            if verdict != QualityVerdict::Complete {
                report.flagged_sites.push(FlaggedSite {
                    site_id: site.site_id.clone(),
                    site_name: site.site_name.clone(),
                    verdict,
                    summary: classification.issue_summary(),
                });
            }
        }

        report
    }

    /// Classify and aggregate in one pass.
    pub fn check(&self, sites: &[SiteRecord]) -> (Vec<SiteClassification>, QualityReport) {
        let classifications = self.classify_all(sites);
        let report = self.build_report(sites, &classifications);
        (classifications, report)
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &QualityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Data Quality Report ===\n");
        summary.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        summary.push_str(&format!("Total Sites: {}\n", report.total_records));

        for verdict in QualityVerdict::all() {
            summary.push_str(&format!(
                "{}: {} ({:.1}%)\n",
                verdict.label(),
                report.count(verdict),
                report.percentage(verdict)
            ));
        }

        let sections = [
            ("Installed Capacity", &report.capacity_counts),
            ("Performance", &report.performance_counts),
            ("Geo Coordinates", &report.geo_counts),
            ("Monthly Commitments", &report.commitments_counts),
            ("Utility ID Format", &report.utility_id_counts),
            ("Missing Fields", &report.missing_field_counts),
            ("Mismatched Fields", &report.mismatch_field_counts),
        ];
        for (title, counts) in sections {
            if counts.is_empty() {
                continue;
            }
            summary.push_str(&format!("\n{}:\n", title));
            for (label, count) in counts {
                summary.push_str(&format!("  {}: {}\n", label, count));
            }
        }

        if !report.flagged_sites.is_empty() {
            summary.push_str(&format!(
                "\nFlagged Sites: {} (showing up to {})\n",
                report.flagged_sites.len(),
                self.summary_site_limit
            ));
            for (i, site) in report
                .flagged_sites
                .iter()
                .take(self.summary_site_limit)
                .enumerate()
            {
                summary.push_str(&format!(
                    "  {}. Site {} ({}): {}\n",
                    i + 1,
                    site.site_id,
                    site.site_name.as_deref().unwrap_or("unnamed"),
                    site.summary
                ));
            }
        }

        summary
    }
}

impl Default for QualityChecker {
    fn default() -> Self {
        Self::new()
    }
}
