use pretty_assertions::assert_eq;
use site_quality::models::{QualityVerdict, SiteRecord, SiteRecordBuilder};
use site_quality::processors::QualityChecker;
use site_quality::readers::SiteCsvReader;
use site_quality::writers::QualityCsvWriter;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const EXPORT: &str = "\
site_id,site_name,site_country,organization,organization_country,utility_id,syncable,inverters_connected,installed_capacity,performance,accumulated_energy,latitude,longitude,expected_sun_hours,expected_annual_yield,monthly_commitments_flag,jan_commitment,feb_commitment,mar_commitment,apr_commitment,may_commitment,jun_commitment,jul_commitment,aug_commitment,sep_commitment,oct_commitment,nov_commitment,dec_commitment
101,Plant Norte,Mexico,Sol Org,Mexico,123456789012,True,True,450,97.5,120000,25.67,-100.31,5.5,650000,NOT NULL,50000,52000,55000,56000,58000,57000,56000,55000,53000,51000,50000,49000
102,Plant Sur,Mexico,Sol Org,Mexico,,True,True,0,,0,0,0,3.5,0,NULL,,,,,,,,,,,,
103,Depot,Brazil,Sol Org,Mexico,,True,True,12,150,800,-23.55,-46.63,4.8,,NULL,,,,,,,,,,,,
104,Roof 9,,Sol Org,Mexico,98765,True,True,0.6,45,10,1,1,,,NULL,,,,,,,,,,,,
";

fn expected_labels(text: &str) -> Vec<(String, String, String, String, String, String, String)> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    reader
        .records()
        .map(|row| {
            let row = row.unwrap();
            let n = row.len();
            (
                row[n - 7].to_string(),
                row[n - 6].to_string(),
                row[n - 5].to_string(),
                row[n - 4].to_string(),
                row[n - 3].to_string(),
                row[n - 2].to_string(),
                row[n - 1].to_string(),
            )
        })
        .collect()
}

fn annotate(sites: &[SiteRecord]) -> Vec<u8> {
    let classifications = QualityChecker::new().classify_all(sites);
    QualityCsvWriter::new()
        .to_bytes(sites, &classifications)
        .unwrap()
}

#[test]
fn test_exported_table_is_annotated() {
    let sites = SiteCsvReader::new().parse_sites(EXPORT).unwrap();
    assert_eq!(sites.len(), 4);

    let text = String::from_utf8(annotate(&sites)).unwrap();
    let labels = expected_labels(&text);

    assert_eq!(
        labels[0],
        (
            "IC between 1 kWp and 2 MWp".to_string(),
            "Performance between 50% and 200%".to_string(),
            "Coordinates OK".to_string(),
            "Commitments OK".to_string(),
            "Correct (Mexico)".to_string(),
            "Data Complete".to_string(),
            String::new(),
        )
    );
    assert_eq!(
        labels[1],
        (
            "IC is 0".to_string(),
            "Performance is missing".to_string(),
            "Invalid coordinates".to_string(),
            "Missing commitments".to_string(),
            "Missing (Mexico)".to_string(),
            "Data Missing + Mismatch".to_string(),
            "Missing: Performance, Monthly Commitments, Utility ID; Mismatch: Installed Capacity, Coordinates"
                .to_string(),
        )
    );
    assert_eq!(
        labels[2],
        (
            "IC between 1 kWp and 2 MWp".to_string(),
            "Performance between 50% and 200%".to_string(),
            "Coordinates OK".to_string(),
            "Commitments OK".to_string(),
            "Missing (Other Country)".to_string(),
            "Data Mismatch".to_string(),
            "Mismatch: Performance".to_string(),
        )
    );
    assert_eq!(
        labels[3],
        (
            "IC < 1 kWp".to_string(),
            "Performance < 50%".to_string(),
            "Invalid coordinates".to_string(),
            "Missing commitments".to_string(),
            "Incorrect Format".to_string(),
            "Data Missing + Mismatch".to_string(),
            "Missing: Monthly Commitments; Mismatch: Coordinates, Utility ID".to_string(),
        )
    );
}

#[test]
fn test_reclassifying_is_byte_identical() {
    let sites = SiteCsvReader::new().parse_sites(EXPORT).unwrap();
    let first = annotate(&sites);
    let second = annotate(&sites);
    assert_eq!(first, second);

    // Feeding the annotated output back in ignores the old derived columns.
    let reread = SiteCsvReader::new()
        .parse_sites(std::str::from_utf8(&first).unwrap())
        .unwrap();
    assert_eq!(reread, sites);
    assert_eq!(annotate(&reread), first);
}

#[test]
fn test_shuffled_rows_keep_their_labels() {
    let sites = SiteCsvReader::new().parse_sites(EXPORT).unwrap();
    let checker = QualityChecker::new();
    let original = checker.classify_all(&sites);

    let order = [2, 0, 3, 1];
    let shuffled: Vec<SiteRecord> = order.iter().map(|&i| sites[i].clone()).collect();
    let reclassified = checker.classify_all(&shuffled);

    for (position, &i) in order.iter().enumerate() {
        assert_eq!(reclassified[position], original[i]);
    }
}

#[test]
fn test_utility_id_absence_outside_mexico_does_not_affect_verdict() {
    let base = SiteRecordBuilder::new("1")
        .installed_capacity(100.0)
        .performance(100.0)
        .coordinates(4.71, -74.07)
        .monthly_commitments([10.0; 12]);

    let checker = QualityChecker::new();
    let brazil = checker.classify(&base.utility_id("").site_country("Brazil").build());
    assert_eq!(brazil.verdict(), QualityVerdict::Complete);

    let mexico = checker.classify(
        &SiteRecordBuilder::new("2")
            .installed_capacity(100.0)
            .performance(100.0)
            .coordinates(4.71, -74.07)
            .monthly_commitments([10.0; 12])
            .utility_id("")
            .site_country("Mexico")
            .build(),
    );
    assert_eq!(mexico.verdict(), QualityVerdict::Missing);
    assert_eq!(mexico.issue_summary(), "Missing: Utility ID");
}

#[test]
fn test_classify_file_round_trip() -> site_quality::Result<()> {
    let mut input = NamedTempFile::new()?;
    input.write_all(EXPORT.as_bytes())?;

    let sites = SiteCsvReader::new().read_sites(input.path())?;
    let checker = QualityChecker::new();
    let (classifications, report) = checker.check(&sites);

    let output_dir = TempDir::new()?;
    let output = output_dir.path().join("report.csv");
    QualityCsvWriter::new().write_report(&sites, &classifications, &output)?;

    let written = std::fs::read_to_string(&output)?;
    assert_eq!(written.lines().count(), sites.len() + 1);
    assert!(written.lines().next().unwrap().ends_with(
        "Installed Capacity Category,Performance Category,Geo Coordinates Category,Monthly Commitments Category,Utility ID Format Category,Data Quality Flag,Data Issues Summary"
    ));

    assert_eq!(report.count(QualityVerdict::Complete), 1);
    assert_eq!(report.count(QualityVerdict::Mismatch), 1);
    assert_eq!(report.count(QualityVerdict::MissingAndMismatch), 2);
    assert_eq!(report.count(QualityVerdict::Missing), 0);
    Ok(())
}
