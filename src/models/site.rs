use serde::{Deserialize, Deserializer, Serialize};

/// Column names of a site record, in export order.
pub const SITE_COLUMNS: [&str; 28] = [
    "site_id",
    "site_name",
    "site_country",
    "organization",
    "organization_country",
    "utility_id",
    "syncable",
    "inverters_connected",
    "installed_capacity",
    "performance",
    "accumulated_energy",
    "latitude",
    "longitude",
    "expected_sun_hours",
    "expected_annual_yield",
    "monthly_commitments_flag",
    "jan_commitment",
    "feb_commitment",
    "mar_commitment",
    "apr_commitment",
    "may_commitment",
    "jun_commitment",
    "jul_commitment",
    "aug_commitment",
    "sep_commitment",
    "oct_commitment",
    "nov_commitment",
    "dec_commitment",
];

/// One installation's data-quality relevant fields, as fetched for a single organization.
///
/// Numeric fields are optional; unparseable values read from CSV become `None`
/// so that classification never sees a type error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteRecord {
    pub site_id: String,

    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_country: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub organization_country: Option<String>,
    #[serde(default)]
    pub utility_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub syncable: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub inverters_connected: Option<bool>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub installed_capacity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub performance: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub accumulated_energy: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub expected_sun_hours: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub expected_annual_yield: Option<f64>,

    /// `"NULL"` when the site has no monthly commitments, `"NOT NULL"` otherwise.
    #[serde(default)]
    pub monthly_commitments_flag: Option<String>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub jan_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub feb_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub mar_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub apr_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub may_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub jun_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub jul_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub aug_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sep_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub oct_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub nov_commitment: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub dec_commitment: Option<f64>,
}

impl SiteRecord {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }

    /// Monthly commitment figures, January first.
    pub fn monthly_commitments(&self) -> [Option<f64>; 12] {
        [
            self.jan_commitment,
            self.feb_commitment,
            self.mar_commitment,
            self.apr_commitment,
            self.may_commitment,
            self.jun_commitment,
            self.jul_commitment,
            self.aug_commitment,
            self.sep_commitment,
            self.oct_commitment,
            self.nov_commitment,
            self.dec_commitment,
        ]
    }

    /// True when the monthly commitments column was NULL in the source table.
    pub fn commitments_are_null(&self) -> bool {
        self.monthly_commitments_flag
            .as_deref()
            .map(|flag| flag.trim().eq_ignore_ascii_case(crate::utils::COMMITMENTS_NULL_FLAG))
            .unwrap_or(true)
    }

    /// Field values in `SITE_COLUMNS` order, formatted for CSV export.
    pub fn to_csv_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(SITE_COLUMNS.len());
        fields.push(self.site_id.clone());
        fields.push(text_field(&self.site_name));
        fields.push(text_field(&self.site_country));
        fields.push(text_field(&self.organization));
        fields.push(text_field(&self.organization_country));
        fields.push(text_field(&self.utility_id));
        fields.push(bool_field(self.syncable));
        fields.push(bool_field(self.inverters_connected));
        fields.push(number_field(self.installed_capacity));
        fields.push(number_field(self.performance));
        fields.push(number_field(self.accumulated_energy));
        fields.push(number_field(self.latitude));
        fields.push(number_field(self.longitude));
        fields.push(number_field(self.expected_sun_hours));
        fields.push(number_field(self.expected_annual_yield));
        fields.push(text_field(&self.monthly_commitments_flag));
        fields.extend(self.monthly_commitments().into_iter().map(number_field));
        fields
    }
}

fn text_field(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn bool_field(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}

fn number_field(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => v.to_string(),
        _ => String::new(),
    }
}

/// Accepts `true`/`false` in any case as well as `1`/`0`; anything else is `None`.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }))
}

pub struct SiteRecordBuilder {
    record: SiteRecord,
}

impl SiteRecordBuilder {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            record: SiteRecord::new(site_id),
        }
    }

    pub fn site_name(mut self, name: &str) -> Self {
        self.record.site_name = Some(name.to_string());
        self
    }

    pub fn site_country(mut self, country: &str) -> Self {
        self.record.site_country = Some(country.to_string());
        self
    }

    pub fn organization(mut self, organization: &str) -> Self {
        self.record.organization = Some(organization.to_string());
        self
    }

    pub fn utility_id(mut self, utility_id: &str) -> Self {
        self.record.utility_id = Some(utility_id.to_string());
        self
    }

    pub fn installed_capacity(mut self, kwp: f64) -> Self {
        self.record.installed_capacity = Some(kwp);
        self
    }

    pub fn performance(mut self, percent: f64) -> Self {
        self.record.performance = Some(percent);
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.record.latitude = Some(latitude);
        self.record.longitude = Some(longitude);
        self
    }

    pub fn expected_sun_hours(mut self, hours: f64) -> Self {
        self.record.expected_sun_hours = Some(hours);
        self
    }

    pub fn expected_annual_yield(mut self, kwh: f64) -> Self {
        self.record.expected_annual_yield = Some(kwh);
        self
    }

    /// Sets every monthly figure and marks the commitments column as populated.
    pub fn monthly_commitments(mut self, values: [f64; 12]) -> Self {
        let r = &mut self.record;
        r.monthly_commitments_flag = Some("NOT NULL".to_string());
        r.jan_commitment = Some(values[0]);
        r.feb_commitment = Some(values[1]);
        r.mar_commitment = Some(values[2]);
        r.apr_commitment = Some(values[3]);
        r.may_commitment = Some(values[4]);
        r.jun_commitment = Some(values[5]);
        r.jul_commitment = Some(values[6]);
        r.aug_commitment = Some(values[7]);
        r.sep_commitment = Some(values[8]);
        r.oct_commitment = Some(values[9]);
        r.nov_commitment = Some(values[10]);
        r.dec_commitment = Some(values[11]);
        self
    }

    pub fn commitments_flag(mut self, flag: &str) -> Self {
        self.record.monthly_commitments_flag = Some(flag.to_string());
        self
    }

    pub fn build(self) -> SiteRecord {
        self.record
    }
}
