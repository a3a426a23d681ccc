use crate::credentials::DbCredentials;
use crate::error::{QualityError, Result};
use crate::models::{Organization, SiteRecord};
use crate::utils::constants::{
    POOL_ACQUIRE_TIMEOUT_SECS, POOL_MAX_CONNECTIONS, POOL_MAX_LIFETIME_SECS,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub const ORGANIZATIONS_QUERY: &str = "SELECT id::text AS id, name FROM organizations ORDER BY name";

/// Syncable sites of one organization that have at least one inverter.
///
/// Numeric columns are cast to double precision and keys to text so the
/// result maps directly onto `SiteRecord`.
pub const SITES_QUERY: &str = r#"
SELECT
    s.id::text AS site_id,
    s.name AS site_name,
    s.country AS site_country,
    o.name AS organization,
    o.country AS organization_country,
    s.utility_id::text AS utility_id,
    s.syncable,
    EXISTS (
        SELECT 1
        FROM public.inverters i
        WHERE i.site_id = s.id
    ) AS inverters_connected,
    s.installed_capacity::float8 AS installed_capacity,
    s.performance::float8 AS performance,
    s.accumulated_energy::float8 AS accumulated_energy,
    s.latitude::float8 AS latitude,
    s.longitude::float8 AS longitude,
    s.expected_sun_hours::float8 AS expected_sun_hours,
    s.expected_annual_yield::float8 AS expected_annual_yield,
    CASE
        WHEN s.monthly_commitments IS NULL THEN 'NULL'
        ELSE 'NOT NULL'
    END AS monthly_commitments_flag,
    (s.monthly_commitments ->> 'jan')::float8 AS jan_commitment,
    (s.monthly_commitments ->> 'feb')::float8 AS feb_commitment,
    (s.monthly_commitments ->> 'mar')::float8 AS mar_commitment,
    (s.monthly_commitments ->> 'apr')::float8 AS apr_commitment,
    (s.monthly_commitments ->> 'may')::float8 AS may_commitment,
    (s.monthly_commitments ->> 'jun')::float8 AS jun_commitment,
    (s.monthly_commitments ->> 'jul')::float8 AS jul_commitment,
    (s.monthly_commitments ->> 'aug')::float8 AS aug_commitment,
    (s.monthly_commitments ->> 'sep')::float8 AS sep_commitment,
    (s.monthly_commitments ->> 'oct')::float8 AS oct_commitment,
    (s.monthly_commitments ->> 'nov')::float8 AS nov_commitment,
    (s.monthly_commitments ->> 'dec')::float8 AS dec_commitment
FROM
    public.sites s
LEFT JOIN
    public.organization_sites os ON s.id = os.site_id
LEFT JOIN
    public.organizations o ON os.organization_id = o.id
WHERE
    o.id::text = $1
    AND s.syncable = TRUE
    AND EXISTS (
        SELECT 1
        FROM public.inverters i
        WHERE i.site_id = s.id
    )
"#;

/// Read access to the sites database.
///
/// The organization list is fetched once per repository and reused.
pub struct SiteRepository {
    pool: PgPool,
    organizations: OnceCell<Vec<Organization>>,
}

impl SiteRepository {
    pub async fn connect(credentials: &DbCredentials) -> Result<Self> {
        info!(url = %credentials.redacted_url(), "connecting to database");

        let pool = PgPoolOptions::new()
            .max_connections(POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(POOL_ACQUIRE_TIMEOUT_SECS))
            .max_lifetime(Duration::from_secs(POOL_MAX_LIFETIME_SECS))
            .connect_with(credentials.connect_options())
            .await?;

        Ok(Self::with_pool(pool))
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            pool,
            organizations: OnceCell::new(),
        }
    }

    pub async fn organizations(&self) -> Result<&[Organization]> {
        let organizations = self
            .organizations
            .get_or_try_init(|| async {
                let rows = sqlx::query_as::<_, Organization>(ORGANIZATIONS_QUERY)
                    .fetch_all(&self.pool)
                    .await?;
                debug!(count = rows.len(), "fetched organizations");
                Ok::<_, QualityError>(rows)
            })
            .await?;

        Ok(organizations)
    }

    pub async fn find_organization(&self, name: &str) -> Result<Organization> {
        let organizations = self.organizations().await?;
        Organization::find_by_name(organizations, name)
            .cloned()
            .ok_or_else(|| QualityError::OrganizationNotFound(name.to_string()))
    }

    pub async fn find_organization_by_id(&self, id: &str) -> Result<Organization> {
        let organizations = self.organizations().await?;
        Organization::find_by_id(organizations, id)
            .cloned()
            .ok_or_else(|| QualityError::OrganizationNotFound(id.to_string()))
    }

    pub async fn fetch_sites(&self, organization_id: &str) -> Result<Vec<SiteRecord>> {
        let sites = sqlx::query_as::<_, SiteRecord>(SITES_QUERY)
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;

        info!(organization_id, count = sites.len(), "fetched site records");
        Ok(sites)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
