/// Installed capacity limits (kWp)
pub const MIN_NORMAL_CAPACITY_KWP: f64 = 1.0;
pub const MAX_NORMAL_CAPACITY_KWP: f64 = 2000.0;

/// Performance display buckets (%)
pub const MIN_NORMAL_PERFORMANCE: f64 = 50.0;
pub const MAX_NORMAL_PERFORMANCE: f64 = 200.0;

/// Performance above this is reported as a mismatch (%).
/// Intentionally stricter than the display bucket upper bound.
pub const PERFORMANCE_MISMATCH_THRESHOLD: f64 = 133.0;

/// Coordinate pairs (lat, lon) that are placeholders rather than real locations
pub const PLACEHOLDER_COORDINATES: [(f64, f64); 7] = [
    (0.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
];

/// Expected sun-hours values that are defaults rather than real estimates
pub const PLACEHOLDER_SUN_HOURS: [f64; 2] = [0.0, 3.5];

/// Utility ID format
pub const UTILITY_ID_LENGTH: usize = 12;
pub const ABSENT_UTILITY_IDS: [&str; 3] = ["", "0", "nan"];

/// Country whose sites are required to carry a utility ID
pub const UTILITY_ID_REQUIRED_COUNTRY: &str = "mexico";

/// Value of `monthly_commitments_flag` when the commitments column is NULL
pub const COMMITMENTS_NULL_FLAG: &str = "null";

/// Output naming
pub const OUTPUT_DIR: &str = "output";
pub const OUTPUT_FILE_PREFIX: &str = "data_quality_check_";
pub const UNKNOWN_ORGANIZATION: &str = "Unknown_Org";

/// Configuration defaults
pub const DEFAULT_SECRETS_FILE: &str = ".secrets/secrets.toml";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Connection pool sizing
pub const POOL_MAX_CONNECTIONS: u32 = 15;
pub const POOL_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const POOL_MAX_LIFETIME_SECS: u64 = 1800;
