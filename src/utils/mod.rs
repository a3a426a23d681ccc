pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{generate_default_report_filename, organization_name, safe_organization_name};
pub use progress::ProgressReporter;
