pub mod database;
pub mod site_csv_reader;

pub use database::SiteRepository;
pub use site_csv_reader::SiteCsvReader;
