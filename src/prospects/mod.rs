pub mod loader;
pub mod types;

pub use loader::{load_companies, parse_companies};
pub use types::CompanyRecord;
