pub mod domain;
pub mod infra;
pub mod store;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::passenger::{Embarked, Passenger, Sex};
pub use domain::stats::PassengerStatistics;
pub use store::{PassengerStore, SearchFilter, StoreError};
