pub mod error;
pub mod passenger_store;

pub use error::StoreError;
pub use passenger_store::{PassengerStore, SearchFilter};
