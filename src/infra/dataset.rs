//! Titanic CSV ingestion for the optional startup seed.
//!
//! Reads the Kaggle `train.csv` column layout. The passenger record's serde
//! attributes already use the dataset's column names, so rows deserialize
//! straight into [`Passenger`]; rows that fail to parse are skipped and
//! counted rather than aborting the load.

use std::path::Path;

use crate::domain::passenger::Passenger;

pub struct DatasetLoad {
    pub passengers: Vec<Passenger>,
    pub skipped: usize,
}

pub fn load_passengers(path: &Path) -> anyhow::Result<DatasetLoad> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut passengers = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in reader.deserialize::<Passenger>().enumerate() {
        match result {
            Ok(passenger) => passengers.push(passenger),
            Err(e) => {
                skipped += 1;
                tracing::warn!("skipping dataset row {}: {}", row + 2, e);
            }
        }
    }

    Ok(DatasetLoad { passengers, skipped })
}
