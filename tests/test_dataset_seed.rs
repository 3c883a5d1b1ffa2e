//! Seeding the store from the bundled Titanic CSV sample.

use std::path::Path;

use titanic_service::{infra, PassengerStore};

#[tokio::test]
async fn bundled_sample_seeds_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let load = infra::dataset::load_passengers(Path::new("resources/titanic/train.csv"))?;
    assert_eq!(load.skipped, 0);
    assert_eq!(load.passengers.len(), 16);

    let store = PassengerStore::new();
    for passenger in load.passengers {
        store.create(passenger).await?;
    }
    assert_eq!(store.len().await, 16);

    // Row 6 (Moran, Mr. James) has no recorded age; the empty CSV field must
    // come through as absent, not zero.
    let moran = store.get(6).await?;
    assert_eq!(moran.age, None);

    // Absent ages stay out of the aggregates.
    let stats = store.statistics().await;
    assert_eq!(stats.total, 16);
    assert_eq!(stats.age.count, 15);
    assert_eq!(stats.by_sex.female, 9);

    // Top fare in the sample is Cumings (id 2, 71.2833).
    let top = store.top_by_fare(1).await;
    assert_eq!(top[0].passenger_id, 2);

    Ok(())
}
