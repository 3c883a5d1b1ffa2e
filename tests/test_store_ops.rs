//! Store-level tests for the passenger store's CRUD and query contract.

use std::sync::Arc;

use serde_json::json;
use titanic_service::{Embarked, Passenger, PassengerStore, SearchFilter, Sex, StoreError};

fn passenger(id: i64) -> Passenger {
    Passenger {
        passenger_id: id,
        survived: 0,
        pclass: 3,
        name: format!("Passenger {}", id),
        sex: Sex::Male,
        age: Some(30.0),
        sib_sp: 0,
        parch: 0,
        ticket: format!("T-{}", id),
        fare: Some(10.0),
        cabin: None,
        embarked: Some(Embarked::S),
    }
}

#[tokio::test]
async fn create_then_get_returns_equal_record() {
    let store = PassengerStore::new();
    let original = passenger(1);

    store.create(original.clone()).await.unwrap();
    let fetched = store.get(1).await.unwrap();

    assert_eq!(fetched, original);
}

#[tokio::test]
async fn duplicate_create_is_rejected_and_preserves_original() {
    let store = PassengerStore::new();
    store.create(passenger(1)).await.unwrap();

    let mut intruder = passenger(1);
    intruder.name = "Someone Else".to_string();

    let err = store.create(intruder).await.unwrap_err();
    assert_eq!(err, StoreError::DuplicateKey(1));
    assert_eq!(store.get(1).await.unwrap().name, "Passenger 1");
}

#[tokio::test]
async fn out_of_range_fields_are_rejected_atomically() {
    let store = PassengerStore::new();

    let mut too_old = passenger(1);
    too_old.age = Some(130.0);
    assert!(matches!(
        store.create(too_old).await.unwrap_err(),
        StoreError::Validation(_)
    ));

    let mut bad_class = passenger(2);
    bad_class.pclass = 4;
    assert!(matches!(
        store.create(bad_class).await.unwrap_err(),
        StoreError::Validation(_)
    ));

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn update_full_rejects_id_mismatch_and_absent_id() {
    let store = PassengerStore::new();
    store.create(passenger(1)).await.unwrap();

    let err = store.update_full(1, passenger(2)).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store.update_full(7, passenger(7)).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound(7));
}

#[tokio::test]
async fn delete_then_get_signals_not_found() {
    let store = PassengerStore::new();
    store.create(passenger(1)).await.unwrap();

    store.delete(1).await.unwrap();
    assert_eq!(store.get(1).await.unwrap_err(), StoreError::NotFound(1));
}

#[tokio::test]
async fn partial_update_changes_only_fare() {
    let store = PassengerStore::new();
    let original = passenger(1);
    store.create(original.clone()).await.unwrap();

    let changes = json!({ "Fare": 500.0 });
    let updated = store
        .update_partial(1, changes.as_object().unwrap())
        .await
        .unwrap();

    let mut expected = original;
    expected.fare = Some(500.0);
    assert_eq!(updated, expected);
}

#[tokio::test]
async fn partial_update_cannot_change_passenger_id() {
    let store = PassengerStore::new();
    store.create(passenger(1)).await.unwrap();

    let changes = json!({ "PassengerId": 99 });
    let err = store
        .update_partial(1, changes.as_object().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    // Supplying the current id is accepted and ignored.
    let changes = json!({ "passenger_id": 1, "fare": 12.5 });
    let updated = store
        .update_partial(1, changes.as_object().unwrap())
        .await
        .unwrap();
    assert_eq!(updated.fare, Some(12.5));
}

#[tokio::test]
async fn partial_update_revalidates_merged_record() {
    let store = PassengerStore::new();
    store.create(passenger(1)).await.unwrap();

    let changes = json!({ "Age": 300 });
    let err = store
        .update_partial(1, changes.as_object().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.get(1).await.unwrap().age, Some(30.0));
}

#[tokio::test]
async fn top_by_fare_orders_descending_with_stable_ties() {
    let store = PassengerStore::new();
    for (id, fare) in [(1, 10.0), (2, 50.0), (3, 7.0), (4, 50.0)] {
        let mut p = passenger(id);
        p.fare = Some(fare);
        store.create(p).await.unwrap();
    }

    let top: Vec<i64> = store
        .top_by_fare(3)
        .await
        .into_iter()
        .map(|p| p.passenger_id)
        .collect();
    // Highest to lowest; the tie between 2 and 4 keeps insertion order.
    assert_eq!(top, vec![2, 4, 1]);
}

#[tokio::test]
async fn top_by_fare_sorts_absent_fares_last() {
    let store = PassengerStore::new();
    let mut no_fare = passenger(1);
    no_fare.fare = None;
    store.create(no_fare).await.unwrap();
    store.create(passenger(2)).await.unwrap();

    let top: Vec<i64> = store
        .top_by_fare(10)
        .await
        .into_iter()
        .map(|p| p.passenger_id)
        .collect();
    assert_eq!(top, vec![2, 1]);
}

#[tokio::test]
async fn search_combines_all_filters_with_and() {
    let store = PassengerStore::new();

    let mut a = passenger(1);
    a.sex = Sex::Female;
    a.age = Some(25.0);
    store.create(a).await.unwrap();

    let mut b = passenger(2);
    b.sex = Sex::Female;
    b.age = Some(40.0);
    store.create(b).await.unwrap();

    let mut c = passenger(3);
    c.sex = Sex::Male;
    c.age = Some(25.0);
    store.create(c).await.unwrap();

    let filter = SearchFilter {
        sex: Some(Sex::Female),
        min_age: Some(18.0),
        max_age: Some(30.0),
        ..SearchFilter::default()
    };
    let hits: Vec<i64> = store
        .search(&filter)
        .await
        .into_iter()
        .map(|p| p.passenger_id)
        .collect();
    assert_eq!(hits, vec![1]);

    // No match is an empty sequence, not an error.
    let filter = SearchFilter {
        min_age: Some(90.0),
        ..SearchFilter::default()
    };
    assert!(store.search(&filter).await.is_empty());
}

#[tokio::test]
async fn search_matches_name_substring_case_insensitively() {
    let store = PassengerStore::new();
    let mut p = passenger(1);
    p.name = "Braund, Mr. Owen Harris".to_string();
    store.create(p).await.unwrap();

    let filter = SearchFilter {
        name: Some("owen".to_string()),
        ..SearchFilter::default()
    };
    assert_eq!(store.search(&filter).await.len(), 1);
}

#[tokio::test]
async fn list_returns_requested_window_in_insertion_order() {
    let store = PassengerStore::new();
    for id in 1..=4 {
        store.create(passenger(id)).await.unwrap();
    }

    let window: Vec<i64> = store
        .list(Some(2), 1)
        .await
        .into_iter()
        .map(|p| p.passenger_id)
        .collect();
    assert_eq!(window, vec![2, 3]);

    // Offset past the end yields an empty sequence, never an error.
    assert!(store.list(None, 10).await.is_empty());
}

#[tokio::test]
async fn delete_all_on_empty_store_is_a_noop() {
    let store = PassengerStore::new();
    store.delete_all().await;
    assert!(store.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_distinct_ids_all_land() {
    let store = Arc::new(PassengerStore::new());

    let mut handles = Vec::new();
    for id in 1..=32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create(passenger(id)).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len().await, 32);
}

#[tokio::test]
async fn statistics_exclude_absent_optional_fields() {
    let store = PassengerStore::new();

    let mut a = passenger(1);
    a.survived = 1;
    a.pclass = 1;
    a.sex = Sex::Female;
    a.age = Some(20.0);
    a.fare = Some(100.0);
    store.create(a).await.unwrap();

    let mut b = passenger(2);
    b.age = None;
    b.fare = Some(50.0);
    store.create(b).await.unwrap();

    let mut c = passenger(3);
    c.age = Some(40.0);
    c.fare = None;
    store.create(c).await.unwrap();

    let stats = store.statistics().await;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.survival.survived, 1);
    assert_eq!(stats.survival.died, 2);
    assert_eq!(stats.by_pclass.first, 1);
    assert_eq!(stats.by_pclass.third, 2);
    assert_eq!(stats.by_sex.female, 1);
    assert_eq!(stats.by_sex.male, 2);

    assert_eq!(stats.age.count, 2);
    assert_eq!(stats.age.min, Some(20.0));
    assert_eq!(stats.age.mean, Some(30.0));
    assert_eq!(stats.age.max, Some(40.0));

    assert_eq!(stats.fare.count, 2);
    assert_eq!(stats.fare.min, Some(50.0));
    assert_eq!(stats.fare.mean, Some(75.0));
    assert_eq!(stats.fare.max, Some(100.0));
}

#[tokio::test]
async fn create_from_untyped_accepts_both_key_styles() {
    let store = PassengerStore::new();

    let stored = store
        .create_from_untyped(&json!({
            "PassengerId": 1,
            "Survived": 1,
            "Pclass": 2,
            "Name": "Nasser, Mrs. Nicholas (Adele Achem)",
            "Sex": "female",
            "Age": 14,
            "SibSp": 1,
            "Parch": 0,
            "Ticket": "237736",
            "Fare": 30.0708,
            "Embarked": "C"
        }))
        .await
        .unwrap();
    assert_eq!(stored.sex, Sex::Female);
    assert_eq!(stored.embarked, Some(Embarked::C));

    let stored = store
        .create_from_untyped(&json!({
            "passenger_id": 2,
            "survived": 0,
            "pclass": 3,
            "name": "Moran, Mr. James",
            "sex": "male",
            "sib_sp": 0,
            "parch": 0,
            "ticket": "330877",
            "fare": 8.4583,
            "embarked": "Q"
        }))
        .await
        .unwrap();
    assert_eq!(stored.age, None);
    assert_eq!(stored.embarked, Some(Embarked::Q));
}

#[tokio::test]
async fn create_from_untyped_reports_shape_problems_per_field() {
    let store = PassengerStore::new();

    let err = store
        .create_from_untyped(&json!({ "Name": "Nobody", "Sex": "robot" }))
        .await
        .unwrap_err();

    let violations = match err {
        StoreError::MalformedInput(v) => v,
        other => panic!("expected MalformedInput, got {:?}", other),
    };
    assert!(violations.iter().any(|v| v.field == "PassengerId"));
    assert!(violations.iter().any(|v| v.field == "Sex"));
    assert!(store.is_empty().await);
}
