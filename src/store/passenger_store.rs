//! In-memory passenger store.
//!
//! Owns the `passenger_id` -> record mapping for the process lifetime and is
//! the sole point of truth for passenger data. Natural order is insertion
//! order, which the hash map alone cannot carry, so an order vector is kept
//! alongside it. All state lives behind one async `RwLock`: mutating
//! operations take the write guard, reads the read guard, so concurrent
//! creates with distinct ids serialize without record loss and readers never
//! observe a partial mutation.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use crate::domain::passenger::{validate, FieldViolation, Passenger, Sex};
use crate::domain::stats::PassengerStatistics;
use crate::store::error::StoreError;

#[derive(Default)]
struct StoreInner {
    records: HashMap<i64, Passenger>,
    order: Vec<i64>,
}

impl StoreInner {
    fn in_order(&self) -> impl Iterator<Item = &Passenger> + Clone {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

/// Optional search predicates, combined with logical AND.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Case-insensitive substring match on the name.
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub survived: Option<i64>,
    pub pclass: Option<i64>,
    pub min_age: Option<f64>,
    pub max_age: Option<f64>,
    pub min_fare: Option<f64>,
    pub max_fare: Option<f64>,
    /// Result cap; defaults to 20.
    pub limit: Option<usize>,
}

impl SearchFilter {
    pub const DEFAULT_LIMIT: usize = 20;

    fn matches(&self, p: &Passenger) -> bool {
        if let Some(name) = &self.name {
            if !p.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(sex) = self.sex {
            if p.sex != sex {
                return false;
            }
        }
        if let Some(survived) = self.survived {
            if p.survived != survived {
                return false;
            }
        }
        if let Some(pclass) = self.pclass {
            if p.pclass != pclass {
                return false;
            }
        }
        // Range bounds are inclusive and only applied when present; a record
        // without the field cannot satisfy an applied bound.
        if let Some(min_age) = self.min_age {
            match p.age {
                Some(age) if age >= min_age => {}
                _ => return false,
            }
        }
        if let Some(max_age) = self.max_age {
            match p.age {
                Some(age) if age <= max_age => {}
                _ => return false,
            }
        }
        if let Some(min_fare) = self.min_fare {
            match p.fare {
                Some(fare) if fare >= min_fare => {}
                _ => return false,
            }
        }
        if let Some(max_fare) = self.max_fare {
            match p.fare {
                Some(fare) if fare <= max_fare => {}
                _ => return false,
            }
        }
        true
    }
}

pub struct PassengerStore {
    inner: RwLock<StoreInner>,
}

impl PassengerStore {
    /// Creates an empty store. Process-wide state, no persistence: a restart
    /// loses all mutations.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Inserts a fully-specified record. The id must not already be live.
    pub async fn create(&self, passenger: Passenger) -> Result<Passenger, StoreError> {
        validate::validate(&passenger).map_err(StoreError::Validation)?;

        let mut inner = self.inner.write().await;
        if inner.records.contains_key(&passenger.passenger_id) {
            return Err(StoreError::DuplicateKey(passenger.passenger_id));
        }
        inner.order.push(passenger.passenger_id);
        inner.records.insert(passenger.passenger_id, passenger.clone());
        Ok(passenger)
    }

    /// Same as [`create`](Self::create) but from an unstructured key/value
    /// mapping, validated field by field before acceptance.
    pub async fn create_from_untyped(&self, value: &JsonValue) -> Result<Passenger, StoreError> {
        let passenger = validate::from_untyped(value).map_err(StoreError::MalformedInput)?;
        self.create(passenger).await
    }

    pub async fn get(&self, id: i64) -> Result<Passenger, StoreError> {
        let inner = self.inner.read().await;
        inner.records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Records in natural order, starting at `offset`, bounded by `limit`
    /// (absent limit means everything from the offset to the end). An offset
    /// past the end yields an empty sequence, never an error.
    pub async fn list(&self, limit: Option<usize>, offset: usize) -> Vec<Passenger> {
        let inner = self.inner.read().await;
        inner
            .in_order()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Records matching every supplied filter, in natural order, capped at
    /// the filter's limit. No match is an empty sequence, not an error.
    pub async fn search(&self, filter: &SearchFilter) -> Vec<Passenger> {
        let inner = self.inner.read().await;
        inner
            .in_order()
            .filter(|p| filter.matches(p))
            .take(filter.limit.unwrap_or(SearchFilter::DEFAULT_LIMIT))
            .cloned()
            .collect()
    }

    /// The `n` records with the highest fare, descending. Records without a
    /// fare sort last; ties keep insertion order (stable sort). Range
    /// checking of `n` belongs to the caller layer.
    pub async fn top_by_fare(&self, n: usize) -> Vec<Passenger> {
        let inner = self.inner.read().await;
        let mut passengers: Vec<Passenger> = inner.in_order().cloned().collect();
        passengers.sort_by(|a, b| match (a.fare, b.fare) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        passengers.truncate(n);
        passengers
    }

    /// Replaces every field of the record at `id`. The new record's id must
    /// equal `id`; the id must already exist.
    pub async fn update_full(&self, id: i64, passenger: Passenger) -> Result<Passenger, StoreError> {
        if passenger.passenger_id != id {
            return Err(StoreError::Validation(vec![FieldViolation::new(
                "PassengerId",
                "must match the id in the path",
            )]));
        }
        validate::validate(&passenger).map_err(StoreError::Validation)?;

        let mut inner = self.inner.write().await;
        if !inner.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        inner.records.insert(id, passenger.clone());
        Ok(passenger)
    }

    /// Merges `changes` onto the existing record, then revalidates the whole
    /// merged result before it replaces the stored one.
    pub async fn update_partial(
        &self,
        id: i64,
        changes: &serde_json::Map<String, JsonValue>,
    ) -> Result<Passenger, StoreError> {
        let mut inner = self.inner.write().await;
        let current = inner.records.get(&id).ok_or(StoreError::NotFound(id))?;

        let merged = validate::merge(current, changes).map_err(StoreError::Validation)?;
        validate::validate(&merged).map_err(StoreError::Validation)?;

        inner.records.insert(id, merged.clone());
        Ok(merged)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.records.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        inner.order.retain(|&other| other != id);
        Ok(())
    }

    /// Clears every record unconditionally; a no-op if already empty.
    pub async fn delete_all(&self) {
        let mut inner = self.inner.write().await;
        inner.records.clear();
        inner.order.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Aggregate figures over all currently stored records.
    pub async fn statistics(&self) -> PassengerStatistics {
        let inner = self.inner.read().await;
        PassengerStatistics::compute(inner.in_order())
    }
}

impl Default for PassengerStore {
    fn default() -> Self {
        Self::new()
    }
}
