//! Passenger record mirroring the Titanic dataset schema.
//!
//! The wire format uses the dataset's original column names (`PassengerId`,
//! `Survived`, ...); snake_case field names are accepted as input aliases so
//! both key styles deserialize. Optional fields serialize as explicit nulls.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod validate;

pub use validate::FieldViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Port of embarkation: Southampton, Cherbourg or Queenstown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Embarked {
    S,
    C,
    Q,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Passenger {
    /// Unique passenger id.
    #[serde(rename = "PassengerId", alias = "passenger_id")]
    pub passenger_id: i64,
    /// 0 = died, 1 = survived.
    #[serde(rename = "Survived", alias = "survived")]
    pub survived: i64,
    /// Ticket class: 1, 2 or 3.
    #[serde(rename = "Pclass", alias = "pclass")]
    pub pclass: i64,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Sex", alias = "sex")]
    pub sex: Sex,
    /// Age in years, 0..=120 when present.
    #[serde(rename = "Age", alias = "age", default)]
    pub age: Option<f64>,
    /// Siblings / spouses aboard.
    #[serde(rename = "SibSp", alias = "sib_sp")]
    pub sib_sp: i64,
    /// Parents / children aboard.
    #[serde(rename = "Parch", alias = "parch")]
    pub parch: i64,
    #[serde(rename = "Ticket", alias = "ticket")]
    pub ticket: String,
    #[serde(rename = "Fare", alias = "fare", default)]
    pub fare: Option<f64>,
    #[serde(rename = "Cabin", alias = "cabin", default)]
    pub cabin: Option<String>,
    #[serde(rename = "Embarked", alias = "embarked", default)]
    pub embarked: Option<Embarked>,
}
