//! Record validation.
//!
//! One canonical constraint check runs on every path into the store: typed
//! create, untyped create and the merge step of partial updates all funnel
//! through [`validate`], so no entry point can slip an invalid record past it.
//! Violations are reported per field rather than as one opaque message.

use serde_json::{Map, Value as JsonValue};

use super::{Embarked, Passenger, Sex};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Checks every field constraint of a fully-built record.
///
/// Returns all violations at once so callers can surface actionable feedback.
pub fn validate(passenger: &Passenger) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if !matches!(passenger.survived, 0 | 1) {
        violations.push(FieldViolation::new("Survived", "must be 0 or 1"));
    }
    if !matches!(passenger.pclass, 1..=3) {
        violations.push(FieldViolation::new("Pclass", "must be 1, 2 or 3"));
    }
    if passenger.name.trim().is_empty() {
        violations.push(FieldViolation::new("Name", "must not be empty"));
    }
    if let Some(age) = passenger.age {
        if !(0.0..=120.0).contains(&age) {
            violations.push(FieldViolation::new("Age", "must be between 0 and 120"));
        }
    }
    if passenger.sib_sp < 0 {
        violations.push(FieldViolation::new("SibSp", "must be >= 0"));
    }
    if passenger.parch < 0 {
        violations.push(FieldViolation::new("Parch", "must be >= 0"));
    }
    if let Some(fare) = passenger.fare {
        if !(fare >= 0.0) {
            violations.push(FieldViolation::new("Fare", "must be >= 0"));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Builds a record from an untyped key/value mapping, field by field.
///
/// Shape problems (missing required fields, values of the wrong semantic
/// type, unknown keys) are reported here; constraint checking is left to
/// [`validate`] so both entry points share it.
pub fn from_untyped(value: &JsonValue) -> Result<Passenger, Vec<FieldViolation>> {
    let map = match value.as_object() {
        Some(map) => map,
        None => {
            return Err(vec![FieldViolation::new("<record>", "expected a JSON object")]);
        }
    };

    let mut violations = Vec::new();

    let passenger_id = required_int(map, "PassengerId", "passenger_id", &mut violations);
    let survived = required_int(map, "Survived", "survived", &mut violations);
    let pclass = required_int(map, "Pclass", "pclass", &mut violations);
    let name = required_string(map, "Name", "name", &mut violations);
    let sex = required_sex(map, &mut violations);
    let age = optional_float(map, "Age", "age", &mut violations);
    let sib_sp = required_int(map, "SibSp", "sib_sp", &mut violations);
    let parch = required_int(map, "Parch", "parch", &mut violations);
    let ticket = required_string(map, "Ticket", "ticket", &mut violations);
    let fare = optional_float(map, "Fare", "fare", &mut violations);
    let cabin = optional_string(map, "Cabin", "cabin", &mut violations);
    let embarked = optional_embarked(map, &mut violations);

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(Passenger {
        passenger_id: passenger_id.unwrap_or_default(),
        survived: survived.unwrap_or_default(),
        pclass: pclass.unwrap_or_default(),
        name: name.unwrap_or_default(),
        sex: sex.unwrap_or(Sex::Male),
        age,
        sib_sp: sib_sp.unwrap_or_default(),
        parch: parch.unwrap_or_default(),
        ticket: ticket.unwrap_or_default(),
        fare,
        cabin,
        embarked,
    })
}

/// Merges a change mapping onto an existing record, field by field.
///
/// `PassengerId` is immutable: supplying a different value is a violation,
/// supplying the current one is accepted and ignored. The merged record still
/// has to pass [`validate`] before it replaces the stored one.
pub fn merge(current: &Passenger, changes: &Map<String, JsonValue>) -> Result<Passenger, Vec<FieldViolation>> {
    let mut merged = current.clone();
    let mut violations = Vec::new();

    for (key, value) in changes {
        match key.as_str() {
            "PassengerId" | "passenger_id" => match coerce_int(value) {
                Some(id) if id == current.passenger_id => {}
                Some(_) => {
                    violations.push(FieldViolation::new("PassengerId", "is immutable"));
                }
                None => {
                    violations.push(FieldViolation::new("PassengerId", "expected an integer"));
                }
            },
            "Survived" | "survived" => match coerce_int(value) {
                Some(v) => merged.survived = v,
                None => violations.push(FieldViolation::new("Survived", "expected an integer")),
            },
            "Pclass" | "pclass" => match coerce_int(value) {
                Some(v) => merged.pclass = v,
                None => violations.push(FieldViolation::new("Pclass", "expected an integer")),
            },
            "Name" | "name" => match coerce_string(value) {
                Some(v) => merged.name = v,
                None => violations.push(FieldViolation::new("Name", "expected a string")),
            },
            "Sex" | "sex" => match coerce_sex(value) {
                Some(v) => merged.sex = v,
                None => violations.push(FieldViolation::new("Sex", "expected 'male' or 'female'")),
            },
            "Age" | "age" => {
                if value.is_null() {
                    merged.age = None;
                } else {
                    match coerce_float(value) {
                        Some(v) => merged.age = Some(v),
                        None => violations.push(FieldViolation::new("Age", "expected a number")),
                    }
                }
            }
            "SibSp" | "sib_sp" => match coerce_int(value) {
                Some(v) => merged.sib_sp = v,
                None => violations.push(FieldViolation::new("SibSp", "expected an integer")),
            },
            "Parch" | "parch" => match coerce_int(value) {
                Some(v) => merged.parch = v,
                None => violations.push(FieldViolation::new("Parch", "expected an integer")),
            },
            "Ticket" | "ticket" => match coerce_string(value) {
                Some(v) => merged.ticket = v,
                None => violations.push(FieldViolation::new("Ticket", "expected a string")),
            },
            "Fare" | "fare" => {
                if value.is_null() {
                    merged.fare = None;
                } else {
                    match coerce_float(value) {
                        Some(v) => merged.fare = Some(v),
                        None => violations.push(FieldViolation::new("Fare", "expected a number")),
                    }
                }
            }
            "Cabin" | "cabin" => {
                if value.is_null() {
                    merged.cabin = None;
                } else {
                    match coerce_string(value) {
                        Some(v) => merged.cabin = Some(v),
                        None => violations.push(FieldViolation::new("Cabin", "expected a string")),
                    }
                }
            }
            "Embarked" | "embarked" => {
                if value.is_null() {
                    merged.embarked = None;
                } else {
                    match coerce_embarked(value) {
                        Some(v) => merged.embarked = Some(v),
                        None => {
                            violations.push(FieldViolation::new("Embarked", "expected 'S', 'C' or 'Q'"))
                        }
                    }
                }
            }
            other => violations.push(FieldViolation::new(other, "unknown field")),
        }
    }

    if violations.is_empty() {
        Ok(merged)
    } else {
        Err(violations)
    }
}

fn lookup<'a>(map: &'a Map<String, JsonValue>, wire: &str, alias: &str) -> Option<&'a JsonValue> {
    map.get(wire).or_else(|| map.get(alias))
}

fn required_int(
    map: &Map<String, JsonValue>,
    wire: &str,
    alias: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<i64> {
    match lookup(map, wire, alias) {
        None | Some(JsonValue::Null) => {
            violations.push(FieldViolation::new(wire, "required field is missing"));
            None
        }
        Some(value) => match coerce_int(value) {
            Some(v) => Some(v),
            None => {
                violations.push(FieldViolation::new(wire, "expected an integer"));
                None
            }
        },
    }
}

fn required_string(
    map: &Map<String, JsonValue>,
    wire: &str,
    alias: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match lookup(map, wire, alias) {
        None | Some(JsonValue::Null) => {
            violations.push(FieldViolation::new(wire, "required field is missing"));
            None
        }
        Some(value) => match coerce_string(value) {
            Some(v) => Some(v),
            None => {
                violations.push(FieldViolation::new(wire, "expected a string"));
                None
            }
        },
    }
}

fn required_sex(map: &Map<String, JsonValue>, violations: &mut Vec<FieldViolation>) -> Option<Sex> {
    match lookup(map, "Sex", "sex") {
        None | Some(JsonValue::Null) => {
            violations.push(FieldViolation::new("Sex", "required field is missing"));
            None
        }
        Some(value) => match coerce_sex(value) {
            Some(v) => Some(v),
            None => {
                violations.push(FieldViolation::new("Sex", "expected 'male' or 'female'"));
                None
            }
        },
    }
}

fn optional_float(
    map: &Map<String, JsonValue>,
    wire: &str,
    alias: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    match lookup(map, wire, alias) {
        None | Some(JsonValue::Null) => None,
        Some(value) => match coerce_float(value) {
            Some(v) => Some(v),
            None => {
                violations.push(FieldViolation::new(wire, "expected a number"));
                None
            }
        },
    }
}

fn optional_string(
    map: &Map<String, JsonValue>,
    wire: &str,
    alias: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match lookup(map, wire, alias) {
        None | Some(JsonValue::Null) => None,
        Some(value) => match coerce_string(value) {
            Some(v) => Some(v),
            None => {
                violations.push(FieldViolation::new(wire, "expected a string"));
                None
            }
        },
    }
}

fn optional_embarked(map: &Map<String, JsonValue>, violations: &mut Vec<FieldViolation>) -> Option<Embarked> {
    match lookup(map, "Embarked", "embarked") {
        None | Some(JsonValue::Null) => None,
        Some(value) => match coerce_embarked(value) {
            Some(v) => Some(v),
            None => {
                violations.push(FieldViolation::new("Embarked", "expected 'S', 'C' or 'Q'"));
                None
            }
        },
    }
}

// Scalar coercion mirrors the lenient server-side handling of the dataset
// tooling: numeric strings are accepted for numeric fields ("42" -> 42).

fn coerce_int(value: &JsonValue) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(s) = value.as_str() {
        return s.trim().parse::<i64>().ok();
    }
    None
}

fn coerce_float(value: &JsonValue) -> Option<f64> {
    if let Some(n) = value.as_f64() {
        return Some(n);
    }
    if let Some(s) = value.as_str() {
        return s.trim().parse::<f64>().ok();
    }
    None
}

fn coerce_string(value: &JsonValue) -> Option<String> {
    value.as_str().map(|s| s.to_string())
}

fn coerce_sex(value: &JsonValue) -> Option<Sex> {
    match value.as_str()?.trim().to_lowercase().as_str() {
        "male" => Some(Sex::Male),
        "female" => Some(Sex::Female),
        _ => None,
    }
}

fn coerce_embarked(value: &JsonValue) -> Option<Embarked> {
    match value.as_str()?.trim().to_uppercase().as_str() {
        "S" => Some(Embarked::S),
        "C" => Some(Embarked::C),
        "Q" => Some(Embarked::Q),
        _ => None,
    }
}
