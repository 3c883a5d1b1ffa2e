use crate::domain::passenger::{FieldViolation, Passenger, Sex};
use crate::store::{PassengerStore, SearchFilter};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PassengerStore>,
}

/// Error body shared by every failure response. `violations` carries the
/// per-field breakdown when the failure is a validation or payload problem.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Maximum number of records to return; absent means unbounded.
    pub limit: Option<usize>,
    /// Start position in natural (insertion) order.
    #[serde(default)]
    pub offset: usize,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring match on the name.
    pub name: Option<String>,
    /// Exact match: male / female.
    pub sex: Option<Sex>,
    /// Exact match: 0 or 1.
    pub survived: Option<i64>,
    /// Exact match: 1, 2 or 3.
    pub pclass: Option<i64>,
    pub min_age: Option<f64>,
    pub max_age: Option<f64>,
    pub min_fare: Option<f64>,
    pub max_fare: Option<f64>,
    /// Result cap (default 20).
    pub limit: Option<usize>,
}

impl From<SearchParams> for SearchFilter {
    fn from(params: SearchParams) -> Self {
        SearchFilter {
            name: params.name,
            sex: params.sex,
            survived: params.survived,
            pclass: params.pclass,
            min_age: params.min_age,
            max_age: params.max_age,
            min_fare: params.min_fare,
            max_fare: params.max_fare,
            limit: params.limit,
        }
    }
}

/// `{passengers: [...], count}` shape kept for chatbot compatibility.
#[derive(Serialize, Debug, ToSchema)]
pub struct TopPassengersResponse {
    pub passengers: Vec<Passenger>,
    pub count: usize,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub passenger_count: usize,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: format!("Invalid JSON body: {} (expected: {})", err, expected),
            violations: None,
        }),
    )
}
