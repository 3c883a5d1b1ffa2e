//! CRUD and query handlers for the passenger collection.
//!
//! Static paths (`/search`, `/top/{n}`) and the dynamic `/{passenger_id}`
//! route coexist; the router gives static segments priority.

use crate::domain::passenger::{FieldViolation, Passenger};
use crate::store::{SearchFilter, StoreError};
use crate::transport::http::handlers::common::error_response;
use crate::transport::http::types::{
    json_422, AppState, ErrorBody, ListParams, SearchParams, TopPassengersResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    post,
    path = "/titanic/passengers",
    request_body = Passenger,
    responses(
        (status = 201, description = "Passenger created", body = Passenger),
        (status = 400, description = "Duplicate id or validation failure", body = ErrorBody),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorBody)
    )
)]
pub async fn create_passenger(
    State(state): State<AppState>,
    payload: Result<Json<Passenger>, JsonRejection>,
) -> impl IntoResponse {
    let Json(passenger) = match payload {
        Ok(v) => v,
        Err(e) => return json_422(e, "a full passenger record").into_response(),
    };

    match state.store.create(passenger).await {
        Ok(stored) => {
            tracing::info!(passenger_id = stored.passenger_id, "passenger created");
            (StatusCode::CREATED, Json(stored)).into_response()
        }
        Err(e) => {
            tracing::warn!("create rejected: {}", e);
            error_response(e).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/titanic/passengers/dict",
    request_body = Object,
    responses(
        (status = 201, description = "Passenger created from untyped mapping", body = Passenger),
        (status = 400, description = "Malformed payload, duplicate id or validation failure", body = ErrorBody),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorBody)
    )
)]
pub async fn create_passenger_from_dict(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(value) = match payload {
        Ok(v) => v,
        Err(e) => return json_422(e, "a passenger field mapping").into_response(),
    };

    match state.store.create_from_untyped(&value).await {
        Ok(stored) => {
            tracing::info!(passenger_id = stored.passenger_id, "passenger created from dict");
            (StatusCode::CREATED, Json(stored)).into_response()
        }
        Err(e) => {
            tracing::warn!("create from dict rejected: {}", e);
            error_response(e).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/titanic/passengers",
    params(ListParams),
    responses(
        (status = 200, description = "Passengers in insertion order", body = [Passenger])
    )
)]
pub async fn list_passengers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let passengers = state.store.list(params.limit, params.offset).await;
    Json(passengers)
}

#[utoipa::path(
    get,
    path = "/titanic/passengers/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Passengers matching every supplied filter", body = [Passenger])
    )
)]
pub async fn search_passengers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let filter: SearchFilter = params.into();
    let passengers = state.store.search(&filter).await;
    Json(passengers)
}

#[utoipa::path(
    get,
    path = "/titanic/passengers/top/{top_n}",
    params(
        ("top_n" = usize, Path, description = "Number of passengers to return (1..=100)")
    ),
    responses(
        (status = 200, description = "Top N passengers by fare, descending", body = TopPassengersResponse),
        (status = 400, description = "top_n out of range", body = ErrorBody)
    )
)]
pub async fn top_passengers(
    State(state): State<AppState>,
    Path(top_n): Path<usize>,
) -> impl IntoResponse {
    if !(1..=100).contains(&top_n) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "top_n must be between 1 and 100".to_string(),
                violations: None,
            }),
        )
            .into_response();
    }

    let passengers = state.store.top_by_fare(top_n).await;
    let count = passengers.len();
    Json(TopPassengersResponse { passengers, count }).into_response()
}

#[utoipa::path(
    get,
    path = "/titanic/top10",
    responses(
        (status = 200, description = "Top 10 passengers by fare (chatbot-compat alias)", body = TopPassengersResponse)
    )
)]
pub async fn top10_passengers(State(state): State<AppState>) -> impl IntoResponse {
    let passengers = state.store.top_by_fare(10).await;
    let count = passengers.len();
    Json(TopPassengersResponse { passengers, count })
}

#[utoipa::path(
    get,
    path = "/titanic/passengers/{passenger_id}",
    params(
        ("passenger_id" = i64, Path, description = "Passenger id")
    ),
    responses(
        (status = 200, description = "Passenger found", body = Passenger),
        (status = 404, description = "Passenger not found", body = ErrorBody)
    )
)]
pub async fn get_passenger(
    State(state): State<AppState>,
    Path(passenger_id): Path<i64>,
) -> impl IntoResponse {
    match state.store.get(passenger_id).await {
        Ok(passenger) => Json(passenger).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/titanic/stats",
    responses(
        (status = 200, description = "Aggregate figures over all stored passengers", body = crate::domain::stats::PassengerStatistics)
    )
)]
pub async fn get_statistics(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.store.statistics().await;
    Json(stats)
}

#[utoipa::path(
    put,
    path = "/titanic/passengers/{passenger_id}",
    params(
        ("passenger_id" = i64, Path, description = "Passenger id")
    ),
    request_body = Passenger,
    responses(
        (status = 200, description = "Passenger replaced", body = Passenger),
        (status = 400, description = "Id mismatch or validation failure", body = ErrorBody),
        (status = 404, description = "Passenger not found", body = ErrorBody),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorBody)
    )
)]
pub async fn update_passenger(
    State(state): State<AppState>,
    Path(passenger_id): Path<i64>,
    payload: Result<Json<Passenger>, JsonRejection>,
) -> impl IntoResponse {
    let Json(passenger) = match payload {
        Ok(v) => v,
        Err(e) => return json_422(e, "a full passenger record").into_response(),
    };

    match state.store.update_full(passenger_id, passenger).await {
        Ok(updated) => {
            tracing::info!(passenger_id, "passenger replaced");
            Json(updated).into_response()
        }
        Err(e) => {
            tracing::warn!(passenger_id, "full update rejected: {}", e);
            error_response(e).into_response()
        }
    }
}

#[utoipa::path(
    patch,
    path = "/titanic/passengers/{passenger_id}",
    params(
        ("passenger_id" = i64, Path, description = "Passenger id")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Passenger updated", body = Passenger),
        (status = 400, description = "Validation failure on the merged record", body = ErrorBody),
        (status = 404, description = "Passenger not found", body = ErrorBody),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorBody)
    )
)]
pub async fn update_passenger_partial(
    State(state): State<AppState>,
    Path(passenger_id): Path<i64>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(value) = match payload {
        Ok(v) => v,
        Err(e) => return json_422(e, "a field-to-value mapping").into_response(),
    };

    let changes = match value.as_object() {
        Some(map) => map,
        None => {
            return error_response(StoreError::MalformedInput(vec![FieldViolation::new(
                "<record>",
                "expected a JSON object",
            )]))
            .into_response();
        }
    };

    match state.store.update_partial(passenger_id, changes).await {
        Ok(updated) => {
            tracing::info!(passenger_id, "passenger patched");
            Json(updated).into_response()
        }
        Err(e) => {
            tracing::warn!(passenger_id, "partial update rejected: {}", e);
            error_response(e).into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/titanic/passengers/{passenger_id}",
    params(
        ("passenger_id" = i64, Path, description = "Passenger id")
    ),
    responses(
        (status = 204, description = "Passenger deleted"),
        (status = 404, description = "Passenger not found", body = ErrorBody)
    )
)]
pub async fn delete_passenger(
    State(state): State<AppState>,
    Path(passenger_id): Path<i64>,
) -> impl IntoResponse {
    match state.store.delete(passenger_id).await {
        Ok(()) => {
            tracing::info!(passenger_id, "passenger deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/titanic/passengers",
    responses(
        (status = 204, description = "All passengers deleted"),
        (status = 500, description = "Internal failure", body = ErrorBody)
    )
)]
pub async fn delete_all_passengers(State(state): State<AppState>) -> impl IntoResponse {
    state.store.delete_all().await;
    tracing::info!("all passengers deleted");
    StatusCode::NO_CONTENT
}
