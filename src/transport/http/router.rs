use crate::domain::passenger::{Embarked, FieldViolation, Passenger, Sex};
use crate::domain::stats::{
    ClassCounts, NumericSummary, PassengerStatistics, SexCounts, SurvivalCounts,
};
use crate::transport::http::handlers::{health, passengers};
use crate::transport::http::types::{ErrorBody, HealthResponse, TopPassengersResponse};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        passengers::create_passenger,
        passengers::create_passenger_from_dict,
        passengers::list_passengers,
        passengers::search_passengers,
        passengers::top_passengers,
        passengers::top10_passengers,
        passengers::get_passenger,
        passengers::get_statistics,
        passengers::update_passenger,
        passengers::update_passenger_partial,
        passengers::delete_passenger,
        passengers::delete_all_passengers
    ),
    components(schemas(
        Passenger,
        Sex,
        Embarked,
        FieldViolation,
        ErrorBody,
        TopPassengersResponse,
        HealthResponse,
        PassengerStatistics,
        SurvivalCounts,
        ClassCounts,
        SexCounts,
        NumericSummary
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/titanic/passengers",
            post(passengers::create_passenger)
                .get(passengers::list_passengers)
                .delete(passengers::delete_all_passengers),
        )
        .route("/titanic/passengers/dict", post(passengers::create_passenger_from_dict))
        .route("/titanic/passengers/search", get(passengers::search_passengers))
        .route("/titanic/passengers/top/:top_n", get(passengers::top_passengers))
        .route(
            "/titanic/passengers/:passenger_id",
            get(passengers::get_passenger)
                .put(passengers::update_passenger)
                .patch(passengers::update_passenger_partial)
                .delete(passengers::delete_passenger),
        )
        .route("/titanic/top10", get(passengers::top10_passengers))
        .route("/titanic/stats", get(passengers::get_statistics))
        .with_state(app_state)
}
