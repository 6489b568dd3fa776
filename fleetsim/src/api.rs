//! HTTP query surface.
//!
//! A thin axum router over [`QueryService`]. All domain logic lives in the
//! query layer; handlers only parse path/query parameters and map the
//! error taxonomy onto the wire contract:
//!
//! - `GET /api/live/:driver_id`
//! - `GET /api/nearby/:driver_id?radius=<km>` (default 5)
//! - `GET /api/history/:driver_id?limit=<n>` (default 10)
//!
//! Unknown drivers and missing data both answer 404, with distinct bodies
//! so clients can tell the two apart.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::query::{QueryError, QueryService};

/// Build the API router.
pub fn router(query: QueryService) -> Router {
    Router::new()
        .route("/api/live/:driver_id", get(live_position))
        .route("/api/nearby/:driver_id", get(nearby))
        .route("/api/history/:driver_id", get(trip_history))
        .with_state(query)
}

#[derive(Debug, Deserialize)]
struct NearbyParams {
    radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<usize>,
}

async fn live_position(
    State(query): State<QueryService>,
    Path(driver_id): Path<String>,
) -> Response {
    match query.live_position(&driver_id) {
        Ok(live) => Json(live).into_response(),
        Err(QueryError::DriverNotFound) => {
            (StatusCode::NOT_FOUND, Json(json!({"error": "Driver not found"}))).into_response()
        }
        Err(QueryError::NoData) => {
            (StatusCode::NOT_FOUND, Json(json!({"message": "No data available"}))).into_response()
        }
    }
}

async fn nearby(
    State(query): State<QueryService>,
    Path(driver_id): Path<String>,
    Query(params): Query<NearbyParams>,
) -> Response {
    match query.nearby(&driver_id, params.radius) {
        Ok(report) => Json(report).into_response(),
        // The contract folds both failure modes into one body here
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Driver not found or no data"})),
        )
            .into_response(),
    }
}

async fn trip_history(
    State(query): State<QueryService>,
    Path(driver_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Response {
    match query.trip_history(&driver_id, params.limit) {
        Ok(history) => Json(history).into_response(),
        Err(_) => {
            (StatusCode::NOT_FOUND, Json(json!({"error": "Driver not found"}))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoPoint;
    use crate::reading::TelemetryReading;
    use crate::store::DriverStateStore;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{DateTime, Utc};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn start_time() -> DateTime<Utc> {
        "2026-08-30T12:00:00Z".parse().unwrap()
    }

    fn test_router(seed_readings: bool) -> Router {
        let store = Arc::new(DriverStateStore::new(
            vec!["A".to_string(), "B".to_string()],
            100,
            Duration::from_secs(600),
            start_time(),
        ));
        if seed_readings {
            store.apply(TelemetryReading::new(
                start_time(),
                GeoPoint::new(23.7254, 90.4189),
                30,
                50.0,
                "A",
            ));
            store.apply(TelemetryReading::new(
                start_time(),
                GeoPoint::new(23.7300, 90.4200),
                40,
                60.0,
                "B",
            ));
        }
        router(QueryService::new(store))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_live_endpoint_returns_position() {
        let (status, body) = get_json(test_router(true), "/api/live/A").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["driver_id"], "A");
        assert_eq!(body["speed"], 30);
        assert_eq!(body["position"]["latitude"], 23.7254);
        assert_eq!(body["position"]["longitude"], 90.4189);
        assert_eq!(body["timestamp"], "2026-08-30T12:00:00Z");
    }

    #[tokio::test]
    async fn test_live_endpoint_unknown_driver() {
        let (status, body) = get_json(test_router(true), "/api/live/nobody").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Driver not found");
    }

    #[tokio::test]
    async fn test_live_endpoint_no_data_has_distinct_body() {
        let (status, body) = get_json(test_router(false), "/api/live/A").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No data available");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_nearby_endpoint_scenario() {
        let (status, body) = get_json(test_router(true), "/api/nearby/A?radius=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["radius"], 5.0);
        assert_eq!(body["center"]["latitude"], 23.7254);

        let vehicles = body["nearby_vehicles"].as_array().unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0]["driver_id"], "B");
        assert_eq!(vehicles[0]["distance"], 0.52);
    }

    #[tokio::test]
    async fn test_nearby_endpoint_defaults_radius() {
        let (status, body) = get_json(test_router(true), "/api/nearby/A").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["radius"], 5.0);
    }

    #[tokio::test]
    async fn test_nearby_endpoint_folds_failures() {
        let (status, body) = get_json(test_router(false), "/api/nearby/A").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Driver not found or no data");

        let (status, body) = get_json(test_router(true), "/api/nearby/nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Driver not found or no data");
    }

    #[tokio::test]
    async fn test_history_endpoint_with_limit() {
        let (status, body) = get_json(test_router(true), "/api/history/A?limit=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["driver_id"], "A");
        assert_eq!(body["trip_start"], "2026-08-30T12:00:00Z");

        let positions = body["positions"].as_array().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0]["speed"], 30);
        assert_eq!(positions[0]["coordinates"]["latitude"], 23.7254);
    }

    #[tokio::test]
    async fn test_history_endpoint_unknown_driver() {
        let (status, body) = get_json(test_router(true), "/api/history/nobody").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Driver not found");
    }
}
