//! HTTP request handlers for the dataset corrector API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::correction::{check_dataset, clean_dataset};

use super::request::CleanRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/clean", post(clean_handler))
        .route("/violations", post(violations_handler))
        .with_state(state)
}

/// Handler for POST /clean endpoint.
///
/// Runs the full cleaning pipeline over the submitted rows and returns the
/// cleaning result.
async fn clean_handler(
    State(state): State<AppState>,
    payload: Result<Json<CleanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clean request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match clean_dataset(request.to_table(), state.rules()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %result.run_id,
                rows_read = result.summary.rows_read,
                rows_written = result.summary.rows_written,
                duration_us = result.audit_trace.duration_us,
                "Cleaning completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Cleaning failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /violations endpoint.
///
/// Reports rule violations in the submitted rows without correcting them.
async fn violations_handler(
    State(state): State<AppState>,
    payload: Result<Json<CleanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing violations request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match check_dataset(request.to_table(), state.rules()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                rows_checked = report.rows_checked,
                violations = report.violations.len(),
                "Violation check completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Violation check failed"
            );
            error_response(err.into())
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    error_response(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesLoader;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let loader = RulesLoader::load("./config/default").expect("Failed to load rules");
        AppState::new(loader.into_rules())
    }

    fn post(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn valid_rows() -> Value {
        json!({
            "rows": [
                {"Customer_ID": 1, "Age": 30, "Education_Level": "Degree",
                 "Employment_Status": "Employed", "Years_Driving": 50},
                {"Customer_ID": 2, "Age": 20, "Education_Level": "Postgraduate",
                 "Employment_Status": "Student", "Years_Driving": 1},
                {"Customer_ID": null, "Age": null, "Education_Level": null,
                 "Employment_Status": null, "Years_Driving": null}
            ]
        })
    }

    #[tokio::test]
    async fn test_clean_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post("/clean", valid_rows().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result = body_json(response).await;
        assert_eq!(result["summary"]["rows_read"], 3);
        assert_eq!(result["summary"]["empty_rows_dropped"], 1);
        assert_eq!(result["summary"]["education_rows_dropped"], 1);
        assert_eq!(result["summary"]["rows_written"], 1);
        assert_eq!(result["records"][0]["Customer_ID"], "1");
        assert_eq!(result["records"][0]["Years_Driving"], 12);
        assert_eq!(result["audit_trace"]["steps"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_clean_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post("/clean", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_clean_without_rows_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post("/clean", "{}".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_clean_row_without_age_returns_missing_field() {
        let router = create_router(create_test_state());
        let body = json!({
            "rows": [
                {"Education_Level": "Degree", "Employment_Status": "Employed",
                 "Years_Driving": 3}
            ]
        });

        let response = router
            .oneshot(post("/clean", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MISSING_FIELD");
        assert!(error.message.contains("Age"));
    }

    #[tokio::test]
    async fn test_clean_non_integer_age_returns_invalid_field() {
        let router = create_router(create_test_state());
        let body = json!({
            "rows": [
                {"Age": "thirty", "Education_Level": "Degree",
                 "Employment_Status": "Employed", "Years_Driving": 3}
            ]
        });

        let response = router
            .oneshot(post("/clean", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "INVALID_FIELD");
    }

    #[tokio::test]
    async fn test_clean_without_content_type_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/clean")
                    .body(Body::from(valid_rows().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_violations_reports_without_correcting() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post("/violations", valid_rows().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["rows_checked"], 2);
        assert_eq!(
            report["violations"],
            json!([
                {"row": 0, "kind": "driving_years_exceed_age",
                 "message": "50 driving years exceed the maximum of 12 at age 30"},
                {"row": 1, "kind": "education_below_threshold",
                 "message": "Age 20 is below 21 for 'Postgraduate'"}
            ])
        );
    }
}
