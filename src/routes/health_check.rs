use axum::{http::StatusCode, routing::get, Router};

static HEALTH_CHECK_TAG: &str = "health check";

pub fn route() -> Router {
    Router::new()
        .route("/live", get(live))
        .route("/health", get(health))
}

/// Used to determine whether the API is online
#[utoipa::path(get, path = "/health", tag = HEALTH_CHECK_TAG, responses((status = StatusCode::OK, description = "OK")))]
pub async fn health() -> StatusCode {
    empty()
}

/// Used to determine whether the API is online
#[utoipa::path(get, path = "/live", tag = HEALTH_CHECK_TAG, responses((status = StatusCode::OK, description = "OK")))]
pub async fn live() -> StatusCode {
    empty()
}

fn empty() -> StatusCode {
    StatusCode::OK
}

#[tokio::test]
async fn liveness_endpoints_answer_ok() {
    use super::testing::get;

    for uri in ["/live", "/health"] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::Value::String(String::new()));
    }
}
