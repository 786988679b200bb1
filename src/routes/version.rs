use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

static VERSION_TAG: &str = "version";

pub fn route() -> Router {
    Router::new()
        .route("/version", get(version))
        .route("/version-details", get(version_details))
}

#[derive(Serialize, ToSchema)]
pub struct VersionDetails {
    version: &'static str,
    version_bits: VersionBits,
    git_commit_hash: &'static str,
    repository: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct VersionBits {
    major: &'static str,
    minor: &'static str,
    patch: &'static str,
}

/// Crate version of the running service
#[utoipa::path(get, path = "/version", tag = VERSION_TAG, responses((status = 200, description = "OK", body = String)))]
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version, build commit and repository of the running service
#[utoipa::path(get, path = "/version-details", tag = VERSION_TAG, responses((status = 200, description = "OK", body = VersionDetails)))]
pub async fn version_details() -> Json<VersionDetails> {
    Json(VersionDetails {
        version: env!("CARGO_PKG_VERSION"),
        version_bits: VersionBits {
            major: env!("CARGO_PKG_VERSION_MAJOR"),
            minor: env!("CARGO_PKG_VERSION_MINOR"),
            patch: env!("CARGO_PKG_VERSION_PATCH"),
        },
        git_commit_hash: env!("GIT_COMMIT_HASH"),
        repository: env!("CARGO_PKG_REPOSITORY"),
    })
}

#[tokio::test]
async fn version_details_match_package() {
    use super::testing::get;

    let (_, version) = get("/version").await;
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
    let (status, details) = get("/version-details").await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(details["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(details["version_bits"]["major"], env!("CARGO_PKG_VERSION_MAJOR"));
}
