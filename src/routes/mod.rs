use axum::Router;

mod health_check;
mod permission;
mod role;
mod session;
mod swagger;
mod user_actions;
mod version;

pub fn routes() -> Router {
    Router::new()
        .merge(health_check::route())
        .merge(swagger::route())
        .merge(version::route())
        .merge(permission::route())
        .merge(role::route())
        .merge(session::route())
        .merge(user_actions::route())
}
