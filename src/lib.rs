pub mod omni_error;
pub mod routes;
pub mod setup;
pub mod users;
