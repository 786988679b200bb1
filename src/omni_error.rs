use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::users::rules::RuleViolation;

#[derive(thiserror::Error, Debug)]
pub enum OmniError {
    #[error("Invalid role: {0:?}")]
    InvalidRole(String),
    #[error("Invalid permission: {0:?}")]
    InvalidPermission(String),
    #[error("{0}")]
    RuleViolation(#[from] RuleViolation),
}

impl OmniError {
    pub fn status_code(&self) -> StatusCode {
        use OmniError as E;
        match self {
            E::InvalidRole(_) | E::InvalidPermission(_) => StatusCode::BAD_REQUEST,
            E::RuleViolation(_) => StatusCode::FORBIDDEN,
        }
    }

    pub fn respond(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

impl IntoResponse for OmniError {
    fn into_response(self) -> Response {
        self.respond()
    }
}

#[test]
fn client_errors_map_to_status_codes() {
    assert_eq!(
        OmniError::InvalidRole("ROOT".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        OmniError::InvalidPermission("NUKE".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        OmniError::from(RuleViolation::OnlySuperAdminChangesRoles).status_code(),
        StatusCode::FORBIDDEN
    );
    let response = OmniError::InvalidRole("ROOT".into()).respond();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
