//! Unit tests for `AppError` display, operator notices and conversions.

use redecom_admin::{AppError, AuthFailure};

#[test]
fn display_carries_category_prefix() {
    assert_eq!(AppError::Config("bad".into()).to_string(), "config: bad");
    assert_eq!(AppError::NotFound("demand d1".into()).to_string(), "not found: demand d1");
    assert_eq!(
        AppError::DuplicateAssignment("p1".into()).to_string(),
        "duplicate assignment: p1"
    );
    assert_eq!(AppError::RemoteWrite("x".into()).to_string(), "remote write: x");
    assert_eq!(
        AppError::Auth(AuthFailure::WrongPassword).to_string(),
        "auth: wrong_password"
    );
    assert_eq!(
        AppError::Auth(AuthFailure::Other("timeout".into())).to_string(),
        "auth: other: timeout"
    );
}

#[test]
fn auth_failure_codes_are_stable() {
    assert_eq!(AuthFailure::InvalidEmail.code(), "invalid_email");
    assert_eq!(AuthFailure::UserDisabled.code(), "user_disabled");
    assert_eq!(AuthFailure::UserNotFound.code(), "user_not_found");
    assert_eq!(AuthFailure::WrongPassword.code(), "wrong_password");
    assert_eq!(AuthFailure::EmailAlreadyInUse.code(), "email_already_in_use");
    assert_eq!(AuthFailure::Other("x".into()).code(), "other");
}

#[test]
fn each_auth_failure_has_its_own_notice() {
    let notices: Vec<String> = [
        AuthFailure::InvalidEmail,
        AuthFailure::UserDisabled,
        AuthFailure::UserNotFound,
        AuthFailure::WrongPassword,
        AuthFailure::EmailAlreadyInUse,
        AuthFailure::Other("x".into()),
    ]
    .into_iter()
    .map(|reason| AppError::Auth(reason).notice())
    .collect();

    let mut unique = notices.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), notices.len());
    assert_eq!(AppError::Auth(AuthFailure::WrongPassword).notice(), "Senha incorreta.");
}

#[test]
fn unauthorized_notice_is_permission_message() {
    assert_eq!(
        AppError::Unauthorized("x@example.org".into()).notice(),
        "Você não tem permissão para acessar este painel."
    );
}

#[test]
fn duplicate_notice_names_the_conflict() {
    assert_eq!(
        AppError::DuplicateAssignment("p1".into()).notice(),
        "Este profissional já está atribuído a esta demanda."
    );
}

#[test]
fn internal_errors_share_generic_notice() {
    let generic = "Erro interno. Tente novamente mais tarde.";
    assert_eq!(AppError::Db("locked".into()).notice(), generic);
    assert_eq!(AppError::Io("disk".into()).notice(), generic);
    assert_eq!(AppError::Config("x".into()).notice(), generic);
}

#[test]
fn toml_error_converts_to_config() {
    let err: AppError = toml::from_str::<toml::Value>("= broken")
        .expect_err("bad toml")
        .into();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn json_error_converts_to_db() {
    let err: AppError = serde_json::from_str::<Vec<String>>("not json")
        .expect_err("bad json")
        .into();
    assert!(matches!(err, AppError::Db(ref msg) if msg.starts_with("json column")));
}

#[test]
fn io_error_converts_to_io() {
    let err: AppError = std::io::Error::other("disk full").into();
    assert!(matches!(err, AppError::Io(_)));
}
