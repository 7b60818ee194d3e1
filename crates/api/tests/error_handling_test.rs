use axum::http::StatusCode;
use classdesk_api::middleware::error_handling::map_error;
use classdesk_core::errors::DeskError;
use rstest::rstest;

#[rstest]
#[case(DeskError::NotFound("missing".to_string()), StatusCode::NOT_FOUND)]
#[case(DeskError::Validation("bad".to_string()), StatusCode::BAD_REQUEST)]
#[case(DeskError::Authentication("who".to_string()), StatusCode::UNAUTHORIZED)]
#[case(DeskError::Authorization("no".to_string()), StatusCode::FORBIDDEN)]
#[case(DeskError::Api { status: 409, message: "conflict".to_string() }, StatusCode::CONFLICT)]
#[case(DeskError::Transport(eyre::eyre!("io")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: DeskError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_out_of_range_api_status_is_internal() {
    let response = map_error(DeskError::Api {
        status: 42,
        message: "odd".to_string(),
    });

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
