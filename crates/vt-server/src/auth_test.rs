use super::*;
use axum::http::HeaderValue;

fn headers(authorization: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(value) = authorization {
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    }
    headers
}

#[test]
fn test_allow_all_accepts_anything() {
    assert!(AllowAll.authenticate(&headers(None)).is_ok());
    assert!(AllowAll.authenticate(&headers(Some("Bearer x"))).is_ok());
}

#[test]
fn test_bearer_accepts_known_token() {
    let auth = BearerTokenAuth::new(vec!["s3cret".to_string()]);
    assert!(auth.authenticate(&headers(Some("Bearer s3cret"))).is_ok());
}

#[test]
fn test_bearer_rejects_missing_and_unknown_tokens() {
    let auth = BearerTokenAuth::new(vec!["s3cret".to_string()]);
    assert_eq!(
        auth.authenticate(&headers(None)),
        Err(AuthError::MissingToken)
    );
    assert_eq!(
        auth.authenticate(&headers(Some("Basic s3cret"))),
        Err(AuthError::MissingToken)
    );
    assert_eq!(
        auth.authenticate(&headers(Some("Bearer nope"))),
        Err(AuthError::InvalidToken)
    );
}

#[test]
fn test_from_config() {
    assert_eq!(from_config(&AuthConfig::default()).name(), "disabled");
    let config = AuthConfig {
        tokens: vec!["t".to_string()],
    };
    assert_eq!(from_config(&config).name(), "bearer");
}
