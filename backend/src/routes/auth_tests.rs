//! Property-based tests for session enforcement
//!
//! Every protected endpoint must answer 401 unless a valid session token
//! is presented, and the 401 must not say why.

#[cfg(test)]
mod tests {
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::testing::{foreign_jwt_service, seed_ownership_fixture, test_state};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use proptest::prelude::*;
    use tower::ServiceExt;

    /// Generate random invalid tokens
    fn invalid_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            // Empty token
            Just("".to_string()),
            // Random string (not a valid JWT)
            "[a-zA-Z0-9]{10,50}".prop_map(|s| s),
            // Malformed JWT (wrong number of parts)
            "[a-zA-Z0-9]{10}\\.[a-zA-Z0-9]{10}".prop_map(|s| s),
            // Valid format but invalid signature
            "[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}".prop_map(|s| s),
        ]
    }

    /// Generate random authorization header formats
    fn auth_header_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            // No header
            Just(None),
            // Missing Bearer prefix
            invalid_token_strategy().prop_map(Some),
            // Wrong prefix
            invalid_token_strategy().prop_map(|t| Some(format!("Basic {}", t))),
            // Bearer with invalid token
            invalid_token_strategy().prop_map(|t| Some(format!("Bearer {}", t))),
        ]
    }

    fn protected_uri_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("/api/v1/budgets"),
            Just("/api/v1/budgets/b-alice-home"),
            Just("/api/v1/budgets/b-alice-home/bank-accounts"),
            Just("/api/v1/budgets/b-alice-home/bank-accounts/ba-alice-checking"),
            Just("/api/v1/user-accounts"),
        ]
    }

    async fn get(state: AppState, uri: &str, auth_header: Option<String>) -> StatusCode {
        let mut request_builder = Request::builder().uri(uri).method("GET");
        if let Some(header) = auth_header {
            request_builder = request_builder.header("Authorization", header);
        }

        let request = request_builder.body(Body::empty()).unwrap();
        create_router(state)
            .oneshot(request)
            .await
            .unwrap()
            .status()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Unauthenticated requests to protected endpoints return 401
        #[test]
        fn prop_unauthenticated_requests_return_401(
            auth_header in auth_header_strategy(),
            uri in protected_uri_strategy(),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let status = rt.block_on(get(test_state(), uri, auth_header));

            prop_assert_eq!(
                status,
                StatusCode::UNAUTHORIZED,
                "Expected 401 for unauthenticated request"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_auth_header_returns_401() {
        assert_eq!(
            get(test_state(), "/api/v1/budgets", None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_wrong_auth_scheme_returns_401() {
        assert_eq!(
            get(
                test_state(),
                "/api/v1/budgets",
                Some("Basic dXNlcjpwYXNz".to_string())
            )
            .await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_token_signed_with_other_key_returns_401() {
        let token = foreign_jwt_service().issue("alice").unwrap();

        assert_eq!(
            get(
                test_state(),
                "/api/v1/budgets",
                Some(format!("Bearer {}", token))
            )
            .await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_expired_token_returns_401() {
        let state = test_state();
        let token = state
            .jwt()
            .issue_at("alice", Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(
            get(state, "/api/v1/budgets", Some(format!("Bearer {}", token))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_lowercase_scheme_accepted() {
        let state = test_state();
        seed_ownership_fixture(state.stores()).await;
        let token = state.jwt().issue("alice").unwrap();

        assert_eq!(
            get(state, "/api/v1/budgets", Some(format!("bearer {}", token))).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_valid_token_for_deleted_user_is_not_found() {
        // Token is genuine but the account never existed in this store
        let state = test_state();
        let token = state.jwt().issue("ghost").unwrap();

        assert_eq!(
            get(state, "/api/v1/budgets", Some(format!("Bearer {}", token))).await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_health_endpoints_need_no_session() {
        for uri in ["/ping", "/health", "/health/live", "/health/ready"] {
            assert_eq!(get(test_state(), uri, None).await, StatusCode::OK, "{}", uri);
        }
    }
}
