//! HTTP server setup

use axum::{http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

/// Router with request tracing and CORS (any origin, GET and POST)
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind the address from the state's config and serve until the listener fails
pub async fn start_server(state: AppState) -> Result<(), std::io::Error> {
    let config = state.config().await;
    let addr = config.listen_addr();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, chain = %config.chain, "Lock API listening");

    axum::serve(listener, create_app(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn preflight(method: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/venation/view")
            .header("origin", "https://app.nation3.org")
            .header("access-control-request-method", method)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_post_from_any_origin() {
        let response = create_app(AppState::new())
            .oneshot(preflight("POST"))
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("POST"));
        assert!(!methods.contains("DELETE"));
    }
}
