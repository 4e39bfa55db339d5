// File: services/unenroll_backend/src/lib.rs
use axum::{
    extract::Request,
    http::{header, HeaderName, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use unenroll_common::UnenrollError;
use unenroll_config::AppConfig;

/// Methods the browser may use against the API.
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::OPTIONS,
    Method::PATCH,
    Method::DELETE,
    Method::POST,
    Method::PUT,
];

fn allowed_headers() -> [HeaderName; 9] {
    [
        HeaderName::from_static("x-csrf-token"),
        HeaderName::from_static("x-requested-with"),
        header::ACCEPT,
        HeaderName::from_static("accept-version"),
        header::CONTENT_LENGTH,
        HeaderName::from_static("content-md5"),
        header::CONTENT_TYPE,
        header::DATE,
        HeaderName::from_static("x-api-version"),
    ]
}

// Credentials stay disabled: tower-http rejects them together with a wildcard origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(allowed_headers())
}

/// Answers every OPTIONS request with an empty 200, whatever the path.
async fn options_short_circuit(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

/// Assembles the full application: `/api` routes, docs, static files and the
/// cross-cutting layers.
pub fn build_app(config: Arc<AppConfig>) -> Result<Router, UnenrollError> {
    let api_router = unenroll_common::routes(config.clone())
        .merge(unenroll_apollo::routes(config.clone())?);

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use unenroll_apollo::doc::ApolloApiDoc;
        use unenroll_common::models::HealthResponse;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Unenroll API",
                version = "0.1.0",
                description = "Removes contacts from Apollo email sequences",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            paths(unenroll_common::handlers::health_handler),
            components(schemas(HealthResponse)),
            tags((name = "Health", description = "Service status")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(ApolloApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    info!("Serving static files from {}", config.server.static_dir);
    let app = app
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(middleware::from_fn(options_short_circuit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use http::Request;
    use tower::ServiceExt;
    use unenroll_config::ServerConfig;

    fn app_with_static_dir(dir: &str) -> Router {
        let config = AppConfig {
            server: ServerConfig {
                static_dir: dir.to_string(),
                ..ServerConfig::default()
            },
            ..AppConfig::default()
        };
        build_app(Arc::new(config)).unwrap()
    }

    fn app() -> Router {
        app_with_static_dir("does-not-exist")
    }

    #[tokio::test]
    async fn test_options_short_circuits_on_any_path() {
        for uri in ["/api/remove-contact", "/api/health", "/anything/else"] {
            let response = app()
                .oneshot(
                    Request::builder()
                        .method(Method::OPTIONS)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "OPTIONS {}", uri);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(bytes.is_empty());
        }
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/remove-contact")
                    .header(header::ORIGIN, "https://form.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .to_string();
        for method in ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
            assert!(methods.contains(method), "missing {} in {}", method, methods);
        }
        let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("x-csrf-token"));
        assert!(allowed.contains("content-type"));
    }

    #[tokio::test]
    async fn test_health_is_nested_under_api_with_cors() {
        let response = app()
            .oneshot(
                Request::get("/api/health")
                    .header(header::ORIGIN, "https://form.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_remove_contact_validation_through_full_stack() {
        let response = app()
            .oneshot(
                Request::post("/api/remove-contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"apiKey":"k1","campaignId":"c1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "message": "Email is required"})
        );
    }

    #[tokio::test]
    async fn test_static_files_are_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Unenroll</h1>").unwrap();
        let app = app_with_static_dir(dir.path().to_str().unwrap());

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Unenroll</h1>");
    }
}
