//! HTTP surface: router, middleware stack, and server lifecycle.

use crate::{auth::AuthConfig, cli::globals::GlobalArgs, store};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request,
    },
    routing::{get, post},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub(crate) mod handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::user_signup::signup,
        handlers::user_login::login,
        handlers::user_logout::logout,
        handlers::user_me::me,
    ),
    components(schemas(
        handlers::health::Health,
        handlers::types::SignupRequest,
        handlers::types::LoginRequest,
        handlers::types::FieldErrorsBody,
        handlers::types::MessageBody,
        handlers::types::SessionUser,
    )),
    tags(
        (name = "vestibule", description = "Username and password authentication API"),
        (name = "auth", description = "Signup, login, and session management"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String, globals: &GlobalArgs, config: AuthConfig) -> Result<()> {
    // Process-wide pool, shared with every request via Extension
    let pool = store::pool(&dsn).await?;

    let frontend_origin = frontend_origin(&config)?;
    let config = std::sync::Arc::new(config);

    // Cookies require an exact origin, not a wildcard
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(AllowOrigin::exact(frontend_origin))
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(|| async { "🗝️" }))
        .route("/user/signup", post(handlers::signup))
        .route("/user/login", post(handlers::login))
        .route("/user/logout", post(handlers::logout))
        .route("/user/me", get(handlers::me))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(globals.clone()))
                .layer(Extension(config)),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health).options(handlers::health))
        .layer(Extension(pool.clone()));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn frontend_origin(config: &AuthConfig) -> Result<HeaderValue> {
    let origin = config
        .frontend_origin()
        .context("invalid frontend base URL")?;
    HeaderValue::from_str(&origin).context("frontend origin is not a valid header value")
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_auth_route() {
        let spec = openapi();
        let paths = &spec.paths.paths;
        for path in ["/health", "/user/signup", "/user/login", "/user/logout", "/user/me"] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }

    #[test]
    fn frontend_origin_is_a_valid_header() {
        let config = AuthConfig::new("https://vestibule.dev/app".to_string());
        let origin = frontend_origin(&config).expect("origin should parse");
        assert_eq!(origin, HeaderValue::from_static("https://vestibule.dev"));
    }
}
